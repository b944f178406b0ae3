//! Cell normalization and grid trimming
//!
//! Both operations are pure: they return new grids and never alias the raw
//! content they were given. Ragged rows are legal everywhere; a missing cell
//! reads as [`Cell::Empty`].

use crate::content::Cell;

/// Normalize a single cell
///
/// Numbers pass through unchanged; empty values stay empty; text is trimmed,
/// and text that trims to nothing becomes [`Cell::Empty`].
#[must_use]
pub fn normalize_cell(cell: &Cell) -> Cell {
    match cell {
        Cell::Empty => Cell::Empty,
        Cell::Number(n) => Cell::Number(*n),
        Cell::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Cell::Empty
            } else {
                Cell::Text(trimmed.to_string())
            }
        }
    }
}

/// Normalize every cell of a grid
#[must_use]
pub fn normalize_grid(rows: &[Vec<Cell>]) -> Vec<Vec<Cell>> {
    rows.iter()
        .map(|row| row.iter().map(normalize_cell).collect())
        .collect()
}

/// Trim a grid to the smallest rectangle with content in every border
/// row/column
///
/// Trailing all-empty rows are dropped first; then every column index that
/// is empty across all remaining rows is removed, scanning from the highest
/// index down so earlier removals don't shift later ones. Interior all-empty
/// rows survive; interior all-empty columns do not.
#[must_use]
pub fn trim_grid(rows: &[Vec<Cell>]) -> Vec<Vec<Cell>> {
    let mut grid: Vec<Vec<Cell>> = rows.to_vec();

    while grid.last().is_some_and(|row| row.iter().all(Cell::is_empty)) {
        grid.pop();
    }

    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    for col in (0..width).rev() {
        let column_empty = grid
            .iter()
            .all(|row| row.get(col).map_or(true, Cell::is_empty));
        if column_empty {
            for row in &mut grid {
                if col < row.len() {
                    row.remove(col);
                }
            }
        }
    }

    grid
}
