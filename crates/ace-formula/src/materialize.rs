//! Box-shaped grid materialization
//!
//! Reference, template, and submission artifacts for a spreadsheet task all
//! share one shape: the bounding-box rectangle, sparse-filled. Identical
//! shapes are what make the three directly comparable downstream.

use ace_artifact::Cell;

use crate::bounding::BoundingBox;
use crate::diff::FormulaDifference;
use crate::source::SheetSource;

/// Materialize the reference grid for a difference set
///
/// A `num_rows` × `num_columns` grid, `Empty` filled, with each difference's
/// normalized formula placed at its box-relative position. Differences
/// outside the box are skipped; with a box derived from the same set,
/// none are.
#[must_use]
pub fn reference_region(
    differences: &[FormulaDifference],
    bounds: &BoundingBox,
) -> Vec<Vec<Cell>> {
    let mut grid = empty_region(bounds);
    for difference in differences {
        let Some((row, column)) = bounds.relative(difference.row, difference.column) else {
            continue;
        };
        grid[row][column] = Cell::Text(difference.normalized_formula.clone());
    }
    grid
}

/// Materialize the template counterpart: same shape, every cell empty
///
/// Asserts "nothing expected here" for each difference position.
#[must_use]
pub fn template_region(bounds: &BoundingBox) -> Vec<Vec<Cell>> {
    empty_region(bounds)
}

/// Read a student's bounding-box region and materialize it
///
/// Only the box region is read, never the whole sheet. Cells are filled
/// only where the read value is non-empty; rows the source returns short or
/// missing stay empty. A connector failure is logged and yields `None` so
/// the caller skips this task's submission artifact instead of aborting
/// the run.
pub fn read_submission_region(
    source: &dyn SheetSource,
    document_id: &str,
    page_id: &str,
    bounds: &BoundingBox,
) -> Option<Vec<Vec<Cell>>> {
    let values = match source.read_region(document_id, page_id, bounds) {
        Ok(values) => values,
        Err(error) => {
            tracing::warn!(
                document_id = %document_id,
                page_id = %page_id,
                %error,
                "skipping submission region read"
            );
            return None;
        }
    };

    let mut grid = empty_region(bounds);
    for (row, grid_row) in grid.iter_mut().enumerate() {
        for (column, cell) in grid_row.iter_mut().enumerate() {
            let value = values
                .get(row)
                .and_then(|values_row| values_row.get(column))
                .map_or("", String::as_str);
            if !value.is_empty() {
                *cell = Cell::Text(value.to_string());
            }
        }
    }
    Some(grid)
}

fn empty_region(bounds: &BoundingBox) -> Vec<Vec<Cell>> {
    vec![vec![Cell::Empty; bounds.num_columns]; bounds.num_rows]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn diff(row: usize, column: usize, formula: &str) -> FormulaDifference {
        FormulaDifference {
            row,
            column,
            normalized_formula: formula.to_string(),
        }
    }

    #[test]
    fn reference_region_places_formulas_box_relative() {
        let differences = vec![diff(2, 3, "=A1"), diff(4, 5, "=B2")];
        let bounds = BoundingBox::from_differences(&differences).unwrap();

        let grid = reference_region(&differences, &bounds);
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[0].len(), 3);
        assert_eq!(grid[0][0], Cell::Text("=A1".to_string()));
        assert_eq!(grid[2][2], Cell::Text("=B2".to_string()));
        assert_eq!(grid[1][1], Cell::Empty);
    }

    #[test]
    fn out_of_box_differences_are_skipped() {
        let differences = vec![diff(1, 1, "=IN")];
        let bounds = BoundingBox::from_differences(&differences).unwrap();

        let stray = vec![diff(1, 1, "=IN"), diff(9, 9, "=OUT")];
        let grid = reference_region(&stray, &bounds);
        assert_eq!(grid, vec![vec![Cell::Text("=IN".to_string())]]);
    }

    #[test]
    fn template_region_is_all_empty_same_shape() {
        let differences = vec![diff(0, 0, "=A1"), diff(1, 2, "=B1")];
        let bounds = BoundingBox::from_differences(&differences).unwrap();

        let grid = template_region(&bounds);
        assert_eq!(grid.len(), bounds.num_rows);
        assert!(grid
            .iter()
            .all(|row| row.len() == bounds.num_columns && row.iter().all(Cell::is_empty)));
    }
}
