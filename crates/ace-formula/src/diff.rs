//! Cell-by-cell grid comparison
//!
//! Comparison iterates the reference grid's extent only: the template is
//! sampled at the same coordinates and anything outside its bounds reads as
//! the empty string. Only non-empty reference cells whose raw text differs
//! from the template are recorded.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::canonical::normalize_reference_formula;

/// One reference cell that differs from the template
///
/// Coordinates are zero-based, relative to the sheet's full extent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaDifference {
    /// Zero-based row within the sheet
    pub row: usize,
    /// Zero-based column within the sheet
    pub column: usize,
    /// The engine-normalized reference formula text
    pub normalized_formula: String,
}

/// Compare a reference grid against its template
///
/// A reference cell equal to its template cell is never recorded, even when
/// both are non-empty; an empty reference cell is never recorded regardless
/// of the template. Ragged rows on either side compare as empty beyond
/// their length.
#[must_use]
pub fn compare(reference: &[Vec<String>], template: &[Vec<String>]) -> Vec<FormulaDifference> {
    let mut differences = Vec::new();
    for (row, reference_row) in reference.iter().enumerate() {
        for (column, reference_cell) in reference_row.iter().enumerate() {
            if reference_cell.is_empty() {
                continue;
            }
            let template_cell = template
                .get(row)
                .and_then(|template_row| template_row.get(column))
                .map_or("", String::as_str);
            if reference_cell != template_cell {
                differences.push(FormulaDifference {
                    row,
                    column,
                    normalized_formula: normalize_reference_formula(reference_cell),
                });
            }
        }
    }
    differences
}

/// Key a difference coordinate the way the location index does
#[inline]
#[must_use]
pub fn location_key(row: usize, column: usize) -> String {
    format!("{row},{column}")
}

/// Build the per-task coordinate → difference-index lookup
///
/// Built once per task; consumers that need the expected formula at a cell
/// (not just presence) resolve through this in O(1).
#[must_use]
pub fn location_index(differences: &[FormulaDifference]) -> IndexMap<String, usize> {
    differences
        .iter()
        .enumerate()
        .map(|(index, difference)| (location_key(difference.row, difference.column), index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ace_test_utils::string_grid;
    use pretty_assertions::assert_eq;

    #[test]
    fn records_only_differing_nonempty_reference_cells() {
        let reference = string_grid(&[&["=A1", "X"], &["", "Y"]]);
        let template = string_grid(&[&["=A1", "Z"], &["", "Y"]]);

        let differences = compare(&reference, &template);
        assert_eq!(
            differences,
            vec![FormulaDifference {
                row: 0,
                column: 1,
                normalized_formula: "X".to_string(),
            }]
        );
    }

    #[test]
    fn equal_nonempty_cells_are_never_recorded() {
        let grid = string_grid(&[&["=SUM(A1)", "5"]]);
        assert!(compare(&grid, &grid).is_empty());
    }

    #[test]
    fn template_shorter_than_reference_reads_as_empty() {
        let reference = string_grid(&[&["a", "b"], &["c"]]);
        let template = string_grid(&[&["a"]]);

        let differences = compare(&reference, &template);
        let coordinates: Vec<(usize, usize)> =
            differences.iter().map(|d| (d.row, d.column)).collect();
        assert_eq!(coordinates, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn template_wider_than_reference_is_ignored() {
        let reference = string_grid(&[&["a"]]);
        let template = string_grid(&[&["a", "extra"], &["more"]]);
        assert!(compare(&reference, &template).is_empty());
    }

    #[test]
    fn recorded_formulas_are_engine_normalized() {
        let reference = string_grid(&[&["=sum( a1 , b1 )"]]);
        let template = string_grid(&[&[""]]);

        let differences = compare(&reference, &template);
        assert_eq!(differences[0].normalized_formula, "=SUM(A1,B1)");
    }

    #[test]
    fn location_index_maps_coordinates_to_difference_order() {
        let reference = string_grid(&[&["x", "y"], &["z"]]);
        let template = string_grid(&[&["", ""], &[""]]);

        let differences = compare(&reference, &template);
        let index = location_index(&differences);

        assert_eq!(index.len(), 3);
        assert_eq!(index.get("0,0"), Some(&0));
        assert_eq!(index.get("0,1"), Some(&1));
        assert_eq!(index.get("1,0"), Some(&2));
        assert_eq!(index.get("2,0"), None);
    }

    #[test]
    fn empty_grids_compare_clean() {
        assert!(compare(&[], &[]).is_empty());
        assert!(compare(&[], &string_grid(&[&["x"]])).is_empty());
    }
}
