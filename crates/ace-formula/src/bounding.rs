//! Difference bounding boxes
//!
//! The bounding box is the contract the rest of the pipeline relies on to
//! know which region of a student sheet must be read: 1-based inclusive,
//! never wider or taller than necessary, always containing every recorded
//! difference.

use serde::{Deserialize, Serialize};

use crate::diff::FormulaDifference;

/// Minimal 1-based inclusive rectangle covering a difference set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    /// First row, 1-based inclusive
    pub start_row: usize,
    /// First column, 1-based inclusive
    pub start_column: usize,
    /// Last row, 1-based inclusive
    pub end_row: usize,
    /// Last column, 1-based inclusive
    pub end_column: usize,
    /// Row span
    pub num_rows: usize,
    /// Column span
    pub num_columns: usize,
}

impl BoundingBox {
    /// Derive the covering rectangle of a difference set
    ///
    /// Returns `None` for an empty set: no differences means no region to
    /// read back.
    #[must_use]
    pub fn from_differences(differences: &[FormulaDifference]) -> Option<Self> {
        let first = differences.first()?;
        let mut min_row = first.row;
        let mut max_row = first.row;
        let mut min_column = first.column;
        let mut max_column = first.column;

        for difference in &differences[1..] {
            min_row = min_row.min(difference.row);
            max_row = max_row.max(difference.row);
            min_column = min_column.min(difference.column);
            max_column = max_column.max(difference.column);
        }

        Some(Self {
            start_row: min_row + 1,
            start_column: min_column + 1,
            end_row: max_row + 1,
            end_column: max_column + 1,
            num_rows: max_row - min_row + 1,
            num_columns: max_column - min_column + 1,
        })
    }

    /// Whether a zero-based sheet coordinate falls inside the box
    #[inline]
    #[must_use]
    pub fn contains(&self, row: usize, column: usize) -> bool {
        row + 1 >= self.start_row
            && row + 1 <= self.end_row
            && column + 1 >= self.start_column
            && column + 1 <= self.end_column
    }

    /// Translate a zero-based sheet coordinate to box-relative coordinates
    ///
    /// Returns `None` for coordinates outside the box.
    #[inline]
    #[must_use]
    pub fn relative(&self, row: usize, column: usize) -> Option<(usize, usize)> {
        if self.contains(row, column) {
            Some((row - (self.start_row - 1), column - (self.start_column - 1)))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff(row: usize, column: usize) -> FormulaDifference {
        FormulaDifference {
            row,
            column,
            normalized_formula: "=X".to_string(),
        }
    }

    #[test]
    fn empty_difference_set_has_no_box() {
        assert_eq!(BoundingBox::from_differences(&[]), None);
    }

    #[test]
    fn single_difference_yields_unit_box() {
        let bounds = BoundingBox::from_differences(&[diff(2, 4)]).unwrap();
        assert_eq!(
            bounds,
            BoundingBox {
                start_row: 3,
                start_column: 5,
                end_row: 3,
                end_column: 5,
                num_rows: 1,
                num_columns: 1,
            }
        );
    }

    #[test]
    fn box_spans_the_extremes() {
        let bounds =
            BoundingBox::from_differences(&[diff(1, 7), diff(4, 2), diff(3, 3)]).unwrap();
        assert_eq!(bounds.start_row, 2);
        assert_eq!(bounds.end_row, 5);
        assert_eq!(bounds.start_column, 3);
        assert_eq!(bounds.end_column, 8);
        assert_eq!(bounds.num_rows, 4);
        assert_eq!(bounds.num_columns, 6);
    }

    #[test]
    fn contains_checks_zero_based_coordinates() {
        let bounds = BoundingBox::from_differences(&[diff(1, 1), diff(2, 2)]).unwrap();
        assert!(bounds.contains(1, 1));
        assert!(bounds.contains(2, 2));
        assert!(bounds.contains(1, 2));
        assert!(!bounds.contains(0, 1));
        assert!(!bounds.contains(3, 2));
    }

    #[test]
    fn relative_translates_into_box_coordinates() {
        let bounds = BoundingBox::from_differences(&[diff(2, 3), diff(4, 5)]).unwrap();
        assert_eq!(bounds.relative(2, 3), Some((0, 0)));
        assert_eq!(bounds.relative(4, 5), Some((2, 2)));
        assert_eq!(bounds.relative(0, 0), None);
    }

    #[test]
    fn serde_uses_camel_case_fields() {
        let bounds = BoundingBox::from_differences(&[diff(0, 0)]).unwrap();
        let json = serde_json::to_value(bounds).unwrap();
        assert_eq!(json["startRow"], 1);
        assert_eq!(json["numColumns"], 1);
    }
}
