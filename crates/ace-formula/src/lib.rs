//! ACE Formula Comparison Engine
//!
//! Computes exactly which reference spreadsheet cells differ from the
//! template, the minimal rectangle containing them, and the box-shaped
//! grids later passes compare against.
//!
//! # Core Concepts
//!
//! - [`compare`]: reference-extent cell-by-cell diff
//! - [`FormulaDifference`]: one differing cell, zero-based coordinates
//! - [`BoundingBox`]: 1-based inclusive covering rectangle
//! - [`location_index`]: coordinate → difference lookup, built once per task
//! - [`reference_region`] / [`template_region`] / [`read_submission_region`]:
//!   box-shaped sparse grid materialization
//! - [`SheetSource`]: the connector seam; implementations live outside this
//!   workspace
//!
//! # Example
//!
//! ```rust
//! use ace_formula::{compare, BoundingBox};
//!
//! let reference = vec![vec!["=A1".to_string(), "X".to_string()]];
//! let template = vec![vec!["=A1".to_string(), "Z".to_string()]];
//!
//! let differences = compare(&reference, &template);
//! let bounds = BoundingBox::from_differences(&differences).unwrap();
//! assert_eq!((bounds.num_rows, bounds.num_columns), (1, 1));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod bounding;
mod canonical;
mod diff;
mod materialize;
mod source;

pub use bounding::BoundingBox;
pub use canonical::normalize_reference_formula;
pub use diff::{compare, location_index, location_key, FormulaDifference};
pub use materialize::{read_submission_region, reference_region, template_region};
pub use source::{SheetSource, SourceError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
