//! ACE Assignment Aggregation
//!
//! Groups ordered artifacts into tasks and tasks into assignments, with
//! full and redacted JSON projections and the per-task extraction passes.
//!
//! # Core Concepts
//!
//! - [`Task`]: one gradable unit with role-keyed artifact lists
//! - [`Assignment`]: the aggregate root for one reference/template pair
//! - [`run_formula_diff_pass`] / [`run_submission_pass`]: task-boundary
//!   orchestration over a [`ace_formula::SheetSource`]
//! - [`build_definition_key`]: canonical storage lookup key
//!
//! # Example
//!
//! ```rust
//! use ace_assignment::{Assignment, AssignmentParams, DocumentType};
//!
//! let mut assignment = Assignment::new(AssignmentParams {
//!     primary_title: "Fractions Test".into(),
//!     primary_topic: "Fractions".into(),
//!     document_type: Some(DocumentType::Sheets),
//!     reference_document_id: "doc-ref".into(),
//!     template_document_id: "doc-tmpl".into(),
//!     ..AssignmentParams::default()
//! })?;
//! assignment.ensure_task("Question 1", "sheet-1");
//! assert_eq!(assignment.tasks().len(), 1);
//! # Ok::<(), ace_assignment::AssignmentError>(())
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod assignment;
mod error;
mod extract;
mod task;

pub use assignment::{build_definition_key, Assignment, AssignmentParams, DocumentType};
pub use error::AssignmentError;
pub use extract::{
    run_content_pass, run_formula_diff_pass, run_submission_pass, PageContent, PageSource,
};
pub use task::{ArtifactLists, Role, Task, BOUNDING_BOX_KEY, REFERENCE_LOCATIONS_KEY};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
