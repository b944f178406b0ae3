//! Error types for assignment aggregation
//!
//! Only tier-one failures live here: missing required fields and malformed
//! records are caller errors and surface immediately. Connector failures
//! and normalization edge cases never reach this enum; they are logged at
//! the task boundary and degrade to absent artifacts or absent content.

/// Errors raised at assignment construction or hydration
#[derive(Debug, thiserror::Error)]
pub enum AssignmentError {
    /// A required field was missing or blank
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Year group was present but not an integer
    #[error("invalid year group: {0}")]
    InvalidYearGroup(String),

    /// The assignment record itself could not be parsed
    #[error("malformed assignment record: {0}")]
    Malformed(#[from] serde_json::Error),
}
