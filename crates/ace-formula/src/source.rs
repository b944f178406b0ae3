//! Connector seam for spreadsheet-backed documents
//!
//! The engine never talks to host document APIs. It consumes primitive
//! string grids through [`SheetSource`]; the live connectors that implement
//! it live outside this workspace.

use crate::bounding::BoundingBox;

/// Errors surfaced by a document-source connector
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The document or page could not be opened
    #[error("document unavailable: {document_id}/{page_id}")]
    Unavailable {
        document_id: String,
        page_id: String,
    },

    /// The host API rejected or failed the read
    #[error("read failed: {0}")]
    ReadFailed(String),
}

/// Blocking read access to a spreadsheet-like document
///
/// Implementations wrap host document APIs. Both calls are blocking I/O;
/// everything downstream of them is synchronous and CPU-bound.
pub trait SheetSource {
    /// Extract the full used grid of a sheet tab
    ///
    /// Returns `None` when the tab exists but holds no content.
    ///
    /// # Errors
    /// Returns [`SourceError`] when the document or tab cannot be read.
    fn extract_grid(
        &self,
        document_id: &str,
        page_id: &str,
    ) -> Result<Option<Vec<Vec<String>>>, SourceError>;

    /// Read exactly the bounding-box region of a sheet tab
    ///
    /// The returned grid is `num_rows` × `num_columns`; implementations must
    /// not read outside the box. This call is what bounds submission I/O to
    /// the expected-difference region regardless of sheet size.
    ///
    /// # Errors
    /// Returns [`SourceError`] when the region cannot be read.
    fn read_region(
        &self,
        document_id: &str,
        page_id: &str,
        bounds: &BoundingBox,
    ) -> Result<Vec<Vec<String>>, SourceError>;
}
