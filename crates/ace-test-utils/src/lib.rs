//! Testing utilities for the ACE workspace
//!
//! Shared grid builders, artifact fixtures, and an in-memory sheet source.

#![allow(missing_docs)]

use std::collections::HashMap;

use ace_artifact::{Artifact, ArtifactParams, Cell, Content};
use ace_formula::{BoundingBox, SheetSource, SourceError};

/// Build a string grid from literals
pub fn string_grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|s| (*s).to_string()).collect())
        .collect()
}

/// Build a cell grid from literals; `""` becomes [`Cell::Empty`]
pub fn cell_grid(rows: &[&[&str]]) -> Vec<Vec<Cell>> {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|s| {
                    if s.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text((*s).to_string())
                    }
                })
                .collect()
        })
        .collect()
}

/// A hashed text artifact for aggregation tests
pub fn text_artifact(page_id: &str, document_id: &str, content: &str) -> Artifact {
    let mut artifact = Artifact::text(ArtifactParams {
        page_id: page_id.to_string(),
        document_id: document_id.to_string(),
        raw_content: Some(Content::Text(content.to_string())),
        ..ArtifactParams::default()
    });
    artifact.ensure_content_hash();
    artifact
}

/// In-memory [`SheetSource`]
///
/// Stores one full grid per document id (page ids are ignored) and can be
/// forced to fail, or to answer every region read with a fixed grid.
#[derive(Debug, Default, Clone)]
pub struct FixedSheetSource {
    sheets: HashMap<String, Vec<Vec<String>>>,
    region_override: Option<Vec<Vec<String>>>,
    fail: bool,
}

impl FixedSheetSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every `read_region` call with this exact grid
    pub fn with_region(region: Vec<Vec<String>>) -> Self {
        Self {
            region_override: Some(region),
            ..Self::default()
        }
    }

    /// Fail every call
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Store the full grid for a document
    #[must_use]
    pub fn with_sheet(mut self, document_id: &str, grid: Vec<Vec<String>>) -> Self {
        self.sheets.insert(document_id.to_string(), grid);
        self
    }
}

impl SheetSource for FixedSheetSource {
    fn extract_grid(
        &self,
        document_id: &str,
        page_id: &str,
    ) -> Result<Option<Vec<Vec<String>>>, SourceError> {
        if self.fail {
            return Err(SourceError::Unavailable {
                document_id: document_id.to_string(),
                page_id: page_id.to_string(),
            });
        }
        Ok(self.sheets.get(document_id).cloned())
    }

    fn read_region(
        &self,
        document_id: &str,
        page_id: &str,
        bounds: &BoundingBox,
    ) -> Result<Vec<Vec<String>>, SourceError> {
        if self.fail {
            return Err(SourceError::ReadFailed("forced failure".to_string()));
        }
        if let Some(region) = &self.region_override {
            return Ok(region.clone());
        }
        let sheet = self
            .sheets
            .get(document_id)
            .ok_or_else(|| SourceError::Unavailable {
                document_id: document_id.to_string(),
                page_id: page_id.to_string(),
            })?;

        let mut region = Vec::with_capacity(bounds.num_rows);
        for row in (bounds.start_row - 1)..bounds.end_row {
            let mut region_row = Vec::with_capacity(bounds.num_columns);
            for column in (bounds.start_column - 1)..bounds.end_column {
                let value = sheet
                    .get(row)
                    .and_then(|sheet_row| sheet_row.get(column))
                    .cloned()
                    .unwrap_or_default();
                region_row.push(value);
            }
            region.push(region_row);
        }
        Ok(region)
    }
}
