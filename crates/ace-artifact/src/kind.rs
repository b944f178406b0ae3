//! Artifact kind tags
//!
//! The kind is set at construction, never changes, and selects the
//! normalization rule applied to raw content.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Kind of extracted content an artifact holds
///
/// `Opaque` is the factory fallback for unknown or missing kind tags: the
/// artifact stores its content verbatim with no specialized normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Free text runs
    Text,
    /// Slide/document tables, rendered to Markdown
    Table,
    /// Spreadsheet grids, kept as grids with canonicalized formulas
    Spreadsheet,
    /// Image references (URL or data URL)
    Image,
    /// Unknown source kind, content passed through verbatim
    Opaque,
}

impl ArtifactKind {
    /// Stable lowercase tag, the wire and factory-dispatch form
    #[inline]
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            ArtifactKind::Text => "text",
            ArtifactKind::Table => "table",
            ArtifactKind::Spreadsheet => "spreadsheet",
            ArtifactKind::Image => "image",
            ArtifactKind::Opaque => "opaque",
        }
    }

    /// Parse a kind tag, case-insensitively
    ///
    /// Unknown or empty tags resolve to [`ArtifactKind::Opaque`] rather than
    /// failing: the factory must always produce an artifact.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "text" => ArtifactKind::Text,
            "table" => ArtifactKind::Table,
            "spreadsheet" => ArtifactKind::Spreadsheet,
            "image" => ArtifactKind::Image,
            _ => ArtifactKind::Opaque,
        }
    }
}

impl Display for ArtifactKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}
