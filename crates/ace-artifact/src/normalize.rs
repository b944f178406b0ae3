//! Per-kind content normalization
//!
//! One pure function per [`ArtifactKind`], looked up through a dispatch
//! table. Normalization is a pure function of the raw content: applying it
//! to already-normalized content is a fixed point, and `None` always means
//! "empty/absent", which downstream grading reads as "not attempted".

use crate::content::{Cell, Content};
use crate::formula::{canonicalize_formula, is_formula};
use crate::grid::{normalize_grid, trim_grid};
use crate::kind::ArtifactKind;
use crate::markdown::render_table;

/// A kind-specific normalization rule
pub type NormalizeFn = fn(&Content) -> Option<Content>;

/// Look up the normalization rule for a kind
#[inline]
#[must_use]
pub fn normalizer_for(kind: ArtifactKind) -> NormalizeFn {
    match kind {
        ArtifactKind::Text => normalize_text,
        ArtifactKind::Table => normalize_table,
        ArtifactKind::Spreadsheet => normalize_spreadsheet,
        ArtifactKind::Image => normalize_image,
        ArtifactKind::Opaque => normalize_opaque,
    }
}

/// Normalize raw content for a kind
///
/// Absent raw content normalizes to `None` for every kind.
#[must_use]
pub fn normalize(kind: ArtifactKind, raw: Option<&Content>) -> Option<Content> {
    raw.and_then(normalizer_for(kind))
}

/// Collapse CR/LF variants to `\n` and trim; empty text is absent text.
fn normalize_text(raw: &Content) -> Option<Content> {
    let text = raw.as_text()?;
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let trimmed = unified.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(Content::Text(trimmed.to_string()))
    }
}

/// Strings are pre-rendered Markdown; grids are normalized, trimmed, and
/// rendered to a Markdown table.
fn normalize_table(raw: &Content) -> Option<Content> {
    match raw {
        Content::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(Content::Text(trimmed.to_string()))
            }
        }
        Content::Grid(rows) => {
            let trimmed = trim_grid(&normalize_grid(rows));
            render_table(&trimmed).map(Content::Text)
        }
    }
}

/// Spreadsheet content must be grid-shaped; plain strings are rejected.
/// Formula cells get the case-insensitive, literal-preserving signature.
fn normalize_spreadsheet(raw: &Content) -> Option<Content> {
    let rows = raw.as_grid()?;
    let mut grid = trim_grid(&normalize_grid(rows));
    if grid.is_empty() {
        return None;
    }
    for row in &mut grid {
        for cell in row {
            if let Cell::Text(value) = cell {
                if is_formula(value) {
                    *value = canonicalize_formula(value);
                }
            }
        }
    }
    Some(Content::Grid(grid))
}

/// Images carry a URL or data URL; only non-empty strings are accepted.
fn normalize_image(raw: &Content) -> Option<Content> {
    let text = raw.as_text()?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(Content::Text(trimmed.to_string()))
    }
}

/// Fallback kind: content passes through verbatim.
fn normalize_opaque(raw: &Content) -> Option<Content> {
    Some(raw.clone())
}
