//! ACE Artifact System
//!
//! Typed, content-addressed artifacts for extracted document content.
//!
//! # Core Concepts
//!
//! - [`Artifact`]: normalized container for one piece of extracted content
//! - [`ArtifactKind`]: the kind tag that selects the normalization rule
//! - [`Content`] / [`Cell`]: the polymorphic content model
//! - [`ContentHash`]: 32-byte Blake3 hash for content addressing
//! - [`normalize`]: per-kind pure normalization, via a dispatch table
//!
//! # Example
//!
//! ```rust
//! use ace_artifact::{Artifact, ArtifactParams, Content};
//!
//! let mut artifact = Artifact::text(ArtifactParams {
//!     page_id: "slide-3".into(),
//!     document_id: "doc-ref".into(),
//!     raw_content: Some(Content::Text("Answer:\r\n42".into())),
//!     ..ArtifactParams::default()
//! });
//! artifact.ensure_content_hash();
//! assert!(artifact.verify_hash());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod artifact;
mod content;
mod formula;
mod grid;
mod hash;
mod kind;
mod markdown;
mod normalize;

pub use artifact::{Artifact, ArtifactParams};
pub use content::{Cell, Content};
pub use formula::{canonicalize_formula, is_formula};
pub use grid::{normalize_cell, normalize_grid, trim_grid};
pub use hash::{ContentHash, HashError};
pub use kind::ArtifactKind;
pub use markdown::render_table;
pub use normalize::{normalize, normalizer_for, NormalizeFn};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
