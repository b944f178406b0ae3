//! The artifact container and its factory
//!
//! An [`Artifact`] is one piece of extracted content for one task in one
//! role (reference, template, or submission; the role is kept by the owning
//! task, not here). The kind is fixed at construction and selects the
//! normalization rule; the content hash is computed over the normalized
//! content by an explicit ensure operation, never implicitly.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::Content;
use crate::hash::ContentHash;
use crate::kind::ArtifactKind;
use crate::normalize::normalize;

/// Construction parameters shared by every artifact kind
///
/// The kind itself is supplied by the constructor or the factory tag.
#[derive(Debug, Clone, Default)]
pub struct ArtifactParams {
    /// Identifier of the originating page/sheet tab
    pub page_id: String,
    /// Identifier of the owning document
    pub document_id: String,
    /// Ordering hint copied from the owning task
    pub task_index: u32,
    /// The untouched extracted value
    pub raw_content: Option<Content>,
    /// Kind-specific extras (source image URL, sheet name, ...)
    pub metadata: IndexMap<String, Value>,
}

/// One normalized, hashable piece of extracted content
///
/// # Invariants
/// - `normalized_content` is a pure function of `raw_content` for the kind
/// - `content_hash`, once ensured, is the hash of `normalized_content`
/// - no artifact mutates another artifact's fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    #[serde(rename = "type")]
    kind: ArtifactKind,
    page_id: String,
    document_id: String,
    task_index: u32,
    // Raw content is an extraction intermediate; the persisted `content`
    // field is the normalized form.
    #[serde(skip)]
    raw_content: Option<Content>,
    #[serde(rename = "content")]
    normalized_content: Option<Content>,
    content_hash: Option<ContentHash>,
    #[serde(default)]
    metadata: IndexMap<String, Value>,
}

impl Artifact {
    /// Construct an artifact of a known kind, normalizing its raw content
    #[must_use]
    pub fn of_kind(kind: ArtifactKind, params: ArtifactParams) -> Self {
        let normalized_content = normalize(kind, params.raw_content.as_ref());
        Self {
            kind,
            page_id: params.page_id,
            document_id: params.document_id,
            task_index: params.task_index,
            raw_content: params.raw_content,
            normalized_content,
            content_hash: None,
            metadata: params.metadata,
        }
    }

    /// Construct an artifact whose content is already canonical
    ///
    /// The diff engine materializes box-shaped grids that must keep their
    /// shape exactly (an all-empty template mirror would otherwise trim to
    /// nothing), so normalization is skipped: the caller asserts the
    /// content is canonical and it is stored as both raw and normalized.
    #[must_use]
    pub fn of_kind_canonical(kind: ArtifactKind, params: ArtifactParams) -> Self {
        Self {
            kind,
            page_id: params.page_id,
            document_id: params.document_id,
            task_index: params.task_index,
            normalized_content: params.raw_content.clone(),
            raw_content: params.raw_content,
            content_hash: None,
            metadata: params.metadata,
        }
    }

    /// Factory: dispatch on a kind tag, case-insensitively
    ///
    /// Unknown or missing tags produce an [`ArtifactKind::Opaque`] artifact
    /// that stores its content verbatim.
    #[must_use]
    pub fn from_tag(tag: &str, params: ArtifactParams) -> Self {
        Self::of_kind(ArtifactKind::from_tag(tag), params)
    }

    /// Text artifact
    #[inline]
    #[must_use]
    pub fn text(params: ArtifactParams) -> Self {
        Self::of_kind(ArtifactKind::Text, params)
    }

    /// Table artifact
    #[inline]
    #[must_use]
    pub fn table(params: ArtifactParams) -> Self {
        Self::of_kind(ArtifactKind::Table, params)
    }

    /// Spreadsheet artifact
    #[inline]
    #[must_use]
    pub fn spreadsheet(params: ArtifactParams) -> Self {
        Self::of_kind(ArtifactKind::Spreadsheet, params)
    }

    /// Image artifact
    #[inline]
    #[must_use]
    pub fn image(params: ArtifactParams) -> Self {
        Self::of_kind(ArtifactKind::Image, params)
    }

    /// Kind of this artifact
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    /// Originating page/sheet-tab identifier
    #[inline]
    #[must_use]
    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    /// Owning document identifier
    #[inline]
    #[must_use]
    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    /// Ordering hint copied from the owning task
    #[inline]
    #[must_use]
    pub fn task_index(&self) -> u32 {
        self.task_index
    }

    /// The untouched extracted value, if still in memory
    #[inline]
    #[must_use]
    pub fn raw_content(&self) -> Option<&Content> {
        self.raw_content.as_ref()
    }

    /// Canonical content; `None` means "empty/absent", read downstream as
    /// "not attempted"
    #[inline]
    #[must_use]
    pub fn normalized_content(&self) -> Option<&Content> {
        self.normalized_content.as_ref()
    }

    /// Content address, if ensured since the last content change
    #[inline]
    #[must_use]
    pub fn content_hash(&self) -> Option<&ContentHash> {
        self.content_hash.as_ref()
    }

    /// Kind-specific extras
    #[inline]
    #[must_use]
    pub fn metadata(&self) -> &IndexMap<String, Value> {
        &self.metadata
    }

    /// Insert or replace a metadata entry
    pub fn insert_metadata(&mut self, key: impl Into<String>, value: Value) {
        self.metadata.insert(key.into(), value);
    }

    /// Re-stamp the ordering hint from the owning task
    pub fn set_task_index(&mut self, index: u32) {
        self.task_index = index;
    }

    /// Whether normalization produced any content
    #[inline]
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.normalized_content.is_some()
    }

    /// Replace the raw content, re-normalizing and invalidating the hash
    ///
    /// The hash stays `None` until [`Artifact::ensure_content_hash`] runs
    /// again.
    pub fn set_raw_content(&mut self, raw: Option<Content>) {
        self.normalized_content = normalize(self.kind, raw.as_ref());
        self.raw_content = raw;
        self.content_hash = None;
    }

    /// Compute the content hash over the normalized content
    ///
    /// Explicit by contract: callers decide when content is settled enough
    /// to address. Absent content keeps an absent hash.
    pub fn ensure_content_hash(&mut self) {
        self.content_hash = self.normalized_content.as_ref().map(ContentHash::of_content);
    }

    /// Check the stored hash against a recomputation
    ///
    /// Useful after deserialization. An artifact with no content and no
    /// hash verifies trivially; a stale or missing hash for present content
    /// does not.
    #[must_use]
    pub fn verify_hash(&self) -> bool {
        self.content_hash == self.normalized_content.as_ref().map(ContentHash::of_content)
    }

    /// Store a captured image payload as a PNG data URL
    ///
    /// Best-effort: an empty payload is logged and ignored rather than
    /// propagated, and the artifact simply keeps no content. A successful
    /// conversion re-ensures the hash.
    pub fn attach_image_bytes(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            tracing::debug!(
                document_id = %self.document_id,
                page_id = %self.page_id,
                "skipping empty image payload"
            );
            return;
        }
        let url = format!("data:image/png;base64,{}", BASE64.encode(bytes));
        self.set_raw_content(Some(Content::Text(url)));
        self.ensure_content_hash();
    }

    /// Clone with content and hash removed, for redacted projections
    #[must_use]
    pub fn redacted(&self) -> Self {
        Self {
            raw_content: None,
            normalized_content: None,
            content_hash: None,
            ..self.clone()
        }
    }
}
