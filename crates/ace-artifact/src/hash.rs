//! Content-addressed hashing primitives
//!
//! Provides [`ContentHash`], a strongly-typed 32-byte hash used as the
//! content address of normalized artifact content. Two artifacts with the
//! same normalized content always carry the same hash, which is what makes
//! cheap equality checks and re-extraction deduplication possible.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::content::Content;

/// A 32-byte content hash (Blake3)
///
/// Immutable and cheap to clone (Copy). The human-readable form is lowercase
/// hex, which is also the persisted JSON form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Create a new ContentHash from raw bytes
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get reference to the underlying bytes
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Compute Blake3 hash of arbitrary data
    #[inline]
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        let hash = blake3::hash(data);
        Self::new(*hash.as_bytes())
    }

    /// Hash normalized artifact content
    ///
    /// The content is encoded to its canonical JSON wire form first, so the
    /// hash is stable across processes and across re-extraction runs.
    #[must_use]
    pub fn of_content(content: &Content) -> Self {
        // serde_json writes map-free enum payloads deterministically here:
        // Content is a string or an array of arrays of scalars.
        let encoded = serde_json::to_vec(content).unwrap_or_default();
        Self::compute(&encoded)
    }

    /// Create hash from byte slice
    ///
    /// # Errors
    /// Returns error if slice length is not exactly 32 bytes
    #[inline]
    pub fn from_slice(bytes: &[u8]) -> Result<Self, HashError> {
        if bytes.len() != 32 {
            return Err(HashError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }

    /// Short string representation (first 16 hex chars)
    ///
    /// Used where a compact stable identifier is enough, e.g. derived task
    /// ids.
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl Display for ContentHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for ContentHash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        Self::from_slice(&bytes)
    }
}

impl serde::Serialize for ContentHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for ContentHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ContentHashVisitor;

        impl serde::de::Visitor<'_> for ContentHashVisitor {
            type Value = ContentHash;

            fn expecting(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
                formatter.write_str("a 32-byte hash as a hex string")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(ContentHashVisitor)
    }
}

/// Errors that can occur when working with content hashes
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    /// Invalid hash length
    #[error("invalid hash length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Hex encoding error
    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Cell;

    #[test]
    fn compute_is_deterministic() {
        let h1 = ContentHash::compute(b"=SUM(A1:B2)");
        let h2 = ContentHash::compute(b"=SUM(A1:B2)");
        assert_eq!(h1, h2);
    }

    #[test]
    fn compute_differs_for_different_data() {
        assert_ne!(ContentHash::compute(b"=A1"), ContentHash::compute(b"=A2"));
    }

    #[test]
    fn display_and_parse_round_trip() {
        let hash = ContentHash::compute(b"content");
        let parsed: ContentHash = hash.to_string().parse().unwrap();
        assert_eq!(hash, parsed);
    }

    #[test]
    fn from_slice_rejects_wrong_length() {
        let result = ContentHash::from_slice(&[0u8; 31]);
        assert!(matches!(
            result,
            Err(HashError::InvalidLength { expected: 32, actual: 31 })
        ));
    }

    #[test]
    fn short_is_prefix_of_full() {
        let hash = ContentHash::compute(b"task");
        assert_eq!(hash.short().len(), 16);
        assert!(hash.to_string().starts_with(&hash.short()));
    }

    #[test]
    fn of_content_distinguishes_text_from_grid() {
        let text = Content::Text("5".to_string());
        let grid = Content::Grid(vec![vec![Cell::Number(5.0)]]);
        assert_ne!(ContentHash::of_content(&text), ContentHash::of_content(&grid));
    }

    #[test]
    fn serde_round_trip_as_hex_string() {
        let hash = ContentHash::compute(b"persisted");
        let json = serde_json::to_string(&hash).unwrap();
        assert!(json.starts_with('"'));
        let decoded: ContentHash = serde_json::from_str(&json).unwrap();
        assert_eq!(hash, decoded);
    }
}
