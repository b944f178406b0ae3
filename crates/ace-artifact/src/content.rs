//! Polymorphic artifact content model
//!
//! Provides [`Cell`] and [`Content`], the tagged unions every extracted
//! value is carried in. The wire form mirrors what document connectors
//! produce: a cell is `null`, a JSON number, or a JSON string; content is a
//! string or a 2D array of cells.

use std::fmt::{self, Formatter};

/// One table or spreadsheet cell value
///
/// `Empty` and the empty string both count as "nothing here" for trimming
/// and comparison purposes; they are distinct values only on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// No value (`null` on the wire)
    Empty,
    /// Numeric value, passed through normalization unchanged
    Number(f64),
    /// Text value (including formulas, which start with `=`)
    Text(String),
}

impl Cell {
    /// Whether the cell holds no usable value
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Number(_) => false,
            Cell::Text(s) => s.is_empty(),
        }
    }

    /// Text payload, if this is a text cell
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl serde::Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Cell::Empty => serializer.serialize_none(),
            Cell::Number(n) => serializer.serialize_f64(*n),
            Cell::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Cell {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct CellVisitor;

        impl<'de> serde::de::Visitor<'de> for CellVisitor {
            type Value = Cell;

            fn expecting(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
                formatter.write_str("null, a number, or a string")
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Cell::Empty)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Cell::Empty)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                deserializer.deserialize_any(CellVisitor)
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                #[allow(clippy::cast_precision_loss)]
                Ok(Cell::Number(value as f64))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                #[allow(clippy::cast_precision_loss)]
                Ok(Cell::Number(value as f64))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Cell::Number(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Cell::Text(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Cell::Text(value))
            }
        }

        deserializer.deserialize_any(CellVisitor)
    }
}

/// Artifact content: free text or a 2D cell grid
///
/// Which variant an artifact holds depends on its kind: text, image and
/// rendered table content is `Text`; spreadsheet content is always `Grid`.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Plain text, a Markdown table rendering, or an image URL
    Text(String),
    /// A (possibly ragged) 2D array of cells
    Grid(Vec<Vec<Cell>>),
}

impl Content {
    /// Build grid content from string cells
    #[must_use]
    pub fn grid_from_strings(rows: &[Vec<String>]) -> Self {
        Content::Grid(
            rows.iter()
                .map(|row| row.iter().map(|s| Cell::Text(s.clone())).collect())
                .collect(),
        )
    }

    /// Text payload, if any
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(s) => Some(s.as_str()),
            Content::Grid(_) => None,
        }
    }

    /// Grid payload, if any
    #[inline]
    #[must_use]
    pub fn as_grid(&self) -> Option<&[Vec<Cell>]> {
        match self {
            Content::Text(_) => None,
            Content::Grid(rows) => Some(rows.as_slice()),
        }
    }
}

impl serde::Serialize for Content {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Content::Text(s) => serializer.serialize_str(s),
            Content::Grid(rows) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(rows.len()))?;
                for row in rows {
                    seq.serialize_element(row)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de> serde::Deserialize<'de> for Content {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ContentVisitor;

        impl<'de> serde::de::Visitor<'de> for ContentVisitor {
            type Value = Content;

            fn expecting(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
                formatter.write_str("a string or a 2D array of cells")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Content::Text(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Content::Text(value))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut rows = Vec::new();
                while let Some(row) = seq.next_element::<Vec<Cell>>()? {
                    rows.push(row);
                }
                Ok(Content::Grid(rows))
            }
        }

        deserializer.deserialize_any(ContentVisitor)
    }
}
