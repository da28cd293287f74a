//! Typed nullable columns
//!
//! A column is a sequence of optional values sharing one logical type.
//! Every operation consumes one primary column (plus an optional per-row
//! parameter column) and produces exactly one column whose type is known
//! before any row is processed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// UTF-8 text
    Utf8,
    /// Variable-length byte strings
    Binary,
    /// Fixed 16-byte values (128-bit hashes)
    Binary128,
    /// Unsigned 32-bit integers
    UInt32,
    /// Unsigned 64-bit integers
    UInt64,
    /// Signed 64-bit integers
    Int64,
    /// `{longitude, latitude}` records
    Coord,
    /// Eight-direction geohash neighbor records
    Neighbors,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Utf8 => "Utf8",
            Self::Binary => "Binary",
            Self::Binary128 => "Binary128",
            Self::UInt32 => "UInt32",
            Self::UInt64 => "UInt64",
            Self::Int64 => "Int64",
            Self::Coord => "Coord",
            Self::Neighbors => "Neighbors",
        };
        f.write_str(name)
    }
}

/// Geographic coordinate, longitude first
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    /// Longitude in degrees, [-180, 180]
    pub longitude: f64,
    /// Latitude in degrees, [-90, 90]
    pub latitude: f64,
}

impl Coord {
    /// Create a new coordinate
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self { longitude, latitude }
    }
}

/// The eight cells surrounding a geohash, each at the input's length
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbors {
    /// North
    pub n: String,
    /// North-east
    pub ne: String,
    /// East
    pub e: String,
    /// South-east
    pub se: String,
    /// South
    pub s: String,
    /// South-west
    pub sw: String,
    /// West
    pub w: String,
    /// North-west
    pub nw: String,
}

/// A column of nullable values
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Text values
    Utf8(Vec<Option<String>>),
    /// Byte string values
    Binary(Vec<Option<Vec<u8>>>),
    /// 16-byte values
    Binary128(Vec<Option<[u8; 16]>>),
    /// u32 values
    UInt32(Vec<Option<u32>>),
    /// u64 values
    UInt64(Vec<Option<u64>>),
    /// i64 values
    Int64(Vec<Option<i64>>),
    /// Coordinates
    Coord(Vec<Option<Coord>>),
    /// Neighbor records
    Neighbors(Vec<Option<Neighbors>>),
}

impl Column {
    /// Build a text column from borrowed strings
    pub fn utf8<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        Self::Utf8(values.into_iter().map(|v| v.map(str::to_owned)).collect())
    }

    /// Build a binary column from borrowed byte slices
    pub fn binary<'a>(values: impl IntoIterator<Item = Option<&'a [u8]>>) -> Self {
        Self::Binary(values.into_iter().map(|v| v.map(<[u8]>::to_vec)).collect())
    }

    /// Logical type of this column
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Utf8(_) => DataType::Utf8,
            Self::Binary(_) => DataType::Binary,
            Self::Binary128(_) => DataType::Binary128,
            Self::UInt32(_) => DataType::UInt32,
            Self::UInt64(_) => DataType::UInt64,
            Self::Int64(_) => DataType::Int64,
            Self::Coord(_) => DataType::Coord,
            Self::Neighbors(_) => DataType::Neighbors,
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        match self {
            Self::Utf8(v) => v.len(),
            Self::Binary(v) => v.len(),
            Self::Binary128(v) => v.len(),
            Self::UInt32(v) => v.len(),
            Self::UInt64(v) => v.len(),
            Self::Int64(v) => v.len(),
            Self::Coord(v) => v.len(),
            Self::Neighbors(v) => v.len(),
        }
    }

    /// Whether the column has no rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether row `index` is null
    pub fn is_null(&self, index: usize) -> bool {
        match self {
            Self::Utf8(v) => v[index].is_none(),
            Self::Binary(v) => v[index].is_none(),
            Self::Binary128(v) => v[index].is_none(),
            Self::UInt32(v) => v[index].is_none(),
            Self::UInt64(v) => v[index].is_none(),
            Self::Int64(v) => v[index].is_none(),
            Self::Coord(v) => v[index].is_none(),
            Self::Neighbors(v) => v[index].is_none(),
        }
    }

    /// Count of null rows
    pub fn null_count(&self) -> usize {
        (0..self.len()).filter(|&i| self.is_null(i)).count()
    }

    /// Render one row as display text, `None` for null
    pub fn render(&self, index: usize) -> Option<String> {
        match self {
            Self::Utf8(v) => v[index].clone(),
            Self::Binary(v) => v[index].as_ref().map(hex::encode),
            Self::Binary128(v) => v[index].as_ref().map(hex::encode),
            Self::UInt32(v) => v[index].map(|x| x.to_string()),
            Self::UInt64(v) => v[index].map(|x| x.to_string()),
            Self::Int64(v) => v[index].map(|x| x.to_string()),
            Self::Coord(v) => v[index].map(|c| format!("{},{}", c.longitude, c.latitude)),
            Self::Neighbors(v) => v[index].as_ref().map(|n| {
                format!(
                    "n={} ne={} e={} se={} s={} sw={} w={} nw={}",
                    n.n, n.ne, n.e, n.se, n.s, n.sw, n.w, n.nw
                )
            }),
        }
    }

    /// Convert one row to a JSON value; byte values become hex strings
    pub fn json_value(&self, index: usize) -> serde_json::Value {
        use serde_json::{json, Value};

        match self {
            Self::Utf8(v) => v[index].as_ref().map_or(Value::Null, |s| json!(s)),
            Self::Binary(v) => v[index].as_ref().map_or(Value::Null, |b| json!(hex::encode(b))),
            Self::Binary128(v) => v[index].as_ref().map_or(Value::Null, |b| json!(hex::encode(b))),
            Self::UInt32(v) => v[index].map_or(Value::Null, |x| json!(x)),
            Self::UInt64(v) => v[index].map_or(Value::Null, |x| json!(x)),
            Self::Int64(v) => v[index].map_or(Value::Null, |x| json!(x)),
            Self::Coord(v) => v[index].map_or(Value::Null, |c| json!(c)),
            Self::Neighbors(v) => v[index].as_ref().map_or(Value::Null, |n| json!(n)),
        }
    }

    /// Convert the whole column to a JSON array
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array((0..self.len()).map(|i| self.json_value(i)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_basics() {
        let col = Column::utf8([Some("a"), None, Some("")]);
        assert_eq!(col.len(), 3);
        assert_eq!(col.data_type(), DataType::Utf8);
        assert!(col.is_null(1));
        assert!(!col.is_null(2));
        assert_eq!(col.null_count(), 1);
    }

    #[test]
    fn test_render_and_json() {
        let col = Column::Binary128(vec![Some([0u8; 16]), None]);
        assert_eq!(col.render(0).unwrap(), "0".repeat(32));
        assert_eq!(col.render(1), None);
        assert_eq!(col.to_json(), serde_json::json!(["0".repeat(32), null]));

        let coords = Column::Coord(vec![Some(Coord::new(-120.5, 35.25))]);
        assert_eq!(coords.render(0).unwrap(), "-120.5,35.25");
        assert_eq!(
            coords.json_value(0),
            serde_json::json!({"longitude": -120.5, "latitude": 35.25})
        );
    }
}
