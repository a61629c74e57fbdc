//! Module: value
//! Responsibility: typed runtime values, their type lattice, and NULL identity.
//! Does not own: predicate semantics; comparisons only expose ordering/equality.
//! Boundary: the comparison engine consumes values through `compare` and `coercion`.

mod coercion;
mod compare;
mod geometry;
mod tri;


use serde::{Deserialize, Serialize};
use std::fmt;

// re-exports
pub use coercion::ConversionError;
pub use compare::{are_equal, compare_with_null};
pub use geometry::{BoundingBox, Geometry, GeometryKind, Point};
pub use tri::TriBool;

///
/// ValueType
///
/// Type lattice used for operand promotion. `Unknown` is the type of an
/// expression whose type has not been resolved yet (an unbound parameter).
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ValueType {
    Unknown,
    Null,
    Text,
    TextIgnoreCase,
    Boolean,
    Int,
    BigInt,
    Double,
    Geometry,
    Array,
    Row,
}

impl ValueType {
    // Promotion rank; the higher rank wins when two types meet.
    const fn rank(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Null => 1,
            Self::Text => 10,
            Self::TextIgnoreCase => 11,
            Self::Boolean => 20,
            Self::Int => 30,
            Self::BigInt => 31,
            Self::Double => 32,
            Self::Geometry => 40,
            Self::Array => 50,
            Self::Row => 60,
        }
    }

    /// Common supertype of two operand types.
    ///
    /// `Unknown` and `Null` carry no type information and defer to the
    /// other side.
    #[must_use]
    pub const fn higher(self, other: Self) -> Self {
        match (self, other) {
            (Self::Unknown | Self::Null, _) => other,
            (_, Self::Unknown | Self::Null) => self,
            _ if self.rank() >= other.rank() => self,
            _ => other,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "UNKNOWN",
            Self::Null => "NULL",
            Self::Text => "CHARACTER VARYING",
            Self::TextIgnoreCase => "VARCHAR_IGNORECASE",
            Self::Boolean => "BOOLEAN",
            Self::Int => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::Double => "DOUBLE PRECISION",
            Self::Geometry => "GEOMETRY",
            Self::Array => "ARRAY",
            Self::Row => "ROW",
        };

        f.write_str(name)
    }
}

///
/// Value
///
/// Null        → SQL NULL; compares as UNKNOWN unless a null-safe operator is used.
/// Array / Row → ordered collections; element order is significant.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i32),
    BigInt(i64),
    Double(f64),
    Text(String),
    TextIgnoreCase(String),
    Array(Vec<Self>),
    Row(Vec<Self>),
    Geometry(Geometry),
}

impl Value {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[must_use]
    pub fn text_ignore_case(value: impl Into<String>) -> Self {
        Self::TextIgnoreCase(value.into())
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Null => ValueType::Null,
            Self::Bool(_) => ValueType::Boolean,
            Self::Int(_) => ValueType::Int,
            Self::BigInt(_) => ValueType::BigInt,
            Self::Double(_) => ValueType::Double,
            Self::Text(_) => ValueType::Text,
            Self::TextIgnoreCase(_) => ValueType::TextIgnoreCase,
            Self::Array(_) => ValueType::Array,
            Self::Row(_) => ValueType::Row,
            Self::Geometry(_) => ValueType::Geometry,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::BigInt(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<TriBool> for Value {
    fn from(value: TriBool) -> Self {
        value.into_value()
    }
}

// SQL literal rendering.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(true) => f.write_str("TRUE"),
            Self::Bool(false) => f.write_str("FALSE"),
            Self::Int(v) => write!(f, "{v}"),
            Self::BigInt(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v:?}"),
            Self::Text(v) | Self::TextIgnoreCase(v) => write_quoted(f, v),
            Self::Array(items) => {
                f.write_str("ARRAY [")?;
                write_list(f, items)?;
                f.write_str("]")
            }
            Self::Row(items) => {
                f.write_str("ROW (")?;
                write_list(f, items)?;
                f.write_str(")")
            }
            Self::Geometry(geometry) => {
                f.write_str("GEOMETRY ")?;
                write_quoted(f, &geometry.to_wkt())
            }
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    f.write_str("'")?;
    for part in text.split_inclusive('\'') {
        f.write_str(part)?;
        if part.ends_with('\'') {
            f.write_str("'")?;
        }
    }
    f.write_str("'")
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }

    Ok(())
}
