//! Module: value::coercion
//! Responsibility: conversion of one value to a target type.
//! Does not own: choosing the target type (see `ValueType::higher`).

use crate::value::{Geometry, Value, ValueType};
use thiserror::Error as ThisError;

// i64 bounds as doubles; 2^63 itself is not representable, so the upper
// bound is exclusive.
const I64_MIN_F64: f64 = -9_223_372_036_854_775_808.0;
const I64_BOUND_F64: f64 = 9_223_372_036_854_775_808.0;

///
/// ConversionError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ConversionError {
    #[error("cannot convert {value} to {target}")]
    Unsupported { value: String, target: ValueType },

    #[error("value {value} is out of range for {target}")]
    OutOfRange { value: String, target: ValueType },
}

impl ConversionError {
    fn unsupported(value: &Value, target: ValueType) -> Self {
        Self::Unsupported {
            value: value.to_string(),
            target,
        }
    }

    fn out_of_range(value: &Value, target: ValueType) -> Self {
        Self::OutOfRange {
            value: value.to_string(),
            target,
        }
    }
}

impl Value {
    /// Convert this value to `target`.
    ///
    /// NULL converts to every type. `Unknown` as a target is a no-op.
    pub fn convert_to(&self, target: ValueType) -> Result<Self, ConversionError> {
        if self.is_null() || target == ValueType::Unknown || self.value_type() == target {
            return Ok(self.clone());
        }

        match target {
            ValueType::Unknown => Ok(self.clone()),
            ValueType::Null => Err(ConversionError::unsupported(self, target)),
            ValueType::Boolean => self.to_bool().map(Self::Bool),
            ValueType::Int => self.to_int(),
            ValueType::BigInt => self.to_bigint().map(Self::BigInt),
            ValueType::Double => self.to_double().map(Self::Double),
            ValueType::Text => self.to_text(target).map(Self::Text),
            ValueType::TextIgnoreCase => self.to_text(target).map(Self::TextIgnoreCase),
            ValueType::Geometry => match self {
                Self::Text(s) | Self::TextIgnoreCase(s) => Geometry::parse_wkt(s)
                    .map(Self::Geometry)
                    .ok_or_else(|| ConversionError::unsupported(self, target)),
                _ => Err(ConversionError::unsupported(self, target)),
            },
            ValueType::Array => Ok(match self {
                Self::Row(items) => Self::Array(items.clone()),
                other => Self::Array(vec![other.clone()]),
            }),
            ValueType::Row => Ok(match self {
                Self::Array(items) => Self::Row(items.clone()),
                other => Self::Row(vec![other.clone()]),
            }),
        }
    }

    fn to_bool(&self) -> Result<bool, ConversionError> {
        match self {
            Self::Bool(b) => Ok(*b),
            Self::Int(v) => Ok(*v != 0),
            Self::BigInt(v) => Ok(*v != 0),
            Self::Double(v) => Ok(*v != 0.0),
            Self::Text(s) | Self::TextIgnoreCase(s) => {
                match s.trim().to_ascii_lowercase().as_str() {
                    "true" | "t" | "yes" | "y" | "1" => Ok(true),
                    "false" | "f" | "no" | "n" | "0" => Ok(false),
                    _ => Err(ConversionError::unsupported(self, ValueType::Boolean)),
                }
            }
            _ => Err(ConversionError::unsupported(self, ValueType::Boolean)),
        }
    }

    fn to_int(&self) -> Result<Self, ConversionError> {
        let wide = self.to_bigint()?;

        i32::try_from(wide)
            .map(Self::Int)
            .map_err(|_| ConversionError::out_of_range(self, ValueType::Int))
    }

    #[expect(clippy::cast_possible_truncation)]
    fn to_bigint(&self) -> Result<i64, ConversionError> {
        match self {
            Self::Bool(b) => Ok(i64::from(*b)),
            Self::Int(v) => Ok(i64::from(*v)),
            Self::BigInt(v) => Ok(*v),
            Self::Double(v) => {
                let rounded = v.round();
                if rounded.is_finite() && (I64_MIN_F64..I64_BOUND_F64).contains(&rounded) {
                    Ok(rounded as i64)
                } else {
                    Err(ConversionError::out_of_range(self, ValueType::BigInt))
                }
            }
            Self::Text(s) | Self::TextIgnoreCase(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| ConversionError::unsupported(self, ValueType::BigInt)),
            _ => Err(ConversionError::unsupported(self, ValueType::BigInt)),
        }
    }

    #[expect(clippy::cast_precision_loss)]
    fn to_double(&self) -> Result<f64, ConversionError> {
        match self {
            Self::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Self::Int(v) => Ok(f64::from(*v)),
            Self::BigInt(v) => Ok(*v as f64),
            Self::Double(v) => Ok(*v),
            Self::Text(s) | Self::TextIgnoreCase(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ConversionError::unsupported(self, ValueType::Double)),
            _ => Err(ConversionError::unsupported(self, ValueType::Double)),
        }
    }

    fn to_text(&self, target: ValueType) -> Result<String, ConversionError> {
        match self {
            Self::Bool(b) => Ok(if *b { "TRUE" } else { "FALSE" }.to_string()),
            Self::Int(v) => Ok(v.to_string()),
            Self::BigInt(v) => Ok(v.to_string()),
            Self::Double(v) => Ok(format!("{v:?}")),
            Self::Text(s) | Self::TextIgnoreCase(s) => Ok(s.clone()),
            Self::Geometry(g) => Ok(g.to_wkt()),
            Self::Null | Self::Array(_) | Self::Row(_) => {
                Err(ConversionError::unsupported(self, target))
            }
        }
    }
}
