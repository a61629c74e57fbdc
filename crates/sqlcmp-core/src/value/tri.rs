use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// TriBool
///
/// SQL three-valued truth. `Unknown` is what any non-null-safe operation
/// touching a NULL operand yields.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum TriBool {
    True,
    False,
    Unknown,
}

impl TriBool {
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }

    /// Interpret a boolean-typed value; NULL maps to `Unknown`.
    #[must_use]
    pub const fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self::from_bool(*b)),
            Value::Null => Some(Self::Unknown),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    #[expect(clippy::should_implement_trait)]
    #[must_use]
    pub const fn not(self) -> Self {
        match self {
            Self::True => Self::False,
            Self::False => Self::True,
            Self::Unknown => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::False, _) | (_, Self::False) => Self::False,
            (Self::True, Self::True) => Self::True,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        match (self, other) {
            (Self::True, _) | (_, Self::True) => Self::True,
            (Self::False, Self::False) => Self::False,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn into_value(self) -> Value {
        match self {
            Self::True => Value::Bool(true),
            Self::False => Value::Bool(false),
            Self::Unknown => Value::Null,
        }
    }
}

impl From<bool> for TriBool {
    fn from(value: bool) -> Self {
        Self::from_bool(value)
    }
}

impl fmt::Display for TriBool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Unknown => "UNKNOWN",
        })
    }
}
