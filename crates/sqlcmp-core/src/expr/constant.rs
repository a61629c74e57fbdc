use crate::value::{ConversionError, TriBool, Value, ValueType};
use std::fmt;

///
/// Constant
///
/// Typed literal. The declared type normally follows the value; a NULL may
/// carry any declared type, and a BOOLEAN-typed NULL is the UNKNOWN truth
/// value.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Constant {
    value: Value,
    value_type: ValueType,
}

impl Constant {
    #[must_use]
    pub const fn new(value: Value) -> Self {
        let value_type = value.value_type();

        Self { value, value_type }
    }

    #[must_use]
    pub const fn typed_null(value_type: ValueType) -> Self {
        Self {
            value: Value::Null,
            value_type,
        }
    }

    #[must_use]
    pub const fn unknown() -> Self {
        Self::typed_null(ValueType::Boolean)
    }

    #[must_use]
    pub const fn from_tri(value: TriBool) -> Self {
        match value {
            TriBool::True => Self::new(Value::Bool(true)),
            TriBool::False => Self::new(Value::Bool(false)),
            TriBool::Unknown => Self::unknown(),
        }
    }

    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }

    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.value_type
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.value.is_null()
    }

    /// Re-type this literal, converting its value.
    pub fn convert_to(&self, target: ValueType) -> Result<Self, ConversionError> {
        let value = self.value.convert_to(target)?;

        Ok(Self {
            value,
            value_type: target,
        })
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.value, self.value_type) {
            (Value::Null, ValueType::Boolean) => f.write_str("UNKNOWN"),
            (Value::Null, ValueType::Null | ValueType::Unknown) => f.write_str("NULL"),
            (Value::Null, ty) => write!(f, "CAST(NULL AS {ty})"),
            (value, _) => write!(f, "{value}"),
        }
    }
}
