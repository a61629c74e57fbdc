use crate::value::ValueType;
use std::fmt;

///
/// Parameter
///
/// Positional bind parameter (`?1`, `?2`, ...). Its expected type stays
/// `Unknown` until the optimizer binds it to a compared column.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Parameter {
    index: usize,
    bound_type: Option<ValueType>,
}

impl Parameter {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            bound_type: None,
        }
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn bound_type(&self) -> Option<ValueType> {
        self.bound_type
    }

    #[must_use]
    pub fn value_type(&self) -> ValueType {
        self.bound_type.unwrap_or(ValueType::Unknown)
    }

    pub const fn bind_type(&mut self, value_type: ValueType) {
        self.bound_type = Some(value_type);
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.index)
    }
}
