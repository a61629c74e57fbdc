use crate::value::{ConversionError, ValueType};
use std::fmt;
use thiserror::Error as ThisError;

///
/// CompileError
///
/// User-visible failure raised while optimizing an expression tree.
/// Aborts compilation of the statement that owns the tree.
///

#[derive(Debug, ThisError)]
pub enum CompileError {
    #[error("comparing array to scalar: {left} vs {right}")]
    ArrayScalarComparison { left: ValueType, right: ValueType },

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

///
/// InternalError
///
/// Structured evaluation-time error with a stable internal classification.
/// Not a stable API; intended for internal use and may change without notice.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl InternalError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// Construct a context-origin invariant violation.
    pub(crate) fn context_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Context,
            message.into(),
        )
    }

    /// Construct an expression-origin unsupported error.
    pub(crate) fn expression_unsupported(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::Unsupported,
            ErrorOrigin::Expression,
            message.into(),
        )
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    InvariantViolation,
    Unsupported,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvariantViolation => "invariant_violation",
            Self::Unsupported => "unsupported",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Context,
    Expression,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Context => "context",
            Self::Expression => "expression",
        };
        write!(f, "{label}")
    }
}
