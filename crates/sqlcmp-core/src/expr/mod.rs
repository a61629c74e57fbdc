//! Module: expr
//! Responsibility: the sub-expression tree comparison predicates operate on.
//! Does not own: comparison semantics (see `predicate`) or index bookkeeping (see `index`).
//! Boundary: tree owners replace a child with whatever `optimize` returns.

mod column;
mod constant;
mod parameter;
mod sequence;


use crate::{
    context::{EvalContext, Session},
    error::{CompileError, InternalError},
    index::{IndexCondition, TableAccess},
    predicate::{Comparison, InList, NullTest, Operator},
    value::{TriBool, Value, ValueType},
};
use std::fmt;

// re-exports
pub use column::{ColumnRef, TableAccessId};
pub use constant::Constant;
pub use parameter::Parameter;
pub use sequence::SequenceRef;

///
/// Expr
///

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Constant(Constant),
    Column(ColumnRef),
    Parameter(Parameter),
    NextValue(SequenceRef),
    Comparison(Box<Comparison>),
    NullTest(Box<NullTest>),
    InList(Box<InList>),
}

impl Expr {
    #[must_use]
    pub fn constant(value: impl Into<Value>) -> Self {
        Self::Constant(Constant::new(value.into()))
    }

    /// Untyped NULL literal.
    #[must_use]
    pub const fn null() -> Self {
        Self::Constant(Constant::typed_null(ValueType::Null))
    }

    /// The UNKNOWN truth value, a BOOLEAN-typed NULL.
    #[must_use]
    pub const fn unknown() -> Self {
        Self::Constant(Constant::unknown())
    }

    #[must_use]
    pub const fn from_tri(value: TriBool) -> Self {
        Self::Constant(Constant::from_tri(value))
    }

    #[must_use]
    pub const fn column(column: ColumnRef) -> Self {
        Self::Column(column)
    }

    #[must_use]
    pub const fn parameter(index: usize) -> Self {
        Self::Parameter(Parameter::new(index))
    }

    #[must_use]
    pub const fn next_value(sequence: SequenceRef) -> Self {
        Self::NextValue(sequence)
    }

    /// `left OP right` as a comparison node.
    #[must_use]
    pub fn compare(op: Operator, left: Self, right: Self) -> Self {
        Comparison::new(op, left, right).into_expr()
    }

    ///
    /// EVALUATION
    ///

    pub fn eval(&self, ctx: &dyn EvalContext) -> Result<Value, InternalError> {
        match self {
            Self::Constant(constant) => Ok(constant.value().clone()),
            Self::Column(column) => ctx.column_value(column).ok_or_else(|| {
                InternalError::context_invariant(format!(
                    "column {column} has no value in this context"
                ))
            }),
            Self::Parameter(parameter) => {
                ctx.parameter_value(parameter.index()).ok_or_else(|| {
                    InternalError::expression_unsupported(format!(
                        "parameter {parameter} is not set"
                    ))
                })
            }
            Self::NextValue(sequence) => Ok(Value::BigInt(sequence.advance())),
            Self::Comparison(comparison) => comparison.eval(ctx).map(TriBool::into_value),
            Self::NullTest(test) => test.eval(ctx).map(TriBool::into_value),
            Self::InList(list) => list.eval(ctx).map(TriBool::into_value),
        }
    }

    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Constant(constant) => constant.value_type(),
            Self::Column(column) => column.value_type(),
            Self::Parameter(parameter) => parameter.value_type(),
            Self::NextValue(_) => ValueType::BigInt,
            Self::Comparison(_) | Self::NullTest(_) | Self::InList(_) => ValueType::Boolean,
        }
    }

    ///
    /// CLASSIFICATION
    ///

    #[must_use]
    pub const fn is_constant(&self) -> bool {
        matches!(self, Self::Constant(_))
    }

    #[must_use]
    pub const fn is_null_constant(&self) -> bool {
        matches!(self, Self::Constant(constant) if constant.is_null())
    }

    #[must_use]
    pub const fn is_parameter(&self) -> bool {
        matches!(self, Self::Parameter(_))
    }

    #[must_use]
    pub const fn as_column(&self) -> Option<&ColumnRef> {
        match self {
            Self::Column(column) => Some(column),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_constant(&self) -> Option<&Constant> {
        match self {
            Self::Constant(constant) => Some(constant),
            _ => None,
        }
    }

    /// Whether any column of `access` occurs in this expression.
    #[must_use]
    pub fn references_access(&self, access: TableAccessId) -> bool {
        match self {
            Self::Column(column) => column.access() == access,
            _ => self.children().any(|child| child.references_access(access)),
        }
    }

    /// Relative evaluation cost used by the planner.
    #[must_use]
    pub fn cost(&self) -> u32 {
        match self {
            Self::Constant(_) | Self::Parameter(_) => 0,
            Self::NextValue(_) => 1,
            Self::Column(_) => 2,
            Self::Comparison(comparison) => comparison.cost(),
            Self::NullTest(test) => test.cost(),
            Self::InList(list) => list.cost(),
        }
    }

    pub fn set_evaluatable(&mut self, access: TableAccessId, evaluatable: bool) {
        match self {
            Self::Column(column) => column.set_evaluatable(access, evaluatable),
            Self::Comparison(comparison) => comparison.set_evaluatable(access, evaluatable),
            Self::NullTest(test) => test.set_evaluatable(access, evaluatable),
            Self::InList(list) => list.set_evaluatable(access, evaluatable),
            Self::Constant(_) | Self::Parameter(_) | Self::NextValue(_) => {}
        }
    }

    #[must_use]
    pub fn is_evaluatable(&self) -> bool {
        match self {
            Self::Column(column) => column.is_evaluatable(),
            _ => self.children().all(Self::is_evaluatable),
        }
    }

    ///
    /// REWRITING
    ///

    /// Optimize this tree bottom-up and return its replacement.
    pub fn optimize(self, session: &Session) -> Result<Self, CompileError> {
        match self {
            Self::Comparison(comparison) => (*comparison).optimize(session),
            Self::NullTest(test) => (*test).optimize(session),
            Self::InList(list) => (*list).optimize(session),
            leaf => Ok(leaf),
        }
    }

    /// Logical negation, where a simple complementary form exists.
    #[must_use]
    pub fn negate(&self) -> Option<Self> {
        match self {
            Self::Comparison(comparison) => comparison.negate().map(Comparison::into_expr),
            Self::NullTest(test) => Some(test.negate().into_expr()),
            Self::Constant(constant)
                if matches!(constant.value_type(), ValueType::Boolean | ValueType::Null) =>
            {
                TriBool::from_value(constant.value()).map(|value| Self::from_tri(value.not()))
            }
            _ => None,
        }
    }

    /// Contribute any index condition this expression implies to `access`.
    pub fn create_index_conditions(&self, session: &Session, access: &mut TableAccess) {
        if !session.config().index.derive_conditions {
            return;
        }

        let condition = match self {
            Self::Comparison(comparison) => comparison.derive_index_condition(access),
            Self::NullTest(test) => test.derive_index_condition(access),
            Self::InList(list) => list.derive_index_condition(access),
            Self::Constant(constant) if constant.value() == &Value::Bool(false) => {
                Some(IndexCondition::always_false())
            }
            _ => None,
        };

        if let Some(condition) = condition {
            access.add_index_condition(condition);
        }
    }

    ///
    /// STRUCTURE
    ///

    #[must_use]
    pub fn subexpression_count(&self) -> usize {
        match self {
            Self::Comparison(comparison) => comparison.subexpression_count(),
            Self::NullTest(_) => 1,
            Self::InList(list) => 1 + list.values.len(),
            Self::Constant(_) | Self::Column(_) | Self::Parameter(_) | Self::NextValue(_) => 0,
        }
    }

    #[must_use]
    pub fn subexpression(&self, index: usize) -> Option<&Self> {
        match self {
            Self::Comparison(comparison) => comparison.subexpression(index),
            Self::NullTest(test) => (index == 0).then_some(&test.operand),
            Self::InList(list) => match index {
                0 => Some(&list.operand),
                i => list.values.get(i - 1),
            },
            Self::Constant(_) | Self::Column(_) | Self::Parameter(_) | Self::NextValue(_) => None,
        }
    }

    fn children(&self) -> impl Iterator<Item = &Self> {
        (0..self.subexpression_count()).filter_map(move |i| self.subexpression(i))
    }

    /// Whether this expression needs its own parentheses as the right
    /// operand of a comparison.
    #[must_use]
    pub const fn encloses_as_operand(&self) -> bool {
        matches!(self, Self::InList(_))
    }

    /// Canonical SQL rendering; structural matching compares these strings.
    #[must_use]
    pub fn sql(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(constant) => write!(f, "{constant}"),
            Self::Column(column) => write!(f, "{column}"),
            Self::Parameter(parameter) => write!(f, "{parameter}"),
            Self::NextValue(sequence) => write!(f, "{sequence}"),
            Self::Comparison(comparison) => write!(f, "{comparison}"),
            Self::NullTest(test) => write!(f, "{test}"),
            Self::InList(list) => write!(f, "{list}"),
        }
    }
}

impl From<ColumnRef> for Expr {
    fn from(column: ColumnRef) -> Self {
        Self::Column(column)
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Constant(Constant::new(value))
    }
}
