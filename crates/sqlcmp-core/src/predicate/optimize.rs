//! Module: predicate::optimize
//! Responsibility: compile-time rewriting of one comparison node.
//! Does not own: rewriting of other node kinds beyond recursing into operands.
//! Boundary: returns a replacement `Expr`; callers swap it in for the old child.

use crate::{
    context::Session,
    error::CompileError,
    expr::{Constant, Expr},
    obs::sink::{MetricsEvent, record},
    predicate::{Comparison, NullTest, Operator},
    value::ValueType,
};
use std::mem;
use tracing::{debug, warn};

impl Comparison {
    /// Optimize operands, then normalize, coerce, and fold this node.
    ///
    /// The result is this comparison, a constant, or a null test. Running
    /// the pass again on its own output changes nothing.
    pub fn optimize(self, session: &Session) -> Result<Expr, CompileError> {
        let Self {
            mut op,
            left,
            right,
            when_operand,
        } = self;
        let mut left = left.optimize(session)?;
        let mut right = right.optimize(session)?;
        record(MetricsEvent::ComparisonOptimized { op });

        let (left_type, right_type) = (left.value_type(), right.value_type());
        if right_type == ValueType::Array && left_type != ValueType::Array {
            return Err(CompileError::ArrayScalarComparison {
                left: left_type,
                right: right_type,
            });
        }

        if when_operand {
            return Ok(Self::when_operand(op, left, right).into_expr());
        }

        // Column references go on the left.
        if right.as_column().is_some() && (left.is_constant() || left.is_parameter()) {
            mem::swap(&mut left, &mut right);
            op = op.reverse();
            record(MetricsEvent::OperandsSwapped);
            debug!(operator = op.sql_operator(), "swapped comparison operands");
        }

        if let Expr::Column(column) = &left {
            match &mut right {
                Expr::Constant(constant) => {
                    if constant.is_null() && !op.is_null_safe() {
                        warn_null_constant(session, op);
                        return Ok(null_propagated());
                    }
                    if let Some(coerced) = coerce(constant, column.value_type())? {
                        *constant = coerced;
                    }
                }
                Expr::Parameter(parameter) => parameter.bind_type(column.value_type()),
                _ => {}
            }
        }

        if left.is_constant() && right.is_constant() {
            let folded = Self::new(op, left, right).eval(session)?;
            record(MetricsEvent::ConstantFolded);
            debug!(result = %folded, "folded constant comparison");

            return Ok(Expr::from_tri(folded));
        }

        if left.is_null_constant() || right.is_null_constant() {
            warn_null_constant(session, op);
            if !op.is_null_safe() {
                return Ok(null_propagated());
            }

            let operand_type = if left.is_null_constant() {
                right.value_type()
            } else {
                left.value_type()
            };
            if !matches!(operand_type, ValueType::Unknown | ValueType::Row) {
                let operand = if left.is_null_constant() { right } else { left };
                record(MetricsEvent::NullTestRewritten);
                debug!(operand = %operand, "rewrote null-safe comparison as null test");

                return Ok(NullTest::new(operand, op == Operator::NotEqualNullSafe).into_expr());
            }
        }

        Ok(Self::new(op, left, right).into_expr())
    }
}

// Coerce a constant compared with a column once, up front, when the
// common type differs from the constant's own type.
fn coerce(constant: &Constant, column_type: ValueType) -> Result<Option<Constant>, CompileError> {
    let constant_type = constant.value_type();
    if constant_type == column_type {
        return Ok(None);
    }

    let common = column_type.higher(constant_type);
    if constant_type == common {
        return Ok(None);
    }

    let coerced = constant.convert_to(common)?;
    record(MetricsEvent::ConstantCoerced);
    debug!(from = %constant_type, to = %common, "coerced comparison constant");

    Ok(Some(coerced))
}

fn null_propagated() -> Expr {
    record(MetricsEvent::NullPropagated);
    debug!("comparison with NULL reduced to UNKNOWN");

    Expr::unknown()
}

fn warn_null_constant(session: &Session, op: Operator) {
    if session.config().predicate.warn_on_null_constant {
        warn!(
            operator = op.sql_operator(),
            "comparison with a NULL constant; use IS [NOT] NULL instead"
        );
    }
}
