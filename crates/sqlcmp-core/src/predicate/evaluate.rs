use crate::{
    context::EvalContext,
    predicate::Operator,
    value::{Geometry, TriBool, Value, ValueType},
};
use std::cmp::Ordering;

/// Compare two evaluated operands under `op`.
///
/// Ordering operators go through `EvalContext::compare_with_null`, so a NULL
/// or incomparable pair yields `Unknown`. Null-safe operators use
/// `EvalContext::are_equal` and never yield `Unknown`.
#[must_use]
pub fn compare(ctx: &dyn EvalContext, left: &Value, right: &Value, op: Operator) -> TriBool {
    match op {
        Operator::EqualNullSafe => TriBool::from_bool(ctx.are_equal(left, right)),
        Operator::NotEqualNullSafe => TriBool::from_bool(!ctx.are_equal(left, right)),
        Operator::SpatialIntersects => intersects(left, right),
        Operator::Equal | Operator::NotEqual => {
            ordered(ctx.compare_with_null(left, right, true), op)
        }
        Operator::GreaterOrEqual | Operator::Greater | Operator::LessOrEqual | Operator::Less => {
            ordered(ctx.compare_with_null(left, right, false), op)
        }
        Operator::AlwaysFalse | Operator::InList | Operator::InQuery => {
            panic!("operator {op:?} cannot be evaluated")
        }
    }
}

// Map an ordering to a truth value; `None` is the incomparable sentinel.
fn ordered(cmp: Option<Ordering>, op: Operator) -> TriBool {
    let Some(cmp) = cmp else {
        return TriBool::Unknown;
    };

    TriBool::from_bool(match op {
        Operator::Equal => cmp.is_eq(),
        Operator::NotEqual => cmp.is_ne(),
        Operator::Greater => cmp.is_gt(),
        Operator::GreaterOrEqual => cmp.is_ge(),
        Operator::Less => cmp.is_lt(),
        Operator::LessOrEqual => cmp.is_le(),
        _ => unreachable!("ordering requested for {op:?}"),
    })
}

fn intersects(left: &Value, right: &Value) -> TriBool {
    if left.is_null() || right.is_null() {
        return TriBool::Unknown;
    }

    match (as_geometry(left), as_geometry(right)) {
        (Some(l), Some(r)) => TriBool::from_bool(l.intersects_bounding_box(&r)),
        _ => TriBool::Unknown,
    }
}

fn as_geometry(value: &Value) -> Option<Geometry> {
    match value.convert_to(ValueType::Geometry).ok()? {
        Value::Geometry(geometry) => Some(geometry),
        _ => None,
    }
}
