//! Module: value::compare
//! Responsibility: three-valued ordering and NULL-aware equality between values.
//! Does not own: operator semantics; predicates map orderings to truth values.
//! Boundary: reached through `EvalContext`, which may override both functions.

use crate::value::{Geometry, Value, ValueType};
use std::{borrow::Cow, cmp::Ordering};

/// Compare two values after promoting both to their common type.
///
/// Returns `None` when either side is NULL or when the values cannot be
/// ordered (a failed promotion, or a collection whose elements compare as
/// NULL). For equality, collections of different length are unequal even
/// if a NULL element is present; ordering gives up at the first NULL element.
#[must_use]
pub fn compare_with_null(left: &Value, right: &Value, for_equality: bool) -> Option<Ordering> {
    if left.is_null() || right.is_null() {
        return None;
    }

    let (left, right) = align(left, right)?;

    compare_aligned(&left, &right, for_equality)
}

/// NULL-aware structural equality: NULL equals NULL and nothing else.
#[must_use]
pub fn are_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        _ => {
            let Some((left, right)) = align(left, right) else {
                return false;
            };

            match (left.as_ref(), right.as_ref()) {
                (Value::Array(a), Value::Array(b)) | (Value::Row(a), Value::Row(b)) => {
                    a.len() == b.len() && a.iter().zip(b).all(|(l, r)| are_equal(l, r))
                }
                (l, r) => compare_aligned(l, r, true) == Some(Ordering::Equal),
            }
        }
    }
}

// Promote both values to their common type, borrowing when no conversion is needed.
fn align<'a>(left: &'a Value, right: &'a Value) -> Option<(Cow<'a, Value>, Cow<'a, Value>)> {
    let common = left.value_type().higher(right.value_type());

    Some((promote(left, common)?, promote(right, common)?))
}

fn promote(value: &Value, target: ValueType) -> Option<Cow<'_, Value>> {
    if value.value_type() == target {
        return Some(Cow::Borrowed(value));
    }

    value.convert_to(target).ok().map(Cow::Owned)
}

// Compare two values that already share one type.
fn compare_aligned(left: &Value, right: &Value, for_equality: bool) -> Option<Ordering> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::BigInt(a), Value::BigInt(b)) => Some(a.cmp(b)),
        (Value::Double(a), Value::Double(b)) => Some(cmp_f64(*a, *b)),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::TextIgnoreCase(a), Value::TextIgnoreCase(b)) => Some(casefold(a).cmp(&casefold(b))),
        (Value::Geometry(a), Value::Geometry(b)) => Some(cmp_geometry(a, b)),
        (Value::Array(a), Value::Array(b)) | (Value::Row(a), Value::Row(b)) => {
            compare_collections(a, b, for_equality)
        }
        _ => None,
    }
}

fn compare_collections(left: &[Value], right: &[Value], for_equality: bool) -> Option<Ordering> {
    if for_equality {
        if left.len() != right.len() {
            return Some(left.len().cmp(&right.len()));
        }

        let mut saw_null = false;
        for (l, r) in left.iter().zip(right) {
            match compare_with_null(l, r, true) {
                None => saw_null = true,
                Some(Ordering::Equal) => {}
                unequal => return unequal,
            }
        }

        return if saw_null { None } else { Some(Ordering::Equal) };
    }

    for (l, r) in left.iter().zip(right) {
        match compare_with_null(l, r, false)? {
            Ordering::Equal => {}
            unequal => return Some(unequal),
        }
    }

    Some(left.len().cmp(&right.len()))
}

// -0.0 and 0.0 compare equal; NaN sorts above every other double.
fn cmp_f64(left: f64, right: f64) -> Ordering {
    left
        .partial_cmp(&right)
        .unwrap_or_else(|| left.total_cmp(&right))
}

fn cmp_geometry(left: &Geometry, right: &Geometry) -> Ordering {
    let kind = left.kind().rank().cmp(&right.kind().rank());
    if kind != Ordering::Equal {
        return kind;
    }

    for (l, r) in left.points().iter().zip(right.points()) {
        let cmp = cmp_f64(l.x, r.x).then_with(|| cmp_f64(l.y, r.y));
        if cmp != Ordering::Equal {
            return cmp;
        }
    }

    left.points().len().cmp(&right.points().len())
}

fn casefold(input: &str) -> Cow<'_, str> {
    if input.is_ascii() {
        if input.bytes().any(|b| b.is_ascii_uppercase()) {
            return Cow::Owned(input.to_ascii_lowercase());
        }
        return Cow::Borrowed(input);
    }

    Cow::Owned(input.to_lowercase())
}
