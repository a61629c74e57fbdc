//! Pairwise rewrites over two equality comparisons joined by AND or OR.
//!
//! Operands are matched by their canonical SQL rendering, never by value.

use crate::{
    expr::Expr,
    obs::sink::{FusionKind, MetricsEvent, record},
    predicate::{Comparison, InList, Operator},
};
use tracing::debug;

// Both sides of one equality, with their rendering and constness.
struct Sides<'a> {
    left: &'a Expr,
    right: &'a Expr,
    left_sql: String,
    right_sql: String,
    left_const: bool,
    right_const: bool,
}

impl<'a> Sides<'a> {
    fn of(comparison: &'a Comparison) -> Self {
        Self {
            left: &comparison.left,
            right: &comparison.right,
            left_sql: comparison.left.sql(),
            right_sql: comparison.right.sql(),
            left_const: comparison.left.is_constant(),
            right_const: comparison.right.is_constant(),
        }
    }
}

impl Comparison {
    /// From `a = b AND a = c`, derive `b = c`.
    ///
    /// Never pairs two constants: `b = 2 AND b = 3` must not yield `2 = 3`.
    #[must_use]
    pub fn derive_transitive_equal(&self, other: &Self) -> Option<Self> {
        if self.op != Operator::Equal || other.op != Operator::Equal || self.when_operand {
            return None;
        }

        let a = Sides::of(self);
        let b = Sides::of(other);

        let (x, y) = if !(a.right_const && b.right_const) && a.left_sql == b.left_sql {
            (a.right, b.right)
        } else if !(a.right_const && b.left_const) && a.left_sql == b.right_sql {
            (a.right, b.left)
        } else if !(a.left_const && b.right_const) && a.right_sql == b.left_sql {
            (a.left, b.right)
        } else if !(a.left_const && b.left_const) && a.right_sql == b.right_sql {
            (a.left, b.left)
        } else {
            return None;
        };

        let fused = Self::new(Operator::Equal, x.clone(), y.clone());
        record(MetricsEvent::Fusion {
            kind: FusionKind::TransitiveEqual,
        });
        debug!(fused = %fused, "derived transitive equality");

        Some(fused)
    }

    /// From `a = 1 OR a = 2`, derive `a IN(1, 2)`.
    #[must_use]
    pub fn derive_membership(&self, other: &Self) -> Option<InList> {
        if self.op != Operator::Equal || other.op != Operator::Equal {
            return None;
        }

        let a = Sides::of(self);
        let b = Sides::of(other);

        let (shared, first, second) = if a.right_const && b.right_const && a.left_sql == b.left_sql
        {
            (a.left, a.right, b.right)
        } else if a.right_const && b.left_const && a.left_sql == b.right_sql {
            (a.left, a.right, b.left)
        } else if a.left_const && b.right_const && a.right_sql == b.left_sql {
            (a.right, a.left, b.right)
        } else if a.left_const && b.left_const && a.right_sql == b.right_sql {
            (a.right, a.left, b.left)
        } else {
            return None;
        };

        let fused = InList::new(shared.clone(), vec![first.clone(), second.clone()]);
        record(MetricsEvent::Fusion {
            kind: FusionKind::Membership,
        });
        debug!(fused = %fused, "derived membership from disjunction");

        Some(fused)
    }
}
