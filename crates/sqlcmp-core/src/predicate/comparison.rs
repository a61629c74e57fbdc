use crate::{
    context::EvalContext,
    error::InternalError,
    expr::{Expr, TableAccessId},
    predicate::{Operator, compare},
    value::{TriBool, Value},
};
use std::fmt;

///
/// Comparison
///
/// Binary comparison node `left OP right`.
///
/// A when-operand comparison is the test of a `CASE x WHEN OP right` branch:
/// the case value is supplied by the surrounding construct and the node
/// is never reordered, replaced, or negated.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    pub(crate) op: Operator,
    pub(crate) left: Expr,
    pub(crate) right: Expr,
    pub(crate) when_operand: bool,
}

impl Comparison {
    /// Build `left OP right`. Panics on a pseudo operator.
    #[must_use]
    pub fn new(op: Operator, left: Expr, right: Expr) -> Self {
        Self::build(op, left, right, false)
    }

    /// Build the test of a `WHEN` branch; `left` is the case operand.
    #[must_use]
    pub fn when_operand(op: Operator, left: Expr, right: Expr) -> Self {
        Self::build(op, left, right, true)
    }

    fn build(op: Operator, left: Expr, right: Expr, when_operand: bool) -> Self {
        assert!(!op.is_pseudo(), "operator {op:?} cannot head a comparison");

        Self {
            op,
            left,
            right,
            when_operand,
        }
    }

    #[must_use]
    pub const fn op(&self) -> Operator {
        self.op
    }

    #[must_use]
    pub const fn left(&self) -> &Expr {
        &self.left
    }

    #[must_use]
    pub const fn right(&self) -> &Expr {
        &self.right
    }

    #[must_use]
    pub const fn is_when_operand(&self) -> bool {
        self.when_operand
    }

    #[must_use]
    pub fn into_expr(self) -> Expr {
        Expr::Comparison(Box::new(self))
    }

    /// Evaluate left, then right.
    ///
    /// A NULL left operand under a non-null-safe operator yields `Unknown`
    /// without evaluating the right operand.
    pub fn eval(&self, ctx: &dyn EvalContext) -> Result<TriBool, InternalError> {
        let left = self.left.eval(ctx)?;

        self.eval_against(ctx, &left)
    }

    /// Evaluate as the test of a `WHEN` branch against `case_value`.
    ///
    /// A when-operand node compares `case_value OP right`. Any other node is a
    /// searched condition whose own value is tested for equality with the
    /// case value.
    pub fn eval_when(
        &self,
        ctx: &dyn EvalContext,
        case_value: &Value,
    ) -> Result<TriBool, InternalError> {
        if !self.when_operand {
            let own = self.eval(ctx)?.into_value();

            return Ok(compare(ctx, case_value, &own, Operator::Equal));
        }

        self.eval_against(ctx, case_value)
    }

    fn eval_against(&self, ctx: &dyn EvalContext, left: &Value) -> Result<TriBool, InternalError> {
        if left.is_null() && !self.op.is_null_safe() {
            return Ok(TriBool::Unknown);
        }
        let right = self.right.eval(ctx)?;

        Ok(compare(ctx, left, &right, self.op))
    }

    /// Same operands under the complementary operator.
    ///
    /// `None` for spatial intersection and for when-operand nodes.
    #[must_use]
    pub fn negate(&self) -> Option<Self> {
        if self.op == Operator::SpatialIntersects || self.when_operand {
            return None;
        }

        Some(Self::new(
            self.op.negate(),
            self.left.clone(),
            self.right.clone(),
        ))
    }

    #[must_use]
    pub fn cost(&self) -> u32 {
        self.left
            .cost()
            .saturating_add(self.right.cost())
            .saturating_add(1)
    }

    #[must_use]
    pub fn references_access(&self, access: TableAccessId) -> bool {
        self.left.references_access(access) || self.right.references_access(access)
    }

    pub fn set_evaluatable(&mut self, access: TableAccessId, evaluatable: bool) {
        self.left.set_evaluatable(access, evaluatable);
        self.right.set_evaluatable(access, evaluatable);
    }

    #[must_use]
    pub fn is_evaluatable(&self) -> bool {
        self.left.is_evaluatable() && self.right.is_evaluatable()
    }

    #[must_use]
    pub const fn subexpression_count(&self) -> usize {
        2
    }

    #[must_use]
    pub const fn subexpression(&self, index: usize) -> Option<&Expr> {
        match index {
            0 => Some(&self.left),
            1 => Some(&self.right),
            _ => None,
        }
    }

    /// For `a = b`, the operand opposite the one rendering like `expr`.
    #[must_use]
    pub fn equal_partner(&self, expr: &Expr) -> Option<&Expr> {
        if self.op != Operator::Equal {
            return None;
        }

        let sql = expr.sql();
        if self.left.sql() == sql {
            Some(&self.right)
        } else if self.right.sql() == sql {
            Some(&self.left)
        } else {
            None
        }
    }

    /// Render the `WHEN` form, which omits the case operand.
    #[must_use]
    pub fn when_sql(&self) -> String {
        let mut out = String::new();
        self.write_tail(&mut out);
        out
    }

    fn write_tail(&self, out: &mut String) {
        let enclose = !self.op.is_null_safe() && self.right.encloses_as_operand();

        out.push(' ');
        out.push_str(self.op.sql_operator());
        out.push(' ');
        if enclose {
            out.push('(');
        }
        out.push_str(&self.right.sql());
        if enclose {
            out.push(')');
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tail = String::new();
        self.write_tail(&mut tail);

        write!(f, "({}{tail})", self.left)
    }
}

impl From<Comparison> for Expr {
    fn from(comparison: Comparison) -> Self {
        comparison.into_expr()
    }
}
