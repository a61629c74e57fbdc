use crate::{
    context::{EvalContext, Session},
    error::{CompileError, InternalError},
    expr::{Expr, TableAccessId},
    obs::sink::{MetricsEvent, record},
    predicate::{Comparison, Operator, compare},
    value::TriBool,
};
use std::fmt;
use tracing::debug;

///
/// InList
///
/// `operand IN(v1, v2, ...)` under three-valued logic: a NULL operand is
/// UNKNOWN, a match is TRUE, and no match is UNKNOWN if any candidate
/// compared as UNKNOWN, FALSE otherwise.
///

#[derive(Clone, Debug, PartialEq)]
pub struct InList {
    pub(crate) operand: Expr,
    pub(crate) values: Vec<Expr>,
}

impl InList {
    /// Panics if `values` is empty.
    #[must_use]
    pub fn new(operand: Expr, values: Vec<Expr>) -> Self {
        assert!(!values.is_empty(), "IN list needs at least one value");

        Self { operand, values }
    }

    #[must_use]
    pub const fn operand(&self) -> &Expr {
        &self.operand
    }

    #[must_use]
    pub fn values(&self) -> &[Expr] {
        &self.values
    }

    /// Extend the list with one more candidate.
    pub fn push_value(&mut self, value: Expr) {
        self.values.push(value);
    }

    #[must_use]
    pub fn into_expr(self) -> Expr {
        Expr::InList(Box::new(self))
    }

    /// Evaluate the operand, then candidates left to right until one matches.
    pub fn eval(&self, ctx: &dyn EvalContext) -> Result<TriBool, InternalError> {
        let operand = self.operand.eval(ctx)?;
        if operand.is_null() {
            return Ok(TriBool::Unknown);
        }

        let mut result = TriBool::False;
        for candidate in &self.values {
            let candidate = candidate.eval(ctx)?;
            match compare(ctx, &operand, &candidate, Operator::Equal) {
                TriBool::True => return Ok(TriBool::True),
                TriBool::Unknown => result = TriBool::Unknown,
                TriBool::False => {}
            }
        }

        Ok(result)
    }

    pub fn optimize(self, session: &Session) -> Result<Expr, CompileError> {
        let operand = self.operand.optimize(session)?;
        let mut values = self
            .values
            .into_iter()
            .map(|value| value.optimize(session))
            .collect::<Result<Vec<_>, _>>()?;

        if values.len() == 1 {
            let value = values.remove(0);
            debug!(operand = %operand, "single-value IN list rewritten as equality");

            return Comparison::new(Operator::Equal, operand, value).optimize(session);
        }

        if operand.is_null_constant() {
            record(MetricsEvent::NullPropagated);

            return Ok(Expr::unknown());
        }

        let list = Self::new(operand, values);
        if list.operand.is_constant() && list.values.iter().all(Expr::is_constant) {
            let folded = list.eval(session)?;
            record(MetricsEvent::ConstantFolded);
            debug!(result = %folded, "folded constant IN list");

            return Ok(Expr::from_tri(folded));
        }

        Ok(list.into_expr())
    }

    #[must_use]
    pub fn cost(&self) -> u32 {
        self.values
            .iter()
            .fold(self.operand.cost(), |cost, value| cost.saturating_add(value.cost()))
    }

    pub fn set_evaluatable(&mut self, access: TableAccessId, evaluatable: bool) {
        self.operand.set_evaluatable(access, evaluatable);
        for value in &mut self.values {
            value.set_evaluatable(access, evaluatable);
        }
    }
}

impl fmt::Display for InList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} IN(", self.operand)?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("))")
    }
}

impl From<InList> for Expr {
    fn from(list: InList) -> Self {
        list.into_expr()
    }
}
