use crate::{
    expr::{ColumnRef, Expr},
    index::{IndexCondition, TableAccess},
    obs::sink::{IndexOutcome, MetricsEvent, record},
    predicate::{Comparison, InList, NullTest, Operator},
    value::ValueType,
};
use tracing::debug;

impl Comparison {
    /// Index condition this comparison implies for `access`, if any.
    ///
    /// Exactly one operand must be a column of `access` and the other must
    /// not read from `access`. The condition is anchored on the column, so
    /// `10 > col` yields `col < 10`.
    #[must_use]
    pub fn derive_index_condition(&self, access: &TableAccess) -> Option<IndexCondition> {
        if self.when_operand || !access.is_query_comparable() {
            return None;
        }

        let id = access.id();
        let left = self.left.as_column().filter(|column| column.access() == id);
        let right = self.right.as_column().filter(|column| column.access() == id);

        let (column, other, op) = match (left, right) {
            (Some(column), None) => (column, &self.right, self.op),
            (None, Some(column)) => (column, &self.left, self.op.reverse()),
            (Some(_), Some(_)) => return rejected(self, "both operands read the same access"),
            (None, None) => return None,
        };

        if other.references_access(id) {
            return rejected(self, "bound reads the filtered access");
        }
        if !self.op.is_index_eligible() {
            return rejected(self, "operator cannot bound an index");
        }

        // Only a case-insensitive bound against another column type is refused.
        let other_type = other.value_type();
        if column.value_type() != other_type && other_type == ValueType::TextIgnoreCase {
            return rejected(self, "case-insensitive bound against a case-sensitive column");
        }

        derived(IndexCondition::compare(op, column.clone(), other.clone()))
    }
}

impl NullTest {
    /// `col IS NULL` on `access` becomes `col IS NOT DISTINCT FROM NULL`.
    #[must_use]
    pub fn derive_index_condition(&self, access: &TableAccess) -> Option<IndexCondition> {
        if self.negated || !access.is_query_comparable() {
            return None;
        }
        let column = access_column(&self.operand, access)?;

        derived(IndexCondition::compare(
            Operator::EqualNullSafe,
            column.clone(),
            Expr::null(),
        ))
    }
}

impl InList {
    /// `col IN(...)` on `access`, when every candidate is independent of
    /// `access` and orders like the column.
    #[must_use]
    pub fn derive_index_condition(&self, access: &TableAccess) -> Option<IndexCondition> {
        if !access.is_query_comparable() {
            return None;
        }
        let column = access_column(&self.operand, access)?;

        for value in &self.values {
            if value.references_access(access.id()) {
                return rejected(self, "candidate reads the filtered access");
            }
            let common = column.value_type().higher(value.value_type());
            if common == ValueType::TextIgnoreCase && column.value_type() != common {
                return rejected(self, "candidate changes the column collation");
            }
        }

        derived(IndexCondition::in_list(column.clone(), self.values.clone()))
    }
}

fn access_column<'a>(expr: &'a Expr, access: &TableAccess) -> Option<&'a ColumnRef> {
    expr.as_column().filter(|column| column.access() == access.id())
}

fn derived(condition: IndexCondition) -> Option<IndexCondition> {
    record(MetricsEvent::IndexCondition {
        outcome: IndexOutcome::Derived,
    });
    debug!(condition = %condition, "derived index condition");

    Some(condition)
}

fn rejected(predicate: &dyn std::fmt::Display, reason: &'static str) -> Option<IndexCondition> {
    record(MetricsEvent::IndexCondition {
        outcome: IndexOutcome::Rejected,
    });
    debug!(predicate = %predicate, reason, "no index condition");

    None
}
