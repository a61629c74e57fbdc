//! Module: index
//! Responsibility: index conditions derived from predicates, collected per table access.
//! Does not own: index selection or scanning; consumers read `TableAccess::conditions`.
//! Boundary: predicates emit at most one condition each through `Expr::create_index_conditions`.

mod derive;


use crate::{
    expr::{ColumnRef, Expr, TableAccessId},
    predicate::Operator,
    value::ValueType,
};
use derive_more::{Deref, IntoIterator};
use std::{fmt, ops::BitOr};

///
/// TableAccess
///
/// One table filter of a query, with the index conditions collected for it.
///

#[derive(Clone, Debug)]
pub struct TableAccess {
    id: TableAccessId,
    table: String,
    query_comparable: bool,
    conditions: IndexConditions,
}

impl TableAccess {
    #[must_use]
    pub fn new(id: TableAccessId, table: impl Into<String>) -> Self {
        Self {
            id,
            table: table.into(),
            query_comparable: true,
            conditions: IndexConditions::default(),
        }
    }

    /// Mark whether the table supports conditions derived from query predicates.
    #[must_use]
    pub const fn with_query_comparable(mut self, query_comparable: bool) -> Self {
        self.query_comparable = query_comparable;
        self
    }

    #[must_use]
    pub const fn id(&self) -> TableAccessId {
        self.id
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    #[must_use]
    pub const fn is_query_comparable(&self) -> bool {
        self.query_comparable
    }

    /// Column of this access, rendered with the table name as qualifier.
    #[must_use]
    pub fn column(&self, name: impl Into<String>, value_type: ValueType) -> ColumnRef {
        ColumnRef::new(self.id, self.table.clone(), name, value_type)
    }

    pub fn add_index_condition(&mut self, condition: IndexCondition) {
        self.conditions.0.push(condition);
    }

    #[must_use]
    pub const fn conditions(&self) -> &IndexConditions {
        &self.conditions
    }
}

///
/// IndexConditions
///

#[derive(Clone, Debug, Default, Deref, IntoIterator, PartialEq)]
#[into_iterator(owned, ref)]
pub struct IndexConditions(Vec<IndexCondition>);

impl IndexConditions {
    /// Combined mask of every condition on the named column.
    #[must_use]
    pub fn mask_for(&self, column: &str) -> IndexConditionMask {
        self.0
            .iter()
            .filter(|condition| condition.is_always_false() || condition.column_name() == Some(column))
            .fold(IndexConditionMask::default(), |mask, condition| {
                mask | condition.mask()
            })
    }
}

///
/// IndexBound
///

#[derive(Clone, Debug, PartialEq)]
pub enum IndexBound {
    Expr(Expr),
    List(Vec<Expr>),
    None,
}

///
/// IndexCondition
///
/// Directional `column OP bound` triple. The column is always the left-hand
/// side; conditions derived from `bound OP column` carry the reversed operator.
///

#[derive(Clone, Debug, PartialEq)]
pub struct IndexCondition {
    column: Option<ColumnRef>,
    op: Operator,
    bound: IndexBound,
}

impl IndexCondition {
    /// `column OP bound`. Panics unless `op` can bound an index scan.
    #[must_use]
    pub fn compare(op: Operator, column: ColumnRef, bound: Expr) -> Self {
        assert!(op.is_index_eligible(), "operator {op:?} cannot bound an index");

        Self {
            column: Some(column),
            op,
            bound: IndexBound::Expr(bound),
        }
    }

    #[must_use]
    pub const fn in_list(column: ColumnRef, values: Vec<Expr>) -> Self {
        Self {
            column: Some(column),
            op: Operator::InList,
            bound: IndexBound::List(values),
        }
    }

    /// Condition for a predicate known to be FALSE: the scan yields nothing.
    #[must_use]
    pub const fn always_false() -> Self {
        Self {
            column: None,
            op: Operator::AlwaysFalse,
            bound: IndexBound::None,
        }
    }

    #[must_use]
    pub const fn column(&self) -> Option<&ColumnRef> {
        self.column.as_ref()
    }

    fn column_name(&self) -> Option<&str> {
        self.column.as_ref().map(ColumnRef::name)
    }

    #[must_use]
    pub const fn op(&self) -> Operator {
        self.op
    }

    #[must_use]
    pub const fn bound(&self) -> &IndexBound {
        &self.bound
    }

    #[must_use]
    pub const fn is_always_false(&self) -> bool {
        matches!(self.op, Operator::AlwaysFalse)
    }

    #[must_use]
    pub fn mask(&self) -> IndexConditionMask {
        let mut mask = IndexConditionMask::default();
        match self.op {
            Operator::AlwaysFalse => mask.always_false = true,
            Operator::Equal | Operator::EqualNullSafe | Operator::InList | Operator::InQuery => {
                mask.equality = true;
            }
            Operator::GreaterOrEqual | Operator::Greater => mask.start = true,
            Operator::LessOrEqual | Operator::Less => mask.end = true,
            Operator::SpatialIntersects => mask.spatial = true,
            Operator::NotEqual | Operator::NotEqualNullSafe => {
                unreachable!("inequality never bounds an index condition")
            }
        }

        mask
    }
}

impl fmt::Display for IndexCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.column, &self.bound, self.op) {
            (None, IndexBound::None, _) => f.write_str("FALSE"),
            (Some(column), IndexBound::List(values), _) => {
                write!(f, "{column} IN(")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str(")")
            }
            (Some(column), IndexBound::Expr(bound), Operator::EqualNullSafe)
                if bound.is_null_constant() =>
            {
                write!(f, "{column} IS NULL")
            }
            (Some(column), IndexBound::Expr(bound), op) => {
                write!(f, "{column} {} {bound}", op.sql_operator())
            }
            _ => unreachable!("only the always-false condition lacks a column or bound"),
        }
    }
}

///
/// IndexConditionMask
///
/// How a set of conditions can drive a scan: equality lookup, range start,
/// range end, spatial search, or no rows at all.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[allow(clippy::struct_excessive_bools)]
pub struct IndexConditionMask {
    pub equality: bool,
    pub start: bool,
    pub end: bool,
    pub spatial: bool,
    pub always_false: bool,
}

impl IndexConditionMask {
    #[must_use]
    pub const fn is_range(self) -> bool {
        self.start && self.end
    }
}

impl BitOr for IndexConditionMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self {
            equality: self.equality || rhs.equality,
            start: self.start || rhs.start,
            end: self.end || rhs.end,
            spatial: self.spatial || rhs.spatial,
            always_false: self.always_false || rhs.always_false,
        }
    }
}
