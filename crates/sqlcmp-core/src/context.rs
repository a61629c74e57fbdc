//! Module: context
//! Responsibility: evaluation contexts handed to expressions at compile time and per row.
//! Does not own: value semantics; ordering and equality defer to `value`.
//! Boundary: every `Expr::eval` call reads columns and parameters through `EvalContext`.

use crate::{
    expr::{ColumnRef, TableAccessId},
    value::{self, Value},
};
use sqlcmp_config::EngineConfig;
use std::{cmp::Ordering, collections::BTreeMap};

///
/// EvalContext
///
/// Capabilities an expression needs while evaluating. Implementations may
/// override the comparison hooks to apply session-specific collation.
///

pub trait EvalContext {
    /// Value of `column` in the current row, if a row is in scope.
    fn column_value(&self, column: &ColumnRef) -> Option<Value>;

    /// Value bound to positional parameter `index` (1-based).
    fn parameter_value(&self, index: usize) -> Option<Value>;

    fn compare_with_null(&self, left: &Value, right: &Value, for_equality: bool) -> Option<Ordering> {
        value::compare_with_null(left, right, for_equality)
    }

    fn are_equal(&self, left: &Value, right: &Value) -> bool {
        value::are_equal(left, right)
    }
}

///
/// Row
///
/// Column lookup for the row (or joined row) currently being filtered.
/// Columns of different table accesses never share a slot.
///

pub trait Row {
    fn column(&self, column: &ColumnRef) -> Option<Value>;
}

// Keyed by qualified name, e.g. `USERS.ID`.
impl Row for BTreeMap<String, Value> {
    fn column(&self, column: &ColumnRef) -> Option<Value> {
        self.get(&column.to_string()).cloned()
    }
}

// Joined row: one column map per table access.
impl Row for BTreeMap<TableAccessId, BTreeMap<String, Value>> {
    fn column(&self, column: &ColumnRef) -> Option<Value> {
        self.get(&column.access())?.get(column.name()).cloned()
    }
}

///
/// Session
///
/// Compile-time context: engine configuration plus bound parameter values.
/// There is no current row, so column reads through a session fail.
///

#[derive(Clone, Debug, Default)]
pub struct Session {
    config: EngineConfig,
    parameters: BTreeMap<usize, Value>,
}

impl Session {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            parameters: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Bind `value` to parameter `index`, replacing any earlier binding.
    pub fn set_parameter(&mut self, index: usize, value: impl Into<Value>) {
        self.parameters.insert(index, value.into());
    }

    /// Borrow this session together with one row for per-row evaluation.
    #[must_use]
    pub const fn with_row<'a, R: Row>(&'a self, row: &'a R) -> RowContext<'a, R> {
        RowContext { session: self, row }
    }
}

impl EvalContext for Session {
    fn column_value(&self, _: &ColumnRef) -> Option<Value> {
        None
    }

    fn parameter_value(&self, index: usize) -> Option<Value> {
        self.parameters.get(&index).cloned()
    }
}

///
/// RowContext
///
/// A session paired with the row currently being filtered.
///

pub struct RowContext<'a, R: Row> {
    session: &'a Session,
    row: &'a R,
}

impl<R: Row> RowContext<'_, R> {
    #[must_use]
    pub const fn session(&self) -> &Session {
        self.session
    }
}

impl<R: Row> EvalContext for RowContext<'_, R> {
    fn column_value(&self, column: &ColumnRef) -> Option<Value> {
        self.row.column(column)
    }

    fn parameter_value(&self, index: usize) -> Option<Value> {
        self.session.parameter_value(index)
    }
}
