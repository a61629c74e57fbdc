use crate::value::ValueType;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// TableAccessId
///
/// Identity of one table access (one table filter) inside a query. Two
/// references to the same table in a self-join get distinct ids.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct TableAccessId(u32);

impl TableAccessId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

///
/// ColumnRef
///
/// Column of one table access. `qualifier` is the alias the column is
/// rendered with, so columns of different accesses never render alike.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ColumnRef {
    access: TableAccessId,
    qualifier: String,
    name: String,
    value_type: ValueType,
    evaluatable: bool,
}

impl ColumnRef {
    #[must_use]
    pub fn new(
        access: TableAccessId,
        qualifier: impl Into<String>,
        name: impl Into<String>,
        value_type: ValueType,
    ) -> Self {
        Self {
            access,
            qualifier: qualifier.into(),
            name: name.into(),
            value_type,
            evaluatable: true,
        }
    }

    #[must_use]
    pub const fn access(&self) -> TableAccessId {
        self.access
    }

    #[must_use]
    pub fn qualifier(&self) -> &str {
        &self.qualifier
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.value_type
    }

    #[must_use]
    pub const fn is_evaluatable(&self) -> bool {
        self.evaluatable
    }

    /// Record whether the owning access has a current row at this join stage.
    /// Columns of other accesses are left untouched.
    pub const fn set_evaluatable(&mut self, access: TableAccessId, evaluatable: bool) {
        if self.access.0 == access.0 {
            self.evaluatable = evaluatable;
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.qualifier, self.name)
    }
}
