//! Comparison predicates for a relational query engine: three-valued
//! evaluation, compile-time rewriting, predicate fusion, and derivation of
//! index conditions for table accesses.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod context;
pub mod error;
pub mod expr;
pub mod index;
pub mod obs;
pub mod predicate;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        context::{EvalContext, Row, RowContext, Session},
        expr::{ColumnRef, Expr, TableAccessId},
        index::{IndexCondition, TableAccess},
        predicate::{Comparison, InList, NullTest, Operator},
        value::{TriBool, Value, ValueType},
    };
}
