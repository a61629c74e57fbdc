//! Module: predicate
//! Responsibility: comparison predicates, their evaluation, rewriting, and fusion.
//! Does not own: value ordering (see `value`) or index bookkeeping (see `index`).
//! Boundary: surrounding passes call `optimize`, `negate` and the fusion helpers.

mod comparison;
mod evaluate;
mod fusion;
mod in_list;
mod op;
mod optimize;

#[cfg(test)]
mod tests;

// re-exports
pub use comparison::Comparison;
pub use evaluate::compare;
pub use in_list::InList;
pub use null_test::NullTest;
pub use op::Operator;
