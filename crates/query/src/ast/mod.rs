//! AST module for sort orders, aggregate functions and predicates.

mod expr;
mod predicate;

pub use expr::{AggregateFunc, SortOrder};
pub use predicate::{CombinedPredicate, EvalType, LogicalOp, Predicate, ValuePredicate};
