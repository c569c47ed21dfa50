//! Query executor module.

mod aggregate;
mod distinct;
mod filter;
pub mod join;
mod limit;
mod project;
mod relation;
mod sort;

pub use aggregate::{
    aggregate, aggregate_values, group_aggregate, group_by, AggregateExecutor, AggregateValue,
    Group, Groups,
};
pub use distinct::{distinct, DistinctExecutor};
pub use filter::{filter_rows, FilterExecutor};
pub use join::{
    chain_join_n, cross_join3, cross_join_n, inner_join3, nested_loop_join, ChainJoin, CrossJoin,
    JoinKey,
};
pub use limit::{limit_rows, LimitExecutor};
pub use project::{project_tuple3, ProjectExecutor};
pub use relation::RowSet;
pub use sort::{sort_rows_by, SortExecutor};
