//! Filter executor.

use crate::ast::Predicate;
use crate::executor::RowSet;
use alloc::vec::Vec;
use tabula_core::Row;

/// Filter executor - keeps the rows matching a predicate, in input order.
pub struct FilterExecutor<P: Predicate> {
    predicate: P,
}

impl<P: Predicate> FilterExecutor<P> {
    /// Creates a new filter executor.
    pub fn new(predicate: P) -> Self {
        Self { predicate }
    }

    /// Executes the filter on the input row set.
    pub fn execute(&self, input: &RowSet) -> RowSet {
        let rows: Vec<Row> = input
            .iter()
            .filter(|row| self.predicate.eval(row))
            .cloned()
            .collect();

        #[cfg(feature = "tracing")]
        tracing::trace!(input = input.len(), output = rows.len(), "filter");

        input.with_rows(rows)
    }
}

/// Filters a row set using a closure.
pub fn filter_rows<F>(input: &RowSet, predicate: F) -> RowSet
where
    F: Fn(&Row) -> bool,
{
    FilterExecutor::new(predicate).execute(input)
}
