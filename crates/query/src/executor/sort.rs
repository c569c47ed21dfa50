//! Sort executor.

use crate::ast::SortOrder;
use crate::executor::RowSet;
use alloc::vec::Vec;
use core::cmp::Ordering;
use tabula_core::schema::Schema;
use tabula_core::{Error, Result, Row};

/// Sort executor - stable sort by a list of (column, direction) keys.
///
/// Keys are compared left to right and the first non-equal key decides.
/// Rows equal on every key keep their input order.
#[derive(Clone, Debug)]
pub struct SortExecutor {
    /// Column indices and sort orders.
    order_by: Vec<(usize, SortOrder)>,
}

impl SortExecutor {
    /// Creates a new sort executor.
    pub fn new(order_by: Vec<(usize, SortOrder)>) -> Self {
        Self { order_by }
    }

    /// Creates a sort executor over named columns of `schema`.
    pub fn resolve(schema: &Schema, keys: &[(&str, SortOrder)]) -> Result<Self> {
        if keys.is_empty() {
            return Err(Error::invalid_argument("sort requires at least one key"));
        }
        let order_by = keys
            .iter()
            .map(|(name, order)| Ok((schema.index_of(name)?, *order)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(order_by))
    }

    /// Executes the sort on the input row set.
    pub fn execute(&self, input: &RowSet) -> RowSet {
        let mut rows = input.rows().to_vec();
        rows.sort_by(|a, b| self.compare_rows(a, b));

        #[cfg(feature = "tracing")]
        tracing::trace!(rows = rows.len(), keys = self.order_by.len(), "sort");

        input.with_rows(rows)
    }

    fn compare_rows(&self, a: &Row, b: &Row) -> Ordering {
        for (col_idx, order) in &self.order_by {
            let cmp = match (a.get(*col_idx), b.get(*col_idx)) {
                (Some(av), Some(bv)) => av.cmp(bv),
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };

            if cmp != Ordering::Equal {
                return order.apply(cmp);
            }
        }
        Ordering::Equal
    }
}

/// Sorts a row set by a comparison function.
pub fn sort_rows_by<F>(input: &RowSet, compare: F) -> RowSet
where
    F: Fn(&Row, &Row) -> Ordering,
{
    let mut rows = input.rows().to_vec();
    rows.sort_by(compare);
    input.with_rows(rows)
}
