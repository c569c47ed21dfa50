//! Distinct executor.

use crate::executor::RowSet;
use alloc::vec::Vec;
use core::hash::Hash;
use hashbrown::HashSet;
use tabula_core::schema::Schema;
use tabula_core::{Result, Row, Value};

/// Distinct executor - keeps the first row of every distinct key.
///
/// The key is the given columns, or the whole row when no columns are given.
/// Survivors keep their input order.
#[derive(Clone, Debug, Default)]
pub struct DistinctExecutor {
    columns: Vec<usize>,
}

impl DistinctExecutor {
    /// Creates a distinct executor keyed on the given column indices.
    pub fn new(columns: Vec<usize>) -> Self {
        Self { columns }
    }

    /// Creates a distinct executor keyed on the whole row.
    pub fn whole_row() -> Self {
        Self::default()
    }

    /// Creates a distinct executor over named columns of `schema`.
    pub fn resolve(schema: &Schema, columns: &[&str]) -> Result<Self> {
        Ok(Self::new(schema.indices_of(columns)?))
    }

    /// Executes the distinct on the input row set.
    pub fn execute(&self, input: &RowSet) -> RowSet {
        let rows: Vec<Row> = if self.columns.is_empty() {
            let mut seen: HashSet<&Row> = HashSet::with_capacity(input.len());
            input.iter().filter(|row| seen.insert(*row)).cloned().collect()
        } else {
            let mut seen: HashSet<Vec<Value>> = HashSet::with_capacity(input.len());
            input
                .iter()
                .filter(|row| seen.insert(row.pick(&self.columns)))
                .cloned()
                .collect()
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(input = input.len(), output = rows.len(), "distinct");

        input.with_rows(rows)
    }
}

/// Removes duplicates from a scalar sequence, keeping first occurrences.
pub fn distinct<T, I>(values: I) -> Vec<T>
where
    T: Hash + Eq + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}
