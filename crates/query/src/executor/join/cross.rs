//! Cross join over any number of row sets.

use super::combinations;
use crate::executor::RowSet;
use alloc::vec::Vec;
use tabula_core::schema::Schema;
use tabula_core::{Error, Result, Row};

/// Cross join executor - every combination of one row per input.
///
/// The output has `product(|input|)` rows, none if any input is empty. Its
/// schema concatenates the input schemas, qualifying columns of named
/// inputs as `table.column`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CrossJoin;

impl CrossJoin {
    /// Creates a new cross join executor.
    pub fn new() -> Self {
        Self
    }

    /// Executes the cross join.
    pub fn execute(&self, inputs: &[&RowSet]) -> Result<RowSet> {
        if inputs.is_empty() {
            return Err(Error::invalid_argument("cross join requires at least one input"));
        }
        let schema = Schema::join(inputs.iter().map(|set| set.schema()));
        let row_slices: Vec<&[Row]> = inputs.iter().map(|set| set.rows()).collect();
        let rows: Vec<Row> = combinations(&row_slices, |_, _, _| true)
            .into_iter()
            .map(Row::concat)
            .collect();

        #[cfg(feature = "tracing")]
        tracing::trace!(inputs = inputs.len(), output = rows.len(), "cross_join");

        Ok(RowSet::from_parts(schema, rows))
    }
}
