//! Project executor.

use crate::executor::RowSet;
use alloc::vec::Vec;
use tabula_core::schema::Schema;
use tabula_core::{Result, Row, Tuple3, Value};

/// Project executor - keeps specific columns, in the given order.
#[derive(Clone, Debug)]
pub struct ProjectExecutor {
    /// Column indices to project.
    column_indices: Vec<usize>,
}

impl ProjectExecutor {
    /// Creates a new project executor.
    pub fn new(column_indices: Vec<usize>) -> Self {
        Self { column_indices }
    }

    /// Creates a project executor over named columns of `schema`.
    pub fn resolve(schema: &Schema, columns: &[&str]) -> Result<Self> {
        Ok(Self::new(schema.indices_of(columns)?))
    }

    /// Executes the projection on the input row set.
    pub fn execute(&self, input: &RowSet) -> Result<RowSet> {
        let schema = input.schema().project(&self.column_indices)?;
        let rows: Vec<Row> = input
            .iter()
            .map(|row| Row::new(row.pick(&self.column_indices)))
            .collect();
        Ok(RowSet::from_parts(schema, rows))
    }
}

/// Projects three named columns of every row into a `Tuple3`.
pub fn project_tuple3(
    input: &RowSet,
    columns: [&str; 3],
) -> Result<Vec<Tuple3<Value, Value, Value>>> {
    let indices = input.schema().indices_of(&columns)?;
    Ok(input
        .iter()
        .map(|row| {
            let mut picked = row.pick(&indices).into_iter();
            let mut next = || picked.next().unwrap_or(Value::Null);
            Tuple3::new(next(), next(), next())
        })
        .collect())
}
