//! The `RowSet` every operator consumes and produces.

use alloc::vec::Vec;
use tabula_core::schema::Schema;
use tabula_core::{Result, Row, Value};

/// An ordered sequence of rows sharing one schema.
///
/// Insertion order is preserved unless an operator explicitly reorders it.
/// Operators borrow a row set and return a new one; the input is never
/// modified.
#[derive(Clone, Debug, PartialEq)]
pub struct RowSet {
    schema: Schema,
    rows: Vec<Row>,
}

impl RowSet {
    /// Creates a row set, checking every row against the schema.
    pub fn new(schema: Schema, rows: Vec<Row>) -> Result<Self> {
        for row in &rows {
            schema.check_row(row)?;
        }
        Ok(Self { schema, rows })
    }

    /// Creates an empty row set.
    pub fn empty(schema: Schema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    /// Creates a row set from rows an operator already shaped for `schema`.
    #[inline]
    pub(crate) fn from_parts(schema: Schema, rows: Vec<Row>) -> Self {
        Self { schema, rows }
    }

    /// Returns a row set with this schema and the given rows.
    #[inline]
    pub(crate) fn with_rows(&self, rows: Vec<Row>) -> Self {
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Returns the schema.
    #[inline]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the rows in order.
    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Consumes the row set and returns its rows.
    #[inline]
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Returns the number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the row set has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns an iterator over the rows.
    pub fn iter(&self) -> core::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Gets a row by position.
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Resolves a column name against the schema.
    pub fn index_of(&self, column: &str) -> Result<usize> {
        self.schema.index_of(column)
    }

    /// Returns the values of one named column, in row order.
    pub fn column_values(&self, column: &str) -> Result<Vec<Value>> {
        let idx = self.schema.index_of(column)?;
        Ok(self
            .rows
            .iter()
            .map(|row| row.get(idx).cloned().unwrap_or(Value::Null))
            .collect())
    }
}

impl IntoIterator for RowSet {
    type Item = Row;
    type IntoIter = alloc::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a RowSet {
    type Item = &'a Row;
    type IntoIter = core::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
