//! Row structure for Tabula.
//!
//! This module defines the `Row` struct which represents a single record of a
//! row set.

use crate::value::Value;
use alloc::vec::Vec;

/// A fixed-shape record of values addressed by column position.
///
/// Rows have no identity beyond their values: two rows holding equal values
/// are equal and hash the same.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Row {
    /// Values stored in this row, indexed by column position.
    values: Vec<Value>,
}

impl Row {
    /// Creates a new row with the given values.
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Returns a reference to the values.
    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Consumes the row and returns its values.
    #[inline]
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Gets a value at the given column index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Returns the values at the given column indices, `Null` for positions
    /// past the end of the row.
    pub fn pick(&self, indices: &[usize]) -> Vec<Value> {
        indices
            .iter()
            .map(|&idx| self.values.get(idx).cloned().unwrap_or(Value::Null))
            .collect()
    }

    /// Concatenates several rows into one, left to right.
    pub fn concat<'a>(parts: impl IntoIterator<Item = &'a Row>) -> Self {
        let mut values = Vec::new();
        for part in parts {
            values.extend(part.values.iter().cloned());
        }
        Self { values }
    }

    /// Returns the number of values in this row.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if this row has no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_row_new() {
        let row = Row::new(vec![Value::Int64(42), Value::String("Alice".into())]);
        assert_eq!(row.len(), 2);
        assert!(!row.is_empty());
    }

    #[test]
    fn test_row_get_value() {
        let row = Row::new(vec![Value::Int64(1), Value::String("Alice".into())]);
        assert_eq!(row.get(0), Some(&Value::Int64(1)));
        assert_eq!(row.get(1), Some(&Value::String("Alice".into())));
        assert_eq!(row.get(2), None);
    }

    #[test]
    fn test_row_pick() {
        let row = Row::new(vec![Value::from("M"), Value::Int64(40), Value::Int64(9800)]);
        assert_eq!(row.pick(&[2, 0]), vec![Value::Int64(9800), Value::from("M")]);
        assert_eq!(row.pick(&[5]), vec![Value::Null]);
    }

    #[test]
    fn test_row_concat() {
        let a = Row::new(vec![Value::from("A")]);
        let b = Row::new(vec![Value::from("B"), Value::Int64(2)]);
        let joined = Row::concat([&a, &b]);
        assert_eq!(joined.len(), 3);
        assert_eq!(joined.get(2), Some(&Value::Int64(2)));
    }

    #[test]
    fn test_row_equality_is_by_value() {
        let row1 = Row::new(vec![Value::Int64(42)]);
        let row2 = Row::new(vec![Value::Int64(42)]);
        let row3 = Row::new(vec![Value::Int64(43)]);
        assert_eq!(row1, row2);
        assert_ne!(row1, row3);
    }
}
