//! Chain inner join over any number of row sets.

use super::combinations;
use crate::executor::RowSet;
use alloc::format;
use alloc::vec::Vec;
use core::cmp::Ordering;
use tabula_core::schema::Schema;
use tabula_core::{Error, Result, Row};

/// Equality condition between two adjacent inputs of a chain join.
///
/// `left` is a column of input `i`, `right` a column of input `i + 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JoinKey {
    pub left: usize,
    pub right: usize,
}

impl JoinKey {
    pub fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }
}

/// Chain join executor - inner join of N inputs on N-1 adjacent keys.
///
/// Key `i` links input `i` to input `i + 1` only (`k1 = k2 AND k2 = k3`,
/// never `k1 = k3` directly). Keys compare by the value order, as WHERE
/// predicates do, so an Int64 key matches an equal Float64 key. NULL keys
/// never match. Duplicate keys cross-match, and output order is cross-join
/// order restricted to matches.
#[derive(Clone, Debug)]
pub struct ChainJoin {
    keys: Vec<JoinKey>,
}

impl ChainJoin {
    /// Creates a new chain join executor.
    pub fn new(keys: Vec<JoinKey>) -> Self {
        Self { keys }
    }

    /// Creates a chain join from named columns.
    ///
    /// `on[i]` names a column of `schemas[i]` and one of `schemas[i + 1]`.
    pub fn resolve(schemas: &[&Schema], on: &[(&str, &str)]) -> Result<Self> {
        check_key_count(schemas.len(), on.len())?;
        let keys = on
            .iter()
            .enumerate()
            .map(|(i, (left, right))| {
                Ok(JoinKey::new(
                    schemas[i].index_of(left)?,
                    schemas[i + 1].index_of(right)?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(keys))
    }

    /// Returns the join keys.
    pub fn keys(&self) -> &[JoinKey] {
        &self.keys
    }

    /// Executes the chain join.
    pub fn execute(&self, inputs: &[&RowSet]) -> Result<RowSet> {
        if inputs.is_empty() {
            return Err(Error::invalid_argument("chain join requires at least one input"));
        }
        check_key_count(inputs.len(), self.keys.len())?;
        for (i, key) in self.keys.iter().enumerate() {
            check_index(inputs[i].schema(), key.left)?;
            check_index(inputs[i + 1].schema(), key.right)?;
        }

        let schema = Schema::join(inputs.iter().map(|set| set.schema()));
        let row_slices: Vec<&[Row]> = inputs.iter().map(|set| set.rows()).collect();
        let rows: Vec<Row> = combinations(&row_slices, |level, prev, next| {
            let key = self.keys[level];
            match (prev.get(key.left), next.get(key.right)) {
                (Some(l), Some(r)) => {
                    !l.is_null() && !r.is_null() && l.cmp(r) == Ordering::Equal
                }
                _ => false,
            }
        })
        .into_iter()
        .map(Row::concat)
        .collect();

        #[cfg(feature = "tracing")]
        tracing::trace!(inputs = inputs.len(), output = rows.len(), "chain_join");

        Ok(RowSet::from_parts(schema, rows))
    }
}

fn check_key_count(inputs: usize, keys: usize) -> Result<()> {
    if inputs == 0 || keys + 1 != inputs {
        return Err(Error::invalid_argument(format!(
            "chain join of {} inputs needs {} keys, got {}",
            inputs,
            inputs.saturating_sub(1),
            keys
        )));
    }
    Ok(())
}

fn check_index(schema: &Schema, index: usize) -> Result<()> {
    if index >= schema.len() {
        return Err(Error::invalid_argument(format!(
            "join column index {} out of range for {} columns",
            index,
            schema.len()
        )));
    }
    Ok(())
}
