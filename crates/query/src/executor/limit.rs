//! Limit executor.

use crate::executor::RowSet;
use alloc::format;
use tabula_core::{Error, Result, Value};

/// Limit executor - applies LIMIT and OFFSET to a row set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LimitExecutor {
    limit: usize,
    offset: usize,
}

impl LimitExecutor {
    /// Creates a new limit executor. A negative limit keeps no rows.
    pub fn new(limit: i64, offset: usize) -> Self {
        Self {
            limit: usize::try_from(limit).unwrap_or(0),
            offset,
        }
    }

    /// Creates a limit executor with only a limit (no offset).
    pub fn limit_only(limit: i64) -> Self {
        Self::new(limit, 0)
    }

    /// Creates a limit executor from a dynamically supplied bound.
    ///
    /// Anything but an integer, `Null` included, is rejected.
    pub fn from_value(limit: &Value) -> Result<Self> {
        match limit {
            Value::Int64(n) => Ok(Self::limit_only(*n)),
            other => Err(Error::invalid_argument(format!(
                "LIMIT expects an integer, got {}",
                other
            ))),
        }
    }

    /// Returns the number of rows kept at most.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the number of leading rows skipped.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Executes the limit on the input row set.
    pub fn execute(&self, input: &RowSet) -> RowSet {
        let len = input.len();
        let start = self.offset.min(len);
        let end = self.offset.saturating_add(self.limit).min(len);

        #[cfg(feature = "tracing")]
        tracing::trace!(input = len, output = end - start, "limit");

        input.with_rows(input.rows()[start..end].to_vec())
    }
}

/// Applies limit and offset to a row set.
pub fn limit_rows(input: &RowSet, limit: i64, offset: usize) -> RowSet {
    LimitExecutor::new(limit, offset).execute(input)
}
