//! Error types for Tabula.

use crate::types::DataType;
use alloc::string::String;
use core::fmt;

/// Result type alias for Tabula operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised by schema resolution and operator construction.
///
/// Every variant is reported at the offending call; operators never defer
/// or swallow them.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// A value does not match the column's declared type.
    TypeMismatch {
        column: String,
        expected: DataType,
        got: Option<DataType>,
    },
    /// A row has the wrong number of values for its schema.
    ArityMismatch {
        expected: usize,
        got: usize,
    },
    /// Column not found.
    ColumnNotFound {
        table: String,
        column: String,
    },
    /// Table not found.
    TableNotFound {
        name: String,
    },
    /// Malformed operator argument (empty key list, non-integer limit, ...).
    InvalidArgument {
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TypeMismatch {
                column,
                expected,
                got: Some(got),
            } => {
                write!(
                    f,
                    "Type mismatch on column {}: expected {:?}, got {:?}",
                    column, expected, got
                )
            }
            Error::TypeMismatch {
                column,
                expected,
                got: None,
            } => {
                write!(
                    f,
                    "Type mismatch on column {}: expected {:?}, got NULL",
                    column, expected
                )
            }
            Error::ArityMismatch { expected, got } => {
                write!(f, "Arity mismatch: expected {} values, got {}", expected, got)
            }
            Error::ColumnNotFound { table, column } if table.is_empty() => {
                write!(f, "Column not found: {}", column)
            }
            Error::ColumnNotFound { table, column } => {
                write!(f, "Column {} not found in table {}", column, table)
            }
            Error::TableNotFound { name } => {
                write!(f, "Table not found: {}", name)
            }
            Error::InvalidArgument { message } => {
                write!(f, "Invalid argument: {}", message)
            }
        }
    }
}

impl core::error::Error for Error {}

impl Error {
    /// Creates a type mismatch error.
    pub fn type_mismatch(
        column: impl Into<String>,
        expected: DataType,
        got: Option<DataType>,
    ) -> Self {
        Error::TypeMismatch {
            column: column.into(),
            expected,
            got,
        }
    }

    /// Creates an arity mismatch error.
    pub fn arity_mismatch(expected: usize, got: usize) -> Self {
        Error::ArityMismatch { expected, got }
    }

    /// Creates a column not found error.
    pub fn column_not_found(table: impl Into<String>, column: impl Into<String>) -> Self {
        Error::ColumnNotFound {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Creates a table not found error.
    pub fn table_not_found(name: impl Into<String>) -> Self {
        Error::TableNotFound { name: name.into() }
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }
}
