//! Tabula Core - Row, value and schema types shared by the Tabula crates.
//!
//! This crate provides the data model the query operators work on:
//!
//! - `DataType`: Supported column types (Boolean, Int64, Float64, String)
//! - `Value`: Runtime values stored in a row cell
//! - `Row`: An immutable, fixed-shape record compared by value
//! - `schema`: Named, typed columns and row validation
//! - `Keyed` / `Tuple3`: Small value holders used by the join operators
//! - `Error`: Error types for invalid arguments
//!
//! # Example
//!
//! ```rust
//! use tabula_core::{DataType, Row, Value};
//! use tabula_core::schema::{Column, Schema};
//!
//! let schema = Schema::new(vec![
//!     Column::new("gender", DataType::String),
//!     Column::new("salary", DataType::Int64),
//! ]);
//!
//! let row = Row::new(vec![Value::from("M"), Value::Int64(9800)]);
//! schema.check_row(&row).unwrap();
//!
//! assert_eq!(schema.index_of("salary").unwrap(), 1);
//! assert_eq!(row.get(1), Some(&Value::Int64(9800)));
//! ```

#![no_std]

extern crate alloc;

mod error;
mod row;
pub mod schema;
mod tuple;
mod types;
mod value;

pub use error::{Error, Result};
pub use row::Row;
pub use tuple::{Keyed, Tuple3};
pub use types::DataType;
pub use value::Value;
