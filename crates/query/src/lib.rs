//! Tabula Query - SQL clauses as operators over in-memory row sets.
//!
//! This crate provides:
//!
//! - `ast`: Predicates, sort orders and aggregate functions
//! - `executor`: Operators (filter, sort, limit, project, distinct, aggregate, group by, joins)
//! - `catalog`: Named tables and joins by table name
//! - `query`: A fluent pipeline evaluating clauses in SQL order
//!
//! Every operator borrows its input and returns a new row set.
//!
//! # Example
//!
//! ```rust
//! use tabula_core::schema::{Column, Schema};
//! use tabula_core::{DataType, Row, Value};
//! use tabula_query::ast::{EvalType, SortOrder};
//! use tabula_query::executor::RowSet;
//! use tabula_query::query::Query;
//!
//! let schema = Schema::named(
//!     "employees",
//!     vec![
//!         Column::new("gender", DataType::String),
//!         Column::new("salary", DataType::Int64),
//!     ],
//! );
//! let rows = vec![
//!     Row::new(vec![Value::from("M"), Value::Int64(1500)]),
//!     Row::new(vec![Value::from("F"), Value::Int64(6000)]),
//!     Row::new(vec![Value::from("M"), Value::Int64(9800)]),
//! ];
//! let employees = RowSet::new(schema, rows).unwrap();
//!
//! let top = Query::from(&employees)
//!     .filter_column("gender", EvalType::Eq, "M")
//!     .order_by("salary", SortOrder::Desc)
//!     .limit(1)
//!     .execute()
//!     .unwrap();
//!
//! assert_eq!(top.rows()[0].get(1), Some(&Value::Int64(9800)));
//! ```

#![no_std]

extern crate alloc;

pub mod ast;
pub mod catalog;
pub mod executor;
pub mod query;
