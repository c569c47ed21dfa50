//! Schema module for Tabula.
//!
//! Column definitions and the `Schema` that names and types the columns of a
//! row set.

mod column;
mod table;

pub use column::Column;
pub use table::{Schema, SchemaBuilder};
