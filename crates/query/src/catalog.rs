//! Named in-memory tables and joins over them by name.

use crate::executor::{ChainJoin, CrossJoin, RowSet};
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use tabula_core::schema::Schema;
use tabula_core::{Error, Result};

/// A set of named row sets.
///
/// Tables are stored under their name and their schema takes that name, so
/// join results qualify columns as `table.column`.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    tables: BTreeMap<String, RowSet>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a table.
    pub fn add_table(&mut self, name: impl Into<String>, rows: RowSet) {
        let name = name.into();
        let schema = Schema::named(name.as_str(), rows.schema().columns().to_vec());
        let table = RowSet::from_parts(schema, rows.into_rows());
        self.tables.insert(name, table);
    }

    /// Returns a table by name.
    pub fn table(&self, name: &str) -> Result<&RowSet> {
        self.tables
            .get(name)
            .ok_or_else(|| Error::table_not_found(name))
    }

    /// Returns the table names in sorted order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Returns the number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if the catalog has no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    fn tables_of(&self, names: &[&str]) -> Result<Vec<&RowSet>> {
        names.iter().map(|name| self.table(name)).collect()
    }

    /// `SELECT * FROM t1, t2, ...`
    pub fn cross_join(&self, tables: &[&str]) -> Result<RowSet> {
        let inputs = self.tables_of(tables)?;
        CrossJoin::new().execute(&inputs)
    }

    /// `SELECT * FROM t1, t2, ... WHERE t1.a = t2.b AND t2.c = t3.d ...`
    ///
    /// `on[i]` names a column of `tables[i]` and one of `tables[i + 1]`,
    /// bare or qualified with the table name.
    pub fn chain_join(&self, tables: &[&str], on: &[(&str, &str)]) -> Result<RowSet> {
        let inputs = self.tables_of(tables)?;
        let schemas: Vec<&Schema> = inputs.iter().map(|set| set.schema()).collect();
        ChainJoin::resolve(&schemas, on)?.execute(&inputs)
    }
}
