//! Schema definition for Tabula row sets.

use super::column::Column;
use crate::error::{Error, Result};
use crate::row::Row;
use crate::types::DataType;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// The named, typed columns of a row set.
///
/// A schema optionally carries the name of the table it describes. Joined
/// schemas qualify every column as `table.column`; lookups by a bare column
/// name still succeed as long as exactly one qualified column matches.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schema {
    /// Table name, empty for anonymous row sets.
    name: String,
    /// Column definitions in row order.
    columns: Vec<Column>,
}

impl Schema {
    /// Creates an anonymous schema with the given columns.
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            name: String::new(),
            columns,
        }
    }

    /// Creates a schema for a named table.
    pub fn named(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Returns the table name (empty for anonymous schemas).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the columns.
    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the number of columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the schema has no columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Gets a column by position.
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Resolves a column name to its position.
    ///
    /// A name is tried as given, then as `table.column` against this
    /// table's name, then as a bare name against qualified columns. A name
    /// matching more than one column (e.g. `t1.e` after joining `t1` with
    /// itself) is ambiguous.
    pub fn index_of(&self, name: &str) -> Result<usize> {
        if let Some(idx) = self.unique_position(name, |c| c == name)? {
            return Ok(idx);
        }

        let found = match name.split_once('.') {
            // `t1.e` matches column `e` of `t1`.
            Some((table, bare)) if !self.name.is_empty() && table == self.name => {
                self.unique_position(name, |c| c == bare)?
            }
            Some(_) => None,
            // `e` matches `t1.e`.
            None => self.unique_position(name, |c| {
                c.rsplit_once('.').map(|(_, bare)| bare == name).unwrap_or(false)
            })?,
        };

        found.ok_or_else(|| Error::column_not_found(self.name.as_str(), name))
    }

    fn unique_position<F>(&self, name: &str, matches: F) -> Result<Option<usize>>
    where
        F: Fn(&str) -> bool,
    {
        let mut hits = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| matches(c.name()));
        match (hits.next(), hits.next()) {
            (Some((idx, _)), None) => Ok(Some(idx)),
            (Some(_), Some(_)) => Err(Error::invalid_argument(format!(
                "ambiguous column name: {}",
                name
            ))),
            (None, _) => Ok(None),
        }
    }

    /// Resolves several column names to their positions.
    pub fn indices_of(&self, names: &[&str]) -> Result<Vec<usize>> {
        names.iter().map(|name| self.index_of(name)).collect()
    }

    /// Checks that a row has this schema's arity and column types.
    pub fn check_row(&self, row: &Row) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::arity_mismatch(self.columns.len(), row.len()));
        }
        for (column, value) in self.columns.iter().zip(row.values()) {
            if !column.accepts(value) {
                return Err(Error::type_mismatch(
                    column.name(),
                    column.data_type(),
                    value.data_type(),
                ));
            }
        }
        Ok(())
    }

    /// Returns a schema holding only the given columns, in the given order.
    pub fn project(&self, indices: &[usize]) -> Result<Schema> {
        let columns = indices
            .iter()
            .map(|&idx| {
                self.columns.get(idx).cloned().ok_or_else(|| {
                    Error::invalid_argument(format!(
                        "column index {} out of range for {} columns",
                        idx,
                        self.columns.len()
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Schema {
            name: self.name.clone(),
            columns,
        })
    }

    /// Concatenates schemas for a join result.
    ///
    /// Columns of named schemas are qualified as `table.column`; columns that
    /// are already qualified or belong to anonymous schemas keep their name.
    /// Joining a table with itself repeats its qualified names, which
    /// `index_of` then reports as ambiguous.
    pub fn join<'a>(parts: impl IntoIterator<Item = &'a Schema>) -> Schema {
        let mut columns = Vec::new();
        for part in parts {
            for column in &part.columns {
                if part.name.is_empty() || column.name().contains('.') {
                    columns.push(column.clone());
                } else {
                    columns.push(column.renamed(format!("{}.{}", part.name, column.name())));
                }
            }
        }
        Schema::new(columns)
    }

    /// Returns the column names in order.
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }
}

/// Builder for schema definitions.
pub struct SchemaBuilder {
    name: String,
    columns: Vec<Column>,
}

impl SchemaBuilder {
    /// Creates a builder for a named table.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        Self::check_naming_rules(&name)?;
        Ok(Self {
            name,
            columns: Vec::new(),
        })
    }

    /// Validates a name follows naming rules.
    fn check_naming_rules(name: &str) -> Result<()> {
        let Some(first) = name.chars().next() else {
            return Err(Error::invalid_argument("Name cannot be empty"));
        };
        if !first.is_ascii_alphabetic() && first != '_' {
            return Err(Error::invalid_argument(format!(
                "Name must start with letter or underscore: {}",
                name
            )));
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(Error::invalid_argument(format!(
                "Name contains invalid characters: {}",
                name
            )));
        }
        Ok(())
    }

    /// Adds a column to the schema.
    pub fn add_column(mut self, name: impl Into<String>, data_type: DataType) -> Result<Self> {
        let name = name.into();
        Self::check_naming_rules(&name)?;
        if self.columns.iter().any(|c| c.name() == name) {
            return Err(Error::invalid_argument(format!(
                "Column already exists: {}",
                name
            )));
        }
        self.columns.push(Column::new(name, data_type));
        Ok(self)
    }

    /// Marks columns as nullable.
    pub fn add_nullable(mut self, columns: &[&str]) -> Self {
        for name in columns {
            if let Some(col) = self.columns.iter_mut().find(|c| c.name() == *name) {
                *col = col.clone().nullable(true);
            }
        }
        self
    }

    /// Builds the schema.
    pub fn build(self) -> Schema {
        Schema::named(self.name, self.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use alloc::vec;

    fn employees() -> Schema {
        SchemaBuilder::new("employees")
            .unwrap()
            .add_column("gender", DataType::String)
            .unwrap()
            .add_column("age", DataType::Int64)
            .unwrap()
            .add_column("salary", DataType::Int64)
            .unwrap()
            .add_column("name", DataType::String)
            .unwrap()
            .build()
    }

    #[test]
    fn test_schema_builder() {
        let schema = employees();
        assert_eq!(schema.name(), "employees");
        assert_eq!(schema.len(), 4);
        assert_eq!(schema.names(), vec!["gender", "age", "salary", "name"]);
    }

    #[test]
    fn test_index_of() {
        let schema = employees();
        assert_eq!(schema.index_of("salary").unwrap(), 2);
        assert_eq!(
            schema.index_of("wage"),
            Err(Error::column_not_found("employees", "wage"))
        );
        assert_eq!(schema.indices_of(&["name", "gender"]).unwrap(), vec![3, 0]);
    }

    #[test]
    fn test_invalid_column_name() {
        let result = SchemaBuilder::new("t").unwrap().add_column("1abc", DataType::Int64);
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_column() {
        let result = SchemaBuilder::new("t")
            .unwrap()
            .add_column("e", DataType::String)
            .unwrap()
            .add_column("e", DataType::String);
        assert!(result.is_err());
    }

    #[test]
    fn test_check_row() {
        let schema = employees();
        let row = Row::new(vec![
            Value::from("M"),
            Value::Int64(40),
            Value::Int64(9800),
            Value::from("Bruce WAYNE"),
        ]);
        assert!(schema.check_row(&row).is_ok());

        let short = Row::new(vec![Value::from("M")]);
        assert_eq!(schema.check_row(&short), Err(Error::arity_mismatch(4, 1)));

        let wrong = Row::new(vec![
            Value::from("M"),
            Value::from("forty"),
            Value::Int64(9800),
            Value::from("Bruce WAYNE"),
        ]);
        assert!(matches!(
            schema.check_row(&wrong),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_nullable_column() {
        let schema = SchemaBuilder::new("t")
            .unwrap()
            .add_column("e", DataType::String)
            .unwrap()
            .add_nullable(&["e"])
            .build();
        assert!(schema.check_row(&Row::new(vec![Value::Null])).is_ok());
    }

    #[test]
    fn test_join_qualifies_columns() {
        let t1 = Schema::named("t1", vec![Column::new("e", DataType::String)]);
        let t2 = Schema::named("t2", vec![Column::new("e", DataType::String)]);
        let joined = Schema::join([&t1, &t2]);

        assert_eq!(joined.names(), vec!["t1.e", "t2.e"]);
        assert_eq!(joined.index_of("t2.e").unwrap(), 1);
        assert!(matches!(
            joined.index_of("e"),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_self_join_names_are_ambiguous() {
        let t1 = Schema::named("t1", vec![Column::new("e", DataType::String)]);
        let joined = Schema::join([&t1, &t1]);

        assert_eq!(joined.names(), vec!["t1.e", "t1.e"]);
        assert!(matches!(
            joined.index_of("t1.e"),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            joined.index_of("e"),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_bare_name_resolves_unique_qualified_column() {
        let t1 = Schema::named("t1", vec![Column::new("e", DataType::String)]);
        let t2 = Schema::named("t2", vec![Column::new("f", DataType::String)]);
        let joined = Schema::join([&t1, &t2]);
        assert_eq!(joined.index_of("f").unwrap(), 1);
    }

    #[test]
    fn test_qualified_name_on_own_table() {
        let schema = employees();
        assert_eq!(schema.index_of("employees.age").unwrap(), 1);
        assert!(schema.index_of("staff.age").is_err());
    }

    #[test]
    fn test_project() {
        let schema = employees();
        let projected = schema.project(&[2]).unwrap();
        assert_eq!(projected.names(), vec!["salary"]);
        assert!(schema.project(&[9]).is_err());
    }
}
