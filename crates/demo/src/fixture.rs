//! The employee Row Store.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use tabula_core::schema::{Schema, SchemaBuilder};
use tabula_core::{DataType, Row, Value};
use tabula_query::executor::RowSet;

/// Employee gender, a closed set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::M => "M",
            Gender::F => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One employee record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub gender: Gender,
    pub age: u32,
    pub salary: u32,
    pub name: String,
}

impl Employee {
    pub fn new(gender: Gender, age: u32, salary: u32, name: impl Into<String>) -> Self {
        Self {
            gender,
            age,
            salary,
            name: name.into(),
        }
    }

    /// Converts to a row in `gender, age, salary, name` order.
    pub fn to_row(&self) -> Row {
        Row::new(vec![
            Value::from(self.gender.as_str()),
            Value::from(self.age),
            Value::from(self.salary),
            Value::from(self.name.as_str()),
        ])
    }
}

/// The built-in 18 employees.
pub fn employees() -> Vec<Employee> {
    use Gender::{F, M};
    vec![
        Employee::new(M, 40, 9800, "Bruce WAYNE"),
        Employee::new(M, 33, 1500, "Clark KENT"),
        Employee::new(M, 23, 4500, "Barry ALLEN"),
        Employee::new(M, 19, 2400, "Wally WEST"),
        Employee::new(M, 28, 8000, "Hal JORDAN"),
        Employee::new(M, 35, 9500, "Oliver QUEEN"),
        Employee::new(M, 42, 4700, "Ray PALMER"),
        Employee::new(M, 22, 3600, "Victor Stone"),
        Employee::new(M, 27, 1500, "John CONSTANTINE"),
        Employee::new(M, 65, 2600, "J'onn J'ONZZ"),
        Employee::new(M, 28, 1400, "Arthur CURRY"),
        Employee::new(M, 25, 2500, "Dick GRAYSON"),
        Employee::new(F, 65, 6000, "Diana PRINCE"),
        Employee::new(F, 24, 2500, "Barbara GORDON"),
        Employee::new(F, 36, 1800, "Selina KYLE"),
        Employee::new(F, 30, 2400, "Pamela ISLEY"),
        Employee::new(F, 28, 2400, "Harleen QUINZEL"),
        Employee::new(F, 29, 2000, "Zatanna ZATARA"),
    ]
}

/// Schema of the `employees` table.
pub fn employee_schema() -> tabula_core::Result<Schema> {
    Ok(SchemaBuilder::new("employees")?
        .add_column("gender", DataType::String)?
        .add_column("age", DataType::Int64)?
        .add_column("salary", DataType::Int64)?
        .add_column("name", DataType::String)?
        .build())
}

/// Builds the `employees` row set.
pub fn employee_rows(employees: &[Employee]) -> tabula_core::Result<RowSet> {
    let rows = employees.iter().map(Employee::to_row).collect();
    RowSet::new(employee_schema()?, rows)
}

/// Reads employees from a JSON array of objects.
pub fn load_employees(path: &Path) -> Result<Vec<Employee>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read employees from {}", path.display()))?;
    let employees: Vec<Employee> = serde_json::from_str(&text)
        .with_context(|| format!("invalid employee JSON in {}", path.display()))?;
    tracing::debug!(count = employees.len(), path = %path.display(), "loaded employees");
    Ok(employees)
}

/// Builds a single-column table `e` of strings.
pub fn letters(values: &[&str]) -> tabula_core::Result<RowSet> {
    let schema = SchemaBuilder::new("t")?
        .add_column("e", DataType::String)?
        .build();
    let rows = values
        .iter()
        .map(|v| Row::new(vec![Value::from(*v)]))
        .collect();
    RowSet::new(schema, rows)
}
