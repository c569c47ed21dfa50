//! The exercise catalogue: each SQL query next to the pipeline that answers it.

use crate::fixture::{employee_rows, letters, Employee, Gender};
use anyhow::{anyhow, Result};
use std::io::Write;
use tabula_core::{Keyed, Value};
use tabula_query::ast::{AggregateFunc, EvalType, SortOrder, ValuePredicate};
use tabula_query::catalog::Catalog;
use tabula_query::executor::{
    aggregate, aggregate_values, cross_join3, distinct, group_aggregate, group_by, inner_join3,
    project_tuple3, FilterExecutor, RowSet,
};
use tabula_query::query::Query;

/// The data every exercise reads.
pub struct Dataset {
    employees: Vec<Employee>,
    rows: RowSet,
}

impl Dataset {
    pub fn new(employees: Vec<Employee>) -> Result<Self> {
        let rows = employee_rows(&employees)?;
        Ok(Self { employees, rows })
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn rows(&self) -> &RowSet {
        &self.rows
    }
}

type RunFn = fn(&Dataset, &mut dyn Write) -> Result<()>;

/// One exercise of the catalogue.
pub struct Exercise {
    pub name: &'static str,
    pub title: &'static str,
    pub sql: &'static str,
    run: RunFn,
}

impl Exercise {
    /// Runs the exercise, writing its result lines to `out`.
    pub fn run(&self, data: &Dataset, out: &mut dyn Write) -> Result<()> {
        tracing::debug!(exercise = self.name, "running");
        (self.run)(data, out)
    }
}

static CATALOGUE: [Exercise; 14] = [
    Exercise {
        name: "ex1a",
        title: "Top 3 richest men (pipeline)",
        sql: "SELECT * FROM employees WHERE gender = 'M' ORDER BY salary DESC LIMIT 3",
        run: ex1a,
    },
    Exercise {
        name: "ex1b",
        title: "Top 3 richest men (explicit loop)",
        sql: "SELECT * FROM employees WHERE gender = 'M' ORDER BY salary DESC LIMIT 3",
        run: ex1b,
    },
    Exercise {
        name: "ex2",
        title: "ORDER BY several fields",
        sql: "SELECT * FROM employees ORDER BY gender ASC, salary ASC, name ASC",
        run: ex2,
    },
    Exercise {
        name: "ex3a",
        title: "MIN, MAX, AVG, COUNT and SUM",
        sql: "SELECT MIN(age), MAX(salary), AVG(age) FROM employees; \
              SELECT COUNT(*) FROM employees WHERE gender = 'F'; \
              SELECT SUM(salary) * 1.217 FROM employees",
        run: ex3a,
    },
    Exercise {
        name: "ex3b",
        title: "MIN, MAX, AVG, COUNT and SUM over plain values",
        sql: "SELECT MIN(age), MAX(salary), AVG(age) FROM employees; \
              SELECT COUNT(*) FROM employees WHERE gender = 'F'; \
              SELECT SUM(salary) * 1.217 FROM employees",
        run: ex3b,
    },
    Exercise {
        name: "ex4",
        title: "Richest man and richest woman",
        sql: "SELECT gender, MAX(salary) AS salary FROM employees GROUP BY gender",
        run: ex4,
    },
    Exercise {
        name: "ex5",
        title: "Average salary of men and women",
        sql: "SELECT gender, AVG(salary) AS salary FROM employees GROUP BY gender",
        run: ex5,
    },
    Exercise {
        name: "ex6",
        title: "Number of men and women",
        sql: "SELECT gender, COUNT(*) AS count FROM employees GROUP BY gender",
        run: ex6,
    },
    Exercise {
        name: "ex7a",
        title: "Distinct salaries with GROUP BY",
        sql: "SELECT salary FROM employees GROUP BY salary",
        run: ex7a,
    },
    Exercise {
        name: "ex7b",
        title: "Distinct salaries with DISTINCT",
        sql: "SELECT DISTINCT salary FROM employees",
        run: ex7b,
    },
    Exercise {
        name: "ex8a",
        title: "Cartesian product of three lists",
        sql: "SELECT t1.e AS x, t2.e AS y, t3.e AS z FROM t1 CROSS JOIN t2 CROSS JOIN t3",
        run: ex8a,
    },
    Exercise {
        name: "ex8b",
        title: "Cartesian product of three named tables",
        sql: "SELECT t1.e AS x, t2.e AS y, t3.e AS z FROM t1 CROSS JOIN t2 CROSS JOIN t3",
        run: ex8b,
    },
    Exercise {
        name: "ex9a",
        title: "Chain inner join of three lists",
        sql: "SELECT t1.e AS x, t2.e AS y, t3.e AS z FROM t1 \
              INNER JOIN t2 ON t1.e = t2.e INNER JOIN t3 ON t2.e = t3.e",
        run: ex9a,
    },
    Exercise {
        name: "ex9b",
        title: "Chain inner join of three named tables",
        sql: "SELECT t1.e AS x, t2.e AS y, t3.e AS z FROM t1 \
              INNER JOIN t2 ON t1.e = t2.e INNER JOIN t3 ON t2.e = t3.e",
        run: ex9b,
    },
];

/// Returns every exercise in order.
pub fn catalogue() -> &'static [Exercise] {
    &CATALOGUE
}

/// Finds an exercise by name.
pub fn find(name: &str) -> Option<&'static Exercise> {
    CATALOGUE.iter().find(|ex| ex.name == name)
}

fn column<'r>(row: &'r tabula_core::Row, idx: usize) -> &'r Value {
    row.get(idx).unwrap_or(&Value::Null)
}

fn ex1a(data: &Dataset, out: &mut dyn Write) -> Result<()> {
    let top = Query::from(data.rows())
        .filter_column("gender", EvalType::Eq, "M")
        .order_by("salary", SortOrder::Desc)
        .limit(3)
        .select(&["salary", "name"])
        .execute()?;

    writeln!(out, "Salary | Name")?;
    for row in &top {
        writeln!(out, "{}   | {}", column(row, 0), column(row, 1))?;
    }
    Ok(())
}

fn ex1b(data: &Dataset, out: &mut dyn Write) -> Result<()> {
    let mut men: Vec<&Employee> = Vec::new();
    for employee in data.employees() {
        if employee.gender == Gender::M {
            men.push(employee);
        }
    }
    men.sort_by(|a, b| b.salary.cmp(&a.salary));
    men.truncate(3);

    writeln!(out, "Salary | Name")?;
    for employee in men {
        writeln!(out, "{}   | {}", employee.salary, employee.name)?;
    }
    Ok(())
}

fn ex2(data: &Dataset, out: &mut dyn Write) -> Result<()> {
    let sorted = Query::from(data.rows())
        .order_by("gender", SortOrder::Asc)
        .order_by("salary", SortOrder::Asc)
        .order_by("name", SortOrder::Asc)
        .select(&["gender", "salary", "name"])
        .execute()?;

    writeln!(out, "Gender | Salary | Name")?;
    for row in &sorted {
        writeln!(
            out,
            "{}      | {}   | {}",
            column(row, 0),
            column(row, 1),
            column(row, 2)
        )?;
    }
    Ok(())
}

fn write_aggregates(
    out: &mut dyn Write,
    youngest: &Value,
    highest: &Value,
    average: &Value,
    women: &Value,
    taxed_sum: &Value,
) -> Result<()> {
    writeln!(out, "Youngest Age                  : {}", youngest)?;
    writeln!(out, "Highest salary                : {}", highest)?;
    writeln!(out, "Average age of employees      : {}", average)?;
    writeln!(out, "Number of women               : {}", women)?;
    writeln!(out, "Sum of salary with 21.7% taxes: {}", taxed_sum)?;
    Ok(())
}

const TAX_RATE: f64 = 1.217;

fn ex3a(data: &Dataset, out: &mut dyn Write) -> Result<()> {
    let rows = data.rows();
    let youngest = aggregate(rows, AggregateFunc::Min, Some("age"))?;
    let highest = aggregate(rows, AggregateFunc::Max, Some("salary"))?;
    let average = aggregate(rows, AggregateFunc::Avg, Some("age"))?;

    let women_only = ValuePredicate::resolve(rows.schema(), "gender", EvalType::Eq, "F")?;
    let women = FilterExecutor::new(women_only).execute(rows);
    let women = aggregate(&women, AggregateFunc::Count, None)?;

    let taxed_sum = aggregate(rows, AggregateFunc::Sum, Some("salary"))?.scale(TAX_RATE)?;

    writeln!(out, "WITH OPERATORS")?;
    write_aggregates(
        out,
        &youngest.into_value(),
        &highest.into_value(),
        &average.into_value(),
        &women.into_value(),
        &taxed_sum.into_value(),
    )
}

fn ex3b(data: &Dataset, out: &mut dyn Write) -> Result<()> {
    let ages: Vec<Value> = data.employees().iter().map(|e| Value::from(e.age)).collect();
    let salaries: Vec<Value> = data
        .employees()
        .iter()
        .map(|e| Value::from(e.salary))
        .collect();
    let women: Vec<Value> = data
        .employees()
        .iter()
        .filter(|e| e.gender == Gender::F)
        .map(|e| Value::from(e.name.as_str()))
        .collect();

    let youngest = aggregate_values(AggregateFunc::Min, &ages)?;
    let highest = aggregate_values(AggregateFunc::Max, &salaries)?;
    let average = aggregate_values(AggregateFunc::Avg, &ages)?;
    let women = aggregate_values(AggregateFunc::Count, &women)?;
    let taxed_sum = aggregate_values(AggregateFunc::Sum, &salaries)?.scale(TAX_RATE)?;

    writeln!(out, "WITH PLAIN VALUES")?;
    write_aggregates(
        out,
        &youngest.into_value(),
        &highest.into_value(),
        &average.into_value(),
        &women.into_value(),
        &taxed_sum.into_value(),
    )
}

fn write_per_gender(
    data: &Dataset,
    out: &mut dyn Write,
    func: AggregateFunc,
    column: Option<&str>,
    label: &str,
) -> Result<()> {
    for (key, value) in group_aggregate(data.rows(), &["gender"], func, column)? {
        let gender = key.first().cloned().unwrap_or(Value::Null);
        writeln!(out, "Gender: {} | {}: {}", gender, label, value)?;
    }
    Ok(())
}

fn ex4(data: &Dataset, out: &mut dyn Write) -> Result<()> {
    write_per_gender(data, out, AggregateFunc::Max, Some("salary"), "Max Salary")
}

fn ex5(data: &Dataset, out: &mut dyn Write) -> Result<()> {
    write_per_gender(data, out, AggregateFunc::Avg, Some("salary"), "Average Salary")
}

fn ex6(data: &Dataset, out: &mut dyn Write) -> Result<()> {
    write_per_gender(data, out, AggregateFunc::Count, None, "Count")
}

fn join_values(values: impl IntoIterator<Item = Value>) -> String {
    values
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn ex7a(data: &Dataset, out: &mut dyn Write) -> Result<()> {
    let groups = group_by(data.rows(), &["salary"])?;
    let salaries = groups
        .iter()
        .map(|g| g.key().first().cloned().unwrap_or(Value::Null));
    writeln!(out, "Salaries: {}", join_values(salaries))?;
    Ok(())
}

fn ex7b(data: &Dataset, out: &mut dyn Write) -> Result<()> {
    let salaries = distinct(data.rows().column_values("salary")?);
    writeln!(out, "Salaries: {}", join_values(salaries))?;
    Ok(())
}

const T1: [&str; 3] = ["A", "B", "C"];
const T2: [&str; 3] = ["B", "C", "D"];
/// Third list of the plain-list variants.
const T3_LIST: [&str; 3] = ["C", "F", "E"];
/// Third table of the named-table variants.
const T3_TABLE: [&str; 3] = ["C", "D", "E"];

fn table_catalog() -> Result<Catalog> {
    let mut catalog = Catalog::new();
    catalog.add_table("t1", letters(&T1)?);
    catalog.add_table("t2", letters(&T2)?);
    catalog.add_table("t3", letters(&T3_TABLE)?);
    Ok(catalog)
}

fn write_tuples<T: std::fmt::Display>(out: &mut dyn Write, tuples: &[T]) -> Result<()> {
    for tuple in tuples {
        writeln!(out, "{}", tuple)?;
    }
    Ok(())
}

fn ex8a(_: &Dataset, out: &mut dyn Write) -> Result<()> {
    write_tuples(out, &cross_join3(&T1, &T2, &T3_LIST))
}

fn ex8b(_: &Dataset, out: &mut dyn Write) -> Result<()> {
    let joined = table_catalog()?.cross_join(&["t1", "t2", "t3"])?;
    write_tuples(out, &project_tuple3(&joined, ["t1.e", "t2.e", "t3.e"])?)
}

fn ex9a(_: &Dataset, out: &mut dyn Write) -> Result<()> {
    let t1 = Keyed::wrap_all(T1);
    let t2 = Keyed::wrap_all(T2);
    let t3 = Keyed::wrap_all(T3_LIST);
    let matches = inner_join3(&t1, &t2, &t3, |x, y| x.e == y.e, |y, z| y.e == z.e);
    for m in &matches {
        writeln!(out, "{} {} {}", m.x.e, m.y.e, m.z.e)?;
    }
    Ok(())
}

fn ex9b(_: &Dataset, out: &mut dyn Write) -> Result<()> {
    let joined = table_catalog()?.chain_join(
        &["t1", "t2", "t3"],
        &[("t1.e", "t2.e"), ("t2.e", "t3.e")],
    )?;
    write_tuples(out, &project_tuple3(&joined, ["t1.e", "t2.e", "t3.e"])?)
}

/// Runs the named exercises (all when `names` is empty) in order.
pub fn run_all(data: &Dataset, names: &[String], out: &mut dyn Write) -> Result<()> {
    let selected: Vec<&Exercise> = if names.is_empty() {
        catalogue().iter().collect()
    } else {
        names
            .iter()
            .map(|name| find(name).ok_or_else(|| anyhow!("unknown exercise: {}", name)))
            .collect::<Result<_>>()?
    };

    for (i, exercise) in selected.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "== {}: {} ==", exercise.name, exercise.title)?;
        writeln!(out, "-- {}", exercise.sql)?;
        exercise.run(data, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::employees;

    #[test]
    fn test_catalogue_names_unique() {
        let names: Vec<&str> = catalogue().iter().map(|e| e.name).collect();
        let unique = distinct(names.clone());
        assert_eq!(names.len(), unique.len());
        assert!(find("ex9b").is_some());
        assert!(find("ex10").is_none());
    }

    #[test]
    fn test_run_all_unknown_exercise() {
        let data = Dataset::new(employees()).unwrap();
        let mut out = Vec::new();
        let err = run_all(&data, &["nope".to_string()], &mut out).unwrap_err();
        assert!(err.to_string().contains("unknown exercise"));
    }
}
