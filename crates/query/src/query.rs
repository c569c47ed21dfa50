//! Fluent query pipeline over a row set.
//!
//! Clauses may be added in any order; `execute` always evaluates them in
//! SQL order: WHERE, GROUP BY / aggregates, DISTINCT, ORDER BY,
//! LIMIT / OFFSET, then SELECT.
//!
//! A whole-row DISTINCT on a query with a SELECT list dedupes on the
//! selected columns, so it sees the projected rows even though the
//! projection itself runs last and ORDER BY may still use other columns.

use crate::ast::{AggregateFunc, EvalType, Predicate, SortOrder, ValuePredicate};
use crate::executor::{
    AggregateExecutor, DistinctExecutor, LimitExecutor, ProjectExecutor, RowSet, SortExecutor,
};
use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use tabula_core::{Result, Row, Value};

/// A query under construction.
///
/// Column names are resolved when the query runs, so a misspelt name
/// surfaces as an error from `execute`.
pub struct Query<'a> {
    source: &'a RowSet,
    predicates: Vec<Box<dyn Predicate + 'a>>,
    conditions: Vec<(String, EvalType, Value)>,
    group_by: Vec<String>,
    aggregates: Vec<(AggregateFunc, Option<String>)>,
    distinct: Option<Vec<String>>,
    order_by: Vec<(String, SortOrder)>,
    limit: Option<i64>,
    offset: usize,
    select: Option<Vec<String>>,
}

impl<'a> Query<'a> {
    /// Starts a query reading `source`.
    pub fn new(source: &'a RowSet) -> Self {
        Self {
            source,
            predicates: Vec::new(),
            conditions: Vec::new(),
            group_by: Vec::new(),
            aggregates: Vec::new(),
            distinct: None,
            order_by: Vec::new(),
            limit: None,
            offset: 0,
            select: None,
        }
    }

    /// Adds a row predicate to the WHERE clause.
    pub fn filter<P: Predicate + 'a>(mut self, predicate: P) -> Self {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// Adds `column <op> value` to the WHERE clause.
    pub fn filter_column(mut self, column: &str, op: EvalType, value: impl Into<Value>) -> Self {
        self.conditions.push((column.to_owned(), op, value.into()));
        self
    }

    /// Groups by the given columns.
    pub fn group_by(mut self, columns: &[&str]) -> Self {
        self.group_by = to_owned_names(columns);
        self
    }

    /// Adds an aggregate output column; `None` is `*`.
    pub fn aggregate(mut self, func: AggregateFunc, column: Option<&str>) -> Self {
        self.aggregates.push((func, column.map(str::to_owned)));
        self
    }

    /// Keeps one row per distinct value of the given columns, or per
    /// distinct row when no columns are given.
    pub fn distinct(mut self, columns: &[&str]) -> Self {
        self.distinct = Some(to_owned_names(columns));
        self
    }

    /// Appends an ORDER BY key.
    pub fn order_by(mut self, column: &str, order: SortOrder) -> Self {
        self.order_by.push((column.to_owned(), order));
        self
    }

    /// Sets the LIMIT.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the OFFSET.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the output columns.
    pub fn select(mut self, columns: &[&str]) -> Self {
        self.select = Some(to_owned_names(columns));
        self
    }

    /// Runs the query.
    pub fn execute(&self) -> Result<RowSet> {
        let mut current = self.where_clause()?;

        if !self.group_by.is_empty() || !self.aggregates.is_empty() {
            let group_by = as_strs(&self.group_by);
            let aggregates: Vec<(AggregateFunc, Option<&str>)> = self
                .aggregates
                .iter()
                .map(|(func, column)| (*func, column.as_deref()))
                .collect();
            current = AggregateExecutor::resolve(current.schema(), &group_by, &aggregates)?
                .execute(&current)?;
        }

        if let Some(columns) = &self.distinct {
            let keys = match (&self.select, columns.is_empty()) {
                (Some(selected), true) => selected,
                _ => columns,
            };
            current = DistinctExecutor::resolve(current.schema(), &as_strs(keys))?
                .execute(&current);
        }

        if !self.order_by.is_empty() {
            let keys: Vec<(&str, SortOrder)> = self
                .order_by
                .iter()
                .map(|(name, order)| (name.as_str(), *order))
                .collect();
            current = SortExecutor::resolve(current.schema(), &keys)?.execute(&current);
        }

        if self.limit.is_some() || self.offset > 0 {
            let limit = self.limit.unwrap_or(i64::MAX);
            current = LimitExecutor::new(limit, self.offset).execute(&current);
        }

        if let Some(columns) = &self.select {
            current = ProjectExecutor::resolve(current.schema(), &as_strs(columns))?
                .execute(&current)?;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            input = self.source.len(),
            output = current.len(),
            "query executed"
        );

        Ok(current)
    }

    fn where_clause(&self) -> Result<RowSet> {
        if self.predicates.is_empty() && self.conditions.is_empty() {
            return Ok(self.source.clone());
        }
        let conditions = self
            .conditions
            .iter()
            .map(|(column, op, value)| {
                ValuePredicate::resolve(self.source.schema(), column, *op, value.clone())
            })
            .collect::<Result<Vec<_>>>()?;

        let keep = |row: &Row| {
            conditions.iter().all(|c| c.eval(row)) && self.predicates.iter().all(|p| p.eval(row))
        };
        let rows: Vec<Row> = self.source.iter().filter(|row| keep(row)).cloned().collect();
        Ok(self.source.with_rows(rows))
    }
}

impl<'a> From<&'a RowSet> for Query<'a> {
    fn from(source: &'a RowSet) -> Self {
        Self::new(source)
    }
}

fn to_owned_names(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| (*c).to_owned()).collect()
}

fn as_strs(names: &[String]) -> Vec<&str> {
    names.iter().map(String::as_str).collect()
}
