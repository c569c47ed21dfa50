//! Aggregate executor.
//!
//! Scalar aggregates (`aggregate`, `aggregate_values`), grouping
//! (`group_by`, `group_aggregate`) and the row-producing
//! `AggregateExecutor`.
//!
//! NULL inputs are skipped by every function except `COUNT(*)`. MIN, MAX,
//! AVG and STDDEV over no values are `Absent`; COUNT and SUM are zero.

use crate::ast::AggregateFunc;
use crate::executor::RowSet;
use alloc::format;
use alloc::vec::Vec;
use core::fmt;
use hashbrown::HashMap;
use libm::sqrt;
use tabula_core::schema::{Column, Schema};
use tabula_core::{DataType, Error, Result, Row, Value};

/// The result of an aggregate function.
#[derive(Clone, Debug, PartialEq)]
pub enum AggregateValue {
    /// The function produced a value.
    Present(Value),
    /// The function has no value for its input (e.g. MIN of nothing).
    Absent,
}

impl AggregateValue {
    /// Returns true if no value was produced.
    pub fn is_absent(&self) -> bool {
        matches!(self, AggregateValue::Absent)
    }

    /// Returns the produced value, if any.
    pub fn value(&self) -> Option<&Value> {
        match self {
            AggregateValue::Present(v) => Some(v),
            AggregateValue::Absent => None,
        }
    }

    /// Converts into a cell value, `Null` when absent.
    pub fn into_value(self) -> Value {
        match self {
            AggregateValue::Present(v) => v,
            AggregateValue::Absent => Value::Null,
        }
    }

    /// Returns the produced value as a float, if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        self.value().and_then(Value::to_f64)
    }

    /// Multiplies a numeric value by `factor` in float arithmetic.
    ///
    /// `Absent` stays `Absent`.
    pub fn scale(&self, factor: f64) -> Result<AggregateValue> {
        match self {
            AggregateValue::Absent => Ok(AggregateValue::Absent),
            AggregateValue::Present(v) => match v.to_f64() {
                Some(f) => Ok(AggregateValue::Present(Value::Float64(f * factor))),
                None => Err(Error::invalid_argument(format!(
                    "cannot scale non-numeric aggregate {}",
                    v
                ))),
            },
        }
    }
}

impl From<Option<Value>> for AggregateValue {
    fn from(value: Option<Value>) -> Self {
        match value {
            Some(v) => AggregateValue::Present(v),
            None => AggregateValue::Absent,
        }
    }
}

impl fmt::Display for AggregateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateValue::Present(v) => write!(f, "{}", v),
            AggregateValue::Absent => write!(f, "null"),
        }
    }
}

/// Running SUM shared by SUM, AVG and STDDEV.
#[derive(Clone, Copy, Debug)]
enum Sum {
    Int(i64),
    Float(f64),
}

impl Sum {
    fn into_value(self) -> Value {
        match self {
            Sum::Int(i) => Value::Int64(i),
            Sum::Float(f) => Value::Float64(f),
        }
    }

    fn to_f64(self) -> f64 {
        match self {
            Sum::Int(i) => i as f64,
            Sum::Float(f) => f,
        }
    }
}

struct NumericAccumulator<'c> {
    column: &'c str,
    sum: Sum,
    count: usize,
}

impl<'c> NumericAccumulator<'c> {
    fn new(column: &'c str) -> Self {
        Self {
            column,
            sum: Sum::Int(0),
            count: 0,
        }
    }

    /// Adds a non-null value. Integer sums that overflow continue in float.
    fn add(&mut self, value: &Value) -> Result<()> {
        self.sum = match (self.sum, value) {
            (Sum::Int(acc), Value::Int64(i)) => match acc.checked_add(*i) {
                Some(s) => Sum::Int(s),
                None => Sum::Float(acc as f64 + *i as f64),
            },
            (Sum::Int(acc), Value::Float64(f)) => Sum::Float(acc as f64 + f),
            (Sum::Float(acc), Value::Int64(i)) => Sum::Float(acc + *i as f64),
            (Sum::Float(acc), Value::Float64(f)) => Sum::Float(acc + f),
            (_, other) => {
                return Err(Error::type_mismatch(
                    self.column,
                    DataType::Float64,
                    other.data_type(),
                ))
            }
        };
        self.count += 1;
        Ok(())
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum.to_f64() / self.count as f64)
    }
}

/// Folds non-null values with one aggregate function.
fn fold_values(func: AggregateFunc, column: &str, values: &[&Value]) -> Result<AggregateValue> {
    match func {
        AggregateFunc::Count => Ok(AggregateValue::Present(Value::Int64(values.len() as i64))),
        AggregateFunc::Min => Ok(values.iter().min().map(|v| (*v).clone()).into()),
        AggregateFunc::Max => Ok(values.iter().max().map(|v| (*v).clone()).into()),
        AggregateFunc::Sum => {
            let mut acc = NumericAccumulator::new(column);
            for v in values {
                acc.add(v)?;
            }
            Ok(AggregateValue::Present(acc.sum.into_value()))
        }
        AggregateFunc::Avg => {
            let mut acc = NumericAccumulator::new(column);
            for v in values {
                acc.add(v)?;
            }
            Ok(acc.mean().map(Value::Float64).into())
        }
        AggregateFunc::StdDev => {
            let mut acc = NumericAccumulator::new(column);
            for v in values {
                acc.add(v)?;
            }
            let Some(mean) = acc.mean() else {
                return Ok(AggregateValue::Absent);
            };
            let variance = values
                .iter()
                .filter_map(|v| v.to_f64())
                .map(|v| (v - mean) * (v - mean))
                .sum::<f64>()
                / acc.count as f64;
            Ok(AggregateValue::Present(Value::Float64(sqrt(variance))))
        }
    }
}

/// Resolves the argument column of an aggregate and checks its type.
///
/// `None` stands for `*` and is accepted by COUNT only.
fn resolve_argument(
    schema: &Schema,
    func: AggregateFunc,
    column: Option<&str>,
) -> Result<Option<usize>> {
    let Some(name) = column else {
        return check_star(func).map(|_| None);
    };
    let idx = schema.index_of(name)?;
    if func.is_numeric() {
        if let Some(col) = schema.column(idx) {
            if !col.data_type().is_numeric() {
                return Err(Error::type_mismatch(
                    name,
                    DataType::Float64,
                    Some(col.data_type()),
                ));
            }
        }
    }
    Ok(Some(idx))
}

/// `*` is an argument of COUNT only.
fn check_star(func: AggregateFunc) -> Result<()> {
    match func {
        AggregateFunc::Count => Ok(()),
        _ => Err(Error::invalid_argument(format!(
            "{}(*) is not supported",
            func.name()
        ))),
    }
}

fn compute_single_aggregate(
    func: AggregateFunc,
    col_idx: Option<usize>,
    column: &str,
    rows: &[Row],
) -> Result<AggregateValue> {
    match col_idx {
        // COUNT(*) - count all rows
        None => {
            check_star(func)?;
            Ok(AggregateValue::Present(Value::Int64(rows.len() as i64)))
        }
        Some(idx) => {
            let values: Vec<&Value> = rows
                .iter()
                .filter_map(|row| row.get(idx))
                .filter(|v| !v.is_null())
                .collect();
            fold_values(func, column, &values)
        }
    }
}

/// Computes one aggregate over a column of `input`.
///
/// `column` is `None` for `COUNT(*)`.
pub fn aggregate(
    input: &RowSet,
    func: AggregateFunc,
    column: Option<&str>,
) -> Result<AggregateValue> {
    let col_idx = resolve_argument(input.schema(), func, column)?;
    let result = compute_single_aggregate(func, col_idx, column.unwrap_or("*"), input.rows())?;

    #[cfg(feature = "tracing")]
    tracing::trace!(func = func.name(), rows = input.len(), "aggregate");

    Ok(result)
}

/// Computes one aggregate over a plain sequence of values.
pub fn aggregate_values<'a, I>(func: AggregateFunc, values: I) -> Result<AggregateValue>
where
    I: IntoIterator<Item = &'a Value>,
{
    let values: Vec<&Value> = values.into_iter().filter(|v| !v.is_null()).collect();
    fold_values(func, "value", &values)
}

/// One group of rows sharing a key.
#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    key: Vec<Value>,
    rows: RowSet,
}

impl Group {
    /// Returns the key values, one per grouping column.
    pub fn key(&self) -> &[Value] {
        &self.key
    }

    /// Returns the rows of this group, in input order.
    pub fn rows(&self) -> &RowSet {
        &self.rows
    }

    /// Computes one aggregate over this group.
    pub fn aggregate(&self, func: AggregateFunc, column: Option<&str>) -> Result<AggregateValue> {
        aggregate(&self.rows, func, column)
    }
}

/// The groups of a row set, in order of first key occurrence.
#[derive(Clone, Debug, PartialEq)]
pub struct Groups {
    groups: Vec<Group>,
}

impl Groups {
    /// Returns the number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns an iterator over the groups.
    pub fn iter(&self) -> core::slice::Iter<'_, Group> {
        self.groups.iter()
    }

    /// Finds the group with the given key.
    pub fn get(&self, key: &[Value]) -> Option<&Group> {
        self.groups.iter().find(|g| g.key == key)
    }
}

impl IntoIterator for Groups {
    type Item = Group;
    type IntoIter = alloc::vec::IntoIter<Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl<'a> IntoIterator for &'a Groups {
    type Item = &'a Group;
    type IntoIter = core::slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Partitions rows by the given column indices, keeping first-occurrence
/// order of keys and input order within a group.
fn partition(rows: &[Row], key_columns: &[usize]) -> Vec<(Vec<Value>, Vec<Row>)> {
    let mut index: HashMap<Vec<Value>, usize> = HashMap::new();
    let mut partitions: Vec<(Vec<Value>, Vec<Row>)> = Vec::new();

    for row in rows {
        let key = row.pick(key_columns);
        match index.get(&key) {
            Some(&pos) => partitions[pos].1.push(row.clone()),
            None => {
                index.insert(key.clone(), partitions.len());
                partitions.push((key, alloc::vec![row.clone()]));
            }
        }
    }
    partitions
}

/// Groups rows by the named key columns.
pub fn group_by(input: &RowSet, key_columns: &[&str]) -> Result<Groups> {
    if key_columns.is_empty() {
        return Err(Error::invalid_argument("GROUP BY requires at least one column"));
    }
    let indices = input.schema().indices_of(key_columns)?;
    let groups: Vec<Group> = partition(input.rows(), &indices)
        .into_iter()
        .map(|(key, rows)| Group {
            key,
            rows: input.with_rows(rows),
        })
        .collect();

    #[cfg(feature = "tracing")]
    tracing::trace!(rows = input.len(), groups = groups.len(), "group_by");

    Ok(Groups { groups })
}

/// Groups rows by the named key columns and computes one aggregate per group.
pub fn group_aggregate(
    input: &RowSet,
    key_columns: &[&str],
    func: AggregateFunc,
    column: Option<&str>,
) -> Result<Vec<(Vec<Value>, AggregateValue)>> {
    let col_idx = resolve_argument(input.schema(), func, column)?;
    let name = column.unwrap_or("*");
    group_by(input, key_columns)?
        .into_iter()
        .map(|group| {
            let value = compute_single_aggregate(func, col_idx, name, group.rows.rows())?;
            Ok((group.key, value))
        })
        .collect()
}

/// Aggregate executor - computes aggregate functions, optionally per group.
///
/// The output has one column per grouping column followed by one column per
/// aggregate, named `FUNC(column)`. Without grouping the output is a single
/// row, even for empty input. Absent aggregates are stored as `Null`.
#[derive(Clone, Debug)]
pub struct AggregateExecutor {
    /// Group by column indices.
    group_by: Vec<usize>,
    /// Aggregates to compute: (function, column_index).
    aggregates: Vec<(AggregateFunc, Option<usize>)>,
}

impl AggregateExecutor {
    /// Creates a new aggregate executor.
    ///
    /// A `None` argument is `*`; `execute` rejects it for anything but COUNT.
    pub fn new(group_by: Vec<usize>, aggregates: Vec<(AggregateFunc, Option<usize>)>) -> Self {
        Self {
            group_by,
            aggregates,
        }
    }

    /// Creates an aggregate executor with no grouping.
    pub fn no_group(aggregates: Vec<(AggregateFunc, Option<usize>)>) -> Self {
        Self::new(Vec::new(), aggregates)
    }

    /// Creates an aggregate executor over named columns of `schema`.
    pub fn resolve(
        schema: &Schema,
        group_by: &[&str],
        aggregates: &[(AggregateFunc, Option<&str>)],
    ) -> Result<Self> {
        let group_by = schema.indices_of(group_by)?;
        let aggregates = aggregates
            .iter()
            .map(|(func, column)| Ok((*func, resolve_argument(schema, *func, *column)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(group_by, aggregates))
    }

    /// Executes the aggregation on the input row set.
    pub fn execute(&self, input: &RowSet) -> Result<RowSet> {
        let mut schema = self.output_schema(input.schema())?;

        let partitions = if self.group_by.is_empty() {
            alloc::vec![(Vec::new(), input.rows().to_vec())]
        } else {
            partition(input.rows(), &self.group_by)
        };

        let mut rows = Vec::with_capacity(partitions.len());
        for (key, group_rows) in partitions {
            let mut values = key;
            for (func, col_idx) in &self.aggregates {
                let name = self.argument_name(input.schema(), *col_idx);
                let value = compute_single_aggregate(*func, *col_idx, name, &group_rows)?;
                values.push(value.into_value());
            }
            rows.push(Row::new(values));
        }

        self.widen_overflowed_sums(&mut schema, &mut rows);

        #[cfg(feature = "tracing")]
        tracing::trace!(input = input.len(), output = rows.len(), "aggregate_executor");

        Ok(RowSet::from_parts(schema, rows))
    }

    fn argument_name<'s>(&self, schema: &'s Schema, col_idx: Option<usize>) -> &'s str {
        col_idx
            .and_then(|idx| schema.column(idx))
            .map(|c| c.name())
            .unwrap_or("*")
    }

    fn output_schema(&self, input: &Schema) -> Result<Schema> {
        let mut columns = input.project(&self.group_by)?.columns().to_vec();
        for (func, col_idx) in &self.aggregates {
            let arg = match col_idx {
                Some(idx) => Some(input.column(*idx).ok_or_else(|| {
                    Error::invalid_argument(format!("column index {} out of range", idx))
                })?),
                None => {
                    check_star(*func)?;
                    None
                }
            };
            let name = format!(
                "{}({})",
                func.name(),
                arg.map(|c| c.name()).unwrap_or("*")
            );
            let column = match func {
                AggregateFunc::Count => Column::new(name, DataType::Int64),
                AggregateFunc::Sum => {
                    let dt = match arg.map(|c| c.data_type()) {
                        Some(DataType::Float64) => DataType::Float64,
                        _ => DataType::Int64,
                    };
                    Column::new(name, dt)
                }
                AggregateFunc::Avg | AggregateFunc::StdDev => {
                    Column::new(name, DataType::Float64).nullable(true)
                }
                AggregateFunc::Min | AggregateFunc::Max => {
                    let dt = arg.map(|c| c.data_type()).unwrap_or(DataType::Int64);
                    Column::new(name, dt).nullable(true)
                }
            };
            columns.push(column);
        }
        Ok(Schema::new(columns))
    }

    /// An integer SUM that overflowed in any group turns its whole column
    /// into Float64.
    fn widen_overflowed_sums(&self, schema: &mut Schema, rows: &mut [Row]) {
        let offset = self.group_by.len();
        let mut columns = schema.columns().to_vec();
        let mut changed = false;

        for (i, (func, _)) in self.aggregates.iter().enumerate() {
            let pos = offset + i;
            let overflowed = *func == AggregateFunc::Sum
                && columns[pos].data_type() == DataType::Int64
                && rows
                    .iter()
                    .any(|r| matches!(r.get(pos), Some(Value::Float64(_))));
            if !overflowed {
                continue;
            }
            let widened = Column::new(columns[pos].name(), DataType::Float64);
            columns[pos] = widened;
            for row in rows.iter_mut() {
                let mut values = core::mem::take(row).into_values();
                if let Value::Int64(v) = values[pos] {
                    values[pos] = Value::Float64(v as f64);
                }
                *row = Row::new(values);
            }
            changed = true;
        }

        if changed {
            *schema = Schema::new(columns);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn ints(values: &[Option<i64>]) -> RowSet {
        let schema = Schema::named(
            "t",
            vec![Column::new("n", DataType::Int64).nullable(true)],
        );
        let rows = values
            .iter()
            .map(|v| Row::new(vec![Value::from(*v)]))
            .collect();
        RowSet::new(schema, rows).unwrap()
    }

    fn staff() -> RowSet {
        let schema = Schema::named(
            "t",
            vec![
                Column::new("gender", DataType::String),
                Column::new("salary", DataType::Int64),
                Column::new("name", DataType::String),
            ],
        );
        let rows = [
            ("M", 9800, "a"),
            ("F", 2000, "b"),
            ("M", 1500, "c"),
            ("F", 6000, "d"),
            ("M", 1700, "e"),
        ]
        .iter()
        .map(|&(g, s, n)| Row::new(vec![Value::from(g), Value::Int64(s), Value::from(n)]))
        .collect();
        RowSet::new(schema, rows).unwrap()
    }

    #[test]
    fn test_count_star() {
        let input = ints(&[Some(1), None, Some(3)]);
        assert_eq!(
            aggregate(&input, AggregateFunc::Count, None).unwrap(),
            AggregateValue::Present(Value::Int64(3))
        );
    }

    #[test]
    fn test_count_column() {
        let input = ints(&[Some(1), None, Some(3)]);
        // Should count only non-null values
        assert_eq!(
            aggregate(&input, AggregateFunc::Count, Some("n")).unwrap(),
            AggregateValue::Present(Value::Int64(2))
        );
    }

    #[test]
    fn test_sum() {
        let input = ints(&[Some(10), Some(20), Some(30)]);
        assert_eq!(
            aggregate(&input, AggregateFunc::Sum, Some("n")).unwrap(),
            AggregateValue::Present(Value::Int64(60))
        );
    }

    #[test]
    fn test_sum_overflow_promotes_to_float() {
        let input = ints(&[Some(i64::MAX), Some(1)]);
        let sum = aggregate(&input, AggregateFunc::Sum, Some("n")).unwrap();
        assert!(matches!(sum, AggregateValue::Present(Value::Float64(_))));
    }

    #[test]
    fn test_avg() {
        let input = ints(&[Some(10), Some(20), Some(30)]);
        assert_eq!(
            aggregate(&input, AggregateFunc::Avg, Some("n")).unwrap(),
            AggregateValue::Present(Value::Float64(20.0))
        );
    }

    #[test]
    fn test_min_max() {
        let input = ints(&[Some(30), Some(10), None, Some(20)]);
        assert_eq!(
            aggregate(&input, AggregateFunc::Min, Some("n")).unwrap(),
            AggregateValue::Present(Value::Int64(10))
        );
        assert_eq!(
            aggregate(&input, AggregateFunc::Max, Some("n")).unwrap(),
            AggregateValue::Present(Value::Int64(30))
        );
    }

    #[test]
    fn test_stddev() {
        let input = ints(&[Some(2), Some(4), Some(4), Some(4), Some(5), Some(5), Some(7), Some(9)]);
        let sd = aggregate(&input, AggregateFunc::StdDev, Some("n")).unwrap();
        assert!((sd.as_f64().unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_input() {
        let input = ints(&[]);
        let agg = |func| aggregate(&input, func, Some("n")).unwrap();
        assert_eq!(agg(AggregateFunc::Min), AggregateValue::Absent);
        assert_eq!(agg(AggregateFunc::Max), AggregateValue::Absent);
        assert_eq!(agg(AggregateFunc::Avg), AggregateValue::Absent);
        assert_eq!(agg(AggregateFunc::StdDev), AggregateValue::Absent);
        assert_eq!(agg(AggregateFunc::Count), AggregateValue::Present(Value::Int64(0)));
        assert_eq!(agg(AggregateFunc::Sum), AggregateValue::Present(Value::Int64(0)));
    }

    #[test]
    fn test_all_null_is_absent() {
        let input = ints(&[None, None]);
        assert!(aggregate(&input, AggregateFunc::Avg, Some("n"))
            .unwrap()
            .is_absent());
    }

    #[test]
    fn test_non_numeric_sum_is_type_mismatch() {
        let input = staff();
        assert!(matches!(
            aggregate(&input, AggregateFunc::Sum, Some("name")),
            Err(Error::TypeMismatch { .. })
        ));
        assert!(matches!(
            aggregate(&input, AggregateFunc::Avg, Some("gender")),
            Err(Error::TypeMismatch { .. })
        ));
        // MIN/MAX work on any ordered column.
        assert_eq!(
            aggregate(&input, AggregateFunc::Min, Some("name")).unwrap(),
            AggregateValue::Present(Value::from("a"))
        );
    }

    #[test]
    fn test_star_only_for_count() {
        assert!(matches!(
            aggregate(&staff(), AggregateFunc::Sum, None),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_scale() {
        let sum = AggregateValue::Present(Value::Int64(1000));
        let scaled = sum.scale(1.5).unwrap();
        assert_eq!(scaled, AggregateValue::Present(Value::Float64(1500.0)));
        assert_eq!(AggregateValue::Absent.scale(2.0).unwrap(), AggregateValue::Absent);
        assert!(AggregateValue::Present(Value::from("x")).scale(2.0).is_err());
    }

    #[test]
    fn test_aggregate_values() {
        let ages = [Value::Int64(19), Value::Int64(65), Value::Null, Value::Int64(30)];
        assert_eq!(
            aggregate_values(AggregateFunc::Max, &ages).unwrap(),
            AggregateValue::Present(Value::Int64(65))
        );
        assert_eq!(
            aggregate_values(AggregateFunc::Count, &ages).unwrap(),
            AggregateValue::Present(Value::Int64(3))
        );
        assert!(aggregate_values(AggregateFunc::Sum, &[Value::from("x")]).is_err());
    }

    #[test]
    fn test_group_by_insertion_order() {
        let groups = group_by(&staff(), &["gender"]).unwrap();
        assert_eq!(groups.len(), 2);
        let keys: Vec<&[Value]> = groups.iter().map(|g| g.key()).collect();
        assert_eq!(keys, vec![&[Value::from("M")][..], &[Value::from("F")][..]]);

        let men = groups.get(&[Value::from("M")]).unwrap();
        assert_eq!(men.rows().len(), 3);
        assert_eq!(
            men.rows().column_values("name").unwrap(),
            vec![Value::from("a"), Value::from("c"), Value::from("e")]
        );
    }

    #[test]
    fn test_group_by_errors() {
        assert!(group_by(&staff(), &[]).is_err());
        assert!(matches!(
            group_by(&staff(), &["sex"]),
            Err(Error::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_group_aggregate() {
        let max = group_aggregate(&staff(), &["gender"], AggregateFunc::Max, Some("salary")).unwrap();
        assert_eq!(
            max,
            vec![
                (vec![Value::from("M")], AggregateValue::Present(Value::Int64(9800))),
                (vec![Value::from("F")], AggregateValue::Present(Value::Int64(6000))),
            ]
        );
    }

    #[test]
    fn test_executor_group_by() {
        let input = staff();
        let executor = AggregateExecutor::resolve(
            input.schema(),
            &["gender"],
            &[
                (AggregateFunc::Sum, Some("salary")),
                (AggregateFunc::Count, None),
            ],
        )
        .unwrap();
        let result = executor.execute(&input).unwrap();

        assert_eq!(
            result.schema().names(),
            vec!["gender", "SUM(salary)", "COUNT(*)"]
        );
        assert_eq!(result.len(), 2);
        assert_eq!(
            result.rows()[0].values(),
            &[Value::from("M"), Value::Int64(13000), Value::Int64(3)]
        );
        assert_eq!(
            result.rows()[1].values(),
            &[Value::from("F"), Value::Int64(8000), Value::Int64(2)]
        );
    }

    #[test]
    fn test_executor_empty_relation() {
        let input = ints(&[]);
        let executor = AggregateExecutor::no_group(vec![
            (AggregateFunc::Count, None),
            (AggregateFunc::Sum, Some(0)),
            (AggregateFunc::Avg, Some(0)),
        ]);
        let result = executor.execute(&input).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(
            result.rows()[0].values(),
            &[Value::Int64(0), Value::Int64(0), Value::Null]
        );
    }

    #[test]
    fn test_executor_rejects_star_outside_count() {
        let input = ints(&[Some(1), Some(2), Some(3)]);
        for func in [AggregateFunc::Sum, AggregateFunc::Avg, AggregateFunc::Max] {
            let executor = AggregateExecutor::no_group(vec![(func, None)]);
            assert!(matches!(
                executor.execute(&input),
                Err(Error::InvalidArgument { .. })
            ));
        }

        // Empty groups still reject the argument.
        let grouped = AggregateExecutor::new(vec![0], vec![(AggregateFunc::Sum, None)]);
        assert!(matches!(
            grouped.execute(&ints(&[])),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_executor_widens_overflowed_sum() {
        let schema = Schema::named(
            "t",
            vec![
                Column::new("k", DataType::String),
                Column::new("n", DataType::Int64),
            ],
        );
        let rows = vec![
            Row::new(vec![Value::from("a"), Value::Int64(i64::MAX)]),
            Row::new(vec![Value::from("a"), Value::Int64(1)]),
            Row::new(vec![Value::from("b"), Value::Int64(2)]),
        ];
        let input = RowSet::new(schema, rows).unwrap();
        let result = AggregateExecutor::new(vec![0], vec![(AggregateFunc::Sum, Some(1))])
            .execute(&input)
            .unwrap();

        assert_eq!(
            result.schema().column(1).map(|c| c.data_type()),
            Some(DataType::Float64)
        );
        assert_eq!(result.rows()[1].get(1), Some(&Value::Float64(2.0)));
        for row in result.rows() {
            assert!(result.schema().check_row(row).is_ok());
        }
    }
}
