//! Predicate definitions for row filtering.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cmp::Ordering;
use tabula_core::schema::Schema;
use tabula_core::{Result, Row, Value};

/// Comparison applied by a value predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvalType {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl EvalType {
    /// Compares two non-null values using the total value order, so `1`
    /// and `1.0` are equal here.
    pub fn compare(&self, left: &Value, right: &Value) -> bool {
        let ord = left.cmp(right);
        match self {
            EvalType::Eq => ord == Ordering::Equal,
            EvalType::Ne => ord != Ordering::Equal,
            EvalType::Lt => ord == Ordering::Less,
            EvalType::Le => ord != Ordering::Greater,
            EvalType::Gt => ord == Ordering::Greater,
            EvalType::Ge => ord != Ordering::Less,
        }
    }
}

/// A pure test over a row.
///
/// Any `Fn(&Row) -> bool` closure is a predicate.
pub trait Predicate {
    /// Evaluates the predicate against a row.
    fn eval(&self, row: &Row) -> bool;
}

impl<F> Predicate for F
where
    F: Fn(&Row) -> bool,
{
    #[inline]
    fn eval(&self, row: &Row) -> bool {
        self(row)
    }
}

/// A value predicate compares a column to a literal value.
///
/// NULL on either side never matches, as in SQL.
#[derive(Clone, Debug)]
pub struct ValuePredicate {
    pub column: usize,
    pub eval_type: EvalType,
    pub value: Value,
}

impl ValuePredicate {
    pub fn new(column: usize, eval_type: EvalType, value: Value) -> Self {
        Self {
            column,
            eval_type,
            value,
        }
    }

    /// Builds a predicate on a named column of `schema`.
    pub fn resolve(
        schema: &Schema,
        column: &str,
        eval_type: EvalType,
        value: impl Into<Value>,
    ) -> Result<Self> {
        let index = schema.index_of(column)?;
        Ok(Self::new(index, eval_type, value.into()))
    }

    pub fn eq(column: usize, value: Value) -> Self {
        Self::new(column, EvalType::Eq, value)
    }

    pub fn ne(column: usize, value: Value) -> Self {
        Self::new(column, EvalType::Ne, value)
    }

    pub fn lt(column: usize, value: Value) -> Self {
        Self::new(column, EvalType::Lt, value)
    }

    pub fn le(column: usize, value: Value) -> Self {
        Self::new(column, EvalType::Le, value)
    }

    pub fn gt(column: usize, value: Value) -> Self {
        Self::new(column, EvalType::Gt, value)
    }

    pub fn ge(column: usize, value: Value) -> Self {
        Self::new(column, EvalType::Ge, value)
    }
}

impl Predicate for ValuePredicate {
    fn eval(&self, row: &Row) -> bool {
        let row_value = match row.get(self.column) {
            Some(v) => v,
            None => return false,
        };
        if row_value.is_null() || self.value.is_null() {
            return false;
        }
        self.eval_type.compare(row_value, &self.value)
    }
}

/// Logical operator for combining predicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
    Not,
}

/// A combined predicate joins child predicates with AND / OR, or negates a
/// single child with NOT.
pub struct CombinedPredicate {
    pub op: LogicalOp,
    pub children: Vec<Box<dyn Predicate>>,
}

impl CombinedPredicate {
    pub fn and(children: Vec<Box<dyn Predicate>>) -> Self {
        Self {
            op: LogicalOp::And,
            children,
        }
    }

    pub fn or(children: Vec<Box<dyn Predicate>>) -> Self {
        Self {
            op: LogicalOp::Or,
            children,
        }
    }

    pub fn not(child: Box<dyn Predicate>) -> Self {
        Self {
            op: LogicalOp::Not,
            children: alloc::vec![child],
        }
    }

    /// Conjunction of two predicates.
    pub fn both<A, B>(a: A, b: B) -> Self
    where
        A: Predicate + 'static,
        B: Predicate + 'static,
    {
        let a: Box<dyn Predicate> = Box::new(a);
        let b: Box<dyn Predicate> = Box::new(b);
        Self::and(alloc::vec![a, b])
    }
}

impl Predicate for CombinedPredicate {
    fn eval(&self, row: &Row) -> bool {
        match self.op {
            // An empty AND is true and an empty OR is false.
            LogicalOp::And => self.children.iter().all(|c| c.eval(row)),
            LogicalOp::Or => self.children.iter().any(|c| c.eval(row)),
            LogicalOp::Not => !self.children.iter().all(|c| c.eval(row)),
        }
    }
}

impl core::fmt::Debug for CombinedPredicate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CombinedPredicate")
            .field("op", &self.op)
            .field("children", &self.children.len())
            .finish()
    }
}
