//! Tabula Demo - SQL exercises answered with the Tabula operators.
//!
//! Each exercise pairs a SQL statement with the operator pipeline that
//! computes the same result over the built-in `employees` table or the
//! small letter tables `t1`, `t2` and `t3`.

pub mod exercises;
pub mod fixture;
