//! Integration tests for CROSS and chain INNER joins.
//!
//! The three single-column tables are the ones of the classic
//! `SELECT * FROM t1, t2, t3` example:
//! t1 = {A, B, C}, t2 = {B, C, D}, t3 = {C, D, E}.

use tabula_core::schema::{Column, Schema};
use tabula_core::{DataType, Keyed, Row, Tuple3, Value};
use tabula_query::catalog::Catalog;
use tabula_query::executor::{
    chain_join_n, cross_join3, cross_join_n, inner_join3, project_tuple3, ChainJoin, CrossJoin,
    JoinKey, RowSet,
};

/// Helper to create a single-column table of strings.
fn create_letters(values: &[&str]) -> RowSet {
    let schema = Schema::new(vec![Column::new("e", DataType::String)]);
    let rows = values
        .iter()
        .map(|v| Row::new(vec![Value::from(*v)]))
        .collect();
    RowSet::new(schema, rows).unwrap()
}

fn create_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog.add_table("t1", create_letters(&["A", "B", "C"]));
    catalog.add_table("t2", create_letters(&["B", "C", "D"]));
    catalog.add_table("t3", create_letters(&["C", "D", "E"]));
    catalog
}

fn render(tuples: &[Tuple3<Value, Value, Value>]) -> Vec<String> {
    tuples.iter().map(|t| t.to_string()).collect()
}

#[test]
fn test_cross_join_lists_every_combination_in_order() {
    let catalog = create_catalog();
    let joined = catalog.cross_join(&["t1", "t2", "t3"]).unwrap();
    let lines = render(&project_tuple3(&joined, ["t1.e", "t2.e", "t3.e"]).unwrap());

    assert_eq!(lines.len(), 27);
    assert_eq!(&lines[..4], &["A B C", "A B D", "A B E", "A C C"]);
    assert_eq!(lines[26], "C D E");
}

#[test]
fn test_chain_inner_join_matches_only_ccc() {
    let catalog = create_catalog();
    let joined = catalog
        .chain_join(&["t1", "t2", "t3"], &[("t1.e", "t2.e"), ("t2.e", "t3.e")])
        .unwrap();
    let lines = render(&project_tuple3(&joined, ["t1.e", "t2.e", "t3.e"]).unwrap());
    assert_eq!(lines, vec!["C C C"]);
}

#[test]
fn test_typed_joins_agree_with_row_set_joins() {
    let t1 = Keyed::wrap_all(["A", "B", "C"]);
    let t2 = Keyed::wrap_all(["B", "C", "D"]);
    let t3 = Keyed::wrap_all(["C", "D", "E"]);

    let catalog = create_catalog();
    let joined = catalog.cross_join(&["t1", "t2", "t3"]).unwrap();
    let from_rows = render(&project_tuple3(&joined, ["t1.e", "t2.e", "t3.e"]).unwrap());

    let typed: Vec<String> = cross_join3(&t1, &t2, &t3)
        .iter()
        .map(|t| format!("{} {} {}", t.x.e, t.y.e, t.z.e))
        .collect();
    assert_eq!(typed, from_rows);

    let inner = inner_join3(&t1, &t2, &t3, |a, b| a.e == b.e, |b, c| b.e == c.e);
    assert_eq!(inner.len(), 1);
    assert_eq!(inner[0].x.e, "C");
}

#[test]
fn test_cross_join_with_empty_table() {
    let a = create_letters(&["A", "B"]);
    let empty = create_letters(&[]);
    assert!(CrossJoin::new().execute(&[&a, &empty]).unwrap().is_empty());
    assert!(CrossJoin::new().execute(&[&empty, &a]).unwrap().is_empty());
}

#[test]
fn test_chain_join_duplicates_cross_match() {
    let mut catalog = Catalog::new();
    catalog.add_table("t1", create_letters(&["C", "C"]));
    catalog.add_table("t2", create_letters(&["C", "X", "C"]));
    // Bare names resolve per input table.
    let by_name = catalog.chain_join(&["t1", "t2"], &[("e", "e")]).unwrap();
    assert_eq!(by_name.len(), 4);

    let t1 = catalog.table("t1").unwrap();
    let t2 = catalog.table("t2").unwrap();
    let result = ChainJoin::new(vec![JoinKey::new(0, 0)])
        .execute(&[t1, t2])
        .unwrap();
    assert_eq!(result, by_name);
}

#[test]
fn test_chain_join_is_not_transitive_shortcut() {
    // t1.k = t2.a and t2.b = t3.k: t1 and t3 are never compared directly.
    let pairs = Schema::named(
        "t2",
        vec![
            Column::new("a", DataType::Int64),
            Column::new("b", DataType::Int64),
        ],
    );
    let t2 = RowSet::new(
        pairs,
        vec![
            Row::new(vec![Value::Int64(1), Value::Int64(2)]),
            Row::new(vec![Value::Int64(2), Value::Int64(3)]),
        ],
    )
    .unwrap();
    let ints = |name: &str, values: &[i64]| {
        let schema = Schema::named(name, vec![Column::new("k", DataType::Int64)]);
        let rows = values.iter().map(|v| Row::new(vec![Value::Int64(*v)])).collect();
        RowSet::new(schema, rows).unwrap()
    };
    let t1 = ints("t1", &[1, 2]);
    let t3 = ints("t3", &[2, 3]);

    let join = ChainJoin::resolve(
        &[t1.schema(), t2.schema(), t3.schema()],
        &[("k", "a"), ("b", "k")],
    )
    .unwrap();
    let result = join.execute(&[&t1, &t2, &t3]).unwrap();

    assert_eq!(result.schema().names(), vec!["t1.k", "t2.a", "t2.b", "t3.k"]);
    let rows: Vec<Vec<i64>> = result
        .iter()
        .map(|r| r.values().iter().filter_map(Value::as_i64).collect())
        .collect();
    assert_eq!(rows, vec![vec![1, 1, 2, 2], vec![2, 2, 3, 3]]);
}

#[test]
fn test_n_way_slices() {
    let s1 = ["A", "B", "C"];
    let s2 = ["B", "C", "D"];
    let s3 = ["C", "D", "E"];
    let sets = [&s1[..], &s2[..], &s3[..]];
    assert_eq!(cross_join_n(&sets).len(), 27);
    assert_eq!(chain_join_n(&sets), vec![vec!["C", "C", "C"]]);
}
