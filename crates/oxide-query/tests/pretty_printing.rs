//! Pretty-print formatting tests.

mod common;

use oxide_query::dialect::{new_context, ContextOptions};
use oxide_query::builder::select;
use oxide_query::Context;

fn pretty_pg() -> Box<dyn Context> {
    new_context(&ContextOptions::new("pg").pretty(true)).unwrap()
}

#[test]
fn test_clauses_on_their_own_lines() {
    let sql = select()
        .fields(["a", "b"])
        .from("x")
        .where_eq("a", 1)
        .compile_node(&*pretty_pg())
        .unwrap();
    assert_eq!(sql, "SELECT \"a\",\n  \"b\"\nFROM \"x\"\nWHERE \"a\" = 1");
}

#[test]
fn test_nested_subquery_is_indented() {
    let sql = select()
        .from(select().from("t").alias("s"))
        .compile_node(&*pretty_pg())
        .unwrap();
    assert_eq!(sql, "SELECT *\nFROM (SELECT *\n  FROM \"t\") AS \"s\"");
}

#[test]
fn test_custom_indentation_width() {
    let ctx = new_context(&ContextOptions::new("pg").pretty(true).indentation(4)).unwrap();
    let sql = select()
        .fields(["a", "b"])
        .from("x")
        .compile_node(&*ctx)
        .unwrap();
    assert_eq!(sql, "SELECT \"a\",\n    \"b\"\nFROM \"x\"");
}

#[test]
fn test_compact_mode_uses_single_spaces() {
    let sql = select()
        .fields(["a", "b"])
        .from("x")
        .compile_node(&*common::pg())
        .unwrap();
    assert_eq!(sql, r#"SELECT "a", "b" FROM "x""#);
}
