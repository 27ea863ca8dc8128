//! ORDER BY direction and null-placement rendering tests.

mod common;

use common::{mysql, pg, sqlite_at};
use oxide_query::builder::funcs::lower;
use oxide_query::builder::{col, select};

#[test]
fn test_order_by_directions() {
    let sql = select()
        .from("x")
        .order_by("a", "ASC")
        .order_by("b", "DESC")
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "x" ORDER BY "a" ASC, "b" DESC"#);
}

#[test]
fn test_order_by_numeric_direction_tokens() {
    let sql = select()
        .from("x")
        .order_by("a", "1")
        .order_by("b", "-1")
        .order_by("c", "")
        .order_by("d", "0")
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT * FROM "x" ORDER BY "a" ASC, "b" DESC, "c", "d""#
    );
}

#[test]
fn test_order_by_is_case_insensitive() {
    let sql = select()
        .from("x")
        .order_by("a", "desc")
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "x" ORDER BY "a" DESC"#);
}

#[test]
fn test_order_by_column_index() {
    let sql = select()
        .from("x")
        .order_by(2, "DESC")
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "x" ORDER BY 2 DESC"#);
}

#[test]
fn test_order_by_expression() {
    let sql = select()
        .from("x")
        .order_by(lower([col("name")]), "ASC")
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "x" ORDER BY LOWER("name") ASC"#);
}

#[test]
fn test_order_by_array_of_keys() {
    let sql = select()
        .from("x")
        .order_by(["a", "b"], "ASC")
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "x" ORDER BY "a" ASC, "b" ASC"#);
}

#[test]
fn test_invalid_direction_is_a_compile_error() {
    let err = select()
        .from("x")
        .order_by("a", "sideways")
        .compile_node(&*pg())
        .unwrap_err();
    assert!(err.to_string().contains("invalid sort direction"));
}

#[test]
fn test_invalid_sort_key_is_a_compile_error() {
    let err = select()
        .from("x")
        .order_by(true, "")
        .compile_node(&*pg())
        .unwrap_err();
    assert!(err.to_string().contains("sort key"));
}

#[test]
fn test_nulls_placement_is_literal_on_postgres() {
    let sql = select()
        .from("t")
        .order_by_nulls("a", "DESC", "NULLS LAST")
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "t" ORDER BY "a" DESC NULLS LAST"#);
}

#[test]
fn test_nulls_last_is_emulated_on_mysql() {
    let sql = select()
        .from("t")
        .order_by_nulls("a", "ASC", "NULLS LAST")
        .compile_node(&*mysql())
        .unwrap();
    assert_eq!(sql, "SELECT * FROM `t` ORDER BY (`a` IS NULL), `a` ASC");
}

#[test]
fn test_nulls_first_matches_mysql_default() {
    let sql = select()
        .from("t")
        .order_by_nulls("a", "ASC", "NULLS FIRST")
        .compile_node(&*mysql())
        .unwrap();
    assert_eq!(sql, "SELECT * FROM `t` ORDER BY `a` ASC");
}

#[test]
fn test_nulls_first_is_emulated_on_mysql_descending() {
    let sql = select()
        .from("t")
        .order_by_nulls("a", "DESC", "NULLS FIRST")
        .compile_node(&*mysql())
        .unwrap();
    assert_eq!(sql, "SELECT * FROM `t` ORDER BY (`a` IS NOT NULL), `a` DESC");
}

#[test]
fn test_sqlite_gains_nulls_placement_at_3_30() {
    let sql = select()
        .from("t")
        .order_by_nulls("a", "ASC", "NULLS LAST")
        .compile_node(&*sqlite_at("3.25.0"))
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "t" ORDER BY ("a" IS NULL), "a" ASC"#);

    let sql = select()
        .from("t")
        .order_by_nulls("a", "ASC", "NULLS LAST")
        .compile_node(&*sqlite_at("3.30.0"))
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "t" ORDER BY "a" ASC NULLS LAST"#);
}
