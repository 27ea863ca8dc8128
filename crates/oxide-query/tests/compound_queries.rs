//! UNION/INTERSECT/EXCEPT integration tests.

mod common;

use common::pg;
use oxide_query::builder::{except, intersect, select, union, union_all};

#[test]
fn test_union_of_plain_queries() {
    let sql = union(
        select().fields(["a"]).from("x"),
        select().fields(["a"]).from("y"),
    )
    .compile_node(&*pg())
    .unwrap();
    assert_eq!(sql, r#"SELECT "a" FROM "x" UNION SELECT "a" FROM "y""#);
}

#[test]
fn test_nested_compound_is_parenthesized() {
    let inner = union(
        select().fields(["a"]).from("y"),
        select().fields(["a"]).from("z"),
    );
    let sql = union(select().fields(["a"]).from("x"), inner)
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT "a" FROM "x" UNION (SELECT "a" FROM "y" UNION SELECT "a" FROM "z")"#
    );
}

#[test]
fn test_union_all() {
    let sql = union_all(select().from("x"), select().from("y"))
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "x" UNION ALL SELECT * FROM "y""#);
}

#[test]
fn test_union_distinct_keyword() {
    let sql = union(select().from("x"), select().from("y"))
        .distinct()
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "x" UNION DISTINCT SELECT * FROM "y""#);
}

#[test]
fn test_intersect_and_except() {
    let sql = intersect(select().from("x"), select().from("y"))
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "x" INTERSECT SELECT * FROM "y""#);

    let sql = except(select().from("x"), select().from("y"))
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "x" EXCEPT SELECT * FROM "y""#);
}

#[test]
fn test_compound_with_common_suffix() {
    let sql = union(
        select().fields(["a"]).from("x"),
        select().fields(["a"]).from("y"),
    )
    .order_by("a", "ASC")
    .limit(10)
    .compile_node(&*pg())
    .unwrap();
    assert_eq!(
        sql,
        r#"SELECT "a" FROM "x" UNION SELECT "a" FROM "y" ORDER BY "a" ASC LIMIT 10"#
    );
}

#[test]
fn test_compound_with_three_members() {
    let sql = union(select().from("x"), select().from("y"))
        .add(select().from("z"))
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT * FROM "x" UNION SELECT * FROM "y" UNION SELECT * FROM "z""#
    );
}

#[test]
fn test_compound_compile_query_has_semicolon() {
    let compound = union(select().from("x"), select().from("y"));
    let node = compound.compile_node(&*pg()).unwrap();
    let full = compound.compile_query(&*pg()).unwrap();
    assert_eq!(full, format!("{node};"));
}
