//! INSERT builder integration tests.

mod common;

use common::{mysql, pg, sqlite};
use oxide_query::builder::insert;
use oxide_query::node::ExplicitType;
use oxide_query::{InsertQuery, Term};

#[test]
fn test_insert_with_returning() {
    let sql = insert("x")
        .values([
            ("a", Term::from(0)),
            ("b", Term::from(false)),
            ("c", Term::from("String")),
        ])
        .returning(["a", "b", "c"])
        .compile_query(&*pg())
        .unwrap();
    assert_eq!(
        sql,
        r#"INSERT INTO "x" ("a", "b", "c") VALUES (0, FALSE, 'String') RETURNING "a", "b", "c";"#
    );
}

#[test]
fn test_insert_multiple_rows_fill_defaults() {
    let sql = insert("t")
        .values([("a", Term::from(1))])
        .values([("a", Term::from(2)), ("b", Term::from(3))])
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(
        sql,
        r#"INSERT INTO "t" ("a", "b") VALUES (1, DEFAULT), (2, 3)"#
    );
}

#[test]
fn test_insert_column_order_is_first_appearance() {
    let sql = insert("t")
        .values([("b", Term::from(1))])
        .values([("a", Term::from(2)), ("b", Term::from(3))])
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(
        sql,
        r#"INSERT INTO "t" ("b", "a") VALUES (1, DEFAULT), (3, 2)"#
    );
}

#[test]
fn test_insert_returning_is_omitted_without_dialect_support() {
    let sql = insert("x")
        .values([("a", Term::from(1))])
        .returning(["a"])
        .compile_node(&*mysql())
        .unwrap();
    assert_eq!(sql, "INSERT INTO `x` (`a`) VALUES (1)");
}

#[test]
fn test_insert_boolean_on_sqlite() {
    let sql = insert("x")
        .values([("flag", Term::from(true))])
        .compile_node(&*sqlite())
        .unwrap();
    assert_eq!(sql, r#"INSERT INTO "x" ("flag") VALUES (1)"#);
}

#[test]
fn test_insert_type_hint() {
    let sql = insert("x")
        .values([("flag", Term::from("yes"))])
        .type_hint("flag", ExplicitType::Boolean)
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(sql, r#"INSERT INTO "x" ("flag") VALUES (TRUE)"#);
}

#[test]
fn test_insert_without_table_fails() {
    let err = InsertQuery::new()
        .values([("a", Term::from(1))])
        .compile_node(&*pg())
        .unwrap_err();
    assert!(err.to_string().contains("INSERT requires a table"));
}

#[test]
fn test_insert_without_rows_fails() {
    let err = insert("x").compile_node(&*pg()).unwrap_err();
    assert!(err.to_string().contains("at least one row"));
}

#[test]
fn test_insert_table_already_set_fails() {
    let err = insert("x")
        .table("y")
        .values([("a", Term::from(1))])
        .compile_node(&*pg())
        .unwrap_err();
    assert!(err.to_string().contains("already set"));
}
