//! UPDATE and DELETE builder integration tests.

mod common;

use common::{mysql, pg};
use oxide_query::builder::{col, delete, eq, op, update};
use oxide_query::node::ExplicitType;
use oxide_query::{Term, UpdateQuery};

#[test]
fn test_update_with_expression_value() {
    let sql = update("x")
        .values([
            ("a", Term::from(1)),
            ("b", Term::from(op(col("b"), "+", 1))),
        ])
        .compile_query(&*pg())
        .unwrap();
    assert_eq!(sql, r#"UPDATE "x" SET "a" = 1, "b" = "b" + 1;"#);
}

#[test]
fn test_update_where_and_returning() {
    let sql = update("x")
        .values([("a", Term::from(2))])
        .where_eq("id", 7)
        .returning(["a"])
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(sql, r#"UPDATE "x" SET "a" = 2 WHERE "id" = 7 RETURNING "a""#);
}

#[test]
fn test_update_type_hint() {
    let sql = update("x")
        .values([("flag", Term::from("off"))])
        .type_hint("flag", ExplicitType::Boolean)
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(sql, r#"UPDATE "x" SET "flag" = FALSE"#);
}

#[test]
fn test_update_limit_mysql() {
    let sql = update("x")
        .values([("a", Term::from(1))])
        .where_eq("b", 2)
        .limit(5)
        .compile_node(&*mysql())
        .unwrap();
    assert_eq!(sql, "UPDATE `x` SET `a` = 1 WHERE `b` = 2 LIMIT 5");
}

#[test]
fn test_update_without_rows_fails() {
    let err = update("x").compile_node(&*pg()).unwrap_err();
    assert!(err.to_string().contains("exactly one row"));
}

#[test]
fn test_update_with_two_rows_fails() {
    let err = update("x")
        .values([("a", Term::from(1))])
        .values([("a", Term::from(2))])
        .compile_node(&*pg())
        .unwrap_err();
    assert!(err.to_string().contains("exactly one row"));
}

#[test]
fn test_update_without_table_fails() {
    let err = UpdateQuery::new()
        .values([("a", Term::from(1))])
        .compile_node(&*pg())
        .unwrap_err();
    assert!(err.to_string().contains("UPDATE requires a table"));
}

#[test]
fn test_delete_with_where() {
    let sql = delete()
        .from("x")
        .where_op("a", "<", 10)
        .compile_query(&*pg())
        .unwrap();
    assert_eq!(sql, r#"DELETE FROM "x" WHERE "a" < 10;"#);
}

#[test]
fn test_delete_using() {
    let sql = delete()
        .from("x")
        .using("y")
        .where_clause(eq(col("x.yid"), col("y.id")))
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(
        sql,
        r#"DELETE FROM "x" USING "y" WHERE "x"."yid" = "y"."id""#
    );
}

#[test]
fn test_delete_returning() {
    let sql = delete()
        .from("x")
        .where_eq("id", 1)
        .returning(["id"])
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(sql, r#"DELETE FROM "x" WHERE "id" = 1 RETURNING "id""#);
}

#[test]
fn test_delete_without_table_fails() {
    let err = delete().where_eq("a", 1).compile_node(&*pg()).unwrap_err();
    assert!(err.to_string().contains("DELETE requires a table"));
}

#[test]
fn test_delete_table_already_set_fails() {
    let err = delete().from("x").table("y").compile_node(&*pg()).unwrap_err();
    assert!(err.to_string().contains("already set"));
}
