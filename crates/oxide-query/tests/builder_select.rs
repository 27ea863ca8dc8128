//! SELECT builder integration tests.

mod common;

use common::{mysql, pg};
use oxide_query::builder::funcs::{count, count_star, sum};
use oxide_query::builder::{col, cond, eq, or, select, FieldSpec};
use oxide_query::term::Literal;
use oxide_query::{Node, Term};

#[test]
fn test_select_star() {
    let sql = select().from("x").compile_node(&*pg()).unwrap();
    assert_eq!(sql, r#"SELECT * FROM "x""#);
}

#[test]
fn test_bit_exact_contract() {
    let query: Node = select().from("x").where_clause(eq(col("a"), 1)).into();
    let sql = pg().compile(&query).unwrap();
    assert_eq!(sql, r#"SELECT * FROM "x" WHERE "a" = 1;"#);
}

#[test]
fn test_select_fields_and_in_list() {
    let sql = select()
        .fields(["a", "b", "c"])
        .from("x")
        .where_op("a", "IN", vec![42, 23])
        .compile_query(&*pg())
        .unwrap();
    assert_eq!(sql, r#"SELECT "a", "b", "c" FROM "x" WHERE "a" IN (42, 23);"#);
}

#[test]
fn test_select_distinct() {
    let sql = select()
        .fields(["status"])
        .distinct()
        .from("orders")
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(sql, r#"SELECT DISTINCT "status" FROM "orders""#);
}

#[test]
fn test_compile_query_appends_semicolon() {
    let query = select().from("x");
    let node = query.clone().compile_node(&*pg()).unwrap();
    let full = query.compile_query(&*pg()).unwrap();
    assert_eq!(full, format!("{node};"));
}

#[test]
fn test_where_accumulation_stays_flat() {
    let sql = select()
        .from("x")
        .where_eq("a", 1)
        .where_eq("b", 2)
        .where_eq("c", 3)
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT * FROM "x" WHERE "a" = 1 AND "b" = 2 AND "c" = 3"#
    );
}

#[test]
fn test_where_operator_switch_wraps_once() {
    let sql = select()
        .from("x")
        .where_eq("a", 1)
        .where_eq("b", 2)
        .or_where_eq("c", 3)
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT * FROM "x" WHERE ("a" = 1 AND "b" = 2) OR "c" = 3"#
    );
}

#[test]
fn test_where_single_condition_switch_has_no_parens() {
    let sql = select()
        .from("x")
        .where_eq("a", 1)
        .or_where_eq("b", 2)
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "x" WHERE "a" = 1 OR "b" = 2"#);
}

#[test]
fn test_explicit_or_group_parenthesizes_as_subexpression() {
    let group = or(eq(col("a"), 1), eq(col("b"), 2)).add(eq(col("c"), 3));
    let sql = select()
        .from("x")
        .where_clause(group)
        .where_eq("d", 4)
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT * FROM "x" WHERE ("a" = 1 OR "b" = 2 OR "c" = 3) AND "d" = 4"#
    );
}

#[test]
fn test_equality_against_null_becomes_is() {
    let sql = select()
        .from("x")
        .where_op("a", "=", Literal::Null)
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "x" WHERE "a" IS NULL"#);
}

#[test]
fn test_condition_map() {
    let sql = select()
        .from("t")
        .where_clause(cond([
            ("a", Term::from(1)),
            ("b", Term::from(Literal::Null)),
        ]))
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "t" WHERE "a" = 1 AND "b" IS NULL"#);
}

#[test]
fn test_multi_table_from_is_cross_join_chain() {
    let sql = select().from(["x", "y"]).compile_node(&*pg()).unwrap();
    assert_eq!(sql, r#"SELECT * FROM "x" CROSS JOIN "y""#);
}

#[test]
fn test_inner_join_using() {
    let sql = select()
        .from("x")
        .inner_join("y", ["id", "kind"])
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "x" INNER JOIN "y" USING ("id", "kind")"#);
}

#[test]
fn test_left_join_on_expression() {
    let sql = select()
        .from("x")
        .left_join("y", eq(col("x.id"), col("y.x_id")))
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT * FROM "x" LEFT JOIN "y" ON "x"."id" = "y"."x_id""#
    );
}

#[test]
fn test_join_without_from_is_a_compile_error() {
    let err = select()
        .inner_join("y", ["id"])
        .compile_node(&*pg())
        .unwrap_err();
    assert!(err.to_string().contains("JOIN requires a source table"));
}

#[test]
fn test_group_by_and_having() {
    let sql = select()
        .field(count_star().alias("n"))
        .field(col("status"))
        .from("orders")
        .group_by("status")
        .having_op("n", ">", 5)
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT COUNT(*) AS "n", "status" FROM "orders" GROUP BY "status" HAVING "n" > 5"#
    );
}

#[test]
fn test_field_map() {
    let sql = select()
        .field_map([
            ("id", FieldSpec::Keep),
            ("name", FieldSpec::from("full_name")),
            ("total", FieldSpec::Expr(sum([col("amount")]).into())),
        ])
        .from("t")
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT "id", "full_name" AS "name", SUM("amount") AS "total" FROM "t""#
    );
}

#[test]
fn test_offset_limit_postgres() {
    let sql = select()
        .from("x")
        .offset(20)
        .limit(10)
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "x" OFFSET 20 LIMIT 10"#);
}

#[test]
fn test_offset_without_limit_mysql() {
    let sql = select().from("x").offset(20).compile_node(&*mysql()).unwrap();
    assert_eq!(sql, "SELECT * FROM `x` LIMIT 18446744073709551615 OFFSET 20");
}

#[test]
fn test_subquery_source_with_alias() {
    let sub = select().from("t").alias("sub");
    let sql = select().from(sub).compile_node(&*pg()).unwrap();
    assert_eq!(sql, r#"SELECT * FROM (SELECT * FROM "t") AS "sub""#);
}

#[test]
fn test_subquery_in_where() {
    let sub = select().fields(["id"]).from("banned");
    let sql = select()
        .from("users")
        .where_clause(col("id").in_list(sub))
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT * FROM "users" WHERE "id" IN (SELECT "id" FROM "banned")"#
    );
}

#[test]
fn test_aggregate_distinct() {
    let sql = select()
        .field(count([col("status")]).distinct())
        .from("orders")
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(sql, r#"SELECT COUNT(DISTINCT "status") FROM "orders""#);
}
