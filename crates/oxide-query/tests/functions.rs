//! Operator/function catalog rendering tests.

mod common;

use common::{mysql, pg};
use oxide_query::builder::funcs::{
    atan, between, cast, chr, coalesce, log10, pi, power, random, trunc,
};
use oxide_query::builder::{col, func, op, val};
use oxide_query::{Error, Term};

#[test]
fn test_function_aliases_canonicalize() {
    let sql = func("POW", [2, 3]).compile_node(&*pg()).unwrap();
    assert_eq!(sql, "POWER(2, 3)");

    let sql = func("CEIL", [1.5]).compile_node(&*pg()).unwrap();
    assert_eq!(sql, "CEILING(1.5)");

    let sql = power([2, 3]).compile_node(&*pg()).unwrap();
    assert_eq!(sql, "POWER(2, 3)");
}

#[test]
fn test_cast() {
    let sql = cast(col("a"), "INTEGER").compile_node(&*pg()).unwrap();
    assert_eq!(sql, r#"CAST("a" AS INTEGER)"#);
}

#[test]
fn test_between() {
    let sql = between(col("a"), 1, 10).compile_node(&*pg()).unwrap();
    assert_eq!(sql, r#""a" BETWEEN 1 AND 10"#);
}

#[test]
fn test_atan_arity_split() {
    assert_eq!(atan([1]).compile_node(&*pg()).unwrap(), "ATAN(1)");
    assert_eq!(atan([1, 2]).compile_node(&*pg()).unwrap(), "ATAN2(1, 2)");
}

#[test]
fn test_log10_split_by_dialect() {
    assert_eq!(log10([col("x")]).compile_node(&*pg()).unwrap(), r#"LOG(10, "x")"#);
    assert_eq!(log10([col("x")]).compile_node(&*mysql()).unwrap(), "LOG10(`x`)");
}

#[test]
fn test_random_split_by_dialect() {
    assert_eq!(random().compile_node(&*pg()).unwrap(), "RANDOM()");
    assert_eq!(random().compile_node(&*mysql()).unwrap(), "RAND()");
}

#[test]
fn test_trunc_split_by_dialect() {
    assert_eq!(trunc([1.5]).compile_node(&*pg()).unwrap(), "TRUNC(1.5)");
    assert_eq!(trunc([1.5]).compile_node(&*mysql()).unwrap(), "TRUNCATE(1.5, 0)");
}

#[test]
fn test_chr_split_by_dialect() {
    assert_eq!(chr([65]).compile_node(&*pg()).unwrap(), "CHR(65)");
    assert_eq!(chr([65]).compile_node(&*mysql()).unwrap(), "CHAR(65)");
}

#[test]
fn test_pi_takes_no_arguments() {
    assert_eq!(pi().compile_node(&*pg()).unwrap(), "PI()");
}

#[test]
fn test_coalesce_is_variadic() {
    let sql = coalesce([Term::from(col("a")), Term::from(0)])
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(sql, r#"COALESCE("a", 0)"#);
}

#[test]
fn test_wrong_arity_is_a_compile_error() {
    let err = func("ABS", [1, 2]).compile_node(&*pg()).unwrap_err();
    assert!(matches!(err, Error::Compile(_)));
    assert!(err.to_string().contains("argument"));
}

#[test]
fn test_unknown_function_renders_as_given() {
    let sql = func("MY_FUNC", [1]).compile_node(&*pg()).unwrap();
    assert_eq!(sql, "MY_FUNC(1)");
}

#[test]
fn test_unknown_binary_operator_renders_spaced() {
    let sql = op(col("a"), "<=>", 1).compile_node(&*pg()).unwrap();
    assert_eq!(sql, r#""a" <=> 1"#);
}

#[test]
fn test_nested_binary_operands_are_parenthesized() {
    let sql = op(op(col("a"), "+", 1), "*", 2).compile_node(&*pg()).unwrap();
    assert_eq!(sql, r#"("a" + 1) * 2"#);
}

#[test]
fn test_string_literal_operand() {
    let sql = op(val("a"), "||", val("b")).compile_node(&*pg()).unwrap();
    assert_eq!(sql, "'a' || 'b'");
}

#[test]
fn test_negation_swaps_registered_pairs() {
    use oxide_query::node::BinaryOp;

    let sql = BinaryOp::new(col("a"), "=", 1).negate().compile_node(&*pg()).unwrap();
    assert_eq!(sql, r#""a" <> 1"#);

    let sql = BinaryOp::new(col("a"), ">", 1).negate().compile_node(&*pg()).unwrap();
    assert_eq!(sql, r#""a" <= 1"#);
}

#[test]
fn test_negation_of_in_place_not_operators() {
    use oxide_query::node::BinaryOp;

    let sql = BinaryOp::new(col("a"), "LIKE", "x%")
        .negate()
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(sql, r#""a" NOT LIKE 'x%'"#);

    let sql = BinaryOp::new(col("a"), "IN", vec![1, 2])
        .negate()
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(sql, r#""a" NOT IN (1, 2)"#);
}

#[test]
fn test_exists_over_subquery() {
    use oxide_query::builder::{exists, select};

    let sql = exists(select().from("t")).compile_node(&*pg()).unwrap();
    assert_eq!(sql, r#"EXISTS (SELECT * FROM "t")"#);
}

#[test]
fn test_function_alias_rendering() {
    let sql = func("LOWER", [col("name")])
        .alias("lname")
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(sql, r#"LOWER("name") AS "lname""#);
}
