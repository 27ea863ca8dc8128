//! Parameter substitution engine tests.

mod common;

use common::pg;
use oxide_query::builder::{raw, raw_with};
use oxide_query::{Error, Term};

#[test]
fn test_positional_markers_skip_quoted_regions() {
    let sql = pg()
        .substitute("a = ?, b = '?', c = ?", &[1.into(), 2.into()])
        .unwrap();
    assert_eq!(sql, "a = 1, b = '?', c = 2");
}

#[test]
fn test_indexed_markers() {
    let sql = pg()
        .substitute("a = $2, b = $1", &[1.into(), 2.into()])
        .unwrap();
    assert_eq!(sql, "a = 2, b = 1");
}

#[test]
fn test_indexed_marker_reuse() {
    let sql = pg().substitute("$1 + $1", &[7.into()]).unwrap();
    assert_eq!(sql, "7 + 7");
}

#[test]
fn test_template_without_markers_is_unchanged() {
    let template = r#"SELECT * FROM "t?" WHERE a = '$1'"#;
    assert_eq!(pg().substitute(template, &[]).unwrap(), template);
}

#[test]
fn test_mixed_marks_fail() {
    let err = pg().substitute("$1 and ?", &[1.into(), 2.into()]).unwrap_err();
    assert!(err.to_string().contains("mixed substitution marks"));

    let err = pg().substitute("? and $1", &[1.into(), 2.into()]).unwrap_err();
    assert!(err.to_string().contains("mixed substitution marks"));
}

#[test]
fn test_zero_index_fails() {
    let err = pg().substitute("a = $0", &[1.into()]).unwrap_err();
    assert!(matches!(err, Error::Compile(_)));
}

#[test]
fn test_out_of_range_index_fails() {
    let err = pg().substitute("a = $9", &[1.into(), 2.into()]).unwrap_err();
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn test_too_few_positional_bindings_fail() {
    let err = pg().substitute("? ?", &[1.into()]).unwrap_err();
    assert!(err.to_string().contains("not enough bindings"));
}

#[test]
fn test_doubled_quote_escape_is_honored() {
    let sql = pg().substitute("'it''s ?' ?", &[1.into()]).unwrap();
    assert_eq!(sql, "'it''s ?' 1");
}

#[test]
fn test_c_style_string_escapes_are_honored() {
    let sql = pg().substitute(r"e'a\'b?' = ?", &[1.into()]).unwrap();
    assert_eq!(sql, r"e'a\'b?' = 1");
}

#[test]
fn test_double_quoted_identifiers_are_skipped() {
    let sql = pg().substitute(r#""col?" = ?"#, &[5.into()]).unwrap();
    assert_eq!(sql, r#""col?" = 5"#);
}

#[test]
fn test_bindings_are_escaped() {
    let sql = pg()
        .substitute("name = ?", &[Term::from("O'Brien")])
        .unwrap();
    assert_eq!(sql, r"name = E'O\'Brien'");
}

#[test]
fn test_raw_fragment_is_verbatim() {
    let sql = raw("ctid = '(0,1)'").compile_node(&*pg()).unwrap();
    assert_eq!(sql, "ctid = '(0,1)'");
}

#[test]
fn test_raw_fragment_with_bindings() {
    let sql = raw_with("a = ? AND b = ?", vec![1.into(), 2.into()])
        .compile_node(&*pg())
        .unwrap();
    assert_eq!(sql, "a = 1 AND b = 2");
}

#[test]
fn test_raw_fragment_with_alias() {
    let sql = raw("1").alias("one").compile_node(&*pg()).unwrap();
    assert_eq!(sql, r#"1 AS "one""#);
}
