//! SQL dialect contexts.
//!
//! A [`Context`] is a dialect compiler: it walks a node tree producing SQL
//! text and owns every escaping primitive along the way. Dialects share the
//! default method bodies here and override the points where back-ends
//! genuinely differ (string/buffer/array escaping, boolean literals,
//! LIMIT/OFFSET shape).

mod mysql;
mod postgres;
mod sqlite;
mod substitute;

pub use mysql::MysqlContext;
pub use postgres::PostgresContext;
pub use sqlite::SqliteContext;

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::node::{compile_operand, ExplicitType, Node};
use crate::term::{Literal, Term};

/// A parsed dialect version. Missing components parse as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Version {
    /// Major component.
    pub major: u32,
    /// Minor component.
    pub minor: u32,
    /// Patch component.
    pub patch: u32,
}

impl Version {
    /// Creates a version from its components.
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parses a `major[.minor[.patch]]` string.
    ///
    /// # Errors
    ///
    /// Fails with a [`Error::Compile`] when a component is not a number.
    pub fn parse(text: &str) -> Result<Self> {
        let mut components = [0_u32; 3];
        for (i, part) in text.splitn(3, '.').enumerate() {
            components[i] = part
                .parse()
                .map_err(|_| Error::compile(format!("invalid dialect version '{text}'")))?;
        }
        Ok(Self::new(components[0], components[1], components[2]))
    }

    /// Returns `true` when this version is at least `major.minor`.
    #[must_use]
    pub const fn at_least(self, major: u32, minor: u32) -> bool {
        self.major > major || (self.major == major && self.minor >= minor)
    }
}

/// Identifier quoting styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// `"name"`.
    Double,
    /// `` `name` ``.
    Grave,
    /// `[name]`.
    Bracket,
}

impl QuoteStyle {
    /// Returns the opening and closing quote characters.
    #[must_use]
    pub const fn tokens(self) -> (char, char) {
        match self {
            Self::Double => ('"', '"'),
            Self::Grave => ('`', '`'),
            Self::Bracket => ('[', ']'),
        }
    }
}

/// The feature record of a dialect. Any change must be followed by
/// [`ContextBase::update`] to recompute derived tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    /// Identifier quoting style.
    pub quote_style: QuoteStyle,
    /// TRUE/FALSE are real literals (otherwise 1/0).
    pub native_boolean: bool,
    /// `ARRAY[...]` literals exist.
    pub native_array: bool,
    /// `NULLS FIRST`/`NULLS LAST` is accepted in ORDER BY.
    pub nulls_first_last: bool,
    /// NULLs sort after non-NULLs on an ascending key by default.
    pub nulls_sort_bottom: bool,
    /// `RETURNING` is accepted on INSERT/UPDATE/DELETE.
    pub returning: bool,
    /// The dialect spells RETURNING as an OUTPUT clause instead.
    pub returning_as_output: bool,
    /// NaN/Infinity exist as quoted special tokens.
    pub special_numbers: bool,
}

impl Features {
    /// PostgreSQL has the full feature set at any supported version.
    #[must_use]
    pub const fn postgres(_version: Version) -> Self {
        Self {
            quote_style: QuoteStyle::Double,
            native_boolean: true,
            native_array: true,
            nulls_first_last: true,
            nulls_sort_bottom: true,
            returning: true,
            returning_as_output: false,
            special_numbers: true,
        }
    }

    /// MySQL/MariaDB.
    #[must_use]
    pub const fn mysql(_version: Version) -> Self {
        Self {
            quote_style: QuoteStyle::Grave,
            native_boolean: true,
            native_array: false,
            nulls_first_last: false,
            nulls_sort_bottom: false,
            returning: false,
            returning_as_output: false,
            special_numbers: false,
        }
    }

    /// SQLite. NULLS FIRST/LAST arrived in 3.30 and RETURNING in 3.35.
    #[must_use]
    pub const fn sqlite(version: Version) -> Self {
        Self {
            quote_style: QuoteStyle::Double,
            native_boolean: false,
            native_array: false,
            nulls_first_last: version.at_least(3, 30),
            nulls_sort_bottom: false,
            returning: version.at_least(3, 35),
            returning_as_output: false,
            special_numbers: false,
        }
    }
}

/// Options accepted by [`new_context`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextOptions {
    /// Dialect name (`pg`, `mysql`, `sqlite`, or a registered alias).
    pub dialect: String,
    /// Pretty-print with newlines and indentation.
    pub pretty: bool,
    /// Indentation width used by pretty printing.
    pub indentation: usize,
    /// Back-end version, `major[.minor[.patch]]`.
    pub version: Option<String>,
}

impl ContextOptions {
    /// Creates options for a dialect with the defaults (compact output,
    /// two-space indentation, dialect-default version).
    #[must_use]
    pub fn new(dialect: impl Into<String>) -> Self {
        Self {
            dialect: dialect.into(),
            ..Self::default()
        }
    }

    /// Enables pretty printing.
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the indentation width.
    #[must_use]
    pub const fn indentation(mut self, width: usize) -> Self {
        self.indentation = width;
        self
    }

    /// Sets the back-end version.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            dialect: String::from("pg"),
            pretty: false,
            indentation: 2,
            version: None,
        }
    }
}

/// The shared state of a dialect context: options, features, and the
/// formatting tokens precomputed from them.
#[derive(Debug, Clone)]
pub struct ContextBase {
    /// Canonical dialect name.
    pub dialect: &'static str,
    /// Pretty-print flag.
    pub pretty: bool,
    /// Indentation width.
    pub indentation: usize,
    /// Parsed back-end version.
    pub version: Version,
    /// The dialect feature record.
    pub features: Features,
    space: String,
    comma: String,
    indent: String,
    quote_open: char,
    quote_close: char,
    quote_check: Regex,
}

impl ContextBase {
    /// Creates the base state for a dialect, parsing the requested version
    /// (or falling back to `default_version`) and deriving the feature
    /// record through `features_for`.
    ///
    /// # Errors
    ///
    /// Fails when the version string does not parse.
    pub fn new(
        dialect: &'static str,
        options: &ContextOptions,
        default_version: Version,
        features_for: fn(Version) -> Features,
    ) -> Result<Self> {
        let version = match &options.version {
            Some(text) => Version::parse(text)?,
            None => default_version,
        };
        let features = features_for(version);
        let (quote_open, quote_close) = features.quote_style.tokens();
        let mut base = Self {
            dialect,
            pretty: options.pretty,
            indentation: options.indentation,
            version,
            features,
            space: String::new(),
            comma: String::new(),
            indent: String::new(),
            quote_open,
            quote_close,
            quote_check: quote_check_pattern(quote_close),
        };
        base.update();
        Ok(base)
    }

    /// Recomputes the derived tokens. Must be called after mutating
    /// [`ContextBase::features`], the pretty flag, or the indentation.
    pub fn update(&mut self) {
        (self.quote_open, self.quote_close) = self.features.quote_style.tokens();
        self.quote_check = quote_check_pattern(self.quote_close);
        if self.pretty {
            self.indent = " ".repeat(self.indentation);
            self.space = String::from("\n");
            self.comma = format!(",\n{}", self.indent);
        } else {
            self.indent = String::new();
            self.space = String::from(" ");
            self.comma = String::from(", ");
        }
    }

    /// The separator between statement clauses.
    #[must_use]
    pub fn sep(&self) -> &str {
        &self.space
    }

    /// The separator between list items.
    #[must_use]
    pub fn comma(&self) -> &str {
        &self.comma
    }

    /// Re-indents a nested block by one level.
    #[must_use]
    pub fn indent_block(&self, sql: &str) -> String {
        if self.indent.is_empty() {
            String::from(sql)
        } else {
            sql.replace('\n', &format!("\n{}", self.indent))
        }
    }
}

fn quote_check_pattern(quote_close: char) -> Regex {
    let pattern = format!("[{}\\x00]", regex::escape(&quote_close.to_string()));
    Regex::new(&pattern).expect("quote-check pattern is statically well-formed")
}

static INTEGER_STRING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+$").expect("integer pattern is statically well-formed"));

static NUMBER_STRING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?\d+(\.\d+)?([eE][+-]?\d+)?$").expect("number pattern is statically well-formed")
});

fn parse_boolean_token(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "0" | "f" | "false" | "n" | "no" | "off" => Some(false),
        "1" | "t" | "true" | "y" | "yes" | "on" => Some(true),
        _ => None,
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02X}")).collect()
}

/// A dialect compiler.
///
/// The default method bodies implement the behavior the dialects share;
/// each dialect overrides its genuine differences. All escaping returns
/// owned SQL fragments; failures unwind with [`Error`] and produce no
/// partial output.
pub trait Context {
    /// The shared state of this context.
    fn base(&self) -> &ContextBase;

    /// Upcasts to a trait object for recursion through node compilation.
    fn as_context(&self) -> &dyn Context;

    /// Compiles a node as a full statement, with a trailing `;`.
    ///
    /// # Errors
    ///
    /// Propagates any escaping or structural error found while walking the
    /// tree.
    fn compile(&self, node: &Node) -> Result<String> {
        tracing::trace!(
            dialect = self.base().dialect,
            kind = node.kind(),
            "compiling statement"
        );
        node.compile_query(self.as_context())
    }

    /// Escapes an identifier path.
    ///
    /// Each part may itself contain `.` separators; empty segments are
    /// skipped, `*` passes through unquoted, embedded quote characters are
    /// doubled, and a fully empty input produces an empty quoted
    /// identifier.
    ///
    /// # Errors
    ///
    /// Fails with a [`Error::Compile`] when a segment contains a NUL.
    fn escape_identifier(&self, parts: &[&str]) -> Result<String> {
        let base = self.base();
        let mut out = String::new();
        for part in parts {
            for piece in part.split('.') {
                if piece.is_empty() {
                    continue;
                }
                if !out.is_empty() {
                    out.push('.');
                }
                if piece == "*" {
                    out.push('*');
                    continue;
                }
                out.push(base.quote_open);
                if base.quote_check.is_match(piece) {
                    if piece.contains('\0') {
                        return Err(Error::compile("identifier contains a NUL character"));
                    }
                    for ch in piece.chars() {
                        out.push(ch);
                        if ch == base.quote_close {
                            out.push(ch);
                        }
                    }
                } else {
                    out.push_str(piece);
                }
                out.push(base.quote_close);
            }
        }
        if out.is_empty() {
            out.push(base.quote_open);
            out.push(base.quote_close);
        }
        Ok(out)
    }

    /// Escapes a term under the implicit deduction rules.
    ///
    /// # Errors
    ///
    /// Propagates escaping failures from the dispatched path.
    fn escape_value(&self, term: &Term) -> Result<String> {
        match term {
            Term::Scalar(Literal::Null) => Ok(String::from("NULL")),
            Term::Scalar(Literal::Bool(b)) => Ok(String::from(self.boolean_literal(*b))),
            Term::Scalar(Literal::Int(i)) => Ok(i.to_string()),
            Term::Scalar(Literal::Float(f)) => self.escape_number(*f),
            Term::Scalar(Literal::Text(s)) => self.escape_string(s),
            Term::Node(node) => compile_operand(self.as_context(), node),
            Term::Blob(bytes) => Ok(self.escape_buffer(bytes)),
            Term::List(items) => self.escape_array(items, false),
            Term::Map(_) | Term::Json(_) => self.escape_json(&term.to_json()?),
        }
    }

    /// Escapes a possibly-absent term under an explicit logical type.
    ///
    /// Absent data renders as `NULL` on every path; an explicit SQL NULL
    /// differs from absence only under the `json` type, where it becomes
    /// the JSON `null` document.
    ///
    /// # Errors
    ///
    /// Fails with a [`Error::Value`] when the data cannot be represented
    /// under the requested type.
    #[allow(clippy::too_many_lines)]
    fn escape_typed(&self, data: Option<&Term>, explicit: Option<ExplicitType>) -> Result<String> {
        let Some(ty) = explicit else {
            return match data {
                None => Ok(String::from("NULL")),
                Some(term) => self.escape_value(term),
            };
        };

        if ty == ExplicitType::Json {
            return match data {
                None => Ok(String::from("NULL")),
                Some(term) => self.escape_json(&term.to_json()?),
            };
        }

        let Some(term) = data else {
            return Ok(String::from("NULL"));
        };
        if term.is_null() {
            return Ok(String::from("NULL"));
        }

        match ty {
            ExplicitType::Boolean => match term {
                Term::Scalar(Literal::Bool(b)) => Ok(String::from(self.boolean_literal(*b))),
                Term::Scalar(Literal::Int(0)) => Ok(String::from(self.boolean_literal(false))),
                Term::Scalar(Literal::Int(1)) => Ok(String::from(self.boolean_literal(true))),
                Term::Scalar(Literal::Float(f)) if *f == 0.0 => {
                    Ok(String::from(self.boolean_literal(false)))
                }
                Term::Scalar(Literal::Float(f)) if *f == 1.0 => {
                    Ok(String::from(self.boolean_literal(true)))
                }
                Term::Scalar(Literal::Text(s)) => parse_boolean_token(s)
                    .map(|b| String::from(self.boolean_literal(b)))
                    .ok_or_else(|| Error::value(format!("'{s}' is not a boolean"))),
                _ => Err(Error::value("the value is not a boolean")),
            },
            ExplicitType::Integer => match term {
                Term::Scalar(Literal::Int(i)) => Ok(i.to_string()),
                Term::Scalar(Literal::Float(f)) => {
                    if f.is_finite() && f.fract() == 0.0 {
                        let exact = *f as i64;
                        Ok(exact.to_string())
                    } else {
                        Err(Error::value(format!("{f} is not an exact integer")))
                    }
                }
                Term::Scalar(Literal::Text(s)) if INTEGER_STRING.is_match(s) => Ok(s.clone()),
                Term::Scalar(Literal::Text(s)) => {
                    Err(Error::value(format!("'{s}' is not an integer")))
                }
                _ => Err(Error::value("the value is not an integer")),
            },
            ExplicitType::Number => match term {
                Term::Scalar(Literal::Int(i)) => Ok(i.to_string()),
                Term::Scalar(Literal::Float(f)) => self.escape_number(*f),
                Term::Scalar(Literal::Text(s)) => match s.as_str() {
                    "NaN" => self.escape_number(f64::NAN),
                    "Infinity" => self.escape_number(f64::INFINITY),
                    "-Infinity" => self.escape_number(f64::NEG_INFINITY),
                    _ if NUMBER_STRING.is_match(s) => Ok(s.clone()),
                    _ => Err(Error::value(format!("'{s}' is not a number"))),
                },
                _ => Err(Error::value("the value is not a number")),
            },
            ExplicitType::String => match term {
                Term::Scalar(Literal::Text(s)) => self.escape_string(s),
                Term::Scalar(Literal::Int(i)) => self.escape_string(&i.to_string()),
                Term::Scalar(Literal::Float(f)) => self.escape_string(&f.to_string()),
                Term::Scalar(Literal::Bool(b)) => {
                    self.escape_string(if *b { "true" } else { "false" })
                }
                Term::List(_) | Term::Map(_) | Term::Json(_) => {
                    self.escape_json(&term.to_json()?)
                }
                _ => Err(Error::value("the value cannot be rendered as a string")),
            },
            ExplicitType::Array => match term {
                Term::List(items) => self.escape_array(items, false),
                _ => Err(Error::value("the value is not an array")),
            },
            ExplicitType::Values => match term {
                Term::List(items) => self.escape_values(items),
                _ => Err(Error::value("the value is not a sequence")),
            },
            ExplicitType::Raw => match term {
                Term::Scalar(Literal::Text(s)) => Ok(s.clone()),
                Term::Scalar(Literal::Int(i)) => Ok(i.to_string()),
                Term::Scalar(Literal::Float(f)) => Ok(f.to_string()),
                _ => Err(Error::value("a raw value must be a string or a number")),
            },
            ExplicitType::Json => unreachable!("handled above"),
        }
    }

    /// Escapes a string literal. The shared body doubles single quotes;
    /// every shipped dialect overrides this with its own escape table.
    ///
    /// # Errors
    ///
    /// Dialect overrides may reject strings they cannot represent.
    fn escape_string(&self, text: &str) -> Result<String> {
        Ok(format!("'{}'", text.replace('\'', "''")))
    }

    /// Escapes a number. Finite values stringify; NaN and the infinities
    /// become quoted tokens where the dialect supports them.
    ///
    /// # Errors
    ///
    /// Fails with a [`Error::Value`] for special values on a dialect
    /// without `special_numbers`.
    fn escape_number(&self, value: f64) -> Result<String> {
        if value.is_finite() {
            return Ok(value.to_string());
        }
        if !self.base().features.special_numbers {
            let token = if value.is_nan() { "NaN" } else { "Infinity" };
            return Err(Error::value(format!(
                "{token} cannot be represented by the {} dialect",
                self.base().dialect
            )));
        }
        Ok(String::from(if value.is_nan() {
            "'NaN'"
        } else if value.is_sign_positive() {
            "'Infinity'"
        } else {
            "'-Infinity'"
        }))
    }

    /// Escapes a binary buffer as a blob literal.
    fn escape_buffer(&self, bytes: &[u8]) -> String {
        format!("x'{}'", hex_encode(bytes))
    }

    /// Escapes an ordered sequence. Without native arrays the sequence is
    /// JSON-encoded and string-escaped; PostgreSQL overrides this with
    /// `ARRAY[...]` literals.
    ///
    /// # Errors
    ///
    /// Propagates element escaping failures.
    fn escape_array(&self, items: &[Term], _nested: bool) -> Result<String> {
        let elements = items
            .iter()
            .map(Term::to_json)
            .collect::<Result<Vec<_>>>()?;
        self.escape_json(&serde_json::Value::Array(elements))
    }

    /// Renders a sequence as a parenthesized `(v1, v2, ...)` list.
    ///
    /// # Errors
    ///
    /// Propagates element escaping failures.
    fn escape_values(&self, items: &[Term]) -> Result<String> {
        let mut parts = Vec::with_capacity(items.len());
        for item in items {
            let part = match item {
                Term::List(inner) => self.escape_array(inner, false)?,
                other => self.escape_value(other)?,
            };
            parts.push(part);
        }
        Ok(format!("({})", parts.join(", ")))
    }

    /// JSON-encodes a document and escapes it as a string literal.
    ///
    /// # Errors
    ///
    /// Propagates string escaping failures.
    fn escape_json(&self, value: &serde_json::Value) -> Result<String> {
        self.escape_string(&value.to_string())
    }

    /// Substitutes `?`/`$N` markers in a template, skipping quoted regions.
    ///
    /// # Errors
    ///
    /// Fails with a [`Error::Compile`] on mixed marker styles or an
    /// out-of-range binding index.
    fn substitute(&self, template: &str, bindings: &[Term]) -> Result<String> {
        substitute::substitute(self.as_context(), template, bindings)
    }

    /// The dialect's boolean literal.
    fn boolean_literal(&self, value: bool) -> &'static str {
        if self.base().features.native_boolean {
            if value {
                "TRUE"
            } else {
                "FALSE"
            }
        } else if value {
            "1"
        } else {
            "0"
        }
    }

    /// Renders the OFFSET/LIMIT suffix of a statement.
    fn compile_offset_limit(&self, offset: Option<u64>, limit: Option<u64>) -> Option<String> {
        match (offset, limit) {
            (None, None) => None,
            (Some(o), None) => Some(format!("OFFSET {o}")),
            (None, Some(l)) => Some(format!("LIMIT {l}")),
            (Some(o), Some(l)) => Some(format!("OFFSET {o} LIMIT {l}")),
        }
    }

    /// Parenthesizes a nested statement, indenting it in pretty mode.
    fn wrap_subquery(&self, sql: &str) -> String {
        format!("({})", self.base().indent_block(sql))
    }
}

/// A dialect factory registered under one or more names.
pub type ContextFactory = fn(&ContextOptions) -> Result<Box<dyn Context>>;

static DIALECTS: Lazy<RwLock<HashMap<String, ContextFactory>>> = Lazy::new(|| {
    let mut map: HashMap<String, ContextFactory> = HashMap::new();
    for name in ["pg", "postgres", "postgresql"] {
        map.insert(String::from(name), postgres::factory);
    }
    for name in ["mysql", "mariadb"] {
        map.insert(String::from(name), mysql::factory);
    }
    for name in ["sqlite", "sqlite3"] {
        map.insert(String::from(name), sqlite::factory);
    }
    RwLock::new(map)
});

/// Registers a dialect factory under a name.
pub fn register(name: impl Into<String>, factory: ContextFactory) {
    DIALECTS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(name.into(), factory);
}

/// Returns `true` when a dialect name is registered.
#[must_use]
pub fn has(name: &str) -> bool {
    DIALECTS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .contains_key(name)
}

/// Creates a dialect context from options.
///
/// # Errors
///
/// Fails with a [`Error::Compile`] for an unregistered dialect or an
/// unparseable version string.
pub fn new_context(options: &ContextOptions) -> Result<Box<dyn Context>> {
    let factory = DIALECTS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(options.dialect.as_str())
        .copied()
        .ok_or_else(|| Error::compile(format!("unknown dialect '{}'", options.dialect)))?;
    let ctx = factory(options)?;
    tracing::debug!(
        dialect = ctx.base().dialect,
        pretty = ctx.base().pretty,
        "created dialect context"
    );
    Ok(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse() {
        assert_eq!(Version::parse("9.6.2").unwrap(), Version::new(9, 6, 2));
        assert_eq!(Version::parse("14").unwrap(), Version::new(14, 0, 0));
        assert_eq!(Version::parse("3.30").unwrap(), Version::new(3, 30, 0));
        assert!(Version::parse("three").is_err());
    }

    #[test]
    fn test_version_at_least() {
        assert!(Version::new(3, 35, 0).at_least(3, 30));
        assert!(Version::new(4, 0, 0).at_least(3, 30));
        assert!(!Version::new(3, 24, 0).at_least(3, 30));
    }

    #[test]
    fn test_registry_has() {
        assert!(has("pg"));
        assert!(has("postgresql"));
        assert!(has("mariadb"));
        assert!(has("sqlite3"));
        assert!(!has("oracle"));
    }

    #[test]
    fn test_new_context_unknown_dialect() {
        let result = new_context(&ContextOptions::new("oracle"));
        assert!(matches!(result, Err(Error::Compile(_))));
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: ContextOptions =
            serde_json::from_str(r#"{"dialect":"mysql","pretty":true}"#).unwrap();
        assert_eq!(options.dialect, "mysql");
        assert!(options.pretty);
        assert_eq!(options.indentation, 2);
        assert!(options.version.is_none());
    }

    fn warehouse_factory(options: &ContextOptions) -> Result<Box<dyn Context>> {
        Ok(Box::new(PostgresContext::new(options)?))
    }

    #[test]
    fn test_register_custom_dialect() {
        register("warehouse", warehouse_factory);
        assert!(has("warehouse"));
        let ctx = new_context(&ContextOptions::new("warehouse")).unwrap();
        assert_eq!(ctx.base().dialect, "pg");
    }

    #[test]
    fn test_sqlite_version_gates() {
        let old = Features::sqlite(Version::new(3, 24, 0));
        assert!(!old.nulls_first_last);
        assert!(!old.returning);

        let new = Features::sqlite(Version::new(3, 35, 0));
        assert!(new.nulls_first_last);
        assert!(new.returning);
    }
}
