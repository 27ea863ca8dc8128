//! Value wrapper nodes and explicit logical types.

use crate::dialect::Context;
use crate::error::{Error, Result};
use crate::node::append_alias;
use crate::term::Term;

/// The explicit logical type attached to a [`Value`] to force a particular
/// escaping path when the raw data would be ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplicitType {
    /// TRUE/FALSE (or 1/0 where booleans are not native).
    Boolean,
    /// An exact integer.
    Integer,
    /// Any finite number, plus special float tokens where supported.
    Number,
    /// A string literal.
    String,
    /// An array (native or JSON-encoded depending on dialect).
    Array,
    /// A parenthesized `(v1, v2, ...)` sequence.
    Values,
    /// A JSON document, serialized then string-escaped.
    Json,
    /// Emitted unchanged. Trust boundary.
    Raw,
}

impl ExplicitType {
    /// Parses an explicit type tag.
    ///
    /// # Errors
    ///
    /// Fails with a [`Error::Value`] on an unknown tag.
    pub fn parse(tag: &str) -> Result<Self> {
        match tag {
            "boolean" => Ok(Self::Boolean),
            "integer" => Ok(Self::Integer),
            "number" => Ok(Self::Number),
            "string" => Ok(Self::String),
            "array" => Ok(Self::Array),
            "values" => Ok(Self::Values),
            "json" => Ok(Self::Json),
            "raw" => Ok(Self::Raw),
            _ => Err(Error::value(format!("unknown explicit type '{tag}'"))),
        }
    }

    /// Returns the tag string for this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Values => "values",
            Self::Json => "json",
            Self::Raw => "raw",
        }
    }
}

/// A wrapped literal.
///
/// `data` distinguishes an absent value (`None`) from an explicit SQL NULL
/// (`Some(Term::Scalar(Literal::Null))`); the two differ only on the `json`
/// escaping path.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    /// Explicit logical type, if any.
    pub explicit: Option<ExplicitType>,
    /// The wrapped payload; `None` means "absent".
    pub data: Option<Term>,
    /// Optional `AS` alias.
    pub alias: Option<String>,
}

impl Value {
    /// Creates an untyped (primitive) value.
    #[must_use]
    pub fn new(data: impl Into<Term>) -> Self {
        Self {
            explicit: None,
            data: Some(data.into()),
            alias: None,
        }
    }

    /// Creates a value with an explicit logical type.
    #[must_use]
    pub fn typed(explicit: ExplicitType, data: Option<Term>) -> Self {
        Self {
            explicit: Some(explicit),
            data,
            alias: None,
        }
    }

    /// Creates an absent value with no explicit type.
    #[must_use]
    pub const fn undefined() -> Self {
        Self {
            explicit: None,
            data: None,
            alias: None,
        }
    }

    /// Sets the `AS` alias.
    #[must_use]
    pub fn alias(mut self, name: impl Into<String>) -> Self {
        self.alias = Some(name.into());
        self
    }

    /// Compiles this node to a SQL fragment.
    ///
    /// # Errors
    ///
    /// Propagates any escaping or structural error found while compiling.
    pub fn compile_node(&self, ctx: &dyn Context) -> Result<String> {
        let sql = ctx.escape_typed(self.data.as_ref(), self.explicit)?;
        append_alias(ctx, sql, self.alias.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_type_parse() {
        assert_eq!(ExplicitType::parse("json").unwrap(), ExplicitType::Json);
        assert_eq!(ExplicitType::parse("raw").unwrap(), ExplicitType::Raw);
        assert!(ExplicitType::parse("decimal").is_err());
    }

    #[test]
    fn test_undefined_vs_null() {
        let undefined = Value::undefined();
        assert!(undefined.data.is_none());

        let null = Value::new(crate::term::Literal::Null);
        assert!(null.data.as_ref().is_some_and(Term::is_null));
    }
}
