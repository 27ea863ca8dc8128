//! CASE/WHEN expression nodes.

use crate::dialect::Context;
use crate::error::{Error, Result};
use crate::node::append_alias;
use crate::term::Term;

/// One `WHEN predicate THEN body` arm.
#[derive(Debug, Clone, PartialEq)]
pub struct When {
    /// The predicate expression.
    pub condition: Term,
    /// The result expression.
    pub body: Term,
}

/// A searched CASE expression: a list of WHEN arms plus an optional ELSE.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    /// The WHEN arms, in order.
    pub whens: Vec<When>,
    /// The optional ELSE body.
    pub else_body: Option<Term>,
    /// Optional `AS` alias.
    pub alias: Option<String>,
}

impl Case {
    /// Creates an empty CASE expression.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            whens: Vec::new(),
            else_body: None,
            alias: None,
        }
    }

    /// Appends a `WHEN condition THEN body` arm.
    #[must_use]
    pub fn when(mut self, condition: impl Into<Term>, body: impl Into<Term>) -> Self {
        self.whens.push(When {
            condition: condition.into(),
            body: body.into(),
        });
        self
    }

    /// Sets the ELSE body.
    #[must_use]
    pub fn otherwise(mut self, body: impl Into<Term>) -> Self {
        self.else_body = Some(body.into());
        self
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
        if self.whens.is_empty() {
            return Err(Error::compile("CASE requires at least one WHEN arm"));
        }
        let mut out = String::from("CASE");
        for arm in &self.whens {
            out.push_str(" WHEN ");
            out.push_str(&ctx.escape_value(&arm.condition)?);
            out.push_str(" THEN ");
            out.push_str(&ctx.escape_value(&arm.body)?);
        }
        if let Some(body) = &self.else_body {
            out.push_str(" ELSE ");
            out.push_str(&ctx.escape_value(body)?);
        }
        out.push_str(" END");
        append_alias(ctx, out, self.alias.as_deref())
    }
}

impl Default for Case {
    fn default() -> Self {
        Self::new()
    }
}
