//! Raw SQL fragments.

use crate::dialect::Context;
use crate::error::Result;
use crate::node::append_alias;
use crate::term::Term;

/// A prebuilt SQL fragment plus an optional bindings sequence.
///
/// The fragment is emitted verbatim; when bindings are present and non-empty
/// they are substituted for `?`/`$N` markers first. This is the trust
/// boundary of the builder: nothing in the fragment is escaped.
#[derive(Debug, Clone, PartialEq)]
pub struct Raw {
    /// The SQL fragment.
    pub fragment: String,
    /// Bindings for `?`/`$N` markers inside the fragment.
    pub bindings: Vec<Term>,
    /// Optional `AS` alias.
    pub alias: Option<String>,
}

impl Raw {
    /// Creates a raw fragment without bindings.
    #[must_use]
    pub fn new(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
            bindings: vec![],
            alias: None,
        }
    }

    /// Creates a raw fragment with bindings.
    #[must_use]
    pub fn with_bindings(fragment: impl Into<String>, bindings: Vec<Term>) -> Self {
        Self {
            fragment: fragment.into(),
            bindings,
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
        let sql = if self.bindings.is_empty() {
            self.fragment.clone()
        } else {
            ctx.substitute(&self.fragment, &self.bindings)?
        };
        append_alias(ctx, sql, self.alias.as_deref())
    }
}
