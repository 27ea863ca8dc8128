//! Identifier nodes.

use crate::dialect::Context;
use crate::error::Result;
use crate::node::append_alias;

/// A single name or a dotted path (e.g. `schema.table.col`).
///
/// Segments are re-split on `.` at escape time, so `Identifier::new("t.c")`
/// and a two-segment path compile identically. The token `*` is never
/// quoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// Path segments, outermost first.
    pub path: Vec<String>,
    /// Optional `AS` alias.
    pub alias: Option<String>,
}

impl Identifier {
    /// Creates an identifier from a single (possibly dotted) name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            path: vec![name.into()],
            alias: None,
        }
    }

    /// Creates an identifier from explicit path segments.
    #[must_use]
    pub fn from_path(path: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            path: path.into_iter().map(Into::into).collect(),
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
        let parts: Vec<&str> = self.path.iter().map(String::as_str).collect();
        let sql = ctx.escape_identifier(&parts)?;
        append_alias(ctx, sql, self.alias.as_deref())
    }
}
