//! Scalar and aggregate function call nodes.

use crate::dialect::Context;
use crate::error::{Error, Result};
use crate::node::{append_alias, NodeFlags};
use crate::registry::{self, OpFlags};
use crate::term::Term;

/// A function call: operator name, argument list, and `ALL`/`DISTINCT`
/// flags (meaningful for aggregates only).
///
/// The name is resolved through the operator/function registry, which
/// supplies the canonical spelling, arity bounds, and any dialect-specific
/// compiler. Unregistered names render as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct Func {
    /// Function name as given (canonicalized through the registry).
    pub name: String,
    /// Arguments in call order.
    pub args: Vec<Term>,
    /// `ALL`/`DISTINCT` quantifier flags.
    pub flags: NodeFlags,
    /// Optional `AS` alias.
    pub alias: Option<String>,
}

impl Func {
    /// Creates a function call with no arguments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: vec![],
            flags: NodeFlags::empty(),
            alias: None,
        }
    }

    /// Creates a function call from an argument sequence.
    #[must_use]
    pub fn with_args(
        name: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<Term>>,
    ) -> Self {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
            flags: NodeFlags::empty(),
            alias: None,
        }
    }

    /// Appends one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<Term>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Sets the `DISTINCT` quantifier (clears `ALL`).
    #[must_use]
    pub fn distinct(mut self) -> Self {
        self.flags.remove(NodeFlags::ALL);
        self.flags.insert(NodeFlags::DISTINCT);
        self
    }

    /// Sets the `ALL` quantifier (clears `DISTINCT`).
    #[must_use]
    pub fn all(mut self) -> Self {
        self.flags.remove(NodeFlags::DISTINCT);
        self.flags.insert(NodeFlags::ALL);
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
        let info = registry::lookup(&self.name).filter(|i| i.flags.contains(OpFlags::FUNCTION));

        let sql = if let Some(info) = info {
            if self.args.len() < info.min_args || self.args.len() > info.max_args {
                return Err(Error::compile(format!(
                    "{} takes {} argument(s), got {}",
                    info.name,
                    info.arity_label(),
                    self.args.len()
                )));
            }
            if let Some(compiler) = info.compile {
                compiler(ctx, self)?
            } else {
                self.compile_default(ctx, &info.name)?
            }
        } else {
            self.compile_default(ctx, &self.name)?
        };

        append_alias(ctx, sql, self.alias.as_deref())
    }

    /// `NAME([DISTINCT|ALL ]arg, arg, ...)`.
    pub(crate) fn compile_default(&self, ctx: &dyn Context, name: &str) -> Result<String> {
        let mut out = String::from(name);
        out.push('(');
        if self.flags.contains(NodeFlags::DISTINCT) {
            out.push_str("DISTINCT ");
        } else if self.flags.contains(NodeFlags::ALL) {
            out.push_str("ALL ");
        }
        out.push_str(&self.compile_args(ctx)?.join(", "));
        out.push(')');
        Ok(out)
    }

    pub(crate) fn compile_args(&self, ctx: &dyn Context) -> Result<Vec<String>> {
        self.args.iter().map(|a| ctx.escape_value(a)).collect()
    }
}
