//! AND/OR grouping and the implicit-equality condition map.

use crate::dialect::Context;
use crate::error::Result;
use crate::node::Node;
use crate::term::Term;

/// The joining operator of a [`Logical`] group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalKind {
    /// All sub-expressions must hold.
    And,
    /// At least one sub-expression must hold.
    Or,
}

impl LogicalKind {
    /// Returns the SQL token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// An ordered list of boolean sub-expressions joined by `AND` or `OR`.
///
/// Compiled as a sub-expression the group parenthesizes itself when it has
/// more than one child; at the root of a WHERE/HAVING clause it does not.
#[derive(Debug, Clone, PartialEq)]
pub struct Logical {
    /// The joining operator.
    pub op: LogicalKind,
    /// The sub-expressions, in insertion order.
    pub exprs: Vec<Term>,
}

impl Logical {
    /// Creates a group with the given operator and children.
    #[must_use]
    pub fn new(op: LogicalKind, exprs: Vec<Term>) -> Self {
        Self { op, exprs }
    }

    /// Appends a sub-expression.
    #[must_use]
    pub fn add(mut self, expr: impl Into<Term>) -> Self {
        self.exprs.push(expr.into());
        self
    }

    /// Appends a sub-expression in place. Used by the WHERE/HAVING adders.
    pub(crate) fn push(&mut self, expr: Term) {
        self.exprs.push(expr);
    }

    /// Compiles the children joined by the operator, without outer
    /// parentheses. This is the form WHERE/HAVING emit.
    pub(crate) fn compile_inner(&self, ctx: &dyn Context) -> Result<String> {
        let sep = format!(" {} ", self.op.as_str());
        let parts: Vec<String> = self
            .exprs
            .iter()
            .map(|e| ctx.escape_value(e))
            .collect::<Result<_>>()?;
        Ok(parts.join(&sep))
    }

    /// Compiles this node to a SQL fragment.
    ///
    /// # Errors
    ///
    /// Propagates any escaping or structural error found while compiling.
    pub fn compile_node(&self, ctx: &dyn Context) -> Result<String> {
        let inner = self.compile_inner(ctx)?;
        if self.exprs.len() > 1 {
            Ok(format!("({inner})"))
        } else {
            Ok(inner)
        }
    }
}

/// A key-to-value dictionary meaning an implicit AND of equalities.
///
/// A NULL value compiles as `IS NULL`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionMap {
    /// Column/value pairs in insertion order.
    pub entries: Vec<(String, Term)>,
}

impl ConditionMap {
    /// Creates an empty condition map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a condition map from pairs.
    #[must_use]
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (impl Into<String>, impl Into<Term>)>,
    ) -> Self {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Adds a column/value pair.
    #[must_use]
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Term>) -> Self {
        self.entries.push((column.into(), value.into()));
        self
    }

    /// Compiles this node to a SQL fragment.
    ///
    /// # Errors
    ///
    /// Propagates any escaping or structural error found while compiling.
    pub fn compile_node(&self, ctx: &dyn Context) -> Result<String> {
        let mut parts = Vec::with_capacity(self.entries.len());
        for (column, value) in &self.entries {
            let key = ctx.escape_identifier(&[column.as_str()])?;
            let part = if value.is_null() {
                format!("{key} IS NULL")
            } else {
                format!("{key} = {}", ctx.escape_value(value)?)
            };
            parts.push(part);
        }
        Ok(parts.join(" AND "))
    }
}

impl Default for ConditionMap {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ConditionMap> for Node {
    fn from(map: ConditionMap) -> Self {
        Self::ConditionMap(map)
    }
}

impl From<Logical> for Node {
    fn from(logical: Logical) -> Self {
        Self::Logical(logical)
    }
}

impl From<ConditionMap> for Term {
    fn from(map: ConditionMap) -> Self {
        Self::Node(Box::new(Node::ConditionMap(map)))
    }
}

impl From<Logical> for Term {
    fn from(logical: Logical) -> Self {
        Self::Node(Box::new(Node::Logical(logical)))
    }
}
