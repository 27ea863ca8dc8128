//! JOIN nodes and source-expression compilation.

use crate::dialect::Context;
use crate::error::{Error, Result};
use crate::node::{compile_operand, Node};
use crate::term::{Literal, Term};

/// The join flavor. An unset kind renders as `CROSS JOIN`, which is how the
/// multi-table FROM form chains its sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinKind {
    /// Implicit join (rendered as CROSS JOIN).
    #[default]
    Unset,
    /// CROSS JOIN.
    Cross,
    /// INNER JOIN.
    Inner,
    /// LEFT JOIN.
    Left,
    /// RIGHT JOIN.
    Right,
    /// FULL JOIN.
    Full,
}

impl JoinKind {
    /// Returns the SQL join keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unset | Self::Cross => "CROSS JOIN",
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
        }
    }
}

/// The join condition: either a USING column list or an ON expression.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinCondition {
    /// `USING (col, ...)`.
    Using(Vec<String>),
    /// `ON expr`.
    On(Box<Node>),
}

impl From<Node> for JoinCondition {
    fn from(node: Node) -> Self {
        Self::On(Box::new(node))
    }
}

impl From<Vec<String>> for JoinCondition {
    fn from(columns: Vec<String>) -> Self {
        Self::Using(columns)
    }
}

impl From<Vec<&str>> for JoinCondition {
    fn from(columns: Vec<&str>) -> Self {
        Self::Using(columns.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for JoinCondition {
    fn from(columns: [&str; N]) -> Self {
        Self::Using(columns.iter().map(|c| String::from(*c)).collect())
    }
}

/// A join between two source expressions. The left side may itself be a
/// Join, forming a left-leaning chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// Left source (table, sub-query, or nested join).
    pub left: Term,
    /// Join flavor.
    pub kind: JoinKind,
    /// Right source.
    pub right: Term,
    /// USING columns or ON expression; `None` for cross joins.
    pub condition: Option<JoinCondition>,
}

impl Join {
    /// Creates a join node.
    #[must_use]
    pub fn new(
        left: impl Into<Term>,
        kind: JoinKind,
        right: impl Into<Term>,
        condition: Option<JoinCondition>,
    ) -> Self {
        Self {
            left: left.into(),
            kind,
            right: right.into(),
            condition,
        }
    }

    /// Compiles this node to a SQL fragment.
    ///
    /// # Errors
    ///
    /// Propagates any escaping or structural error found while compiling.
    pub fn compile_node(&self, ctx: &dyn Context) -> Result<String> {
        let left = compile_source(ctx, &self.left)?;
        let right = compile_source(ctx, &self.right)?;
        let mut sql = format!("{left} {} {right}", self.kind.as_str());

        match &self.condition {
            None => {}
            Some(JoinCondition::Using(columns)) => {
                let parts: Vec<String> = columns
                    .iter()
                    .map(|c| ctx.escape_identifier(&[c.as_str()]))
                    .collect::<Result<_>>()?;
                sql.push_str(" USING (");
                sql.push_str(&parts.join(", "));
                sql.push(')');
            }
            Some(JoinCondition::On(node)) => {
                sql.push_str(" ON ");
                sql.push_str(&node.compile_node(ctx)?);
            }
        }
        Ok(sql)
    }
}

/// Compiles a FROM/USING source expression: bare strings are identifiers,
/// statements are parenthesized sub-queries, joins recurse.
pub(crate) fn compile_source(ctx: &dyn Context, term: &Term) -> Result<String> {
    match term {
        Term::Scalar(Literal::Text(name)) => ctx.escape_identifier(&[name.as_str()]),
        Term::Node(node) => compile_operand(ctx, node),
        Term::List(items) => {
            let parts: Vec<String> = items
                .iter()
                .map(|t| compile_source(ctx, t))
                .collect::<Result<_>>()?;
            Ok(parts.join(", "))
        }
        _ => Err(Error::compile("a query source must be a table name, a sub-query, or a join")),
    }
}
