//! The expression node model.
//!
//! Every vertex of a query tree is one of the variants of [`Node`], a closed
//! algebraic set. Construction goes through the factory functions in
//! [`crate::builder`]; compilation walks the tree against a dialect
//! [`Context`](crate::dialect::Context).

mod case;
mod func;
mod ident;
mod join;
mod logical;
mod ops;
mod raw;
mod sort;
mod value;

pub use case::{Case, When};
pub use func::Func;
pub use ident::Identifier;
pub use join::{Join, JoinCondition, JoinKind};
pub use logical::{ConditionMap, Logical, LogicalKind};
pub use ops::{BinaryOp, UnaryOp};
pub use raw::Raw;
pub use sort::Sort;
pub use value::{ExplicitType, Value};

pub(crate) use join::compile_source;

use bitflags::bitflags;

use crate::builder::{CompoundQuery, DeleteQuery, InsertQuery, SelectQuery, UpdateQuery};
use crate::dialect::Context;
use crate::error::Result;
use crate::term::{Literal, Term};

bitflags! {
    /// Set-quantifier flags shared by functions, SELECTs and compounds.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NodeFlags: u8 {
        /// The `ALL` quantifier.
        const ALL = 0b01;
        /// The `DISTINCT` quantifier.
        const DISTINCT = 0b10;
    }
}

/// A vertex in the expression/query tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A prebuilt SQL fragment with optional bindings.
    Raw(Raw),
    /// A (possibly dotted) identifier.
    Identifier(Identifier),
    /// A wrapped literal with an optional explicit type.
    Value(Value),
    /// A prefix operator over one child.
    Unary(UnaryOp),
    /// A two-child operator node.
    Binary(BinaryOp),
    /// An AND/OR grouping.
    Logical(Logical),
    /// An implicit AND-of-equalities map.
    ConditionMap(ConditionMap),
    /// A scalar or aggregate function call.
    Func(Func),
    /// A CASE/WHEN expression.
    Case(Case),
    /// An ORDER BY sort key.
    Sort(Sort),
    /// A JOIN between two sources.
    Join(Box<Join>),
    /// A SELECT statement.
    Select(Box<SelectQuery>),
    /// An INSERT statement.
    Insert(Box<InsertQuery>),
    /// An UPDATE statement.
    Update(Box<UpdateQuery>),
    /// A DELETE statement.
    Delete(Box<DeleteQuery>),
    /// A UNION/INTERSECT/EXCEPT of queries.
    Compound(Box<CompoundQuery>),
}

impl Node {
    /// Returns the discriminating kind token of this node.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Raw(_) => "RAW",
            Self::Identifier(_) => "IDENTIFIER",
            Self::Value(_) => "VALUE",
            Self::Unary(n) => &n.op,
            Self::Binary(n) => &n.op,
            Self::Logical(n) => n.op.as_str(),
            Self::ConditionMap(_) => "CONDITION",
            Self::Func(n) => &n.name,
            Self::Case(_) => "CASE",
            Self::Sort(_) => "SORT",
            Self::Join(_) => "JOIN",
            Self::Select(_) => "SELECT",
            Self::Insert(_) => "INSERT",
            Self::Update(_) => "UPDATE",
            Self::Delete(_) => "DELETE",
            Self::Compound(n) => n.op.as_str(),
        }
    }

    /// Returns the alias of this node, if the variant carries one.
    #[must_use]
    pub fn alias_ref(&self) -> Option<&str> {
        match self {
            Self::Raw(n) => n.alias.as_deref(),
            Self::Identifier(n) => n.alias.as_deref(),
            Self::Value(n) => n.alias.as_deref(),
            Self::Unary(n) => n.alias.as_deref(),
            Self::Binary(n) => n.alias.as_deref(),
            Self::Func(n) => n.alias.as_deref(),
            Self::Case(n) => n.alias.as_deref(),
            Self::Select(n) => n.alias.as_deref(),
            Self::Insert(n) => n.alias.as_deref(),
            Self::Update(n) => n.alias.as_deref(),
            Self::Delete(n) => n.alias.as_deref(),
            Self::Compound(n) => n.alias.as_deref(),
            Self::Logical(_) | Self::ConditionMap(_) | Self::Sort(_) | Self::Join(_) => None,
        }
    }

    /// Sets the `AS` alias on variants that support one.
    #[must_use]
    pub fn alias(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        match &mut self {
            Self::Raw(n) => n.alias = Some(name),
            Self::Identifier(n) => n.alias = Some(name),
            Self::Value(n) => n.alias = Some(name),
            Self::Unary(n) => n.alias = Some(name),
            Self::Binary(n) => n.alias = Some(name),
            Self::Func(n) => n.alias = Some(name),
            Self::Case(n) => n.alias = Some(name),
            Self::Select(n) => n.alias = Some(name),
            Self::Insert(n) => n.alias = Some(name),
            Self::Update(n) => n.alias = Some(name),
            Self::Delete(n) => n.alias = Some(name),
            Self::Compound(n) => n.alias = Some(name),
            Self::Logical(_) | Self::ConditionMap(_) | Self::Sort(_) | Self::Join(_) => {}
        }
        self
    }

    /// Returns `true` for statement-level variants (SELECT/INSERT/UPDATE/
    /// DELETE and compounds), which are parenthesized when nested.
    #[must_use]
    pub const fn is_query(&self) -> bool {
        matches!(
            self,
            Self::Select(_)
                | Self::Insert(_)
                | Self::Update(_)
                | Self::Delete(_)
                | Self::Compound(_)
        )
    }

    /// Compiles this node to a SQL fragment without a trailing `;`.
    ///
    /// # Errors
    ///
    /// Propagates any [`Error`](crate::error::Error) raised while escaping
    /// values or walking the tree.
    pub fn compile_node(&self, ctx: &dyn Context) -> Result<String> {
        match self {
            Self::Raw(n) => n.compile_node(ctx),
            Self::Identifier(n) => n.compile_node(ctx),
            Self::Value(n) => n.compile_node(ctx),
            Self::Unary(n) => n.compile_node(ctx),
            Self::Binary(n) => n.compile_node(ctx),
            Self::Logical(n) => n.compile_node(ctx),
            Self::ConditionMap(n) => n.compile_node(ctx),
            Self::Func(n) => n.compile_node(ctx),
            Self::Case(n) => n.compile_node(ctx),
            Self::Sort(n) => n.compile_node(ctx),
            Self::Join(n) => n.compile_node(ctx),
            Self::Select(n) => n.compile_node(ctx),
            Self::Insert(n) => n.compile_node(ctx),
            Self::Update(n) => n.compile_node(ctx),
            Self::Delete(n) => n.compile_node(ctx),
            Self::Compound(n) => n.compile_node(ctx),
        }
    }

    /// Compiles this node as a full statement, with a trailing `;`.
    ///
    /// # Errors
    ///
    /// Propagates any error raised by [`Node::compile_node`].
    pub fn compile_query(&self, ctx: &dyn Context) -> Result<String> {
        let mut sql = self.compile_node(ctx)?;
        sql.push(';');
        Ok(sql)
    }

    /// Creates an equality comparison with this node on the left.
    #[must_use]
    pub fn eq(self, other: impl Into<Term>) -> Self {
        Self::Binary(BinaryOp::new(self, "=", other))
    }

    /// Creates an inequality comparison.
    #[must_use]
    pub fn ne(self, other: impl Into<Term>) -> Self {
        Self::Binary(BinaryOp::new(self, "<>", other))
    }

    /// Creates a less-than comparison.
    #[must_use]
    pub fn lt(self, other: impl Into<Term>) -> Self {
        Self::Binary(BinaryOp::new(self, "<", other))
    }

    /// Creates a less-than-or-equal comparison.
    #[must_use]
    pub fn le(self, other: impl Into<Term>) -> Self {
        Self::Binary(BinaryOp::new(self, "<=", other))
    }

    /// Creates a greater-than comparison.
    #[must_use]
    pub fn gt(self, other: impl Into<Term>) -> Self {
        Self::Binary(BinaryOp::new(self, ">", other))
    }

    /// Creates a greater-than-or-equal comparison.
    #[must_use]
    pub fn ge(self, other: impl Into<Term>) -> Self {
        Self::Binary(BinaryOp::new(self, ">=", other))
    }

    /// Creates a LIKE pattern match.
    #[must_use]
    pub fn like(self, pattern: impl Into<Term>) -> Self {
        Self::Binary(BinaryOp::new(self, "LIKE", pattern))
    }

    /// Creates an IN membership test over a sequence or sub-query.
    #[must_use]
    pub fn in_list(self, values: impl Into<Term>) -> Self {
        Self::Binary(BinaryOp::new(self, "IN", values))
    }

    /// Creates an IS NULL test.
    #[must_use]
    pub fn is_null(self) -> Self {
        Self::Binary(BinaryOp::new(self, "IS", Literal::Null))
    }

    /// Creates an IS NOT NULL test.
    #[must_use]
    pub fn is_not_null(self) -> Self {
        Self::Binary(BinaryOp::new(self, "IS NOT", Literal::Null))
    }

    /// Negates this node with a prefix NOT.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::Unary(UnaryOp::new("NOT", self))
    }
}

macro_rules! node_conversions {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                fn from(inner: $ty) -> Self {
                    Self::$variant(inner)
                }
            }

            impl From<$ty> for Term {
                fn from(inner: $ty) -> Self {
                    Self::Node(Box::new(Node::$variant(inner)))
                }
            }
        )*
    };
}

node_conversions!(
    Raw(Raw),
    Identifier(Identifier),
    Value(Value),
    Unary(UnaryOp),
    Binary(BinaryOp),
    Func(Func),
    Case(Case),
    Sort(Sort),
);

impl From<Join> for Node {
    fn from(join: Join) -> Self {
        Self::Join(Box::new(join))
    }
}

impl From<Join> for Term {
    fn from(join: Join) -> Self {
        Self::Node(Box::new(Node::Join(Box::new(join))))
    }
}

impl From<&str> for Node {
    fn from(name: &str) -> Self {
        Self::Identifier(Identifier::new(name))
    }
}

impl From<String> for Node {
    fn from(name: String) -> Self {
        Self::Identifier(Identifier::new(name))
    }
}

/// Compiles a node in operand position: statements are parenthesized (and
/// carry their alias outside the parentheses), everything else compiles
/// through its own method.
pub(crate) fn compile_operand(ctx: &dyn Context, node: &Node) -> Result<String> {
    if node.is_query() {
        let wrapped = ctx.wrap_subquery(&node.compile_node(ctx)?);
        append_alias(ctx, wrapped, node.alias_ref())
    } else {
        node.compile_node(ctx)
    }
}

/// Appends ` AS "alias"` when a non-empty alias is present.
pub(crate) fn append_alias(
    ctx: &dyn Context,
    sql: String,
    alias: Option<&str>,
) -> Result<String> {
    match alias {
        Some(a) if !a.is_empty() => Ok(format!("{sql} AS {}", ctx.escape_identifier(&[a])?)),
        _ => Ok(sql),
    }
}
