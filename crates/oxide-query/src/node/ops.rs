//! Unary and binary operator nodes.

use crate::dialect::Context;
use crate::error::Result;
use crate::node::{append_alias, Node};
use crate::registry::{self, OpFlags};
use crate::term::Term;

/// A prefix operator (`NOT`, `-`, or an arbitrary keyword) over one child.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOp {
    /// The operator token.
    pub op: String,
    /// The operand.
    pub child: Term,
    /// Optional `AS` alias.
    pub alias: Option<String>,
}

impl UnaryOp {
    /// Creates a prefix operator node.
    #[must_use]
    pub fn new(op: impl Into<String>, child: impl Into<Term>) -> Self {
        Self {
            op: op.into(),
            child: child.into(),
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
        let child = ctx.escape_value(&self.child)?;
        let prefix = registry::lookup(&self.op)
            .filter(|i| i.flags.contains(OpFlags::UNARY))
            .map_or_else(
                || {
                    if self.op == "-" {
                        String::from("-")
                    } else {
                        format!("{} ", self.op)
                    }
                },
                |i| i.name_fmt.clone(),
            );
        append_alias(ctx, format!("{prefix}{child}"), self.alias.as_deref())
    }
}

/// A two-child node typed by an operator token.
///
/// Rendering is table-driven: the operator registry supplies the formatted
/// token and the VALUES-coercion flags for each side. An unregistered token
/// renders surrounded by single spaces.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    /// The operator token.
    pub op: String,
    /// Left operand.
    pub left: Term,
    /// Right operand.
    pub right: Term,
    /// Optional `AS` alias.
    pub alias: Option<String>,
}

impl BinaryOp {
    /// Creates a binary operator node.
    #[must_use]
    pub fn new(left: impl Into<Term>, op: impl Into<String>, right: impl Into<Term>) -> Self {
        Self {
            op: op.into(),
            left: left.into(),
            right: right.into(),
            alias: None,
        }
    }

    /// Sets the `AS` alias.
    #[must_use]
    pub fn alias(mut self, name: impl Into<String>) -> Self {
        self.alias = Some(name.into());
        self
    }

    /// Negates the comparison: operators with a registered negation pair
    /// swap tokens (`=` to `<>`), in-place-negatable ones gain a NOT
    /// prefix (`LIKE` to `NOT LIKE`), and anything else is wrapped in a
    /// prefix NOT.
    #[must_use]
    pub fn negate(self) -> Node {
        if let Some(info) = registry::lookup(&self.op) {
            if let Some(not_name) = &info.not_name {
                return Node::Binary(Self {
                    op: not_name.clone(),
                    ..self
                });
            }
            if info.flags.contains(OpFlags::IN_PLACE_NOT) {
                return Node::Binary(Self {
                    op: format!("NOT {}", info.name),
                    ..self
                });
            }
        }
        Node::Unary(UnaryOp::new("NOT", Node::Binary(self)))
    }

    /// Compiles this node to a SQL fragment.
    ///
    /// # Errors
    ///
    /// Propagates any escaping or structural error found while compiling.
    pub fn compile_node(&self, ctx: &dyn Context) -> Result<String> {
        let info = registry::lookup(&self.op).filter(|i| i.flags.contains(OpFlags::BINARY));
        let (fmt, left_values, right_values) = info.map_or_else(
            || (format!(" {} ", self.op), false, false),
            |i| {
                (
                    i.name_fmt.clone(),
                    i.flags.contains(OpFlags::LEFT_VALUES),
                    i.flags.contains(OpFlags::RIGHT_VALUES),
                )
            },
        );

        let left = compile_side(ctx, &self.left, left_values)?;
        let right = compile_side(ctx, &self.right, right_values)?;

        // `a = NULL` is never what the statement means; emit `a IS NULL`.
        let fmt = if right == "NULL" && self.op == "=" {
            String::from(" IS ")
        } else {
            fmt
        };

        append_alias(ctx, format!("{left}{fmt}{right}"), self.alias.as_deref())
    }
}

fn compile_side(ctx: &dyn Context, term: &Term, as_values: bool) -> Result<String> {
    if as_values {
        if let Term::List(items) = term {
            return ctx.escape_values(items);
        }
        return ctx.escape_value(term);
    }
    match term {
        Term::Node(node) => match node.as_ref() {
            Node::Binary(_) => Ok(format!("({})", node.compile_node(ctx)?)),
            _ => ctx.escape_value(term),
        },
        _ => ctx.escape_value(term),
    }
}
