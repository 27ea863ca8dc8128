//! UNION/INTERSECT/EXCEPT compound queries.

use crate::dialect::Context;
use crate::error::Result;
use crate::node::{Node, NodeFlags, Sort};
use crate::term::Term;

/// The combining operator of a compound query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundOp {
    /// Set union.
    Union,
    /// Set intersection.
    Intersect,
    /// Set difference.
    Except,
}

impl CompoundOp {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
        }
    }
}

/// An ordered list of queries combined by UNION/INTERSECT/EXCEPT, with an
/// optional `ALL`/`DISTINCT` quantifier and a common ORDER BY / OFFSET /
/// LIMIT suffix.
///
/// Members that are not plain statements (nested compounds in particular)
/// are parenthesized.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundQuery {
    pub(crate) op: CompoundOp,
    pub(crate) flags: NodeFlags,
    pub(crate) queries: Vec<Node>,
    pub(crate) order_by: Vec<Sort>,
    pub(crate) offset: Option<u64>,
    pub(crate) limit: Option<u64>,
    pub(crate) alias: Option<String>,
}

impl CompoundQuery {
    /// Creates a compound of two queries.
    #[must_use]
    pub fn new(op: CompoundOp, first: impl Into<Node>, second: impl Into<Node>) -> Self {
        Self {
            op,
            flags: NodeFlags::empty(),
            queries: vec![first.into(), second.into()],
            order_by: vec![],
            offset: None,
            limit: None,
            alias: None,
        }
    }

    /// Appends another member query.
    #[must_use]
    pub fn add(mut self, query: impl Into<Node>) -> Self {
        self.queries.push(query.into());
        self
    }

    /// Sets the `ALL` quantifier (clears `DISTINCT`).
    #[must_use]
    pub fn all(mut self) -> Self {
        self.flags.remove(NodeFlags::DISTINCT);
        self.flags.insert(NodeFlags::ALL);
        self
    }

    /// Sets the `DISTINCT` quantifier (clears `ALL`).
    #[must_use]
    pub fn distinct(mut self) -> Self {
        self.flags.remove(NodeFlags::ALL);
        self.flags.insert(NodeFlags::DISTINCT);
        self
    }

    /// Appends common ORDER BY keys with a direction token.
    #[must_use]
    pub fn order_by(mut self, key: impl Into<Term>, direction: impl Into<String>) -> Self {
        let direction = direction.into();
        match key.into() {
            Term::List(items) => {
                for item in items {
                    self.order_by.push(Sort::new(item).direction(direction.clone()));
                }
            }
            other => self.order_by.push(Sort::new(other).direction(direction)),
        }
        self
    }

    /// Sets the common OFFSET.
    #[must_use]
    pub const fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Sets the common LIMIT.
    #[must_use]
    pub const fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Sets the `AS` alias used when this compound nests.
    #[must_use]
    pub fn alias(mut self, name: impl Into<String>) -> Self {
        self.alias = Some(name.into());
        self
    }

    /// Compiles this compound against a dialect context, without the
    /// trailing `;`.
    ///
    /// # Errors
    ///
    /// Propagates any error raised while compiling the member queries.
    pub fn compile_node(&self, ctx: &dyn Context) -> Result<String> {
        let base = ctx.base();
        let mut keyword = String::from(self.op.as_str());
        if self.flags.contains(NodeFlags::ALL) {
            keyword.push_str(" ALL");
        } else if self.flags.contains(NodeFlags::DISTINCT) {
            keyword.push_str(" DISTINCT");
        }

        let members: Vec<String> = self
            .queries
            .iter()
            .map(|q| {
                let sql = q.compile_node(ctx)?;
                Ok(match q {
                    Node::Select(_) | Node::Insert(_) | Node::Update(_) | Node::Delete(_) => sql,
                    _ => ctx.wrap_subquery(&sql),
                })
            })
            .collect::<Result<_>>()?;

        let sep = base.sep();
        let mut sql = members.join(&format!("{sep}{keyword}{sep}"));

        if !self.order_by.is_empty() {
            let keys: Vec<String> = self
                .order_by
                .iter()
                .map(|s| s.compile_node(ctx))
                .collect::<Result<_>>()?;
            sql.push_str(sep);
            sql.push_str(&format!("ORDER BY {}", keys.join(base.comma())));
        }
        if let Some(suffix) = ctx.compile_offset_limit(self.offset, self.limit) {
            sql.push_str(sep);
            sql.push_str(&suffix);
        }

        Ok(sql)
    }

    /// Compiles this compound as a full statement, with a trailing `;`.
    ///
    /// # Errors
    ///
    /// Propagates any error raised by [`CompoundQuery::compile_node`].
    pub fn compile_query(&self, ctx: &dyn Context) -> Result<String> {
        let mut sql = self.compile_node(ctx)?;
        sql.push(';');
        Ok(sql)
    }
}

impl From<CompoundQuery> for Node {
    fn from(query: CompoundQuery) -> Self {
        Self::Compound(Box::new(query))
    }
}

impl From<CompoundQuery> for Term {
    fn from(query: CompoundQuery) -> Self {
        Self::Node(Box::new(Node::Compound(Box::new(query))))
    }
}
