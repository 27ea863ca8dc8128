//! The DELETE statement builder.

use crate::builder::{add_condition, ident_term, push_fields};
use crate::dialect::Context;
use crate::error::{Error, Result};
use crate::node::{
    compile_operand, compile_source, BinaryOp, Join, JoinKind, Logical, LogicalKind, Node,
};
use crate::term::Term;

/// A DELETE statement under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteQuery {
    pub(crate) table: Option<Term>,
    pub(crate) using: Option<Term>,
    pub(crate) where_: Option<Logical>,
    pub(crate) returning: Vec<Node>,
    pub(crate) offset: Option<u64>,
    pub(crate) limit: Option<u64>,
    pub(crate) alias: Option<String>,
    pub(crate) error: Option<Error>,
}

impl DeleteQuery {
    /// Creates an empty DELETE; name the table with
    /// [`DeleteQuery::from`] or [`DeleteQuery::table`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: None,
            using: None,
            where_: None,
            returning: vec![],
            offset: None,
            limit: None,
            alias: None,
            error: None,
        }
    }

    /// Sets the target table.
    #[must_use]
    pub fn from(self, table: impl Into<Term>) -> Self {
        self.table(table)
    }

    /// Sets the target table. Setting it twice is a defect surfaced at
    /// compile time.
    #[must_use]
    pub fn table(mut self, table: impl Into<Term>) -> Self {
        if self.table.is_some() {
            self.record_error("the DELETE table is already set");
            return self;
        }
        self.table = Some(table.into());
        self
    }

    /// Adds a USING source; additional sources chain as cross joins.
    #[must_use]
    pub fn using(mut self, source: impl Into<Term>) -> Self {
        let source = source.into();
        self.using = Some(match self.using.take() {
            None => source,
            Some(existing) => Term::from(Node::Join(Box::new(Join::new(
                existing,
                JoinKind::Unset,
                source,
                None,
            )))),
        });
        self
    }

    /// Adds a condition with implicit AND.
    #[must_use]
    pub fn where_clause(mut self, condition: impl Into<Term>) -> Self {
        add_condition(&mut self.where_, LogicalKind::And, condition.into());
        self
    }

    /// Adds a condition with OR.
    #[must_use]
    pub fn or_where(mut self, condition: impl Into<Term>) -> Self {
        add_condition(&mut self.where_, LogicalKind::Or, condition.into());
        self
    }

    /// Adds a `column op value` condition with implicit AND.
    #[must_use]
    pub fn where_op(
        self,
        column: impl Into<Term>,
        token: impl Into<String>,
        value: impl Into<Term>,
    ) -> Self {
        self.where_clause(Node::Binary(BinaryOp::new(
            ident_term(column.into()),
            token,
            value,
        )))
    }

    /// Adds a `column = value` condition with implicit AND.
    #[must_use]
    pub fn where_eq(self, column: impl Into<Term>, value: impl Into<Term>) -> Self {
        self.where_op(column, "=", value)
    }

    /// Appends RETURNING fields, emitted only on dialects that support the
    /// clause.
    #[must_use]
    pub fn returning<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        for item in items {
            push_fields(&mut self.returning, item.into());
        }
        self
    }

    /// Sets the OFFSET.
    #[must_use]
    pub const fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Sets the LIMIT.
    #[must_use]
    pub const fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Sets the `AS` alias used when this statement nests.
    #[must_use]
    pub fn alias(mut self, name: impl Into<String>) -> Self {
        self.alias = Some(name.into());
        self
    }

    fn record_error(&mut self, message: &str) {
        if self.error.is_none() {
            self.error = Some(Error::compile(message));
        }
    }

    /// Compiles this DELETE against a dialect context, without the trailing
    /// `;`.
    ///
    /// # Errors
    ///
    /// Fails without a table, and propagates escaping errors from the
    /// condition tree.
    pub fn compile_node(&self, ctx: &dyn Context) -> Result<String> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        let table = self
            .table
            .as_ref()
            .ok_or_else(|| Error::compile("DELETE requires a table"))?;

        let base = ctx.base();
        let mut parts: Vec<String> = vec![format!("DELETE FROM {}", compile_source(ctx, table)?)];

        if let Some(using) = &self.using {
            parts.push(format!("USING {}", compile_source(ctx, using)?));
        }
        if let Some(where_) = &self.where_ {
            parts.push(format!("WHERE {}", where_.compile_inner(ctx)?));
        }
        if let Some(suffix) = ctx.compile_offset_limit(self.offset, self.limit) {
            parts.push(suffix);
        }
        if base.features.returning && !self.returning.is_empty() {
            let fields: Vec<String> = self
                .returning
                .iter()
                .map(|f| compile_operand(ctx, f))
                .collect::<Result<_>>()?;
            parts.push(format!("RETURNING {}", fields.join(base.comma())));
        }

        Ok(parts.join(base.sep()))
    }

    /// Compiles this DELETE as a full statement, with a trailing `;`.
    ///
    /// # Errors
    ///
    /// Propagates any error raised by [`DeleteQuery::compile_node`].
    pub fn compile_query(&self, ctx: &dyn Context) -> Result<String> {
        let mut sql = self.compile_node(ctx)?;
        sql.push(';');
        Ok(sql)
    }
}

impl Default for DeleteQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl From<DeleteQuery> for Node {
    fn from(query: DeleteQuery) -> Self {
        Self::Delete(Box::new(query))
    }
}

impl From<DeleteQuery> for Term {
    fn from(query: DeleteQuery) -> Self {
        Self::Node(Box::new(Node::Delete(Box::new(query))))
    }
}
