//! The UPDATE statement builder.

use indexmap::IndexMap;

use crate::builder::insert::compile_cell;
use crate::builder::{add_condition, ident_term, push_fields};
use crate::dialect::Context;
use crate::error::{Error, Result};
use crate::node::{
    compile_operand, compile_source, BinaryOp, ExplicitType, Logical, LogicalKind, Node,
};
use crate::term::Term;

/// An UPDATE statement under construction.
///
/// Exactly one row of assignments is required; anything else is a compile
/// error.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateQuery {
    pub(crate) table: Option<Term>,
    pub(crate) rows: Vec<IndexMap<String, Term>>,
    pub(crate) where_: Option<Logical>,
    pub(crate) returning: Vec<Node>,
    pub(crate) type_hints: IndexMap<String, ExplicitType>,
    pub(crate) offset: Option<u64>,
    pub(crate) limit: Option<u64>,
    pub(crate) alias: Option<String>,
    pub(crate) error: Option<Error>,
}

impl UpdateQuery {
    /// Creates an empty UPDATE; name the table with
    /// [`UpdateQuery::table`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: None,
            rows: vec![],
            where_: None,
            returning: vec![],
            type_hints: IndexMap::new(),
            offset: None,
            limit: None,
            alias: None,
            error: None,
        }
    }

    /// Sets the target table. Setting it twice is a defect surfaced at
    /// compile time.
    #[must_use]
    pub fn table(mut self, table: impl Into<Term>) -> Self {
        if self.table.is_some() {
            self.record_error("the UPDATE table is already set");
            return self;
        }
        self.table = Some(table.into());
        self
    }

    /// Sets the row of column/value assignments.
    #[must_use]
    pub fn values<I, K, V>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Term>,
    {
        let map = row
            .into_iter()
            .map(|(column, value)| (column.into(), value.into()))
            .collect();
        self.rows.push(map);
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

    /// Records a per-column explicit type applied when a plain scalar is
    /// escaped for that column.
    #[must_use]
    pub fn type_hint(mut self, column: impl Into<String>, explicit: ExplicitType) -> Self {
        self.type_hints.insert(column.into(), explicit);
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

    /// Compiles this UPDATE against a dialect context, without the trailing
    /// `;`.
    ///
    /// # Errors
    ///
    /// Fails without a table or with a row count other than one, and
    /// propagates escaping errors from the assignments.
    pub fn compile_node(&self, ctx: &dyn Context) -> Result<String> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        let table = self
            .table
            .as_ref()
            .ok_or_else(|| Error::compile("UPDATE requires a table"))?;
        let [row] = self.rows.as_slice() else {
            return Err(Error::compile(format!(
                "UPDATE requires exactly one row of values, got {}",
                self.rows.len()
            )));
        };

        let base = ctx.base();
        let mut parts: Vec<String> = vec![];

        let mut assignments = Vec::with_capacity(row.len());
        for (column, value) in row {
            let key = ctx.escape_identifier(&[column.as_str()])?;
            let cell = compile_cell(ctx, value, self.type_hints.get(column))?;
            assignments.push(format!("{key} = {cell}"));
        }
        parts.push(format!(
            "UPDATE {} SET {}",
            compile_source(ctx, table)?,
            assignments.join(base.comma())
        ));

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

    /// Compiles this UPDATE as a full statement, with a trailing `;`.
    ///
    /// # Errors
    ///
    /// Propagates any error raised by [`UpdateQuery::compile_node`].
    pub fn compile_query(&self, ctx: &dyn Context) -> Result<String> {
        let mut sql = self.compile_node(ctx)?;
        sql.push(';');
        Ok(sql)
    }
}

impl Default for UpdateQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl From<UpdateQuery> for Node {
    fn from(query: UpdateQuery) -> Self {
        Self::Update(Box::new(query))
    }
}

impl From<UpdateQuery> for Term {
    fn from(query: UpdateQuery) -> Self {
        Self::Node(Box::new(Node::Update(Box::new(query))))
    }
}
