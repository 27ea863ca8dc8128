//! The SELECT statement builder.

use crate::builder::{add_condition, ident_term, push_fields};
use crate::dialect::Context;
use crate::error::{Error, Result};
use crate::node::{
    compile_operand, compile_source, BinaryOp, Identifier, Join, JoinCondition, JoinKind,
    Logical, LogicalKind, Node, NodeFlags, Sort,
};
use crate::term::{Literal, Term};

/// One entry of the mapping form of [`SelectQuery::field_map`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSpec {
    /// Select the key itself as a column.
    Keep,
    /// Drop the entry.
    Skip,
    /// Select this column, aliased to the key.
    Name(String),
    /// Select this expression, aliased to the key.
    Expr(Node),
}

impl From<bool> for FieldSpec {
    fn from(keep: bool) -> Self {
        if keep {
            Self::Keep
        } else {
            Self::Skip
        }
    }
}

impl From<&str> for FieldSpec {
    fn from(name: &str) -> Self {
        Self::Name(String::from(name))
    }
}

impl From<String> for FieldSpec {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Node> for FieldSpec {
    fn from(node: Node) -> Self {
        Self::Expr(node)
    }
}

/// A SELECT statement under construction.
///
/// Clauses render in the fixed order `SELECT [DISTINCT] fields FROM ...
/// WHERE ... GROUP BY ... HAVING ... ORDER BY ... OFFSET/LIMIT` regardless
/// of the order the builder methods were called in.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub(crate) flags: NodeFlags,
    pub(crate) fields: Vec<Node>,
    pub(crate) from: Option<Term>,
    pub(crate) where_: Option<Logical>,
    pub(crate) group_by: Vec<Term>,
    pub(crate) having: Option<Logical>,
    pub(crate) order_by: Vec<Sort>,
    pub(crate) offset: Option<u64>,
    pub(crate) limit: Option<u64>,
    pub(crate) alias: Option<String>,
    pub(crate) error: Option<Error>,
}

impl SelectQuery {
    /// Creates an empty SELECT; without fields it compiles to `SELECT *`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flags: NodeFlags::empty(),
            fields: vec![],
            from: None,
            where_: None,
            group_by: vec![],
            having: None,
            order_by: vec![],
            offset: None,
            limit: None,
            alias: None,
            error: None,
        }
    }

    /// Appends one field: a column name, an expression node, or a nested
    /// sequence of either.
    #[must_use]
    pub fn field(mut self, field: impl Into<Node>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Appends several fields at once.
    #[must_use]
    pub fn fields<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        for item in items {
            push_fields(&mut self.fields, item.into());
        }
        self
    }

    /// Appends fields from a key-to-spec mapping: `Keep` selects the key as
    /// a column, a name selects that column aliased to the key, and an
    /// expression is aliased to the key.
    #[must_use]
    pub fn field_map<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldSpec>,
    {
        for (key, spec) in entries {
            let key = key.into();
            match spec.into() {
                FieldSpec::Keep => self.fields.push(Node::Identifier(Identifier::new(key))),
                FieldSpec::Skip => {}
                FieldSpec::Name(name) => self
                    .fields
                    .push(Node::Identifier(Identifier::new(name).alias(key))),
                FieldSpec::Expr(node) => self.fields.push(node.alias(key)),
            }
        }
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

    /// Adds a source: a table name, a sub-query, or a sequence of either.
    /// Additional sources chain as implicit cross joins.
    #[must_use]
    pub fn from(mut self, source: impl Into<Term>) -> Self {
        match source.into() {
            Term::List(items) => {
                for item in items {
                    self = self.add_source(item);
                }
            }
            other => self = self.add_source(other),
        }
        self
    }

    fn add_source(mut self, source: Term) -> Self {
        self.from = Some(match self.from.take() {
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

    /// Adds a CROSS JOIN.
    #[must_use]
    pub fn cross_join(self, with: impl Into<Term>) -> Self {
        self.join_with(JoinKind::Cross, with.into(), None)
    }

    /// Adds an INNER JOIN with a USING column list or an ON expression.
    #[must_use]
    pub fn inner_join(self, with: impl Into<Term>, on: impl Into<JoinCondition>) -> Self {
        self.join_with(JoinKind::Inner, with.into(), Some(on.into()))
    }

    /// Adds a LEFT JOIN.
    #[must_use]
    pub fn left_join(self, with: impl Into<Term>, on: impl Into<JoinCondition>) -> Self {
        self.join_with(JoinKind::Left, with.into(), Some(on.into()))
    }

    /// Adds a RIGHT JOIN.
    #[must_use]
    pub fn right_join(self, with: impl Into<Term>, on: impl Into<JoinCondition>) -> Self {
        self.join_with(JoinKind::Right, with.into(), Some(on.into()))
    }

    /// Adds a FULL JOIN.
    #[must_use]
    pub fn full_join(self, with: impl Into<Term>, on: impl Into<JoinCondition>) -> Self {
        self.join_with(JoinKind::Full, with.into(), Some(on.into()))
    }

    fn join_with(mut self, kind: JoinKind, with: Term, condition: Option<JoinCondition>) -> Self {
        let Some(left) = self.from.take() else {
            self.record_error("JOIN requires a source table; call from() first");
            return self;
        };
        self.from = Some(Term::from(Node::Join(Box::new(Join::new(
            left, kind, with, condition,
        )))));
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

    /// Adds a `column op value` condition with OR.
    #[must_use]
    pub fn or_where_op(
        self,
        column: impl Into<Term>,
        token: impl Into<String>,
        value: impl Into<Term>,
    ) -> Self {
        self.or_where(Node::Binary(BinaryOp::new(
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

    /// Adds a `column = value` condition with OR.
    #[must_use]
    pub fn or_where_eq(self, column: impl Into<Term>, value: impl Into<Term>) -> Self {
        self.or_where_op(column, "=", value)
    }

    /// Appends GROUP BY keys: a column name, an expression, or a sequence.
    #[must_use]
    pub fn group_by(mut self, keys: impl Into<Term>) -> Self {
        match keys.into() {
            Term::List(items) => self.group_by.extend(items),
            other => self.group_by.push(other),
        }
        self
    }

    /// Adds a HAVING condition with implicit AND.
    #[must_use]
    pub fn having(mut self, condition: impl Into<Term>) -> Self {
        add_condition(&mut self.having, LogicalKind::And, condition.into());
        self
    }

    /// Adds a HAVING condition with OR.
    #[must_use]
    pub fn or_having(mut self, condition: impl Into<Term>) -> Self {
        add_condition(&mut self.having, LogicalKind::Or, condition.into());
        self
    }

    /// Adds a `column op value` HAVING condition with implicit AND.
    #[must_use]
    pub fn having_op(
        mut self,
        column: impl Into<Term>,
        token: impl Into<String>,
        value: impl Into<Term>,
    ) -> Self {
        let node = Node::Binary(BinaryOp::new(ident_term(column.into()), token, value));
        add_condition(&mut self.having, LogicalKind::And, Term::from(node));
        self
    }

    /// Adds a `column op value` HAVING condition with OR.
    #[must_use]
    pub fn or_having_op(
        mut self,
        column: impl Into<Term>,
        token: impl Into<String>,
        value: impl Into<Term>,
    ) -> Self {
        let node = Node::Binary(BinaryOp::new(ident_term(column.into()), token, value));
        add_condition(&mut self.having, LogicalKind::Or, Term::from(node));
        self
    }

    /// Appends ORDER BY keys with a direction token. A sequence key adds
    /// one sort per element.
    #[must_use]
    pub fn order_by(self, key: impl Into<Term>, direction: impl Into<String>) -> Self {
        self.order_by_nulls(key, direction, "")
    }

    /// Appends ORDER BY keys with direction and null-placement tokens.
    #[must_use]
    pub fn order_by_nulls(
        mut self,
        key: impl Into<Term>,
        direction: impl Into<String>,
        nulls: impl Into<String>,
    ) -> Self {
        let direction = direction.into();
        let nulls = nulls.into();
        match key.into() {
            Term::List(items) => {
                for item in items {
                    self.order_by
                        .push(Sort::new(item).direction(direction.clone()).nulls(nulls.clone()));
                }
            }
            other => self
                .order_by
                .push(Sort::new(other).direction(direction).nulls(nulls)),
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

    /// Sets the `AS` alias used when this query nests as a sub-query.
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

    /// Compiles this SELECT against a dialect context, without the trailing
    /// `;`.
    ///
    /// # Errors
    ///
    /// Surfaces any defect recorded by a builder method, then any escaping
    /// or structural error found while walking the tree.
    pub fn compile_node(&self, ctx: &dyn Context) -> Result<String> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        let base = ctx.base();
        let mut parts: Vec<String> = vec![];

        let mut head = String::from("SELECT");
        if self.flags.contains(NodeFlags::DISTINCT) {
            head.push_str(" DISTINCT");
        } else if self.flags.contains(NodeFlags::ALL) {
            head.push_str(" ALL");
        }
        head.push(' ');
        if self.fields.is_empty() {
            head.push('*');
        } else {
            let fields: Vec<String> = self
                .fields
                .iter()
                .map(|f| compile_operand(ctx, f))
                .collect::<Result<_>>()?;
            head.push_str(&fields.join(base.comma()));
        }
        parts.push(head);

        if let Some(from) = &self.from {
            parts.push(format!("FROM {}", compile_source(ctx, from)?));
        }
        if let Some(where_) = &self.where_ {
            parts.push(format!("WHERE {}", where_.compile_inner(ctx)?));
        }
        if !self.group_by.is_empty() {
            let keys: Vec<String> = self
                .group_by
                .iter()
                .map(|k| compile_group_key(ctx, k))
                .collect::<Result<_>>()?;
            parts.push(format!("GROUP BY {}", keys.join(base.comma())));
        }
        if let Some(having) = &self.having {
            parts.push(format!("HAVING {}", having.compile_inner(ctx)?));
        }
        if !self.order_by.is_empty() {
            let keys: Vec<String> = self
                .order_by
                .iter()
                .map(|s| s.compile_node(ctx))
                .collect::<Result<_>>()?;
            parts.push(format!("ORDER BY {}", keys.join(base.comma())));
        }
        if let Some(suffix) = ctx.compile_offset_limit(self.offset, self.limit) {
            parts.push(suffix);
        }

        Ok(parts.join(base.sep()))
    }

    /// Compiles this SELECT as a full statement, with a trailing `;`.
    ///
    /// # Errors
    ///
    /// Propagates any error raised by [`SelectQuery::compile_node`].
    pub fn compile_query(&self, ctx: &dyn Context) -> Result<String> {
        let mut sql = self.compile_node(ctx)?;
        sql.push(';');
        Ok(sql)
    }
}

/// A GROUP BY key: a column name, a 1-based column index, or an expression.
pub(crate) fn compile_group_key(ctx: &dyn Context, key: &Term) -> Result<String> {
    match key {
        Term::Scalar(Literal::Text(name)) => ctx.escape_identifier(&[name.as_str()]),
        Term::Scalar(Literal::Int(i)) => Ok(i.to_string()),
        Term::Node(node) => node.compile_node(ctx),
        _ => Err(Error::compile(
            "a GROUP BY key must be a column name, a column index, or an expression",
        )),
    }
}

impl Default for SelectQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl From<SelectQuery> for Node {
    fn from(query: SelectQuery) -> Self {
        Self::Select(Box::new(query))
    }
}

impl From<SelectQuery> for Term {
    fn from(query: SelectQuery) -> Self {
        Self::Node(Box::new(Node::Select(Box::new(query))))
    }
}
