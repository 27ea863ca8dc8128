//! The INSERT statement builder.

use indexmap::{IndexMap, IndexSet};

use crate::builder::push_fields;
use crate::dialect::Context;
use crate::error::{Error, Result};
use crate::node::{compile_operand, compile_source, ExplicitType, Node};
use crate::term::Term;

/// An INSERT statement under construction.
///
/// The inserted column set is the union of the keys seen across every row,
/// iterated in first-insertion order; a row missing one of those keys emits
/// `DEFAULT` in its position.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertQuery {
    pub(crate) table: Option<Term>,
    pub(crate) columns: IndexSet<String>,
    pub(crate) rows: Vec<IndexMap<String, Term>>,
    pub(crate) returning: Vec<Node>,
    pub(crate) type_hints: IndexMap<String, ExplicitType>,
    pub(crate) alias: Option<String>,
    pub(crate) error: Option<Error>,
}

impl InsertQuery {
    /// Creates an empty INSERT; name the table with
    /// [`InsertQuery::table`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: None,
            columns: IndexSet::new(),
            rows: vec![],
            returning: vec![],
            type_hints: IndexMap::new(),
            alias: None,
            error: None,
        }
    }

    /// Sets the target table. Setting it twice is a defect surfaced at
    /// compile time.
    #[must_use]
    pub fn table(mut self, table: impl Into<Term>) -> Self {
        if self.table.is_some() {
            self.record_error("the INSERT table is already set");
            return self;
        }
        self.table = Some(table.into());
        self
    }

    /// Appends one row of column/value pairs. New columns join the inserted
    /// column set in first-appearance order.
    #[must_use]
    pub fn values<I, K, V>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Term>,
    {
        let mut map = IndexMap::new();
        for (column, value) in row {
            let column = column.into();
            self.columns.insert(column.clone());
            map.insert(column, value.into());
        }
        self.rows.push(map);
        self
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

    /// Compiles this INSERT against a dialect context, without the trailing
    /// `;`.
    ///
    /// # Errors
    ///
    /// Fails without a table or without rows, and propagates escaping
    /// errors from the values.
    pub fn compile_node(&self, ctx: &dyn Context) -> Result<String> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        let table = self
            .table
            .as_ref()
            .ok_or_else(|| Error::compile("INSERT requires a table"))?;
        if self.rows.is_empty() {
            return Err(Error::compile("INSERT requires at least one row of values"));
        }

        let base = ctx.base();
        let mut parts: Vec<String> = vec![];

        let columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| ctx.escape_identifier(&[c.as_str()]))
            .collect::<Result<_>>()?;
        parts.push(format!(
            "INSERT INTO {} ({})",
            compile_source(ctx, table)?,
            columns.join(", ")
        ));

        let mut rows = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let mut cells = Vec::with_capacity(self.columns.len());
            for column in &self.columns {
                let cell = match row.get(column) {
                    None => String::from("DEFAULT"),
                    Some(term) => compile_cell(ctx, term, self.type_hints.get(column))?,
                };
                cells.push(cell);
            }
            rows.push(format!("({})", cells.join(", ")));
        }
        parts.push(format!("VALUES {}", rows.join(", ")));

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

    /// Compiles this INSERT as a full statement, with a trailing `;`.
    ///
    /// # Errors
    ///
    /// Propagates any error raised by [`InsertQuery::compile_node`].
    pub fn compile_query(&self, ctx: &dyn Context) -> Result<String> {
        let mut sql = self.compile_node(ctx)?;
        sql.push(';');
        Ok(sql)
    }
}

/// An inserted/assigned cell: expression nodes compile through their own
/// method, plain data goes through the (possibly hinted) value escape.
pub(crate) fn compile_cell(
    ctx: &dyn Context,
    term: &Term,
    hint: Option<&ExplicitType>,
) -> Result<String> {
    match (term, hint) {
        (Term::Node(node), _) => compile_operand(ctx, node),
        (_, Some(explicit)) => ctx.escape_typed(Some(term), Some(*explicit)),
        (_, None) => ctx.escape_value(term),
    }
}

impl Default for InsertQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl From<InsertQuery> for Node {
    fn from(query: InsertQuery) -> Self {
        Self::Insert(Box::new(query))
    }
}

impl From<InsertQuery> for Term {
    fn from(query: InsertQuery) -> Self {
        Self::Node(Box::new(Node::Insert(Box::new(query))))
    }
}
