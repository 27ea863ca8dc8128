//! # oxide-query
//!
//! A programmatic SQL query builder and compiler with dialect-aware
//! escaping.
//!
//! This crate provides:
//! - A typed expression tree (identifiers, values, operators, functions,
//!   joins, sorts, compound queries, and full statements)
//! - Dialect contexts for PostgreSQL, MySQL/MariaDB and SQLite that render
//!   the same tree to back-end-specific SQL
//! - A table-driven operator/function catalog and a `?`/`$N` parameter
//!   substitution engine
//!
//! ## Building and compiling a query
//!
//! ```rust
//! use oxide_query::builder::{col, eq, select};
//! use oxide_query::dialect::{new_context, ContextOptions};
//! use oxide_query::Node;
//!
//! # fn main() -> oxide_query::Result<()> {
//! let ctx = new_context(&ContextOptions::new("pg"))?;
//! let query: Node = select().from("x").where_clause(eq(col("a"), 1)).into();
//!
//! assert_eq!(ctx.compile(&query)?, r#"SELECT * FROM "x" WHERE "a" = 1;"#);
//! # Ok(())
//! # }
//! ```
//!
//! ## Escaping contract
//!
//! Everything that reaches the output is escaped for the target dialect:
//! identifiers are quoted, strings go through the dialect's escape table,
//! arrays and JSON documents are encoded per back-end. The single explicit
//! exception is the `raw` value type and the [`builder::raw`] fragment
//! node, which are trust boundaries and emitted verbatim.

pub mod builder;
pub mod dialect;
pub mod error;
pub mod node;
pub mod registry;
pub mod term;

pub use builder::{
    delete, insert, select, update, CompoundQuery, DeleteQuery, InsertQuery, SelectQuery,
    UpdateQuery,
};
pub use dialect::{has, new_context, register, Context, ContextOptions};
pub use error::{Error, Result};
pub use node::Node;
pub use term::{Literal, Term};
