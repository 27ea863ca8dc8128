//! Error types for query building and compilation.

use thiserror::Error;

/// Errors raised while escaping values or compiling a query tree.
///
/// All failures are synchronous: an error unwinds the current compile call
/// and no partial SQL is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A value could not be escaped under the chosen explicit type or the
    /// implicit deduction rules.
    #[error("value error: {0}")]
    Value(String),

    /// A structural defect in the query tree or substitution template.
    #[error("compile error: {0}")]
    Compile(String),
}

impl Error {
    /// Creates a [`Error::Value`] from a message.
    pub(crate) fn value(msg: impl Into<String>) -> Self {
        Self::Value(msg.into())
    }

    /// Creates a [`Error::Compile`] from a message.
    pub(crate) fn compile(msg: impl Into<String>) -> Self {
        Self::Compile(msg.into())
    }
}

/// Result type alias for query operations.
pub type Result<T> = std::result::Result<T, Error>;
