//! PostgreSQL dialect context.

use super::{Context, ContextBase, ContextOptions, Features, Version};
use crate::error::{Error, Result};
use crate::term::Term;

/// PostgreSQL context: `E'...'` escape strings, native arrays, native
/// booleans, special number tokens, NULLS FIRST/LAST, RETURNING.
#[derive(Debug, Clone)]
pub struct PostgresContext {
    base: ContextBase,
}

impl PostgresContext {
    /// Creates a PostgreSQL context.
    ///
    /// # Errors
    ///
    /// Fails when the version string in the options does not parse.
    pub fn new(options: &ContextOptions) -> Result<Self> {
        Ok(Self {
            base: ContextBase::new("pg", options, Version::new(14, 0, 0), Features::postgres)?,
        })
    }
}

impl Context for PostgresContext {
    fn base(&self) -> &ContextBase {
        &self.base
    }

    fn as_context(&self) -> &dyn Context {
        self
    }

    /// Backslash escapes for control characters and quotes; when any escape
    /// fires the literal is wrapped as `E'...'`. NUL has no representation
    /// in a PostgreSQL string.
    fn escape_string(&self, text: &str) -> Result<String> {
        let mut body = String::with_capacity(text.len());
        let mut escaped = false;
        for ch in text.chars() {
            match ch {
                '\0' => return Err(Error::compile("string contains a NUL character")),
                '\x08' => {
                    body.push_str("\\b");
                    escaped = true;
                }
                '\t' => {
                    body.push_str("\\t");
                    escaped = true;
                }
                '\n' => {
                    body.push_str("\\n");
                    escaped = true;
                }
                '\x0C' => {
                    body.push_str("\\f");
                    escaped = true;
                }
                '\r' => {
                    body.push_str("\\r");
                    escaped = true;
                }
                '\'' => {
                    body.push_str("\\'");
                    escaped = true;
                }
                '\\' => {
                    body.push_str("\\\\");
                    escaped = true;
                }
                c if (c as u32) < 0x20 => {
                    body.push_str(&format!("\\x{:02X}", c as u32));
                    escaped = true;
                }
                c => body.push(c),
            }
        }
        Ok(if escaped {
            format!("E'{body}'")
        } else {
            format!("'{body}'")
        })
    }

    fn escape_buffer(&self, bytes: &[u8]) -> String {
        format!("E'\\\\x{}'", super::hex_encode(bytes))
    }

    /// Native array literals: `ARRAY[...]` at the top level, bare `[...]`
    /// when nested. An empty top-level array is the `'{}'` literal.
    fn escape_array(&self, items: &[Term], nested: bool) -> Result<String> {
        if items.is_empty() && !nested {
            return Ok(String::from("'{}'"));
        }
        let mut parts = Vec::with_capacity(items.len());
        for item in items {
            let part = match item {
                Term::List(inner) => self.escape_array(inner, true)?,
                other => self.escape_value(other)?,
            };
            parts.push(part);
        }
        let body = parts.join(", ");
        Ok(if nested {
            format!("[{body}]")
        } else {
            format!("ARRAY[{body}]")
        })
    }
}

pub(super) fn factory(options: &ContextOptions) -> Result<Box<dyn Context>> {
    Ok(Box::new(PostgresContext::new(options)?))
}
