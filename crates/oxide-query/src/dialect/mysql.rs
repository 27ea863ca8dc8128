//! MySQL/MariaDB dialect context.

use super::{Context, ContextBase, ContextOptions, Features, Version};
use crate::error::Result;

/// MySQL context: grave-quoted identifiers, backslash string escapes, no
/// RETURNING, no native arrays, NULLs sorting first on ascending keys.
#[derive(Debug, Clone)]
pub struct MysqlContext {
    base: ContextBase,
}

impl MysqlContext {
    /// Creates a MySQL context.
    ///
    /// # Errors
    ///
    /// Fails when the version string in the options does not parse.
    pub fn new(options: &ContextOptions) -> Result<Self> {
        Ok(Self {
            base: ContextBase::new("mysql", options, Version::new(8, 0, 0), Features::mysql)?,
        })
    }
}

impl Context for MysqlContext {
    fn base(&self) -> &ContextBase {
        &self.base
    }

    fn as_context(&self) -> &dyn Context {
        self
    }

    /// The fixed backslash escape table. The literal is always plain
    /// `'...'`; identifier quoting is separate (grave accents).
    fn escape_string(&self, text: &str) -> Result<String> {
        let mut body = String::with_capacity(text.len());
        for ch in text.chars() {
            match ch {
                '\0' => body.push_str("\\0"),
                '\x08' => body.push_str("\\b"),
                '\t' => body.push_str("\\t"),
                '\n' => body.push_str("\\n"),
                '\r' => body.push_str("\\r"),
                '\x1A' => body.push_str("\\Z"),
                '\'' => body.push_str("''"),
                '\\' => body.push_str("\\\\"),
                c => body.push(c),
            }
        }
        Ok(format!("'{body}'"))
    }

    /// MySQL refuses a bare OFFSET; the documented all-rows LIMIT keeps an
    /// offset-only query valid.
    fn compile_offset_limit(&self, offset: Option<u64>, limit: Option<u64>) -> Option<String> {
        match (offset, limit) {
            (None, None) => None,
            (None, Some(l)) => Some(format!("LIMIT {l}")),
            (Some(o), Some(l)) => Some(format!("LIMIT {l} OFFSET {o}")),
            (Some(o), None) => Some(format!("LIMIT 18446744073709551615 OFFSET {o}")),
        }
    }
}

pub(super) fn factory(options: &ContextOptions) -> Result<Box<dyn Context>> {
    Ok(Box::new(MysqlContext::new(options)?))
}
