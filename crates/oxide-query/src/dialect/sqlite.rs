//! SQLite dialect context.

use super::{Context, ContextBase, ContextOptions, Features, Version};
use crate::error::Result;

/// SQLite context: double-quoted identifiers, no native booleans (1/0),
/// control characters emitted as blob runs, version-gated NULLS FIRST/LAST
/// and RETURNING.
#[derive(Debug, Clone)]
pub struct SqliteContext {
    base: ContextBase,
}

impl SqliteContext {
    /// Creates a SQLite context.
    ///
    /// # Errors
    ///
    /// Fails when the version string in the options does not parse.
    pub fn new(options: &ContextOptions) -> Result<Self> {
        Ok(Self {
            base: ContextBase::new("sqlite", options, Version::new(3, 35, 0), Features::sqlite)?,
        })
    }
}

impl Context for SqliteContext {
    fn base(&self) -> &ContextBase {
        &self.base
    }

    fn as_context(&self) -> &dyn Context {
        self
    }

    /// SQLite strings cannot carry control characters, so the text is split
    /// into quoted text runs and `x'..'` blob runs concatenated with `||`.
    fn escape_string(&self, text: &str) -> Result<String> {
        if text.is_empty() {
            return Ok(String::from("''"));
        }

        let mut runs: Vec<String> = vec![];
        let mut text_run = String::new();
        let mut blob_run: Vec<u8> = vec![];

        for ch in text.chars() {
            if (ch as u32) < 0x20 {
                if !text_run.is_empty() {
                    runs.push(format!("'{}'", text_run.replace('\'', "''")));
                    text_run.clear();
                }
                blob_run.push(ch as u8);
            } else {
                if !blob_run.is_empty() {
                    runs.push(format!("x'{}'", super::hex_encode(&blob_run)));
                    blob_run.clear();
                }
                text_run.push(ch);
            }
        }
        if !text_run.is_empty() {
            runs.push(format!("'{}'", text_run.replace('\'', "''")));
        }
        if !blob_run.is_empty() {
            runs.push(format!("x'{}'", super::hex_encode(&blob_run)));
        }

        Ok(runs.join(" || "))
    }

    /// OFFSET requires a LIMIT; `-1` means unbounded.
    fn compile_offset_limit(&self, offset: Option<u64>, limit: Option<u64>) -> Option<String> {
        match (offset, limit) {
            (None, None) => None,
            (None, Some(l)) => Some(format!("LIMIT {l}")),
            (Some(o), Some(l)) => Some(format!("LIMIT {l} OFFSET {o}")),
            (Some(o), None) => Some(format!("LIMIT -1 OFFSET {o}")),
        }
    }
}

pub(super) fn factory(options: &ContextOptions) -> Result<Box<dyn Context>> {
    Ok(Box::new(SqliteContext::new(options)?))
}
