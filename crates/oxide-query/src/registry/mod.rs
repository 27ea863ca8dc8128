//! The operator and function registry.
//!
//! A process-wide, once-initialized catalog mapping operator/function names
//! to their rendering records: formatted token, flags, arity bounds, dialect
//! coverage, and (for a handful of functions) a specialized compiler.

mod catalog;

use std::collections::HashMap;

use bitflags::bitflags;
use once_cell::sync::Lazy;

use crate::dialect::Context;
use crate::error::Result;
use crate::node::Func;

bitflags! {
    /// Behavior flags of a registry record.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OpFlags: u16 {
        /// A prefix operator.
        const UNARY = 1 << 0;
        /// A two-operand operator.
        const BINARY = 1 << 1;
        /// A callable function.
        const FUNCTION = 1 << 2;
        /// An aggregate (DISTINCT/ALL meaningful).
        const AGGREGATE = 1 << 3;
        /// Takes no arguments.
        const VOID = 1 << 4;
        /// Negatable in place (`NOT LIKE`, `NOT IN`, `IS NOT`).
        const IN_PLACE_NOT = 1 << 5;
        /// The left operand renders through `escape_values`.
        const LEFT_VALUES = 1 << 6;
        /// The right operand renders through `escape_values`.
        const RIGHT_VALUES = 1 << 7;
    }
}

bitflags! {
    /// Which dialects an operator or function is known to support.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DialectMask: u8 {
        /// PostgreSQL.
        const PG = 1 << 0;
        /// MySQL/MariaDB.
        const MYSQL = 1 << 1;
        /// SQLite.
        const SQLITE = 1 << 2;
        /// Every shipped dialect.
        const ALL = Self::PG.bits() | Self::MYSQL.bits() | Self::SQLITE.bits();
    }
}

/// The broad family of a registry record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCategory {
    /// `=`, `<`, `IN`, `IS`, ...
    Comparison,
    /// `+`, `-`, `*`, `/`, `%`.
    Arithmetic,
    /// `&`, `|`, `^`, `<<`, `>>`.
    Bitwise,
    /// `LIKE`, `ILIKE`, regex matches.
    Pattern,
    /// Array containment/overlap.
    Array,
    /// Math functions.
    Math,
    /// String functions.
    Text,
    /// COALESCE, CASE-adjacent conditionals, CAST.
    Conditional,
    /// Aggregate functions.
    Aggregate,
}

/// A dialect-specific compiler attached to a function record.
pub type FuncCompiler = fn(&dyn Context, &Func) -> Result<String>;

/// One registry record.
#[derive(Debug, Clone)]
pub struct OpInfo {
    /// Canonical name.
    pub name: String,
    /// Formatted token: ` NAME ` for binary operators, the name itself for
    /// functions.
    pub name_fmt: String,
    /// Short human-readable description.
    pub desc: String,
    /// Behavior flags.
    pub flags: OpFlags,
    /// Minimum argument count (functions).
    pub min_args: usize,
    /// Maximum argument count (functions); `usize::MAX` when unbounded.
    pub max_args: usize,
    /// Dialect coverage.
    pub dialects: DialectMask,
    /// Record family.
    pub category: OpCategory,
    /// The negated counterpart (`=` to `<>`), when one exists.
    pub not_name: Option<String>,
    /// Specialized compiler, when the default rendering does not fit.
    pub compile: Option<FuncCompiler>,
}

impl OpInfo {
    fn binary(name: &str, category: OpCategory, desc: &str) -> Self {
        Self {
            name: String::from(name),
            name_fmt: format!(" {name} "),
            desc: String::from(desc),
            flags: OpFlags::BINARY,
            min_args: 2,
            max_args: 2,
            dialects: DialectMask::ALL,
            category,
            not_name: None,
            compile: None,
        }
    }

    fn unary(name: &str, category: OpCategory, desc: &str) -> Self {
        Self {
            name: String::from(name),
            name_fmt: format!("{name} "),
            desc: String::from(desc),
            flags: OpFlags::UNARY,
            min_args: 1,
            max_args: 1,
            dialects: DialectMask::ALL,
            category,
            not_name: None,
            compile: None,
        }
    }

    fn function(name: &str, min_args: usize, max_args: usize, category: OpCategory, desc: &str) -> Self {
        Self {
            name: String::from(name),
            name_fmt: String::from(name),
            desc: String::from(desc),
            flags: OpFlags::FUNCTION,
            min_args,
            max_args,
            dialects: DialectMask::ALL,
            category,
            not_name: None,
            compile: None,
        }
    }

    fn aggregate(name: &str, min_args: usize, max_args: usize, desc: &str) -> Self {
        let mut info = Self::function(name, min_args, max_args, OpCategory::Aggregate, desc);
        info.flags |= OpFlags::AGGREGATE;
        info
    }

    fn flag(mut self, extra: OpFlags) -> Self {
        self.flags |= extra;
        self
    }

    fn negates(mut self, other: &str) -> Self {
        self.not_name = Some(String::from(other));
        self
    }

    fn dialects(mut self, mask: DialectMask) -> Self {
        self.dialects = mask;
        self
    }

    fn compiler(mut self, f: FuncCompiler) -> Self {
        self.compile = Some(f);
        self
    }

    /// Human-readable arity for error messages.
    #[must_use]
    pub fn arity_label(&self) -> String {
        if self.min_args == self.max_args {
            self.min_args.to_string()
        } else if self.max_args == usize::MAX {
            format!("{} or more", self.min_args)
        } else {
            format!("{} to {}", self.min_args, self.max_args)
        }
    }
}

pub(crate) struct Registry {
    ops: HashMap<String, OpInfo>,
    aliases: HashMap<String, String>,
}

impl Registry {
    fn add(&mut self, info: OpInfo) {
        self.ops.insert(info.name.clone(), info);
    }

    fn alias(&mut self, from: &str, to: &str) {
        self.aliases.insert(String::from(from), String::from(to));
    }

    fn build() -> Self {
        let mut registry = Self {
            ops: HashMap::new(),
            aliases: HashMap::new(),
        };
        catalog::populate(&mut registry);
        registry
    }
}

static REGISTRY: Lazy<Registry> = Lazy::new(Registry::build);

/// Looks up an operator or function record by name or alias.
///
/// Word names are case-insensitive; symbolic tokens match exactly.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static OpInfo> {
    let registry = &*REGISTRY;
    let key = name.to_ascii_uppercase();
    let key = registry.aliases.get(&key).unwrap_or(&key);
    registry.ops.get(key)
}
