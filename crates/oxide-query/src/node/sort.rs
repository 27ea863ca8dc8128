//! ORDER BY sort keys.

use crate::dialect::Context;
use crate::error::{Error, Result};
use crate::node::compile_operand;
use crate::term::{Literal, Term};

/// A sort key: a column (name or 1-based index) or an expression, plus a
/// direction and a null-placement request.
///
/// Direction and null placement are kept as the raw tokens handed to the
/// builder and validated at compile time, so every failure surfaces through
/// `compile`.
#[derive(Debug, Clone, PartialEq)]
pub struct Sort {
    /// The sort key.
    pub value: Term,
    /// Direction token: ``""``/`"0"` unset, `"1"`/`ASC`, `"-1"`/`DESC`.
    pub direction: String,
    /// Null placement token: `""`, `NULLS FIRST` or `NULLS LAST`.
    pub nulls: String,
}

impl Sort {
    /// Creates an unordered sort key.
    #[must_use]
    pub fn new(value: impl Into<Term>) -> Self {
        Self {
            value: value.into(),
            direction: String::new(),
            nulls: String::new(),
        }
    }

    /// Sets the direction token.
    #[must_use]
    pub fn direction(mut self, token: impl Into<String>) -> Self {
        self.direction = token.into();
        self
    }

    /// Sets the null-placement token.
    #[must_use]
    pub fn nulls(mut self, token: impl Into<String>) -> Self {
        self.nulls = token.into();
        self
    }

    /// `None` for unset, `Some(false)` ascending, `Some(true)` descending.
    fn parse_direction(&self) -> Result<Option<bool>> {
        match self.direction.to_ascii_uppercase().as_str() {
            "" | "0" => Ok(None),
            "1" | "ASC" => Ok(Some(false)),
            "-1" | "DESC" => Ok(Some(true)),
            other => Err(Error::compile(format!("invalid sort direction '{other}'"))),
        }
    }

    /// `None` for unset, `Some(false)` NULLS FIRST, `Some(true)` NULLS LAST.
    fn parse_nulls(&self) -> Result<Option<bool>> {
        match self.nulls.to_ascii_uppercase().as_str() {
            "" => Ok(None),
            "NULLS FIRST" => Ok(Some(false)),
            "NULLS LAST" => Ok(Some(true)),
            other => Err(Error::compile(format!("invalid nulls ordering '{other}'"))),
        }
    }

    /// Compiles this node to a SQL fragment.
    ///
    /// # Errors
    ///
    /// Propagates any escaping or structural error found while compiling.
    pub fn compile_node(&self, ctx: &dyn Context) -> Result<String> {
        let expr = match &self.value {
            Term::Scalar(Literal::Int(i)) => i.to_string(),
            Term::Scalar(Literal::Float(f)) if f.fract() == 0.0 && f.is_finite() => {
                let index = *f as i64;
                index.to_string()
            }
            Term::Scalar(Literal::Text(name)) => ctx.escape_identifier(&[name.as_str()])?,
            Term::Node(node) => compile_operand(ctx, node)?,
            _ => {
                return Err(Error::compile(
                    "sort key must be a column name, a column index, or an expression",
                ))
            }
        };

        let descending = self.parse_direction()?;
        let nulls_last = self.parse_nulls()?;

        let mut sql = expr.clone();
        if let Some(desc) = descending {
            sql.push_str(if desc { " DESC" } else { " ASC" });
        }

        if let Some(last) = nulls_last {
            let features = &ctx.base().features;
            if features.nulls_first_last {
                sql.push_str(if last { " NULLS LAST" } else { " NULLS FIRST" });
            } else {
                // Without NULLS FIRST/LAST the dialect's default placement is
                // nullsSortBottom XOR descending; when the request differs a
                // synthetic boolean key in front of the real one forces it.
                let default_last = features.nulls_sort_bottom != descending.unwrap_or(false);
                if last != default_last {
                    let guard = if last {
                        format!("({expr} IS NULL)")
                    } else {
                        format!("({expr} IS NOT NULL)")
                    };
                    sql = format!("{guard}, {sql}");
                }
            }
        }

        Ok(sql)
    }
}
