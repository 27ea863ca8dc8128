//! The `?`/`$N` parameter substitution engine.
//!
//! One pass over the template. Quoted regions are skipped — just well
//! enough to locate markers; no SQL parsing happens here. The first marker
//! locks the template into one style and the two never mix.

use crate::dialect::Context;
use crate::error::{Error, Result};
use crate::term::Term;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Unlocked,
    Positional,
    Indexed,
}

pub(crate) fn substitute(ctx: &dyn Context, template: &str, bindings: &[Term]) -> Result<String> {
    let chars: Vec<char> = template.chars().collect();
    let mut out = String::with_capacity(template.len());
    let mut mode = Mode::Unlocked;
    let mut next_binding = 0_usize;
    let mut i = 0_usize;

    while i < chars.len() {
        match chars[i] {
            '"' => {
                out.push('"');
                i += 1;
                while i < chars.len() {
                    out.push(chars[i]);
                    if chars[i] == '"' {
                        if chars.get(i + 1) == Some(&'"') {
                            out.push('"');
                            i += 2;
                            continue;
                        }
                        i += 1;
                        break;
                    }
                    i += 1;
                }
            }
            '\'' => {
                // An E/e right before the quote makes it a C-style string
                // where `\X` escapes the next character.
                let c_style = i > 0 && matches!(chars[i - 1], 'E' | 'e');
                out.push('\'');
                i += 1;
                while i < chars.len() {
                    let ch = chars[i];
                    if c_style && ch == '\\' {
                        out.push(ch);
                        if let Some(next) = chars.get(i + 1) {
                            out.push(*next);
                        }
                        i += 2;
                        continue;
                    }
                    out.push(ch);
                    if ch == '\'' {
                        if chars.get(i + 1) == Some(&'\'') {
                            out.push('\'');
                            i += 2;
                            continue;
                        }
                        i += 1;
                        break;
                    }
                    i += 1;
                }
            }
            '?' => {
                if mode == Mode::Indexed {
                    return Err(Error::compile("mixed substitution marks in template"));
                }
                mode = Mode::Positional;
                let term = bindings.get(next_binding).ok_or_else(|| {
                    Error::compile(format!(
                        "not enough bindings: marker #{} has no value",
                        next_binding + 1
                    ))
                })?;
                out.push_str(&ctx.escape_value(term)?);
                next_binding += 1;
                i += 1;
            }
            '$' => {
                if mode == Mode::Positional {
                    return Err(Error::compile("mixed substitution marks in template"));
                }
                mode = Mode::Indexed;
                i += 1;
                let start = i;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
                if start == i {
                    return Err(Error::compile("expected a digit after '$'"));
                }
                let digits: String = chars[start..i].iter().collect();
                let index: usize = digits
                    .parse()
                    .map_err(|_| Error::compile(format!("binding index ${digits} is too large")))?;
                if index == 0 || index > bindings.len() {
                    return Err(Error::compile(format!(
                        "binding index ${index} is out of range (have {})",
                        bindings.len()
                    )));
                }
                out.push_str(&ctx.escape_value(&bindings[index - 1])?);
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }

    Ok(out)
}
