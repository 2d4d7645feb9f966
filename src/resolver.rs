// Author: Dustin Pilgrim
// License: MIT

use std::collections::HashMap;

use tracing::trace;

use crate::config::Dictionary;
use crate::ConfError;

/// Nesting limit for `${path}` references that resolve to further references.
const MAX_SUBSTITUTION_DEPTH: usize = 32;

/// Read-only source of environment values.
///
/// An absent variable is `None`, which is different from a variable set to
/// the empty string.
pub trait Environment: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    InVariable,
    InVariableDefault,
}

/// Expand `$NAME`, `${NAME}` and `${NAME:default}` references in `text`.
///
/// `\$` is a literal dollar. The brace-less form takes everything up to the
/// end of the text (or the next `$` or `\$`) as the name, so `"$HOME/bin"`
/// looks up a variable called `HOME/bin`.
pub(crate) fn substitute(text: &str, dict: &Dictionary, depth: usize) -> Result<String, ConfError> {
    if !text.contains('$') {
        return Ok(text.to_string());
    }

    let mut out = String::with_capacity(text.len());
    let mut state = State::Normal;
    let mut braced = false;
    let mut name = String::new();
    let mut default = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match state {
            State::Normal => match ch {
                '\\' if chars.peek() == Some(&'$') => {
                    chars.next();
                    out.push('$');
                }
                '$' => {
                    braced = chars.next_if_eq(&'{').is_some();
                    state = State::InVariable;
                }
                _ => out.push(ch),
            },
            State::InVariable if braced => match ch {
                '}' => {
                    out.push_str(&resolve_variable(&name, None, dict, depth)?);
                    name.clear();
                    state = State::Normal;
                }
                ':' => state = State::InVariableDefault,
                _ => name.push(ch),
            },
            State::InVariable => match ch {
                '\\' if chars.peek() == Some(&'$') => {
                    chars.next();
                    flush_bare_variable(&mut out, &mut name, dict, depth)?;
                    out.push('$');
                    state = State::Normal;
                }
                '$' => {
                    flush_bare_variable(&mut out, &mut name, dict, depth)?;
                    braced = chars.next_if_eq(&'{').is_some();
                }
                _ => name.push(ch),
            },
            State::InVariableDefault => match ch {
                '}' => {
                    out.push_str(&resolve_variable(&name, Some(&default), dict, depth)?);
                    name.clear();
                    default.clear();
                    state = State::Normal;
                }
                _ => default.push(ch),
            },
        }
    }

    match state {
        State::Normal => {}
        State::InVariable if !braced => flush_bare_variable(&mut out, &mut name, dict, depth)?,
        State::InVariable | State::InVariableDefault => {
            return Err(ConfError::Substitution {
                name: name.trim().to_string(),
                message: format!("Unterminated variable reference in '{}'", text),
                hint: Some("Close the reference with '}' or escape the dollar as \\$".into()),
                code: Some(502),
            });
        }
    }

    Ok(out)
}

/// A lone trailing `$` stays literal.
fn flush_bare_variable(
    out: &mut String,
    name: &mut String,
    dict: &Dictionary,
    depth: usize,
) -> Result<(), ConfError> {
    if name.is_empty() {
        out.push('$');
    } else {
        out.push_str(&resolve_variable(name, None, dict, depth)?);
        name.clear();
    }
    Ok(())
}

fn resolve_variable(
    raw_name: &str,
    default: Option<&str>,
    dict: &Dictionary,
    depth: usize,
) -> Result<String, ConfError> {
    let name = raw_name.trim();
    if name.is_empty() {
        return Ok(String::new());
    }

    let mut sources = Vec::new();

    if dict.substitutes_env() {
        sources.push("environment");
        if let Some(value) = dict.environment().var(name) {
            trace!(name, "substituted from environment");
            return Ok(value);
        }
    }

    if dict.substitutes_config() {
        sources.push("configuration");
        if depth >= MAX_SUBSTITUTION_DEPTH {
            return Err(ConfError::Substitution {
                name: name.to_string(),
                message: format!("Reference nesting exceeds {} levels", MAX_SUBSTITUTION_DEPTH),
                hint: Some("Check for a value that refers back to itself".into()),
                code: Some(503),
            });
        }
        match dict.get_at_depth(name, depth + 1) {
            Ok(value) => {
                trace!(name, "substituted from configuration");
                return Ok(value.unwrap_or_default());
            }
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e),
        }
    }

    if let Some(default) = default {
        return Ok(default.trim().to_string());
    }

    Err(ConfError::Substitution {
        name: name.to_string(),
        message: format!("Variable not found in {}", sources.join(" or ")),
        hint: Some("Define the variable or give a default with ${NAME:default}".into()),
        code: Some(501),
    })
}

// -- Tests --
