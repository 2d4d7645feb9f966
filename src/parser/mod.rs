// Author: Dustin Pilgrim
// License: MIT

use tracing::{debug, trace};

use crate::ast::Node;
use crate::config::Dictionary;
use crate::utils::strip_matching_quotes;
use crate::ConfError;

mod line;
mod options;

pub use options::KvOptions;

/// A value that ended in `\` and is waiting for more lines.
struct Continuation {
    key: String,
    buffer: String,
    line: usize,
    content: String,
}

/// Line-oriented parser for INI-like and properties-like text.
///
/// Every entry is written into a [`Dictionary`] with `set`, so dotted keys
/// and section prefixes build nested objects.
#[derive(Debug, Clone)]
pub struct KvParser {
    options: KvOptions,
}

impl KvParser {
    /// Fails straight away when the options enable no separator.
    pub fn new(options: KvOptions) -> Result<Self, ConfError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &KvOptions {
        &self.options
    }

    /// Parse `text` into a fresh dictionary whose root is an object.
    pub fn parse(&self, text: &str) -> Result<Dictionary, ConfError> {
        let mut dict = Dictionary::new(Some(Node::Object(Default::default())));
        self.parse_into(text, &mut dict)?;
        Ok(dict)
    }

    /// Parse `text` on top of an existing dictionary. Returns the number of entries written.
    pub fn parse_into(&self, text: &str, dict: &mut Dictionary) -> Result<usize, ConfError> {
        let mut section = String::new();
        let mut pending: Option<Continuation> = None;
        let mut written = 0;

        for (idx, raw_line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let stripped = line::strip_comments(raw_line, &self.options);

            if let Some(mut cont) = pending.take() {
                let piece = stripped.trim_end();
                if let Some(head) = piece.strip_suffix('\\') {
                    cont.buffer.push_str(head);
                    pending = Some(cont);
                } else {
                    cont.buffer.push_str(stripped);
                    self.commit(dict, &cont.key, &cont.buffer, cont.line, &cont.content)?;
                    written += 1;
                }
                continue;
            }

            if self.options.sections {
                if let Some(header) = line::section_header(stripped) {
                    section = line::apply_section(&section, header);
                    debug!(line = line_no, section = %section, "entered section");
                    continue;
                }
            }

            let trimmed = stripped.trim();
            if trimmed.is_empty() {
                continue;
            }

            let (key, value) = line::split_entry(trimmed, &self.options, line_no, raw_line)?;
            let full_key = if section.is_empty() {
                key.to_string()
            } else {
                format!("{}.{}", section, key)
            };
            let value = value.unwrap_or("");

            if self.options.multiline {
                if let Some(head) = value.strip_suffix('\\') {
                    pending = Some(Continuation {
                        key: full_key,
                        buffer: head.to_string(),
                        line: line_no,
                        content: raw_line.to_string(),
                    });
                    continue;
                }
            }

            self.commit(dict, &full_key, value, line_no, raw_line)?;
            written += 1;
        }

        // a continuation on the last line simply ends there
        if let Some(cont) = pending {
            self.commit(dict, &cont.key, &cont.buffer, cont.line, &cont.content)?;
            written += 1;
        }

        debug!(entries = written, "parsed key/value text");
        Ok(written)
    }

    fn commit(
        &self,
        dict: &mut Dictionary,
        key: &str,
        value: &str,
        line_no: usize,
        raw_line: &str,
    ) -> Result<(), ConfError> {
        let value = value.trim();
        let value = if self.options.strip_quotes {
            strip_matching_quotes(value)
        } else {
            value
        };

        trace!(line = line_no, key, "writing entry");
        dict.set(key, value)
            .map_err(|e| line::parse_error(line_no, raw_line, &e.to_string(), 205))
    }
}

#[cfg(test)]
mod tests;
