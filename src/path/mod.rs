// Author: Dustin Pilgrim
// License: MIT

use std::fmt::{self, Write};
use std::str::Split;

use crate::ConfError;

/// One atomic step of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Property(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Property(name) => write!(f, "{}", name),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// Render segments back into dotted notation, attaching indices directly: `server.ports[0]`.
pub fn format_path(segments: &[PathSegment]) -> String {
    let mut out = String::new();
    for seg in segments {
        match seg {
            PathSegment::Property(name) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(name);
            }
            PathSegment::Index(index) => {
                let _ = write!(out, "[{}]", index);
            }
        }
    }
    out
}

/// `.` and the empty string both address the root itself.
pub fn is_root(path: &str) -> bool {
    let trimmed = path.trim();
    trimmed.is_empty() || trimmed == "."
}

/// Pull-style tokenizer over a dotted path.
///
/// Segments are produced one at a time so callers can interleave tokenizing
/// with tree descent; everything handed out so far stays available through
/// [`PathTokenizer::consumed`] for diagnostics.
pub struct PathTokenizer<'a> {
    path: &'a str,
    raw: Split<'a, char>,
    pending: Option<PathSegment>,
    consumed: Vec<PathSegment>,
    failed: bool,
}

impl<'a> PathTokenizer<'a> {
    pub fn new(path: &'a str) -> Self {
        PathTokenizer {
            path,
            raw: path.split('.'),
            pending: None,
            consumed: Vec::new(),
            failed: false,
        }
    }

    pub fn path(&self) -> &'a str {
        self.path
    }

    pub fn consumed(&self) -> &[PathSegment] {
        &self.consumed
    }

    pub fn resolved_so_far(&self) -> String {
        format_path(&self.consumed)
    }

    /// Produce the next segment, `Ok(None)` once the path is exhausted.
    pub fn next_segment(&mut self) -> Result<Option<PathSegment>, ConfError> {
        if self.failed {
            return Ok(None);
        }
        if let Some(seg) = self.pending.take() {
            return Ok(Some(self.record(seg)));
        }

        while let Some(raw) = self.raw.next() {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }

            if raw.starts_with('[') && raw.ends_with(']') {
                let index = parse_index(self.path, raw).inspect_err(|_| self.failed = true)?;
                return Ok(Some(self.record(PathSegment::Index(index))));
            }

            // `name[i]` shorthand: split at the last '['
            if raw.ends_with(']') && !raw.starts_with('[') {
                if let Some(open) = raw.rfind('[') {
                    let index =
                        parse_index(self.path, &raw[open..]).inspect_err(|_| self.failed = true)?;
                    self.pending = Some(PathSegment::Index(index));
                    let name = raw[..open].to_string();
                    return Ok(Some(self.record(PathSegment::Property(name))));
                }
            }

            return Ok(Some(self.record(PathSegment::Property(raw.to_string()))));
        }

        Ok(None)
    }

    fn record(&mut self, seg: PathSegment) -> PathSegment {
        self.consumed.push(seg.clone());
        seg
    }
}

impl Iterator for PathTokenizer<'_> {
    type Item = Result<PathSegment, ConfError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_segment().transpose()
    }
}

/// Tokenize a whole path at once.
pub fn tokenize(path: &str) -> Result<Vec<PathSegment>, ConfError> {
    PathTokenizer::new(path).collect()
}

fn parse_index(path: &str, segment: &str) -> Result<usize, ConfError> {
    let inner = &segment[1..segment.len() - 1];

    if inner.is_empty() {
        return Err(ConfError::PathSyntax {
            path: path.to_string(),
            segment: segment.to_string(),
            message: "Empty array index".into(),
            hint: Some("Put a non-negative integer between the brackets, e.g. [0]".into()),
            code: Some(101),
        });
    }

    if !inner.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConfError::PathSyntax {
            path: path.to_string(),
            segment: segment.to_string(),
            message: format!("Array index '{}' is not a non-negative integer", inner),
            hint: Some("Only digits are allowed between the brackets".into()),
            code: Some(102),
        });
    }

    inner.parse::<usize>().map_err(|e| ConfError::PathSyntax {
        path: path.to_string(),
        segment: segment.to_string(),
        message: format!("Array index '{}' is out of range: {}", inner, e),
        hint: None,
        code: Some(103),
    })
}
