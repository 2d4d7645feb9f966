use once_cell::sync::Lazy;
use regex::Regex;

use super::*;
use crate::path::PathTokenizer;

static SECTION_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\[\s*([^\]]*?)\s*\]\s*$").expect("section header pattern is valid"));

/// Cut the line at the first enabled comment character.
pub(super) fn strip_comments<'l>(line: &'l str, options: &KvOptions) -> &'l str {
    match options.comment_chars().filter_map(|c| line.find(c)).min() {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// The name inside a `[section]` header, if the line is one.
pub(super) fn section_header(line: &str) -> Option<&str> {
    SECTION_HEADER
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// `[.sub]` nests below the current section, anything else replaces it.
pub(super) fn apply_section(current: &str, header: &str) -> String {
    match header.strip_prefix('.') {
        Some(rest) if current.is_empty() => rest.to_string(),
        Some(rest) => format!("{}.{}", current, rest),
        None => header.to_string(),
    }
}

/// Split a trimmed line into key and optional value.
///
/// `=` wins over `:` when both are enabled and present.
pub(super) fn split_entry<'l>(
    text: &'l str,
    options: &KvOptions,
    line_no: usize,
    raw_line: &str,
) -> Result<(&'l str, Option<&'l str>), ConfError> {
    let separator = if options.equals_separator && text.contains('=') {
        Some('=')
    } else if options.colon_separator && text.contains(':') {
        Some(':')
    } else {
        None
    };

    let Some(separator) = separator else {
        if options.allow_missing_values {
            return Ok((text, None));
        }
        return Err(parse_error(line_no, raw_line, "Missing value for key", 202));
    };

    let parts: Vec<&str> = text.split(separator).collect();
    if parts.len() > 2 {
        return Err(parse_error(
            line_no,
            raw_line,
            &format!("Too many '{}' separators on one line", separator),
            203,
        ));
    }

    let key = parts[0].trim();
    // a key of only dots names no path and would overwrite the whole tree
    if matches!(PathTokenizer::new(key).next_segment(), Ok(None)) {
        return Err(parse_error(line_no, raw_line, "Missing key before separator", 204));
    }

    Ok((key, Some(parts[1].trim())))
}

pub(super) fn parse_error(line_no: usize, raw_line: &str, message: &str, code: u32) -> ConfError {
    ConfError::Parse {
        line: line_no,
        content: raw_line.to_string(),
        message: message.to_string(),
        hint: None,
        code: Some(code),
    }
}
