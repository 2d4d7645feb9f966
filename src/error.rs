// Author: Dustin Pilgrim
// License: MIT

use thiserror::Error;

/// The main error type for path lookups, substitution and parsing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfError {
    /// Raised when a path string has a malformed `[index]` segment.
    #[error("[CONF] Path Syntax Error in '{path}': {message} (segment '{segment}'){}", suffix(.hint, .code))]
    PathSyntax {
        path: String,
        segment: String,
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// The only lookup failure a caller-supplied default can recover from.
    #[error("[CONF] Not Found: path '{path}' does not exist at '{resolved}'{}", suffix(.hint, .code))]
    NotFound {
        path: String,
        resolved: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[CONF] Out Of Bounds: index {index} in '{path}' exceeds array length {len} at '{resolved}'{}", suffix(.hint, .code))]
    OutOfBounds {
        path: String,
        resolved: String,
        index: usize,
        len: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[CONF] Type Error in '{path}': {message}{}", suffix(.hint, .code))]
    TypeMismatch {
        path: String,
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[CONF] Unsupported Operation on '{path}': {message}{}", suffix(.hint, .code))]
    Unsupported {
        path: String,
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised by typed lookups when the text cannot become the requested type.
    #[error("[CONF] Conversion Error: cannot convert {value} at '{path}' to {target}{}", suffix(.hint, .code))]
    Conversion {
        path: String,
        value: String,
        target: &'static str,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[CONF] Substitution Error for '{name}': {message}{}", suffix(.hint, .code))]
    Substitution {
        name: String,
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[CONF] Parse Error at line {line} ('{content}'): {message}{}", suffix(.hint, .code))]
    Parse {
        line: usize,
        content: String,
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[CONF] Invalid Parser Options: {message}{}", suffix(.hint, .code))]
    InvalidOptions {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[CONF] JSON Error at {line}:{column}: {message}{}", suffix(.hint, .code))]
    Json {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[CONF] File Error '{path}': {message}{}", suffix(.hint, .code))]
    File {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

fn suffix(hint: &Option<String>, code: &Option<u32>) -> String {
    format!(
        "{}{}",
        hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
        code.map_or(String::new(), |c| format!(" Code: {}", c))
    )
}

impl ConfError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfError::NotFound { .. })
    }

    pub fn code(&self) -> Option<u32> {
        match self {
            ConfError::PathSyntax { code, .. }
            | ConfError::NotFound { code, .. }
            | ConfError::OutOfBounds { code, .. }
            | ConfError::TypeMismatch { code, .. }
            | ConfError::Unsupported { code, .. }
            | ConfError::Conversion { code, .. }
            | ConfError::Substitution { code, .. }
            | ConfError::Parse { code, .. }
            | ConfError::InvalidOptions { code, .. }
            | ConfError::Json { code, .. }
            | ConfError::File { code, .. } => *code,
        }
    }

    /// Helper for file-related errors when loading configs.
    pub fn file_error(message: impl Into<String>, path: impl Into<String>) -> Self {
        ConfError::File {
            message: message.into(),
            path: path.into(),
            hint: Some("Check file path and permissions".into()),
            code: Some(700),
        }
    }

    /// Fills in the lookup path on a conversion error raised by a `TryFrom<Scalar>` impl.
    pub(crate) fn with_path(self, lookup: &str) -> Self {
        match self {
            ConfError::Conversion { value, target, hint, code, .. } => ConfError::Conversion {
                path: lookup.to_string(),
                value,
                target,
                hint,
                code,
            },
            other => other,
        }
    }
}
