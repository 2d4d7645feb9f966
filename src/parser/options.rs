use serde::{Deserialize, Serialize};

use crate::ConfError;

/// Switches for the key/value parser. Every option is independent.
///
/// At least one separator has to be enabled. The presets cover the two
/// common formats; anything else can be assembled field by field, or
/// deserialized (missing fields default to `false`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KvOptions {
    /// `#` starts a comment.
    pub hash_comments: bool,
    /// `;` starts a comment.
    pub semicolon_comments: bool,
    /// `!` starts a comment.
    pub bang_comments: bool,
    /// `[section]` headers prefix the keys that follow.
    pub sections: bool,
    /// Remove one matching pair of `"` or `'` around values.
    pub strip_quotes: bool,
    pub equals_separator: bool,
    pub colon_separator: bool,
    /// A line with a key and no separator stores an empty string.
    pub allow_missing_values: bool,
    /// A value ending in `\` continues on the next line.
    pub multiline: bool,
}

impl KvOptions {
    /// INI conventions.
    pub fn ini() -> Self {
        KvOptions {
            hash_comments: true,
            semicolon_comments: true,
            sections: true,
            strip_quotes: true,
            equals_separator: true,
            colon_separator: true,
            ..KvOptions::default()
        }
    }

    /// Java `.properties` conventions.
    pub fn properties() -> Self {
        KvOptions {
            hash_comments: true,
            bang_comments: true,
            equals_separator: true,
            colon_separator: true,
            allow_missing_values: true,
            multiline: true,
            ..KvOptions::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfError> {
        if !self.equals_separator && !self.colon_separator {
            return Err(ConfError::InvalidOptions {
                message: "No key/value separator is enabled".into(),
                hint: Some("Enable equals_separator, colon_separator or both".into()),
                code: Some(201),
            });
        }
        Ok(())
    }

    pub(super) fn comment_chars(&self) -> impl Iterator<Item = char> {
        [
            ('#', self.hash_comments),
            (';', self.semicolon_comments),
            ('!', self.bang_comments),
        ]
        .into_iter()
        .filter_map(|(c, enabled)| enabled.then_some(c))
    }
}
