// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::ast::Node;
use crate::parser::{KvOptions, KvParser};
use crate::resolver::{Environment, ProcessEnvironment};
use crate::{json, ConfError};

mod access;
mod conversion;
mod helpers;

pub use conversion::Scalar;

/// A configuration tree plus the policy used when reading values out of it.
///
/// Every lookup goes through a dotted path (`server.ports[0]`). Values can be
/// post-processed with `$NAME` / `${NAME:default}` substitution from the
/// environment, from other paths of the same tree, or both.
///
/// A `Dictionary` owns its tree outright. [`Dictionary::get_config`] hands
/// out an independent copy of the subtree, so a `set` on either side is never
/// visible to the other.
#[derive(Clone)]
pub struct Dictionary {
    root: Option<Node>,
    substitute_env: bool,
    substitute_config: bool,
    environment: Arc<dyn Environment>,
}

impl Dictionary {
    /// Wrap a tree. `None` gives an empty dictionary where every lookup fails.
    pub fn new(root: Option<Node>) -> Self {
        Self {
            root,
            substitute_env: false,
            substitute_config: false,
            environment: Arc::new(ProcessEnvironment),
        }
    }

    pub fn empty() -> Self {
        Self::new(None)
    }

    /// Enable `$NAME` lookups in the environment.
    pub fn with_env_substitution(mut self, enabled: bool) -> Self {
        self.substitute_env = enabled;
        self
    }

    /// Enable `${path}` lookups inside this dictionary.
    pub fn with_config_substitution(mut self, enabled: bool) -> Self {
        self.substitute_config = enabled;
        self
    }

    /// Replace the process environment with another source, e.g. a `HashMap` in tests.
    pub fn with_environment<E: Environment + 'static>(mut self, environment: E) -> Self {
        self.environment = Arc::new(environment);
        self
    }

    pub fn substitutes_env(&self) -> bool {
        self.substitute_env
    }

    pub fn substitutes_config(&self) -> bool {
        self.substitute_config
    }

    pub(crate) fn environment(&self) -> &dyn Environment {
        self.environment.as_ref()
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub fn into_root(self) -> Option<Node> {
        self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// A dictionary over `node` that inherits this one's substitution policy.
    fn child(&self, node: Node) -> Self {
        Self {
            root: Some(node),
            substitute_env: self.substitute_env,
            substitute_config: self.substitute_config,
            environment: Arc::clone(&self.environment),
        }
    }

    /// Parse JSON text (no file I/O).
    pub fn from_json_str(content: &str) -> Result<Self, ConfError> {
        Ok(Self::new(Some(json::parse_json(content)?)))
    }

    /// Parse INI text: `#`/`;` comments, `[section]` headers, quoted values.
    pub fn from_ini_str(content: &str) -> Result<Self, ConfError> {
        Self::from_kv_str(content, KvOptions::ini())
    }

    /// Parse Java-properties text: `#`/`!` comments, bare keys, `\` continuation lines.
    pub fn from_properties_str(content: &str) -> Result<Self, ConfError> {
        Self::from_kv_str(content, KvOptions::properties())
    }

    /// Parse delimited key/value text with an explicit parser configuration.
    pub fn from_kv_str(content: &str, options: KvOptions) -> Result<Self, ConfError> {
        KvParser::new(options)?.parse(content)
    }

    /// Load a configuration file, picking the format from its extension.
    ///
    /// `.json`, `.properties` and `.ini` are recognised (case-insensitive).
    /// A leading `~/` expands to the home directory.
    ///
    /// # Example
    /// ```no_run
    /// # use confpath::Dictionary;
    /// let config = Dictionary::from_file("settings.ini")?;
    /// let port: u16 = config.get_as("server.port")?;
    /// # Ok::<(), confpath::ConfError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfError> {
        let path = helpers::expand_home(path.as_ref())?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let loader: fn(&str) -> Result<Self, ConfError> = match extension.as_deref() {
            Some("json") => Self::from_json_str,
            Some("properties") => Self::from_properties_str,
            Some("ini") => Self::from_ini_str,
            other => {
                return Err(ConfError::File {
                    message: format!(
                        "Unsupported configuration file extension '{}'",
                        other.unwrap_or("")
                    ),
                    path: path.to_string_lossy().to_string(),
                    hint: Some("Use a .json, .ini or .properties file".into()),
                    code: Some(702),
                });
            }
        };

        debug!(path = %path.display(), format = extension.as_deref().unwrap_or(""), "loading config file");
        let content = read_file(&path)?;
        loader(&content)
    }

    /// Load a file with the key/value parser regardless of its extension.
    pub fn from_file_with<P: AsRef<Path>>(path: P, options: KvOptions) -> Result<Self, ConfError> {
        let path = helpers::expand_home(path.as_ref())?;
        debug!(path = %path.display(), "loading key/value file with explicit options");
        let content = read_file(&path)?;
        Self::from_kv_str(&content, options)
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Node> for Dictionary {
    fn from(node: Node) -> Self {
        Self::new(Some(node))
    }
}

impl fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dictionary")
            .field("root", &self.root)
            .field("substitute_env", &self.substitute_env)
            .field("substitute_config", &self.substitute_config)
            .finish_non_exhaustive()
    }
}

fn read_file(path: &Path) -> Result<String, ConfError> {
    fs::read_to_string(path).map_err(|e| ConfError::File {
        message: format!("Failed to read file: {}", e),
        path: path.to_string_lossy().to_string(),
        hint: Some("Check that the file exists and is readable".into()),
        code: Some(701),
    })
}
