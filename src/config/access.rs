use tracing::trace;

use super::*;
use crate::path::{self, is_root};
use crate::resolver;

impl Dictionary {
    /// Get the text at `path`, after substitution.
    ///
    /// `Ok(None)` means the value exists and is an explicit null.
    ///
    /// # Examples
    /// ```
    /// # use confpath::{Dictionary, Node};
    /// let config = Dictionary::from(Node::object([
    ///     ("server", Node::object([("ports", Node::array([Node::value("80")]))])),
    /// ]));
    /// assert_eq!(config.get("server.ports[0]")?, Some("80".to_string()));
    /// # Ok::<(), confpath::ConfError>(())
    /// ```
    ///
    /// # Errors
    /// Not-found, out-of-bounds, type mismatch, path syntax and substitution errors.
    pub fn get(&self, path: &str) -> Result<Option<String>, ConfError> {
        self.get_at_depth(path, 0)
    }

    /// Like [`Dictionary::get`], but a missing path yields `default`.
    ///
    /// Only not-found errors are replaced; out-of-bounds and type errors still surface.
    pub fn get_or(&self, path: &str, default: &str) -> Result<Option<String>, ConfError> {
        match self.get(path) {
            Err(e) if e.is_not_found() => Ok(Some(default.to_string())),
            other => other,
        }
    }

    /// Get a typed value.
    ///
    /// # Examples
    /// ```
    /// # use confpath::Dictionary;
    /// let config = Dictionary::from_ini_str("[server]\nport = 8080\ndebug = yes\n")?;
    /// let port: u16 = config.get_as("server.port")?;
    /// let debug: bool = config.get_as("server.debug")?;
    /// assert_eq!((port, debug), (8080, true));
    /// # Ok::<(), confpath::ConfError>(())
    /// ```
    pub fn get_as<T>(&self, path: &str) -> Result<T, ConfError>
    where
        T: TryFrom<Scalar, Error = ConfError>,
    {
        let text = self.get(path)?;
        T::try_from(Scalar::new(text)).map_err(|e| e.with_path(path))
    }

    /// Get a typed value with a fallback for missing paths.
    ///
    /// A value that exists but fails to convert is still an error.
    pub fn get_as_or<T>(&self, path: &str, default: T) -> Result<T, ConfError>
    where
        T: TryFrom<Scalar, Error = ConfError>,
    {
        match self.get(path) {
            Ok(text) => T::try_from(Scalar::new(text)).map_err(|e| e.with_path(path)),
            Err(e) if e.is_not_found() => Ok(default),
            Err(e) => Err(e),
        }
    }

    pub(crate) fn get_at_depth(&self, path: &str, depth: usize) -> Result<Option<String>, ConfError> {
        let node = if is_root(path) {
            let root = self.root.as_ref().ok_or_else(|| helpers::empty_dictionary(path))?;
            if !root.is_value() {
                return Err(ConfError::TypeMismatch {
                    path: path.to_string(),
                    message: format!("Root is not a value but an {}", root.kind()),
                    hint: Some("Query a path below the root instead".into()),
                    code: Some(308),
                });
            }
            root
        } else {
            helpers::descend(self.root.as_ref(), path)?
        };

        match node {
            Node::Value(None) => Ok(None),
            Node::Value(Some(text)) if self.substitute_env || self.substitute_config => {
                resolver::substitute(text, self, depth).map(Some)
            }
            Node::Value(Some(text)) => Ok(Some(text.clone())),
            Node::Object(_) | Node::Array(_) => Err(ConfError::TypeMismatch {
                path: path.to_string(),
                message: format!("Value expected but {} found", node.kind()),
                hint: Some("Use get_config to work with objects and arrays".into()),
                code: Some(307),
            }),
        }
    }

    /// A new dictionary over a copy of whatever sits at `path`.
    ///
    /// The result inherits the substitution policy and environment; `${path}`
    /// references inside it resolve relative to its own root.
    pub fn get_config(&self, path: &str) -> Result<Dictionary, ConfError> {
        if is_root(path) {
            if self.root.is_none() {
                return Err(helpers::empty_dictionary(path));
            }
            return Ok(self.clone());
        }
        let node = helpers::descend(self.root.as_ref(), path)?;
        Ok(self.child(node.clone()))
    }

    /// Write a value at `path`, creating objects along the way.
    ///
    /// Whatever was at `path` before, including a whole subtree, is replaced.
    /// Writing through array indices is not supported.
    pub fn set(&mut self, path: &str, value: impl Into<String>) -> Result<(), ConfError> {
        self.write(path, Node::Value(Some(value.into())))
    }

    /// Write an explicit null at `path`.
    pub fn set_null(&mut self, path: &str) -> Result<(), ConfError> {
        self.write(path, Node::Value(None))
    }

    fn write(&mut self, path: &str, leaf: Node) -> Result<(), ConfError> {
        let segments = path::tokenize(path)?;
        let keys = helpers::writable_keys(self.root.as_ref(), path, &segments)?;
        trace!(path, "set");
        let root = self.root.take();
        self.root = Some(helpers::rebuild(root, &keys, leaf));
        Ok(())
    }

    /// Check if any node exists at `path`.
    pub fn has(&self, path: &str) -> bool {
        self.locate(path).is_ok()
    }

    /// Keys of the object at `path`, in insertion order.
    pub fn keys(&self, path: &str) -> Result<Vec<String>, ConfError> {
        match self.locate(path)? {
            Node::Object(children) => Ok(children.keys().cloned().collect()),
            other => Err(ConfError::TypeMismatch {
                path: path.to_string(),
                message: format!("Object expected but {} found", other.kind()),
                hint: Some("Only objects have keys".into()),
                code: Some(309),
            }),
        }
    }

    /// Number of children of the array or object at `path`.
    pub fn len(&self, path: &str) -> Result<usize, ConfError> {
        match self.locate(path)? {
            Node::Object(children) => Ok(children.len()),
            Node::Array(items) => Ok(items.len()),
            Node::Value(_) => Err(ConfError::TypeMismatch {
                path: path.to_string(),
                message: "Array or object expected but value found".into(),
                hint: None,
                code: Some(309),
            }),
        }
    }

    fn locate(&self, path: &str) -> Result<&Node, ConfError> {
        if is_root(path) {
            self.root.as_ref().ok_or_else(|| helpers::empty_dictionary(path))
        } else {
            helpers::descend(self.root.as_ref(), path)
        }
    }
}
