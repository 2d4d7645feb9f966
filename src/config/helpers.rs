use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::ast::Node;
use crate::path::{format_path, PathSegment, PathTokenizer};
use crate::ConfError;

/// Expand "~/" to the home directory.
pub(super) fn expand_home(raw_path: &Path) -> Result<PathBuf, ConfError> {
    match raw_path.strip_prefix("~") {
        Ok(rest) => {
            let home = dirs::home_dir().ok_or_else(|| {
                ConfError::file_error(
                    "Could not determine home directory for ~ expansion",
                    raw_path.to_string_lossy(),
                )
            })?;
            Ok(home.join(rest))
        }
        Err(_) => Ok(raw_path.to_path_buf()),
    }
}

/// Text of everything the tokenizer resolved before its latest segment.
fn resolved_before(tokens: &PathTokenizer) -> String {
    let consumed = tokens.consumed();
    let resolved = format_path(&consumed[..consumed.len().saturating_sub(1)]);
    if resolved.is_empty() {
        "<root>".into()
    } else {
        resolved
    }
}

pub(super) fn empty_dictionary(path: &str) -> ConfError {
    ConfError::NotFound {
        path: path.to_string(),
        resolved: "<root>".into(),
        hint: Some("The dictionary is empty".into()),
        code: Some(302),
    }
}

/// Walk `path` down from `root`, tokenizing as we go.
pub(super) fn descend<'n>(root: Option<&'n Node>, path: &str) -> Result<&'n Node, ConfError> {
    let mut tokens = PathTokenizer::new(path);
    let mut current = root.ok_or_else(|| empty_dictionary(path))?;

    while let Some(seg) = tokens.next_segment()? {
        current = match (current, &seg) {
            (Node::Value(_), PathSegment::Property(name)) => {
                return Err(ConfError::NotFound {
                    path: path.to_string(),
                    resolved: resolved_before(&tokens),
                    hint: Some(format!("'{}' is a value and has no property '{}'", resolved_before(&tokens), name)),
                    code: Some(303),
                });
            }
            (Node::Object(children), PathSegment::Property(name)) => {
                children.get(name).ok_or_else(|| ConfError::NotFound {
                    path: path.to_string(),
                    resolved: resolved_before(&tokens),
                    hint: Some(format!("No key '{}' here", name)),
                    code: Some(301),
                })?
            }
            (Node::Array(items), PathSegment::Index(index)) => {
                items.get(*index).ok_or_else(|| ConfError::OutOfBounds {
                    path: path.to_string(),
                    resolved: resolved_before(&tokens),
                    index: *index,
                    len: items.len(),
                    hint: None,
                    code: Some(304),
                })?
            }
            (Node::Array(_), PathSegment::Property(name)) => {
                return Err(ConfError::TypeMismatch {
                    path: path.to_string(),
                    message: format!(
                        "Cannot look up property '{}' in the array at '{}'",
                        name,
                        resolved_before(&tokens)
                    ),
                    hint: Some("Use [index] to address array elements".into()),
                    code: Some(306),
                });
            }
            (node, PathSegment::Index(index)) => {
                return Err(ConfError::TypeMismatch {
                    path: path.to_string(),
                    message: format!(
                        "Cannot apply index [{}] to the {} at '{}'",
                        index,
                        node.kind(),
                        resolved_before(&tokens)
                    ),
                    hint: Some("Only arrays can be indexed".into()),
                    code: Some(305),
                });
            }
        };
    }

    Ok(current)
}

/// Check that `segments` can be written and return them as plain keys.
///
/// Index segments and descending through an existing array are rejected,
/// before anything in the tree is touched.
pub(super) fn writable_keys<'s>(
    root: Option<&Node>,
    path: &str,
    segments: &'s [PathSegment],
) -> Result<Vec<&'s str>, ConfError> {
    let mut keys = Vec::with_capacity(segments.len());
    let mut current = root;

    for (i, seg) in segments.iter().enumerate() {
        let name = match seg {
            PathSegment::Property(name) => name.as_str(),
            PathSegment::Index(index) => {
                return Err(ConfError::Unsupported {
                    path: path.to_string(),
                    message: format!("Setting values through array index [{}] is not supported", index),
                    hint: Some("Only object keys can be written".into()),
                    code: Some(310),
                });
            }
        };

        current = match current {
            Some(Node::Object(children)) => children.get(name),
            Some(Node::Array(_)) => {
                return Err(ConfError::Unsupported {
                    path: path.to_string(),
                    message: format!(
                        "Cannot write through the array at '{}'",
                        format_path(&segments[..i])
                    ),
                    hint: Some("Arrays cannot be modified with set".into()),
                    code: Some(311),
                });
            }
            // values and missing nodes get replaced by fresh objects
            _ => None,
        };
        keys.push(name);
    }

    Ok(keys)
}

/// Rebuild the object chain along `keys`, putting `leaf` at the end.
///
/// Each object on the way is taken apart and reassembled with the updated
/// child; siblings move over untouched and keep their position.
pub(super) fn rebuild(node: Option<Node>, keys: &[&str], leaf: Node) -> Node {
    let Some((key, rest)) = keys.split_first() else {
        return leaf;
    };

    let mut children = match node {
        Some(Node::Object(children)) => children,
        _ => IndexMap::new(),
    };
    let existing = children
        .get_mut(*key)
        .map(|slot| std::mem::replace(slot, Node::Value(None)));
    children.insert((*key).to_string(), rebuild(existing, rest, leaf));

    Node::Object(children)
}
