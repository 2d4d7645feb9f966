// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

use crate::ast::Node;
use crate::ConfError;

/// Convert a JSON value tree into nodes.
///
/// Numbers keep the text serde_json prints for them (`1.0` stays `"1.0"`),
/// booleans become `"true"` / `"false"`, and `null` becomes `Value(None)`.
impl From<JsonValue> for Node {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Node::Value(None),
            JsonValue::Bool(b) => Node::Value(Some(b.to_string())),
            JsonValue::Number(n) => Node::Value(Some(n.to_string())),
            JsonValue::String(s) => Node::Value(Some(s)),
            JsonValue::Array(items) => Node::Array(items.into_iter().map(Node::from).collect()),
            JsonValue::Object(map) => {
                Node::Object(map.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
            }
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        JsonValue::deserialize(deserializer).map(Node::from)
    }
}

/// Parse JSON text into a node tree.
pub fn parse_json(content: &str) -> Result<Node, ConfError> {
    serde_json::from_str::<Node>(content).map_err(|e| ConfError::Json {
        message: e.to_string(),
        line: e.line(),
        column: e.column(),
        hint: Some("Check the JSON syntax".into()),
        code: Some(601),
    })
}
