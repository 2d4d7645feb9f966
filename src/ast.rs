use indexmap::IndexMap;

/// One element of the configuration tree.
///
/// Scalars are always text. Numbers and booleans coming from typed formats are
/// stringified on import; `Value(None)` is an explicit null.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Value(Option<String>),
    Object(IndexMap<String, Node>),
    Array(Vec<Node>),
}

impl Node {
    pub fn value(text: impl Into<String>) -> Self {
        Node::Value(Some(text.into()))
    }

    pub fn null() -> Self {
        Node::Value(None)
    }

    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Node)>,
    {
        Node::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn array(items: impl IntoIterator<Item = Node>) -> Self {
        Node::Array(items.into_iter().collect())
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Node>> {
        if let Node::Object(children) = self {
            Some(children)
        } else {
            None
        }
    }

    pub fn as_array(&self) -> Option<&[Node]> {
        if let Node::Array(items) = self {
            Some(items)
        } else {
            None
        }
    }

    /// The text of a `Value` node; `None` for nulls and containers.
    pub fn as_text(&self) -> Option<&str> {
        if let Node::Value(Some(text)) = self {
            Some(text)
        } else {
            None
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Node::Value(_))
    }

    /// Lower-case variant name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Value(_) => "value",
            Node::Object(_) => "object",
            Node::Array(_) => "array",
        }
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::value(text)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Value(Some(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_produce_expected_variants() {
        let node = Node::object([
            ("name", Node::value("app")),
            ("ports", Node::array([Node::value("80"), Node::value("443")])),
            ("nothing", Node::null()),
        ]);

        let obj = node.as_object().expect("object");
        assert_eq!(obj.get("name").and_then(Node::as_text), Some("app"));
        assert_eq!(obj.get("ports").and_then(Node::as_array).map(|a| a.len()), Some(2));
        assert_eq!(obj.get("nothing"), Some(&Node::Value(None)));
        assert_eq!(node.kind(), "object");
    }

    #[test]
    fn object_keeps_insertion_order() {
        let node = Node::object([("b", Node::null()), ("a", Node::null()), ("c", Node::null())]);
        let keys: Vec<&str> = node.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn null_is_not_empty_text() {
        assert_ne!(Node::null(), Node::value(""));
        assert_eq!(Node::null().as_text(), None);
        assert_eq!(Node::value("").as_text(), Some(""));
        assert!(Node::null().is_value());
        assert!(!Node::array([]).is_value());
    }
}
