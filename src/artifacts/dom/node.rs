use derive_new::new;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node inside one snapshot
pub type NodeId = i64;

/// Identifier carried by nodes the highlighter synthesizes
pub const SYNTHETIC_NODE_ID: NodeId = -1;

/// Position of a node inside the document arena
pub type NodeIndex = usize;

/// DOM node kind, using the numeric codes of the DOM `nodeType` property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Element,
    Attribute,
    Text,
    CData,
    ProcessingInstruction,
    Comment,
    Document,
    DocumentType,
    DocumentFragment,
    Other(i64),
}

impl NodeKind {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => NodeKind::Element,
            2 => NodeKind::Attribute,
            3 => NodeKind::Text,
            4 => NodeKind::CData,
            7 => NodeKind::ProcessingInstruction,
            8 => NodeKind::Comment,
            9 => NodeKind::Document,
            10 => NodeKind::DocumentType,
            11 => NodeKind::DocumentFragment,
            other => NodeKind::Other(other),
        }
    }

    pub fn code(self) -> i64 {
        match self {
            NodeKind::Element => 1,
            NodeKind::Attribute => 2,
            NodeKind::Text => 3,
            NodeKind::CData => 4,
            NodeKind::ProcessingInstruction => 7,
            NodeKind::Comment => 8,
            NodeKind::Document => 9,
            NodeKind::DocumentType => 10,
            NodeKind::DocumentFragment => 11,
            NodeKind::Other(code) => code,
        }
    }
}

impl Serialize for NodeKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.code())
    }
}

impl<'de> Deserialize<'de> for NodeKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(NodeKind::from_code)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Element => write!(f, "element"),
            NodeKind::Attribute => write!(f, "attribute"),
            NodeKind::Text => write!(f, "text"),
            NodeKind::CData => write!(f, "cdata"),
            NodeKind::ProcessingInstruction => write!(f, "processing-instruction"),
            NodeKind::Comment => write!(f, "comment"),
            NodeKind::Document => write!(f, "document"),
            NodeKind::DocumentType => write!(f, "doctype"),
            NodeKind::DocumentFragment => write!(f, "fragment"),
            NodeKind::Other(code) => write!(f, "kind({code})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// One slot of the document arena
///
/// `inserted` and `appended` hold synthesized marker nodes that render
/// immediately before and after this node. They are not children and are
/// never visited by the segmenter.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub name: String,
    pub value: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<NodeIndex>,
    pub content_document: Option<NodeIndex>,
    pub inserted: Vec<NodeIndex>,
    pub appended: Vec<NodeIndex>,
    pub parent: Option<NodeIndex>,
    pub modified: bool,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind, name: impl Into<String>) -> Self {
        Node {
            id,
            kind,
            name: name.into(),
            value: String::new(),
            attributes: Vec::new(),
            children: Vec::new(),
            content_document: None,
            inserted: Vec::new(),
            appended: Vec::new(),
            parent: None,
            modified: false,
        }
    }

    pub fn element(id: NodeId, name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Node {
            attributes,
            ..Node::new(id, NodeKind::Element, name)
        }
    }

    pub fn text(id: NodeId, value: impl Into<String>) -> Self {
        Node {
            value: value.into(),
            ..Node::new(id, NodeKind::Text, "#text")
        }
    }

    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    /// Case-insensitive tag name check; snapshots usually carry upper-case names
    pub fn is_named(&self, name: &str) -> bool {
        self.is_element() && self.name.eq_ignore_ascii_case(name)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value.as_str())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|attribute| attribute.name == name)
    }

    /// Whether the whitespace separated `class` attribute contains `token`
    pub fn has_class(&self, token: &str) -> bool {
        self.is_element()
            && self
                .attribute("class")
                .is_some_and(|classes| classes.split_whitespace().any(|class| class == token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, NodeKind::Element)]
    #[case(3, NodeKind::Text)]
    #[case(8, NodeKind::Comment)]
    #[case(9, NodeKind::Document)]
    #[case(10, NodeKind::DocumentType)]
    #[case(42, NodeKind::Other(42))]
    fn node_kind_codes_round_trip(#[case] code: i64, #[case] kind: NodeKind) {
        assert_eq!(NodeKind::from_code(code), kind);
        assert_eq!(kind.code(), code);
    }

    #[test]
    fn class_tokens_match_whole_words_only() {
        let node = Node::element(
            7,
            "SPAN",
            vec![Attribute::new("class".into(), "dd-diffx note".into())],
        );

        assert!(node.has_class("note"));
        assert!(!node.has_class("dd-diff"));
        assert!(node.is_named("span"));
    }
}
