use crate::artifacts::core::{DiffError, Result};
use crate::artifacts::dom::node::{Attribute, Node, NodeId, NodeIndex, NodeKind};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::str::FromStr;

/// Node shape as delivered by a DevTools-style `DOM.getDocument` call
///
/// Every field is optional here so that missing fields surface as
/// `MalformedTree` with the offending node id instead of a bare serde error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    node_id: Option<NodeId>,
    node_type: Option<i64>,
    node_name: Option<String>,
    node_value: Option<String>,
    attributes: Option<Vec<String>>,
    children: Option<Vec<RawNode>>,
    content_document: Option<Box<RawNode>>,
    #[serde(default)]
    inserted_nodes: Vec<RawNode>,
    #[serde(default)]
    appended_nodes: Vec<RawNode>,
    #[serde(default)]
    modified: bool,
}

/// A document snapshot stored as an arena of nodes
///
/// Nodes address each other by `NodeIndex`. Replacing a node swaps the whole
/// slot, so a node never changes its kind behind a live index. Slots that
/// become unreachable after a replacement are left in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeIndex,
}

impl Document {
    /// Builds a document around a single root node
    pub fn with_root(root: Node) -> Self {
        Document {
            nodes: vec![root],
            root: 0,
        }
    }

    /// Accepts either `{ "root": node }` or a bare node object
    pub fn from_json(value: Value) -> Result<Self> {
        let value = match value {
            Value::Object(mut object) if object.contains_key("root") => object
                .remove("root")
                .ok_or_else(|| DiffError::malformed(None, "missing root"))?,
            other => other,
        };
        let raw = RawNode::deserialize(value)
            .map_err(|error| DiffError::malformed(None, error.to_string()))?;

        let mut document = Document {
            nodes: Vec::new(),
            root: 0,
        };
        document.root = document.insert_raw(raw, None)?;

        Ok(document)
    }

    fn insert_raw(&mut self, raw: RawNode, parent: Option<NodeIndex>) -> Result<NodeIndex> {
        let id = raw
            .node_id
            .ok_or_else(|| DiffError::malformed(None, "missing nodeId"))?;
        let kind = raw
            .node_type
            .map(NodeKind::from_code)
            .ok_or_else(|| DiffError::malformed(Some(id), "missing nodeType"))?;

        let name = match (kind, raw.node_name) {
            (_, Some(name)) => name,
            (NodeKind::Element, None) => {
                return Err(DiffError::malformed(Some(id), "element without nodeName"));
            }
            (_, None) => String::new(),
        };
        let value = match (kind, raw.node_value) {
            (_, Some(value)) => value,
            (NodeKind::Text, None) => {
                return Err(DiffError::malformed(Some(id), "text node without nodeValue"));
            }
            (_, None) => String::new(),
        };

        let flat = raw.attributes.unwrap_or_default();
        if flat.len() % 2 != 0 {
            return Err(DiffError::malformed(
                Some(id),
                "attributes must alternate names and values",
            ));
        }
        let attributes = flat
            .chunks_exact(2)
            .map(|pair| Attribute::new(pair[0].clone(), pair[1].clone()))
            .collect();

        let index = self.push(Node {
            attributes,
            value,
            parent,
            modified: raw.modified,
            ..Node::new(id, kind, name)
        });

        for child in raw.children.unwrap_or_default() {
            let child = self.insert_raw(child, Some(index))?;
            self.nodes[index].children.push(child);
        }
        if let Some(content) = raw.content_document {
            let content = self.insert_raw(*content, Some(index))?;
            self.nodes[index].content_document = Some(content);
        }
        for marker in raw.inserted_nodes {
            let marker = self.insert_raw(marker, Some(index))?;
            self.nodes[index].inserted.push(marker);
        }
        for marker in raw.appended_nodes {
            let marker = self.insert_raw(marker, Some(index))?;
            self.nodes[index].appended.push(marker);
        }

        Ok(index)
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index]
    }

    pub fn node_mut(&mut self, index: NodeIndex) -> &mut Node {
        &mut self.nodes[index]
    }

    /// Adds a detached node to the arena
    pub fn push(&mut self, node: Node) -> NodeIndex {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Adds `node` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeIndex, node: Node) -> NodeIndex {
        let index = self.push(Node {
            parent: Some(parent),
            ..node
        });
        self.nodes[parent].children.push(index);
        index
    }

    /// Swaps the node stored at `index` for `node`, keeping the parent link,
    /// and returns the previous occupant
    pub fn replace(&mut self, index: NodeIndex, node: Node) -> Node {
        let parent = self.nodes[index].parent;
        std::mem::replace(&mut self.nodes[index], Node { parent, ..node })
    }

    /// Depth-first search for `id`: the node itself, its children in order,
    /// then its nested document
    pub fn find(&self, id: NodeId) -> Option<NodeIndex> {
        self.preorder(self.root)
            .into_iter()
            .find(|&index| self.nodes[index].id == id)
    }

    /// Like `find`, returning a typed error for callers that need the node
    pub fn require(&self, id: NodeId) -> Result<NodeIndex> {
        self.find(id).ok_or(DiffError::NodeNotFound(id))
    }

    /// Pre-order walk over children and nested documents; markers are skipped
    pub fn preorder(&self, from: NodeIndex) -> Vec<NodeIndex> {
        let mut order = Vec::new();
        let mut stack = vec![from];

        while let Some(index) = stack.pop() {
            order.push(index);
            let node = &self.nodes[index];
            if let Some(content) = node.content_document {
                stack.push(content);
            }
            stack.extend(node.children.iter().rev());
        }

        order
    }

    /// Structural equality by kind, name, value and attributes; node ids and
    /// the `modified` flag are ignored, as are the names of text nodes
    pub fn same_structure(&self, other: &Document) -> bool {
        self.same_subtree(self.root, other, other.root)
    }

    fn same_subtree(&self, index: NodeIndex, other: &Document, other_index: NodeIndex) -> bool {
        let (a, b) = (&self.nodes[index], &other.nodes[other_index]);

        let same_list = |left: &[NodeIndex], right: &[NodeIndex]| {
            left.len() == right.len()
                && left
                    .iter()
                    .zip(right)
                    .all(|(&l, &r)| self.same_subtree(l, other, r))
        };

        a.kind == b.kind
            && (a.kind == NodeKind::Text || a.name == b.name)
            && a.value == b.value
            && a.attributes == b.attributes
            && same_list(&a.children, &b.children)
            && same_list(&a.inserted, &b.inserted)
            && same_list(&a.appended, &b.appended)
            && match (a.content_document, b.content_document) {
                (Some(l), Some(r)) => self.same_subtree(l, other, r),
                (None, None) => true,
                _ => false,
            }
    }

    /// Exports the reachable tree as `{ "root": node }`
    pub fn to_json(&self) -> Value {
        json!({ "root": self.node_to_json(self.root) })
    }

    fn node_to_json(&self, index: NodeIndex) -> Value {
        let node = &self.nodes[index];
        let mut object = Map::new();

        object.insert("nodeId".into(), json!(node.id));
        object.insert("nodeType".into(), json!(node.kind.code()));
        object.insert("nodeName".into(), json!(node.name));
        object.insert("nodeValue".into(), json!(node.value));
        if node.is_element() || !node.attributes.is_empty() {
            let flat: Vec<&str> = node
                .attributes
                .iter()
                .flat_map(|attribute| [attribute.name.as_str(), attribute.value.as_str()])
                .collect();
            object.insert("attributes".into(), json!(flat));
        }

        let mut list = |key: &str, indices: &[NodeIndex]| {
            if !indices.is_empty() {
                let values: Vec<Value> = indices.iter().map(|&i| self.node_to_json(i)).collect();
                object.insert(key.into(), Value::Array(values));
            }
        };
        list("children", &node.children);
        list("insertedNodes", &node.inserted);
        list("appendedNodes", &node.appended);

        if let Some(content) = node.content_document {
            object.insert("contentDocument".into(), self.node_to_json(content));
        }
        if node.modified {
            object.insert("modified".into(), json!(true));
        }

        Value::Object(object)
    }
}

impl FromStr for Document {
    type Err = DiffError;

    fn from_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        Document::from_json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn snapshot() -> Value {
        json!({
            "root": {
                "nodeId": 1, "nodeType": 9, "nodeName": "#document", "nodeValue": "",
                "children": [
                    { "nodeId": 2, "nodeType": 10, "nodeName": "html", "nodeValue": "" },
                    { "nodeId": 3, "nodeType": 1, "nodeName": "BODY", "nodeValue": "",
                      "attributes": ["class", "main"],
                      "children": [
                        { "nodeId": 4, "nodeType": 3, "nodeName": "#text", "nodeValue": "hello" },
                        { "nodeId": 5, "nodeType": 1, "nodeName": "IFRAME", "nodeValue": "",
                          "attributes": [],
                          "contentDocument": {
                            "nodeId": 6, "nodeType": 9, "nodeName": "#document", "nodeValue": "",
                            "children": [
                              { "nodeId": 7, "nodeType": 3, "nodeName": "#text", "nodeValue": "inner" }
                            ]
                          }
                        }
                      ]
                    }
                ]
            }
        })
    }

    #[rstest]
    fn parses_snapshot_into_arena(snapshot: Value) {
        let document = Document::from_json(snapshot).unwrap();

        let body = document.find(3).unwrap();
        assert_eq!(document.node(body).attribute("class"), Some("main"));
        assert_eq!(document.node(body).children.len(), 2);

        let inner = document.find(7).unwrap();
        assert_eq!(document.node(inner).value, "inner");
        let inner_doc = document.node(inner).parent.unwrap();
        assert_eq!(document.node(inner_doc).id, 6);
        assert_eq!(document.node(inner_doc).parent, document.find(5));
    }

    #[rstest]
    fn json_export_round_trips(snapshot: Value) {
        let document = Document::from_json(snapshot.clone()).unwrap();
        let again = Document::from_json(document.to_json()).unwrap();

        assert!(document.same_structure(&again));
        assert_eq!(again.find(7).map(|i| again.node(i).id), Some(7));
    }

    #[rstest]
    #[case(json!({ "nodeType": 3, "nodeValue": "x" }), None)]
    #[case(json!({ "nodeId": 4, "nodeValue": "x" }), Some(4))]
    #[case(json!({ "nodeId": 5, "nodeType": 3 }), Some(5))]
    #[case(json!({ "nodeId": 6, "nodeType": 1 }), Some(6))]
    #[case(json!({ "nodeId": 8, "nodeType": 1, "nodeName": "A", "attributes": ["href"] }), Some(8))]
    fn missing_required_fields_are_malformed(#[case] raw: Value, #[case] expected: Option<NodeId>) {
        match Document::from_json(raw) {
            Err(DiffError::MalformedTree { node_id, .. }) => assert_eq!(node_id, expected),
            other => panic!("expected MalformedTree, got {other:?}"),
        }
    }

    #[test]
    fn wrong_field_type_is_malformed() {
        let raw = json!({ "nodeId": "one", "nodeType": 3, "nodeValue": "x" });

        assert!(matches!(
            Document::from_json(raw),
            Err(DiffError::MalformedTree { .. })
        ));
    }

    #[test]
    fn replace_keeps_parent_link() {
        let mut document = Document::with_root(Node::element(1, "BODY", vec![]));
        let text = document.append_child(0, Node::text(2, "a"));

        let old = document.replace(text, Node::element(2, "SPAN", vec![]));

        assert_eq!(old.kind, NodeKind::Text);
        assert_eq!(document.node(text).parent, Some(0));
        assert!(document.node(text).is_named("span"));
        assert!(matches!(document.require(99), Err(DiffError::NodeNotFound(99))));
    }
}
