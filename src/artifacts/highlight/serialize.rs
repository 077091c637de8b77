use crate::artifacts::dom::document::Document;
use crate::artifacts::dom::html::{encode_entities, is_void_element};
use crate::artifacts::dom::node::{NodeId, NodeIndex, NodeKind};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Markup patch for one node of a live document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
#[serde(rename_all = "camelCase")]
pub struct ModifiedNode {
    pub node_id: NodeId,
    pub serialized_markup: String,
}

/// Serializes the whole document, returning a record for every node flagged
/// modified, innermost first
pub fn modified_nodes(document: &Document) -> Vec<ModifiedNode> {
    let mut records = Vec::new();
    emit(document, document.root(), &mut records);
    records
}

/// Markup of the subtree rooted at `index`
pub fn outer_markup(document: &Document, index: NodeIndex) -> String {
    emit(document, index, &mut Vec::new())
}

fn emit(document: &Document, index: NodeIndex, records: &mut Vec<ModifiedNode>) -> String {
    let node = document.node(index);
    let mut markup = String::new();

    let emit_all = |indices: &[NodeIndex], markup: &mut String, records: &mut Vec<ModifiedNode>| {
        for &child in indices {
            markup.push_str(&emit(document, child, records));
        }
    };

    match node.kind {
        NodeKind::DocumentType => {
            markup.push_str(&format!("<!DOCTYPE {}>", node.name));
        }
        NodeKind::Document | NodeKind::DocumentFragment => {
            emit_all(&node.children, &mut markup, records);
        }
        NodeKind::Comment => {
            markup.push_str(&format!("<!-- {} -->", node.value));
        }
        NodeKind::Text => {
            emit_all(&node.inserted, &mut markup, records);
            markup.push_str(&text_markup(&node.value));
            emit_all(&node.appended, &mut markup, records);
        }
        NodeKind::Element => {
            emit_all(&node.inserted, &mut markup, records);

            markup.push('<');
            markup.push_str(&node.name);
            for attribute in &node.attributes {
                markup.push_str(&format!(
                    " {}=\"{}\"",
                    attribute.name,
                    encode_entities(&attribute.value)
                ));
            }
            markup.push('>');

            emit_all(&node.children, &mut markup, records);
            emit_all(&node.appended, &mut markup, records);

            // nested documents are patched on their own
            if let Some(content) = node.content_document {
                emit(document, content, records);
            }

            if !is_void_element(&node.name) {
                markup.push_str(&format!("</{}>", node.name));
            }
        }
        _ => {}
    }

    if node.modified && matches!(node.kind, NodeKind::Text | NodeKind::Element) {
        records.push(ModifiedNode::new(node.id, markup.clone()));
    }

    markup
}

/// Encoded text; a run made only of spaces and tabs keeps its width by
/// ending in a non-breaking space
fn text_markup(value: &str) -> String {
    let mut encoded = encode_entities(value);
    if !encoded.is_empty() && encoded.chars().all(|ch| ch == ' ' || ch == '\t') {
        encoded.pop();
        encoded.push_str("&nbsp;");
    }
    encoded
}
