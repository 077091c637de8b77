use crate::artifacts::dom::document::Document;
use crate::artifacts::dom::node::{Node, NodeKind};
use crate::artifacts::segment::text_segment::{Granularity, SegmentSource, SegmentedText};
use phf::phf_set;

/// Elements whose content has no visible text equivalent
static SKIPPED_ELEMENTS: phf::Set<&'static str> = phf_set! {
    "script", "noscript", "noframes", "style", "title",
};

/// Collects the comparable text of a snapshot in document order
///
/// Text nodes contribute their value, visible `INPUT` controls their current
/// value, and nested documents are read as if inlined at their frame.
pub fn segment_document(document: &Document) -> SegmentedText {
    let mut text = SegmentedText::new(Granularity::Node);
    let mut stack = vec![document.root()];

    while let Some(index) = stack.pop() {
        let node = document.node(index);

        if let Some(value) = comparable_value(node) {
            text.push(
                SegmentSource::Node {
                    id: node.id,
                    kind: node.kind,
                },
                value,
            );
        }

        if !descends_into(node) {
            continue;
        }
        if let Some(content) = node.content_document {
            stack.push(content);
        }
        stack.extend(node.children.iter().rev().copied());
    }

    tracing::trace!(segments = text.len(), units = text.buffer().len(), "segmented document");
    text
}

fn comparable_value(node: &Node) -> Option<&str> {
    match node.kind {
        NodeKind::Text => Some(node.value.as_str()),
        NodeKind::Element if node.is_named("input") && !is_hidden_input(node) => {
            Some(node.attribute("value").unwrap_or(""))
        }
        _ => None,
    }
}

fn is_hidden_input(node: &Node) -> bool {
    node.attribute("type")
        .is_some_and(|kind| kind.eq_ignore_ascii_case("hidden"))
}

fn descends_into(node: &Node) -> bool {
    if !node.is_element() {
        return true;
    }
    !node.has_attribute("hidden") && !SKIPPED_ELEMENTS.contains(node.name.to_ascii_lowercase().as_str())
}
