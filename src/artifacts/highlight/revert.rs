use crate::artifacts::dom::document::Document;
use crate::artifacts::dom::node::Node;
use crate::artifacts::highlight::markers::{self, ORIGINAL_TEXT_ATTRIBUTE};

/// Removes every diff marker from `document`, returning how many marked
/// nodes were restored
///
/// Wrappers around text become text nodes again with their original value.
/// Elements annotated in place lose the marker classes and attributes, and
/// zero-width markers are dropped. Restored nodes are flagged modified.
pub fn revert(document: &mut Document) -> usize {
    let mut restored = 0;

    for index in document.preorder(document.root()) {
        let node = document.node_mut(index);
        let had_markers = !node.inserted.is_empty() || !node.appended.is_empty();
        node.inserted.clear();
        node.appended.clear();
        node.modified |= had_markers;

        if !markers::is_diff_node(node) {
            restored += usize::from(had_markers);
            continue;
        }
        restored += 1;

        if !node.has_attribute(ORIGINAL_TEXT_ATTRIBUTE) {
            markers::strip_marker_attributes(node);
            node.modified = true;
            continue;
        }

        let text = node.attribute(ORIGINAL_TEXT_ATTRIBUTE).unwrap_or_default().to_string();
        let id = node.id;
        document.replace(
            index,
            Node {
                modified: true,
                ..Node::text(id, text)
            },
        );
    }

    tracing::debug!(restored, "reverted document");
    restored
}
