use crate::artifacts::diff::diff_range::DiffOp;
use crate::artifacts::dom::document::Document;
use crate::artifacts::dom::node::{Attribute, Node, NodeId, SYNTHETIC_NODE_ID};
use crate::artifacts::highlight::projection::Position;
use std::collections::BTreeMap;

/// Prefix shared by every class the highlighter adds
pub const CLASS_PREFIX: &str = "dd-";
pub const DIFF_CLASS: &str = "dd-diff";
pub const WORD_DIFF_CLASSES: &str = "dd-wdiff dd-word";

/// Index of the diff a wrapper belongs to
pub const DIFF_ID_ATTRIBUTE: &str = "data-ddid";
/// Text the wrapper replaced
pub const ORIGINAL_TEXT_ATTRIBUTE: &str = "data-ddtext";

/// Content of zero-width markers
pub const ZERO_WIDTH_SPACE: &str = "\u{200B}";

/// Visual variant of a marked node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Changed,
    Deleted,
    SnapshotChanged,
    SnapshotDeleted,
}

impl Style {
    pub const ALL: [Style; 4] = [
        Style::Changed,
        Style::Deleted,
        Style::SnapshotChanged,
        Style::SnapshotDeleted,
    ];

    /// The left pane of a block only the right side changed, and the right
    /// pane of a block only the left side changed, render as snapshots
    pub fn for_pane(op: DiffOp, pane: usize, position: Position) -> Self {
        let snapshot = matches!((pane, op), (0, DiffOp::OnlyInPane2) | (2, DiffOp::OnlyInPane0));
        let deleted = position != Position::Inside;

        match (snapshot, deleted) {
            (false, false) => Style::Changed,
            (false, true) => Style::Deleted,
            (true, false) => Style::SnapshotChanged,
            (true, true) => Style::SnapshotDeleted,
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            Style::Changed => "dd-changed",
            Style::Deleted => "dd-deleted",
            Style::SnapshotChanged => "dd-snpchanged",
            Style::SnapshotDeleted => "dd-snpdeleted",
        }
    }

    pub fn is_snapshot(self) -> bool {
        matches!(self, Style::SnapshotChanged | Style::SnapshotDeleted)
    }

    /// Full class attribute value of a wrapper
    pub fn classes(self) -> String {
        format!("{DIFF_CLASS} {}", self.class_name())
    }
}

/// Attributes of a synthesized wrapper or marker
pub fn wrapper_attributes(style: Style, diff_index: usize, original_text: &str) -> Vec<Attribute> {
    vec![
        Attribute::new("class".into(), style.classes()),
        Attribute::new(DIFF_ID_ATTRIBUTE.into(), diff_index.to_string()),
        Attribute::new(ORIGINAL_TEXT_ATTRIBUTE.into(), original_text.into()),
    ]
}

/// `SPAN` holding a single synthesized text node
pub fn span(id: NodeId, attributes: Vec<Attribute>) -> Node {
    Node::element(id, "SPAN", attributes)
}

pub fn synthetic_text(value: impl Into<String>) -> Node {
    Node::text(SYNTHETIC_NODE_ID, value)
}

pub fn is_diff_node(node: &Node) -> bool {
    node.has_class(DIFF_CLASS)
}

pub fn diff_index(node: &Node) -> Option<usize> {
    node.attribute(DIFF_ID_ATTRIBUTE)?.parse().ok()
}

/// Prepends the marker classes to an existing class attribute, or adds one
pub fn add_marker_classes(node: &mut Node, style: Style) {
    let classes = style.classes();
    match node
        .attributes
        .iter_mut()
        .find(|attribute| attribute.name == "class")
    {
        Some(attribute) if attribute.value.is_empty() => attribute.value = classes,
        Some(attribute) => attribute.value = format!("{classes} {}", attribute.value),
        None => node.attributes.push(Attribute::new("class".into(), classes)),
    }
}

/// Removes every marker class token, keeping the other tokens in order
pub fn strip_marker_classes(classes: &str) -> String {
    classes
        .split_whitespace()
        .filter(|token| !token.starts_with(CLASS_PREFIX))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Drops marker classes and marker attributes from a node that was
/// annotated in place; a class attribute left empty is removed
pub fn strip_marker_attributes(node: &mut Node) {
    node.attributes.retain_mut(|attribute| match attribute.name.as_str() {
        "class" => {
            attribute.value = strip_marker_classes(&attribute.value);
            !attribute.value.is_empty()
        }
        DIFF_ID_ATTRIBUTE | ORIGINAL_TEXT_ATTRIBUTE => false,
        _ => true,
    });
}

/// Maps each diff index to the id of the node carrying it
///
/// Later nodes win when an index appears more than once, which happens when
/// a block spans several nodes.
pub fn diff_node_ids(document: &Document) -> BTreeMap<usize, NodeId> {
    document
        .preorder(document.root())
        .into_iter()
        .map(|index| document.node(index))
        .filter(|node| is_diff_node(node))
        .filter_map(|node| Some((diff_index(node)?, node.id)))
        .collect()
}
