use crate::artifacts::diff::diff_range::DiffRange;
use crate::artifacts::dom::node::{NodeId, NodeKind};
use crate::artifacts::segment::text_segment::{SegmentSource, SegmentedText};
use serde::Serialize;

/// Where a block lands relative to the node it is projected on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Position {
    /// No content on this pane; marker goes before the first node
    InsertedBefore,
    /// The block covers the node's own content
    Inside,
    /// No content on this pane; marker goes after the preceding node
    AppendedAfter,
}

impl Position {
    pub fn offset(self) -> i8 {
        match self {
            Position::InsertedBefore => -1,
            Position::Inside => 0,
            Position::AppendedAfter => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProjection {
    pub node_id: NodeId,
    pub node_kind: NodeKind,
    pub position: Position,
}

/// Projects one pane of a block onto the snapshot node it belongs to
///
/// A non-empty span lands inside the node of its first segment. An empty
/// span attaches after the segment preceding it, or before the first
/// segment when it sits at the very start. Returns `None` when the pane has
/// no segment to attach to.
pub fn project(range: &DiffRange, pane: usize, text: &SegmentedText) -> Option<NodeProjection> {
    let begin = usize::try_from(range.begin[pane]).ok()?;

    let (index, position) = match (range.is_empty_on(pane), begin) {
        (false, _) => (begin, Position::Inside),
        (true, 0) => (0, Position::InsertedBefore),
        (true, _) => (begin - 1, Position::AppendedAfter),
    };

    match text.get(index)?.source {
        SegmentSource::Node { id, kind } => Some(NodeProjection {
            node_id: id,
            node_kind: kind,
            position,
        }),
        SegmentSource::WordToken => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::diff::diff_range::DiffOp;
    use crate::artifacts::segment::text_segment::Granularity;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn text() -> SegmentedText {
        let mut text = SegmentedText::new(Granularity::Node);
        for id in [10, 11, 12] {
            text.push(
                SegmentSource::Node {
                    id,
                    kind: NodeKind::Text,
                },
                "x",
            );
        }
        text
    }

    #[rstest]
    #[case((1, 2), Some((11, Position::Inside)))]
    #[case((0, -1), Some((10, Position::InsertedBefore)))]
    #[case((2, 1), Some((11, Position::AppendedAfter)))]
    #[case((3, 2), Some((12, Position::AppendedAfter)))]
    #[case((5, 5), None)]
    fn projects_spans_onto_nodes(
        #[case] span: (isize, isize),
        #[case] expected: Option<(NodeId, Position)>,
    ) {
        let range = DiffRange::two_way(span, (0, 0), DiffOp::ChangedInAll);

        let projection = project(&range, 0, &text());

        assert_eq!(
            projection.map(|projection| (projection.node_id, projection.position)),
            expected
        );
    }

    #[test]
    fn empty_texts_have_nothing_to_attach_to() {
        let range = DiffRange::two_way((0, -1), (0, 0), DiffOp::ChangedInAll);
        let empty = SegmentedText::new(Granularity::Node);

        assert_eq!(project(&range, 0, &empty), None);
    }
}
