//! Projection of diff blocks onto snapshot trees
//!
//! For every block and every pane the highlighter finds the snapshot node
//! the block lands on and marks it:
//!
//! - text nodes are replaced by a `SPAN` wrapper that keeps the node id and
//!   remembers the original text; with word-level highlighting the wrapper
//!   splits the text into plain runs and `dd-word` spans
//! - value-bearing elements such as `INPUT` get the marker classes added in
//!   place
//! - panes where the block is empty get a zero-width marker before or after
//!   the nearest node
//!
//! Segments are computed once, before any tree is touched, so block indices
//! always refer to the unmarked trees.

use crate::artifacts::core::{DiffError, Result};
use crate::artifacts::diff::compare::compare_words;
use crate::artifacts::diff::diff_range::{DiffList, DiffRange};
use crate::artifacts::diff::options::DiffOptions;
use crate::artifacts::dom::document::Document;
use crate::artifacts::dom::node::{Attribute, Node, NodeId, NodeIndex, NodeKind, SYNTHETIC_NODE_ID};
use crate::artifacts::highlight::markers::{
    self, DIFF_ID_ATTRIBUTE, Style, WORD_DIFF_CLASSES, ZERO_WIDTH_SPACE,
};
use crate::artifacts::highlight::projection::{NodeProjection, Position, project};
use crate::artifacts::highlight::serialize::{ModifiedNode, modified_nodes};
use crate::artifacts::segment::segmenter::segment_document;
use crate::artifacts::segment::text_segment::SegmentedText;
use std::ops::Range;

/// Content of a wrapper when word-level highlighting applies
#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Plain(String),
    Changed(String),
}

/// Word-level diff of one block's text on every pane
#[derive(Debug)]
struct WordRuns {
    words: Vec<SegmentedText>,
    /// Changed character spans per pane, relative to the block's text
    runs: Vec<Vec<Range<usize>>>,
}

impl WordRuns {
    fn compute(
        range: &DiffRange,
        projections: &[Option<NodeProjection>],
        texts: &[SegmentedText],
        options: &DiffOptions,
    ) -> Result<Self> {
        let pane_texts: Vec<String> = projections
            .iter()
            .enumerate()
            .map(|(pane, projection)| match projection {
                Some(projection) if projection.position == Position::Inside => {
                    texts[pane].text_between(range.begin[pane], range.end[pane])
                }
                _ => String::new(),
            })
            .collect();

        let (words, list) = compare_words(&pane_texts, options)?;
        let runs = words
            .iter()
            .enumerate()
            .map(|(pane, text)| {
                list.iter()
                    .map(|block| text.offsets(block.begin[pane], block.end[pane]))
                    .filter(|span| !span.is_empty())
                    .collect()
            })
            .collect();

        Ok(WordRuns { words, runs })
    }

    /// Splits the characters in `window` of `pane` into plain and changed
    /// pieces
    fn pieces(&self, pane: usize, window: Range<usize>) -> Vec<Piece> {
        let buffer = self.words[pane].buffer();
        let slice = |span: Range<usize>| buffer[span].iter().collect::<String>();
        let mut pieces = Vec::new();
        let mut cursor = window.start;

        for run in &self.runs[pane] {
            let (start, end) = (run.start.max(window.start), run.end.min(window.end));
            if start >= end {
                continue;
            }
            if start > cursor {
                pieces.push(Piece::Plain(slice(cursor..start)));
            }
            pieces.push(Piece::Changed(slice(start..end)));
            cursor = end;
        }
        if cursor < window.end {
            pieces.push(Piece::Plain(slice(cursor..window.end)));
        }

        pieces
    }
}

/// Marks every block of `diffs` on `documents` and returns, per document,
/// the patches for the nodes that changed
pub fn highlight(
    documents: &mut [Document],
    diffs: &DiffList,
    options: &DiffOptions,
) -> Result<Vec<Vec<ModifiedNode>>> {
    if documents.len() != diffs.panes() {
        return Err(DiffError::invalid_config(format!(
            "diff list covers {} panes but {} documents were given",
            diffs.panes(),
            documents.len()
        )));
    }

    let texts: Vec<SegmentedText> = documents.iter().map(segment_document).collect();
    let mut skipped = 0usize;

    for (diff_index, range) in diffs.iter().enumerate() {
        let projections: Vec<Option<NodeProjection>> = (0..documents.len())
            .map(|pane| project(range, pane, &texts[pane]))
            .collect();
        let words = options
            .word_level
            .then(|| WordRuns::compute(range, &projections, &texts, options))
            .transpose()?;

        for (pane, document) in documents.iter_mut().enumerate() {
            let Some(projection) = projections[pane] else {
                continue;
            };
            let style = Style::for_pane(range.op, pane, projection.position);

            tracing::trace!(
                diff_index,
                pane,
                node_id = projection.node_id,
                position = projection.position.offset(),
                style = style.class_name(),
                "projecting block"
            );

            let marked = match projection.position {
                Position::Inside => {
                    let text = &texts[pane];
                    let start = text.offsets(range.begin[pane], range.end[pane]).start;

                    range
                        .indices(pane)
                        .filter_map(|index| text.get(index))
                        .filter_map(|segment| {
                            let window = segment.offset - start..segment.end() - start;
                            Some((segment.source.node_id()?, window))
                        })
                        .map(|(node_id, window)| {
                            let pieces = words
                                .as_ref()
                                .filter(|_| !style.is_snapshot())
                                .map(|words| words.pieces(pane, window));
                            mark_node(document, node_id, style, diff_index, pieces)
                        })
                        .fold(Ok(()), |result, next| result.and(next))
                }
                position => attach_marker(document, projection.node_id, position, style, diff_index),
            };

            if let Err(error) = marked {
                skipped += 1;
                tracing::warn!(%error, diff_index, pane, "skipping block projection");
            }
        }
    }

    tracing::debug!(
        diffs = diffs.len(),
        panes = documents.len(),
        skipped,
        "highlighted documents"
    );

    Ok(documents.iter().map(modified_nodes).collect())
}

fn mark_node(
    document: &mut Document,
    node_id: NodeId,
    style: Style,
    diff_index: usize,
    pieces: Option<Vec<Piece>>,
) -> Result<()> {
    let index = document.require(node_id)?;

    match document.node(index).kind {
        NodeKind::Text => wrap_text(document, index, style, diff_index, pieces),
        NodeKind::Element => {
            let node = document.node_mut(index);
            markers::add_marker_classes(node, style);
            node.attributes
                .push(Attribute::new(DIFF_ID_ATTRIBUTE.into(), diff_index.to_string()));
            node.modified = true;
        }
        _ => {}
    }

    Ok(())
}

fn wrap_text(
    document: &mut Document,
    index: NodeIndex,
    style: Style,
    diff_index: usize,
    pieces: Option<Vec<Piece>>,
) {
    let original = document.node(index);
    let wrapper = Node {
        inserted: original.inserted.clone(),
        appended: original.appended.clone(),
        modified: true,
        ..markers::span(
            original.id,
            markers::wrapper_attributes(style, diff_index, &original.value),
        )
    };
    let original = document.replace(index, wrapper);

    match pieces {
        Some(pieces) => {
            for piece in pieces {
                match piece {
                    Piece::Plain(text) => {
                        document.append_child(index, markers::synthetic_text(text));
                    }
                    Piece::Changed(text) => {
                        let span = document.append_child(
                            index,
                            markers::span(
                                SYNTHETIC_NODE_ID,
                                vec![Attribute::new("class".into(), WORD_DIFF_CLASSES.into())],
                            ),
                        );
                        document.append_child(span, markers::synthetic_text(text));
                    }
                }
            }
        }
        None => {
            document.append_child(index, markers::synthetic_text(original.value));
        }
    }
}

fn attach_marker(
    document: &mut Document,
    node_id: NodeId,
    position: Position,
    style: Style,
    diff_index: usize,
) -> Result<()> {
    let index = document.require(node_id)?;

    let marker = document.push(Node {
        parent: Some(index),
        ..markers::span(
            SYNTHETIC_NODE_ID,
            markers::wrapper_attributes(style, diff_index, ""),
        )
    });
    document.append_child(marker, markers::synthetic_text(ZERO_WIDTH_SPACE));

    let node = document.node_mut(index);
    match position {
        Position::InsertedBefore => node.inserted.push(marker),
        _ => node.appended.push(marker),
    }
    node.modified = true;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::diff::compare::compare_documents;
    use crate::artifacts::highlight::markers::{ORIGINAL_TEXT_ATTRIBUTE, diff_node_ids};
    use crate::artifacts::highlight::serialize::outer_markup;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn page(texts: &[&str]) -> Document {
        let children: Vec<_> = texts
            .iter()
            .enumerate()
            .map(|(i, text)| {
                json!({ "nodeId": 10 + i, "nodeType": 1, "nodeName": "P", "attributes": [], "children": [
                    { "nodeId": 20 + i, "nodeType": 3, "nodeName": "#text", "nodeValue": text }
                ]})
            })
            .collect();

        Document::from_json(json!({
            "nodeId": 1, "nodeType": 1, "nodeName": "BODY", "attributes": [],
            "children": children
        }))
        .unwrap()
    }

    #[fixture]
    fn options() -> DiffOptions {
        DiffOptions::default()
    }

    fn run(documents: &mut [Document], options: &DiffOptions) -> Vec<Vec<ModifiedNode>> {
        let diffs = compare_documents(documents, options).unwrap();
        highlight(documents, &diffs, options).unwrap()
    }

    #[rstest]
    fn changed_text_is_wrapped_with_word_runs(options: DiffOptions) {
        let mut documents = [page(&["same", "foo,bar"]), page(&["same", "foo;bar"])];

        let patches = run(&mut documents, &options);

        assert_eq!(
            patches[0],
            vec![ModifiedNode::new(
                21,
                "<SPAN class=\"dd-diff dd-changed\" data-ddid=\"0\" data-ddtext=\"foo,bar\">\
                 foo<SPAN class=\"dd-wdiff dd-word\">,</SPAN>bar</SPAN>"
                    .into()
            )]
        );
        let wrapper = documents[1].require(21).unwrap();
        assert_eq!(
            documents[1].node(wrapper).attribute(ORIGINAL_TEXT_ATTRIBUTE),
            Some("foo;bar")
        );
    }

    #[rstest]
    fn word_level_off_keeps_the_text_whole(mut options: DiffOptions) {
        options.word_level = false;
        let mut documents = [page(&["foo,bar"]), page(&["foo;bar"])];

        let patches = run(&mut documents, &options);

        assert_eq!(
            patches[1][0].serialized_markup,
            "<SPAN class=\"dd-diff dd-changed\" data-ddid=\"0\" data-ddtext=\"foo;bar\">foo;bar</SPAN>"
        );
    }

    #[rstest]
    fn deleted_text_gets_a_marker_on_the_other_pane(options: DiffOptions) {
        let mut documents = [page(&["one", "two", "three"]), page(&["one", "three"])];

        let patches = run(&mut documents, &options);

        let right = &documents[1];
        let one = right.require(20).unwrap();
        assert_eq!(right.node(one).appended.len(), 1);
        assert_eq!(
            patches[1],
            vec![ModifiedNode::new(
                20,
                format!(
                    "one<SPAN class=\"dd-diff dd-deleted\" data-ddid=\"0\" data-ddtext=\"\">{ZERO_WIDTH_SPACE}</SPAN>"
                )
            )]
        );
    }

    #[rstest]
    fn insertion_at_the_start_goes_before_the_first_node(options: DiffOptions) {
        let mut documents = [page(&["two"]), page(&["one", "two"])];

        run(&mut documents, &options);

        let left = &documents[0];
        let two = left.require(20).unwrap();
        assert_eq!(left.node(two).inserted.len(), 1);
        assert!(
            outer_markup(left, left.root()).starts_with("<BODY><P><SPAN class=\"dd-diff dd-deleted\"")
        );
    }

    #[rstest]
    fn inputs_are_annotated_in_place(options: DiffOptions) {
        let input = |value: &str| {
            Document::from_json(json!({
                "nodeId": 1, "nodeType": 1, "nodeName": "FORM", "attributes": [], "children": [
                    { "nodeId": 2, "nodeType": 1, "nodeName": "INPUT",
                      "attributes": ["class", "field", "value", value] }
                ]
            }))
            .unwrap()
        };
        let mut documents = [input("old"), input("new")];

        let patches = run(&mut documents, &options);

        assert_eq!(
            patches[0],
            vec![ModifiedNode::new(
                2,
                "<INPUT class=\"dd-diff dd-changed field\" value=\"old\" data-ddid=\"0\">".into()
            )]
        );
    }

    #[rstest]
    fn snapshot_panes_skip_word_runs(options: DiffOptions) {
        let mut documents = [page(&["a", "b x"]), page(&["a", "b y"]), page(&["a", "b y"])];

        let patches = run(&mut documents, &options);

        // only the left pane changed, so the right pane renders as a snapshot
        assert_eq!(
            patches[2][0].serialized_markup,
            "<SPAN class=\"dd-diff dd-snpchanged\" data-ddid=\"0\" data-ddtext=\"b y\">b y</SPAN>"
        );
        assert!(patches[0][0].serialized_markup.contains("dd-word"));
    }

    #[rstest]
    fn blocks_spanning_several_nodes_wrap_each(options: DiffOptions) {
        let mut documents = [page(&["k", "a", "b", "k2"]), page(&["k", "c", "k2"])];

        run(&mut documents, &options);

        let ids = diff_node_ids(&documents[0]);
        assert_eq!(ids.len(), 1);
        assert_eq!(ids.get(&0), Some(&22));
        for id in [21, 22] {
            let index = documents[0].require(id).unwrap();
            assert!(markers::is_diff_node(documents[0].node(index)));
        }
    }

    #[rstest]
    fn missing_nodes_are_skipped(options: DiffOptions) {
        let mut documents = [page(&["x"]), page(&["y"])];
        let diffs = compare_documents(&documents, &options).unwrap();
        documents[1] = Document::with_root(Node::element(99, "BODY", Vec::new()));

        let patches = highlight(&mut documents, &diffs, &options).unwrap();

        assert_eq!(patches[0].len(), 1);
        assert!(patches[1].is_empty());
    }

    #[rstest]
    fn pane_count_must_match(options: DiffOptions) {
        let mut documents = [page(&["x"])];
        let diffs = DiffList::new(2, Vec::new());

        assert!(matches!(
            highlight(&mut documents, &diffs, &options),
            Err(DiffError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn pieces_clip_runs_to_the_node_window() {
        let (words, list) = compare_words(&["ab cd ef", "ab xx ef"], &DiffOptions::default()).unwrap();
        let runs = WordRuns {
            runs: vec![
                list.iter().map(|b| words[0].offsets(b.begin[0], b.end[0])).collect(),
                list.iter().map(|b| words[1].offsets(b.begin[1], b.end[1])).collect(),
            ],
            words,
        };

        assert_eq!(
            runs.pieces(0, 0..4),
            vec![Piece::Plain("ab ".into()), Piece::Changed("c".into())]
        );
        assert_eq!(
            runs.pieces(0, 4..8),
            vec![Piece::Changed("d".into()), Piece::Plain(" ef".into())]
        );
    }
}
