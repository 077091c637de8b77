use crate::artifacts::core::{DiffError, Result};
use crate::artifacts::diff::algorithm::diff;
use crate::artifacts::diff::diff_range::{DiffList, DiffRange};
use crate::artifacts::diff::options::DiffOptions;
use crate::artifacts::diff::sequence::{Normalizer, SegmentSequence, WordSequence};
use crate::artifacts::diff::translator::translate;
use crate::artifacts::dom::document::Document;
use crate::artifacts::merge::three_way::{self, LEFT, RIGHT};
use crate::artifacts::segment::segmenter::segment_document;
use crate::artifacts::segment::text_segment::{Granularity, SegmentedText};
use crate::artifacts::segment::word::split_words;

/// Compares two or three segmented texts
///
/// Two panes are diffed directly. With three panes the middle one is the
/// base: it is diffed against each side and the two results are merged.
pub fn compare(texts: &[SegmentedText], options: &DiffOptions) -> Result<DiffList> {
    if let Some(first) = texts.first()
        && texts.iter().any(|text| text.granularity() != first.granularity())
    {
        return Err(DiffError::invalid_config(
            "cannot compare node and word segments together",
        ));
    }

    match texts {
        [left, right] => Ok(DiffList::new(2, pairwise(left, right, options))),
        [left, base, right] => {
            let base_left = pairwise(base, left, options);
            let base_right = pairwise(base, right, options);
            let normalizer = Normalizer::from(options);

            let ranges = three_way::merge(&base_left, &base_right, options.tie_break, |block| {
                same_units(left, right, block, &normalizer)
            });

            Ok(DiffList::new(3, ranges))
        }
        _ => Err(DiffError::invalid_config(format!(
            "expected 2 or 3 panes, got {}",
            texts.len()
        ))),
    }
}

/// Segments every snapshot and compares them
pub fn compare_documents(documents: &[Document], options: &DiffOptions) -> Result<DiffList> {
    let texts: Vec<SegmentedText> = documents.iter().map(segment_document).collect();
    let list = compare(&texts, options)?;

    tracing::debug!(
        panes = texts.len(),
        segments = ?texts.iter().map(SegmentedText::len).collect::<Vec<_>>(),
        diffs = list.len(),
        "compared documents"
    );

    Ok(list)
}

/// Word-level comparison of plain strings, one per pane
pub fn compare_words<S: AsRef<str>>(
    texts: &[S],
    options: &DiffOptions,
) -> Result<(Vec<SegmentedText>, DiffList)> {
    let words: Vec<SegmentedText> = texts.iter().map(|text| split_words(text.as_ref())).collect();
    let list = compare(&words, options)?;
    Ok((words, list))
}

fn pairwise(left: &SegmentedText, right: &SegmentedText, options: &DiffOptions) -> Vec<DiffRange> {
    let normalizer = Normalizer::from(options);

    let script = match left.granularity() {
        Granularity::Node => diff(
            &SegmentSequence::new(left, normalizer),
            &SegmentSequence::new(right, normalizer),
            options.algorithm,
        ),
        Granularity::Word => diff(
            &WordSequence::new(left, normalizer),
            &WordSequence::new(right, normalizer),
            options.algorithm,
        ),
    };

    translate(&script)
}

fn same_units(
    left: &SegmentedText,
    right: &SegmentedText,
    block: &DiffRange,
    normalizer: &Normalizer,
) -> bool {
    let in_bounds = |text: &SegmentedText, pane: usize| {
        block.indices(pane).all(|index| index < text.len())
    };

    block.len_on(LEFT) == block.len_on(RIGHT)
        && in_bounds(left, LEFT)
        && in_bounds(right, RIGHT)
        && block
            .indices(LEFT)
            .zip(block.indices(RIGHT))
            .all(|(l, r)| normalizer.equals(left.unit(l), right.unit(r)))
}
