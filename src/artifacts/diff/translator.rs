use crate::artifacts::diff::diff_range::{DiffOp, DiffRange};
use crate::artifacts::diff::edit::{EditOp, EditScript};

/// Turns an edit script into two-pane blocks
///
/// Each maximal run of non-`Equal` steps becomes exactly one block spanning
/// the units it consumed on each side. A side that consumed nothing gets an
/// empty span (`end = begin - 1`) at its cursor.
pub fn translate(script: &EditScript) -> Vec<DiffRange> {
    let mut ranges = Vec::new();
    let (mut left, mut right) = (0isize, 0isize);
    let mut run: Option<(isize, isize)> = None;

    let close = |run: &mut Option<(isize, isize)>, left: isize, right: isize| {
        run.take().map(|(left_begin, right_begin)| {
            DiffRange::two_way(
                (left_begin, left - 1),
                (right_begin, right - 1),
                DiffOp::ChangedInAll,
            )
        })
    };

    for &op in script.ops() {
        if op == EditOp::Equal {
            ranges.extend(close(&mut run, left, right));
        } else if run.is_none() {
            run = Some((left, right));
        }

        if op.consumes_left() {
            left += 1;
        }
        if op.consumes_right() {
            right += 1;
        }
    }
    ranges.extend(close(&mut run, left, right));

    ranges
}
