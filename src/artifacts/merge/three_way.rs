//! Three-way alignment of two pairwise diffs
//!
//! Both inputs are two-pane block lists that share the base document as
//! their pane 0: one against the left document, one against the right
//! document. The merger produces one block list over three panes, ordered
//! left, base, right.
//!
//! ## Algorithm Overview
//!
//! The merger repeatedly starts a block at the earliest unconsumed pairwise
//! block, judged by its base begin index. When both inputs start at the same
//! base index the configured `TieBreak` picks the leading side.
//!
//! ```text
//!                 base/left
//!                      base/right        merged
//!                 |~~~|                  |~~~|
//!   first block   |   |                  |   |
//!                 |   | |~~~|            |   |
//!                 |___| |   |     ->     |   |
//!                       |   |            |   |
//!                 |~~~| |___|            |   |
//!   last block    |   |                  |   |
//!                 |___|                  |___|
//! ```
//!
//! The block then grows by pulling in further pairwise blocks, from either
//! input, as long as their base spans overlap the growing span. Coordinates
//! on a pane that no pairwise block covered are extrapolated from the base
//! index using the running end of the previous merged block, so unaffected
//! regions stay aligned.
//!
//! ## Classification
//!
//! - only base/right blocks: the right pane differs, `OnlyInPane2`
//! - only base/left blocks: the left pane differs, `OnlyInPane0`
//! - both: left and right are compared; equal means only the base differs
//!   (`OnlyInPane1`), otherwise `ChangedInAll`
//!
//! A final pass clips every block's end to stop before the next block's
//! begin on each pane, the later block keeping the shared boundary.
//!
//! ## Debug Logging
//!
//! Build with `--features debug_merge` to trace every merged block.

use crate::artifacts::diff::diff_range::{DiffOp, DiffRange, MAX_PANES};
use crate::artifacts::diff::options::TieBreak;
use bitflags::bitflags;
use std::fmt;

/// Trace-level dump of merge decisions, compiled in with the `debug_merge`
/// feature
macro_rules! merge_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            tracing::trace!($($arg)*);
        }
    };
}

/// Pane order of merged blocks
pub const LEFT: usize = 0;
pub const BASE: usize = 1;
pub const RIGHT: usize = 2;

bitflags! {
    /// Pairwise inputs a merged block drew from
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Sources: u8 {
        const BASE_LEFT = 0b01;
        const BASE_RIGHT = 0b10;
        const BOTH = Self::BASE_LEFT.bits() | Self::BASE_RIGHT.bits();
    }
}

impl fmt::Debug for Sources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sources = Vec::new();
        if self.contains(Sources::BASE_LEFT) {
            sources.push("BASE_LEFT");
        }
        if self.contains(Sources::BASE_RIGHT) {
            sources.push("BASE_RIGHT");
        }
        write!(f, "{}", sources.join(" | "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Merges `base_left` and `base_right` into three-pane blocks
///
/// `same_left_right` receives a merged block drawn from both inputs and
/// reports whether its left and right spans hold equal content.
pub fn merge<F>(
    base_left: &[DiffRange],
    base_right: &[DiffRange],
    tie_break: TieBreak,
    same_left_right: F,
) -> Vec<DiffRange>
where
    F: Fn(&DiffRange) -> bool,
{
    let mut merged: Vec<DiffRange> = Vec::new();
    let (mut li, mut ri) = (0usize, 0usize);
    // first unit after the previous merged block, per pane
    let mut last = [0isize; MAX_PANES];

    while li < base_left.len() || ri < base_right.len() {
        let first_side = match (base_left.get(li), base_right.get(ri)) {
            (None, _) => Side::Right,
            (_, None) => Side::Left,
            (Some(l), Some(r)) if r.begin[0] < l.begin[0] => Side::Right,
            (Some(l), Some(r)) if l.begin[0] < r.begin[0] => Side::Left,
            _ => match tie_break {
                TieBreak::PreferLeft => Side::Left,
                TieBreak::PreferRight => Side::Right,
            },
        };

        let left_first = base_left.get(li).copied();
        let right_first = base_right.get(ri).copied();
        let (mut left_last, mut right_last) = (left_first, right_first);
        let mut last_side = first_side;

        let (mut lj, mut rj) = (li, ri);
        while lj < base_left.len() && rj < base_right.len() {
            let (l, r) = (base_left[lj], base_right[rj]);

            if l.end[0] == r.end[0] {
                lj += 1;
                last_side = Side::Right;
                left_last = Some(l);
                right_last = Some(r);
                break;
            }

            let disjoint = match last_side {
                Side::Right => r.begin[0].max(r.end[0]) < l.begin[0],
                Side::Left => l.begin[0].max(l.end[0]) < r.begin[0],
            };
            if disjoint {
                break;
            }

            if r.end[0] > l.end[0] {
                lj += 1;
                last_side = Side::Right;
            } else {
                rj += 1;
                last_side = Side::Left;
            }
            left_last = Some(l);
            right_last = Some(r);
        }

        match last_side {
            Side::Right => rj += 1,
            Side::Left => lj += 1,
        }

        let mut sources = Sources::empty();
        if lj > li {
            sources |= Sources::BASE_LEFT;
        }
        if rj > ri {
            sources |= Sources::BASE_RIGHT;
        }

        let extrapolate = |base: isize, pane: usize| base - last[BASE] + last[pane];
        let mut block = DiffRange::new([0; MAX_PANES], [0; MAX_PANES], DiffOp::ChangedInAll);

        match (first_side, left_first, right_first) {
            (Side::Right, _, Some(r)) => {
                block.begin[BASE] = r.begin[0];
                block.begin[RIGHT] = r.begin[1];
                block.begin[LEFT] = match left_first.filter(|_| sources.contains(Sources::BASE_LEFT)) {
                    Some(l) => block.begin[BASE] - l.begin[0] + l.begin[1],
                    None => extrapolate(block.begin[BASE], LEFT),
                };
            }
            (_, Some(l), _) => {
                block.begin[LEFT] = l.begin[1];
                block.begin[BASE] = l.begin[0];
                block.begin[RIGHT] = match right_first.filter(|_| sources.contains(Sources::BASE_RIGHT)) {
                    Some(r) => block.begin[BASE] - r.begin[0] + r.begin[1],
                    None => extrapolate(block.begin[BASE], RIGHT),
                };
            }
            _ => break,
        }

        match (last_side, left_last, right_last) {
            (Side::Right, _, Some(r)) => {
                block.end[BASE] = r.end[0];
                block.end[RIGHT] = r.end[1];
                block.end[LEFT] = match left_last.filter(|_| sources.contains(Sources::BASE_LEFT)) {
                    Some(l) => block.end[BASE] - l.end[0] + l.end[1],
                    None => extrapolate(block.end[BASE], LEFT),
                };
            }
            (_, Some(l), _) => {
                block.end[LEFT] = l.end[1];
                block.end[BASE] = l.end[0];
                block.end[RIGHT] = match right_last.filter(|_| sources.contains(Sources::BASE_RIGHT)) {
                    Some(r) => block.end[BASE] - r.end[0] + r.end[1],
                    None => extrapolate(block.end[BASE], RIGHT),
                };
            }
            _ => break,
        }

        for pane in 0..MAX_PANES {
            last[pane] = block.end[pane] + 1;
        }

        block.op = if sources == Sources::BASE_RIGHT {
            DiffOp::OnlyInPane2
        } else if sources == Sources::BASE_LEFT {
            DiffOp::OnlyInPane0
        } else if same_left_right(&block) {
            DiffOp::OnlyInPane1
        } else {
            DiffOp::ChangedInAll
        };

        merge_trace!(?sources, first = ?first_side, last = ?last_side, block = %block, "merged block");

        merged.push(block);
        (li, ri) = (lj, rj);
    }

    trim_overlaps(&mut merged);

    tracing::debug!(
        base_left = base_left.len(),
        base_right = base_right.len(),
        merged = merged.len(),
        "merged pairwise diffs"
    );

    merged
}

/// Clips each block's end to stop before the next block's begin
fn trim_overlaps(blocks: &mut [DiffRange]) {
    for i in 1..blocks.len() {
        let next = blocks[i];
        let block = &mut blocks[i - 1];
        for pane in 0..MAX_PANES {
            if block.end[pane] >= next.begin[pane] {
                block.end[pane] = next.begin[pane] - 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn pair(base: (isize, isize), other: (isize, isize)) -> DiffRange {
        DiffRange::two_way(base, other, DiffOp::ChangedInAll)
    }

    #[test]
    fn left_only_change_extrapolates_right() {
        let base_left = [pair((2, 2), (2, 3))];

        let merged = merge(&base_left, &[], TieBreak::PreferRight, |_| false);

        assert_eq!(
            merged,
            vec![DiffRange::new([2, 2, 2], [3, 2, 2], DiffOp::OnlyInPane0)]
        );
    }

    #[test]
    fn extrapolation_follows_previous_block() {
        // right gained two units before base index 5
        let base_left = [pair((5, 5), (5, 5))];
        let base_right = [pair((1, 0), (1, 2))];

        let merged = merge(&base_left, &base_right, TieBreak::PreferRight, |_| false);

        assert_eq!(
            merged,
            vec![
                DiffRange::new([1, 1, 1], [0, 0, 2], DiffOp::OnlyInPane2),
                DiffRange::new([5, 5, 7], [5, 5, 7], DiffOp::OnlyInPane0),
            ]
        );
    }

    #[rstest]
    #[case(true, DiffOp::OnlyInPane1)]
    #[case(false, DiffOp::ChangedInAll)]
    fn shared_blocks_ask_for_left_right_equality(#[case] same: bool, #[case] expected: DiffOp) {
        let base_left = [pair((1, 1), (1, 1))];
        let base_right = [pair((1, 1), (1, 1))];

        let merged = merge(&base_left, &base_right, TieBreak::PreferRight, |_| same);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].op, expected);
        assert_eq!(merged[0].begin, [1, 1, 1]);
        assert_eq!(merged[0].end, [1, 1, 1]);
    }

    #[test]
    fn overlapping_chains_absorb_into_one_block() {
        let base_left = [pair((1, 2), (1, 1)), pair((4, 5), (3, 3))];
        let base_right = [pair((2, 4), (2, 2))];

        let merged = merge(&base_left, &base_right, TieBreak::PreferRight, |_| false);

        assert_eq!(
            merged,
            vec![DiffRange::new([1, 1, 1], [3, 5, 3], DiffOp::ChangedInAll)]
        );
    }

    #[rstest]
    #[case(TieBreak::PreferRight, [2, 2, 2])]
    #[case(TieBreak::PreferLeft, [2, 2, 2])]
    fn either_tie_break_aligns_equal_starts(#[case] tie_break: TieBreak, #[case] begin: [isize; 3]) {
        let base_left = [pair((2, 1), (2, 2))];
        let base_right = [pair((2, 1), (2, 3))];

        let merged = merge(&base_left, &base_right, tie_break, |_| false);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].begin, begin);
        assert_eq!(merged[0].op, DiffOp::ChangedInAll);
    }

    #[test]
    fn trimming_keeps_blocks_disjoint() {
        let mut blocks = vec![
            DiffRange::new([0, 0, 0], [2, 2, 2], DiffOp::ChangedInAll),
            DiffRange::new([2, 1, 3], [2, 1, 3], DiffOp::OnlyInPane0),
        ];

        trim_overlaps(&mut blocks);

        assert_eq!(blocks[0].end, [1, 0, 2]);
    }
}
