use derive_new::new;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on the number of compared documents
pub const MAX_PANES: usize = 3;

/// Relationship between the panes inside one aligned block
///
/// The `OnlyInPaneN` tags name the pane whose content differs from the two
/// others; `OnlyInPane1` means left and right agree while the base changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiffOp {
    ChangedInAll,
    OnlyInPane0,
    OnlyInPane1,
    OnlyInPane2,
    Trivial,
}

impl fmt::Display for DiffOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffOp::ChangedInAll => write!(f, "changed"),
            DiffOp::OnlyInPane0 => write!(f, "only-in-pane-0"),
            DiffOp::OnlyInPane1 => write!(f, "only-in-pane-1"),
            DiffOp::OnlyInPane2 => write!(f, "only-in-pane-2"),
            DiffOp::Trivial => write!(f, "trivial"),
        }
    }
}

/// One aligned block as inclusive segment-index spans per pane
///
/// A pane with `end < begin` has no units in the block; `begin` is then the
/// index the block would occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct DiffRange {
    pub begin: [isize; MAX_PANES],
    pub end: [isize; MAX_PANES],
    pub op: DiffOp,
}

impl DiffRange {
    /// A two-pane block; the third pane is left empty
    pub fn two_way(left: (isize, isize), right: (isize, isize), op: DiffOp) -> Self {
        DiffRange::new([left.0, right.0, 0], [left.1, right.1, -1], op)
    }

    pub fn is_empty_on(&self, pane: usize) -> bool {
        self.end[pane] < self.begin[pane]
    }

    pub fn len_on(&self, pane: usize) -> usize {
        usize::try_from(self.end[pane] - self.begin[pane] + 1).unwrap_or(0)
    }

    /// Segment indices the block covers on `pane`
    pub fn indices(&self, pane: usize) -> impl Iterator<Item = usize> + use<> {
        let begin = usize::try_from(self.begin[pane]).unwrap_or(0);
        let end = usize::try_from(self.end[pane] + 1).unwrap_or(0);
        begin..end.max(begin)
    }
}

impl fmt::Display for DiffRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.op)?;
        for pane in 0..MAX_PANES {
            write!(f, " [{}..{}]", self.begin[pane], self.end[pane])?;
        }
        Ok(())
    }
}

/// The result of one comparison: ordered blocks over `panes` documents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct DiffList {
    panes: usize,
    ranges: Vec<DiffRange>,
}

impl DiffList {
    pub fn panes(&self) -> usize {
        self.panes
    }

    pub fn ranges(&self) -> &[DiffRange] {
        &self.ranges
    }

    pub fn get(&self, index: usize) -> Option<&DiffRange> {
        self.ranges.get(index)
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiffRange> {
        self.ranges.iter()
    }

    /// Whether consecutive blocks are strictly ordered and disjoint on every
    /// pane
    pub fn is_non_overlapping(&self) -> bool {
        self.ranges.windows(2).all(|pair| {
            (0..self.panes).all(|pane| pair[0].end[pane] < pair[1].begin[pane])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_spans_have_no_indices() {
        let range = DiffRange::two_way((3, 2), (4, 6), DiffOp::ChangedInAll);

        assert!(range.is_empty_on(0));
        assert_eq!(range.indices(0).count(), 0);
        assert_eq!(range.indices(1).collect::<Vec<_>>(), vec![4, 5, 6]);
        assert_eq!(range.len_on(1), 3);
        assert!(range.is_empty_on(2));
    }

    #[test]
    fn serializes_with_camel_case_ops() {
        let list = DiffList::new(
            2,
            vec![DiffRange::two_way((0, 0), (0, -1), DiffOp::ChangedInAll)],
        );

        let json = serde_json::to_value(&list).unwrap();

        assert_eq!(json["ranges"][0]["op"], "changedInAll");
        assert_eq!(json["ranges"][0]["end"][1], -1);
    }

    #[test]
    fn detects_overlapping_blocks() {
        let list = DiffList::new(
            2,
            vec![
                DiffRange::two_way((0, 2), (0, 1), DiffOp::ChangedInAll),
                DiffRange::two_way((2, 3), (3, 3), DiffOp::ChangedInAll),
            ],
        );

        assert!(!list.is_non_overlapping());
    }
}
