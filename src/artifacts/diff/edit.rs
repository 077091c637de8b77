use std::fmt::{self, Display};

/// One step of the interleaved walk over both sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditOp {
    /// The unit is the same on both sides
    Equal,
    /// The unit exists only on the left
    Delete,
    /// The unit exists only on the right
    Insert,
    /// The units are aligned but differ
    Replace,
}

impl EditOp {
    pub fn symbol(self) -> char {
        match self {
            EditOp::Equal => '=',
            EditOp::Delete => '-',
            EditOp::Insert => '+',
            EditOp::Replace => '!',
        }
    }

    pub fn consumes_left(self) -> bool {
        !matches!(self, EditOp::Insert)
    }

    pub fn consumes_right(self) -> bool {
        !matches!(self, EditOp::Delete)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditScript {
    ops: Vec<EditOp>,
}

impl EditScript {
    /// Builds a script from a raw walk, turning each delete/insert pair inside
    /// a non-equal run into one replace
    ///
    /// A run with `d` deletes and `i` inserts becomes `min(d, i)` replaces
    /// followed by the surplus deletes or inserts.
    pub fn from_walk(walk: Vec<EditOp>) -> Self {
        let mut ops = Vec::with_capacity(walk.len());
        let mut deletes = 0usize;
        let mut inserts = 0usize;

        let flush = |ops: &mut Vec<EditOp>, deletes: &mut usize, inserts: &mut usize| {
            let replaces = (*deletes).min(*inserts);
            ops.extend(std::iter::repeat_n(EditOp::Replace, replaces));
            ops.extend(std::iter::repeat_n(EditOp::Delete, *deletes - replaces));
            ops.extend(std::iter::repeat_n(EditOp::Insert, *inserts - replaces));
            *deletes = 0;
            *inserts = 0;
        };

        for op in walk {
            match op {
                EditOp::Delete => deletes += 1,
                EditOp::Insert => inserts += 1,
                EditOp::Replace => {
                    deletes += 1;
                    inserts += 1;
                }
                EditOp::Equal => {
                    flush(&mut ops, &mut deletes, &mut inserts);
                    ops.push(EditOp::Equal);
                }
            }
        }
        flush(&mut ops, &mut deletes, &mut inserts);

        EditScript { ops }
    }

    pub fn ops(&self) -> &[EditOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of left units the script walks over
    pub fn left_len(&self) -> usize {
        self.ops.iter().filter(|op| op.consumes_left()).count()
    }

    /// Number of right units the script walks over
    pub fn right_len(&self) -> usize {
        self.ops.iter().filter(|op| op.consumes_right()).count()
    }

    pub fn is_identity(&self) -> bool {
        self.ops.iter().all(|&op| op == EditOp::Equal)
    }

    /// Replays the script over `left`, taking inserted and replaced units from
    /// `right`; with exact comparison the result equals `right`
    pub fn apply<T: Clone>(&self, left: &[T], right: &[T]) -> Vec<T> {
        let (mut i, mut j) = (0, 0);
        let mut output = Vec::with_capacity(right.len());

        for &op in &self.ops {
            match op {
                EditOp::Equal => {
                    output.push(left[i].clone());
                    i += 1;
                    j += 1;
                }
                EditOp::Delete => i += 1,
                EditOp::Insert => {
                    output.push(right[j].clone());
                    j += 1;
                }
                EditOp::Replace => {
                    output.push(right[j].clone());
                    i += 1;
                    j += 1;
                }
            }
        }

        output
    }
}

impl Display for EditScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols: String = self.ops.iter().map(|op| op.symbol()).collect();
        write!(f, "{symbols}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use super::EditOp::{Delete, Equal, Insert};

    #[test]
    fn pairs_deletes_and_inserts_into_replaces() {
        let script = EditScript::from_walk(vec![
            Equal, Delete, Delete, Insert, Equal, Insert, Delete, Insert, Insert,
        ]);

        assert_eq!(script.to_string(), "=!-=!++");
        assert_eq!(script.left_len(), 5);
        assert_eq!(script.right_len(), 6);
    }

    #[test]
    fn replays_right_side() {
        let left = ['a', 'b', 'c', 'a', 'b', 'b', 'a'];
        let right = ['c', 'b', 'a', 'b', 'a', 'c'];
        let script = EditScript::from_walk(vec![
            Delete, Delete, Equal, Insert, Equal, Equal, Delete, Equal, Insert,
        ]);

        assert_eq!(script.apply(&left, &right), right.to_vec());
    }
}
