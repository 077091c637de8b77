//! Shortest edit script strategies
//!
//! Units are first mapped to equivalence classes, so every strategy works on
//! plain `usize` arrays. All strategies produce the same walk: a match is
//! always taken as `Equal`, and at a mismatch the left unit is deleted
//! whenever doing so keeps the remaining edit distance minimal, otherwise
//! the right unit is inserted.

use crate::artifacts::diff::edit::{EditOp, EditScript};
use crate::artifacts::diff::options::Algorithm;
use crate::artifacts::diff::sequence::ComparableSequence;
use derive_new::new;
use std::collections::HashMap;

pub trait DiffStrategy {
    type Trace;

    fn compute_shortest_edit(&self) -> Self::Trace;

    /// Raw walk of `Equal`/`Delete`/`Insert` steps
    fn walk(&self) -> Vec<EditOp>;

    fn diff(&self) -> EditScript {
        EditScript::from_walk(self.walk())
    }
}

/// Hash buckets of class representatives
#[derive(Debug, Default)]
struct Classes<'u> {
    buckets: HashMap<u64, Vec<(usize, &'u [char])>>,
    count: usize,
}

impl<'u> Classes<'u> {
    fn class_of(
        &mut self,
        unit: &'u [char],
        hash: u64,
        equals: impl Fn(&[char], &[char]) -> bool,
    ) -> usize {
        let bucket = self.buckets.entry(hash).or_default();
        if let Some(&(class, _)) = bucket
            .iter()
            .find(|(_, representative)| equals(*representative, unit))
        {
            return class;
        }
        let class = self.count;
        self.count += 1;
        bucket.push((class, unit));
        class
    }
}

/// Maps the units of both sequences to class ids; two units share a class
/// exactly when the left sequence's `equals` holds for them
pub fn classify<L, R>(left: &L, right: &R) -> (Vec<usize>, Vec<usize>)
where
    L: ComparableSequence,
    R: ComparableSequence,
{
    let mut classes = Classes::default();
    let equals = |a: &[char], b: &[char]| left.equals(a, b);

    let left_classes = left
        .units()
        .into_iter()
        .map(|(begin, end)| {
            let unit = &left.data()[begin..end];
            classes.class_of(unit, left.hash(unit), equals)
        })
        .collect();
    let right_classes = right
        .units()
        .into_iter()
        .map(|(begin, end)| {
            let unit = &right.data()[begin..end];
            classes.class_of(unit, right.hash(unit), equals)
        })
        .collect();

    (left_classes, right_classes)
}

/// Computes the edit script between two sequences with the chosen strategy
pub fn diff<L, R>(left: &L, right: &R, algorithm: Algorithm) -> EditScript
where
    L: ComparableSequence,
    R: ComparableSequence,
{
    let (a, b) = classify(left, right);

    let script = match algorithm {
        Algorithm::Myers => MyersDiff::new(&a, &b).diff(),
        Algorithm::Minimal => MinimalDiff::new(&a, &b).diff(),
        Algorithm::Trimmed => TrimmedDiff::new(&a, &b).diff(),
    };

    tracing::debug!(
        %algorithm,
        left_units = a.len(),
        right_units = b.len(),
        ops = script.len(),
        "computed edit script"
    );

    script
}

/// Furthest reaching points per edit count, computed over the reversed
/// sequences so that the forward walk can ask for suffix distances
///
/// `trace[d][(k + d) / 2]` is the furthest `x` on diagonal `k` reachable with
/// exactly `d` edits, or `-1` when that diagonal cannot be reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MyersTrace {
    rounds: Vec<Vec<isize>>,
}

impl MyersTrace {
    /// Edit distance between the two whole sequences
    pub fn distance(&self) -> usize {
        self.rounds.len().saturating_sub(1)
    }

    /// Whether the reversed prefixes of length `x` and `y` are at most `d`
    /// edits apart
    fn within(&self, x: usize, y: usize, d: usize) -> bool {
        let (x, k) = (x as isize, x as isize - y as isize);
        let mut d = d.min(self.distance()) as isize;
        if (d - k).rem_euclid(2) == 1 {
            d -= 1;
        }
        if d < k.abs() {
            return false;
        }
        self.rounds[d as usize]
            .get(((k + d) / 2) as usize)
            .is_some_and(|&reach| reach >= x)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct MyersDiff<'d> {
    a: &'d [usize],
    b: &'d [usize],
}

impl DiffStrategy for MyersDiff<'_> {
    type Trace = MyersTrace;

    fn compute_shortest_edit(&self) -> Self::Trace {
        let (n, m) = (self.a.len() as isize, self.b.len() as isize);
        let a = |x: isize| self.a[self.a.len() - 1 - x as usize];
        let b = |y: isize| self.b[self.b.len() - 1 - y as usize];

        let snake = |mut x: isize, k: isize| {
            while x < n && x - k < m && a(x) == b(x - k) {
                x += 1;
            }
            x
        };

        let mut rounds: Vec<Vec<isize>> = vec![vec![snake(0, 0)]];
        if rounds[0][0] >= n && n == m {
            return MyersTrace { rounds };
        }

        for d in 1..=(n + m) {
            let previous = &rounds[(d - 1) as usize];
            let mut round = Vec::with_capacity(d as usize + 1);

            for k in (-d..=d).step_by(2) {
                let slot = ((k + d) / 2) as usize;

                // from diagonal k + 1: an insertion keeps x
                let inserted = previous
                    .get(slot)
                    .copied()
                    .filter(|&x| x >= 0 && x - k <= m);
                // from diagonal k - 1: a deletion advances x
                let deleted = slot
                    .checked_sub(1)
                    .and_then(|slot| previous.get(slot).copied())
                    .filter(|&x| x >= 0 && x < n)
                    .map(|x| x + 1);

                let x = match (inserted, deleted) {
                    (Some(i), Some(d)) => snake(i.max(d), k),
                    (Some(x), None) | (None, Some(x)) => snake(x, k),
                    (None, None) => -1,
                };
                round.push(x);

                if x >= n && x - k >= m {
                    rounds.push(round);
                    return MyersTrace { rounds };
                }
            }

            rounds.push(round);
        }

        MyersTrace { rounds }
    }

    fn walk(&self) -> Vec<EditOp> {
        let (n, m) = (self.a.len(), self.b.len());
        let trace = self.compute_shortest_edit();
        let mut remaining = trace.distance();
        let (mut i, mut j) = (0, 0);
        let mut walk = Vec::with_capacity(n + m);

        while i < n || j < m {
            let op = if i < n && j < m && self.a[i] == self.b[j] {
                EditOp::Equal
            } else if j == m
                || (i < n && remaining > 0 && trace.within(n - i - 1, m - j, remaining - 1))
            {
                EditOp::Delete
            } else {
                EditOp::Insert
            };

            match op {
                EditOp::Equal => {
                    i += 1;
                    j += 1;
                }
                EditOp::Delete => {
                    i += 1;
                    remaining = remaining.saturating_sub(1);
                }
                _ => {
                    j += 1;
                    remaining = remaining.saturating_sub(1);
                }
            }
            walk.push(op);
        }

        walk
    }
}

/// Full suffix LCS table; no early exit
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct MinimalDiff<'d> {
    a: &'d [usize],
    b: &'d [usize],
}

impl DiffStrategy for MinimalDiff<'_> {
    /// Row-major `(n + 1) x (m + 1)` table of suffix LCS lengths
    type Trace = Vec<u32>;

    fn compute_shortest_edit(&self) -> Self::Trace {
        let (n, m) = (self.a.len(), self.b.len());
        let width = m + 1;
        let mut table = vec![0u32; (n + 1) * width];

        for i in (0..n).rev() {
            for j in (0..m).rev() {
                table[i * width + j] = if self.a[i] == self.b[j] {
                    table[(i + 1) * width + j + 1] + 1
                } else {
                    table[(i + 1) * width + j].max(table[i * width + j + 1])
                };
            }
        }

        table
    }

    fn walk(&self) -> Vec<EditOp> {
        let (n, m) = (self.a.len(), self.b.len());
        let width = m + 1;
        let table = self.compute_shortest_edit();
        let (mut i, mut j) = (0, 0);
        let mut walk = Vec::with_capacity(n + m);

        while i < n || j < m {
            if i < n && j < m && self.a[i] == self.b[j] {
                walk.push(EditOp::Equal);
                i += 1;
                j += 1;
            } else if j == m
                || (i < n && table[(i + 1) * width + j] >= table[i * width + j + 1])
            {
                walk.push(EditOp::Delete);
                i += 1;
            } else {
                walk.push(EditOp::Insert);
                j += 1;
            }
        }

        walk
    }
}

/// Strips the common prefix and runs Myers on what is left
///
/// Only the prefix is trimmed: a shared suffix can still be split by the
/// walk, so trimming it would change the resulting script.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TrimmedDiff<'d> {
    a: &'d [usize],
    b: &'d [usize],
}

impl DiffStrategy for TrimmedDiff<'_> {
    /// Length of the common prefix and the trace of the remainder
    type Trace = (usize, MyersTrace);

    fn compute_shortest_edit(&self) -> Self::Trace {
        let prefix = self.common_prefix();
        let rest = MyersDiff::new(&self.a[prefix..], &self.b[prefix..]);
        (prefix, rest.compute_shortest_edit())
    }

    fn walk(&self) -> Vec<EditOp> {
        let prefix = self.common_prefix();
        let mut walk = vec![EditOp::Equal; prefix];
        walk.extend(MyersDiff::new(&self.a[prefix..], &self.b[prefix..]).walk());
        walk
    }
}

impl TrimmedDiff<'_> {
    fn common_prefix(&self) -> usize {
        self.a
            .iter()
            .zip(self.b)
            .take_while(|(x, y)| x == y)
            .count()
    }
}
