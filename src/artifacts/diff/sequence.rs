//! Comparable sequences
//!
//! The diff engine never looks at trees or segments directly. It walks a
//! `ComparableSequence`: a flat buffer of code units cut into units by
//! `next`, with equality and hashing that honour the configured
//! normalization.

use crate::artifacts::diff::options::{DiffOptions, WhitespaceMode};
use crate::artifacts::segment::text_segment::SegmentedText;
use derive_new::new;

const HASH_SEED: u64 = 5381;

pub trait ComparableSequence {
    /// Number of code units in the buffer
    fn size(&self) -> usize;

    /// The whole buffer
    fn data(&self) -> &[char];

    /// End offset of the unit starting at `offset`, or `None` when no unit
    /// starts there
    fn next(&self, offset: usize) -> Option<usize>;

    fn equals(&self, a: &[char], b: &[char]) -> bool;

    /// Must agree with `equals`: equal units hash equally
    fn hash(&self, unit: &[char]) -> u64;

    /// Offsets of every unit, in order
    fn units(&self) -> Vec<(usize, usize)> {
        let mut units = Vec::new();
        let mut offset = 0;
        while offset < self.size() {
            match self.next(offset) {
                Some(end) if end > offset => {
                    units.push((offset, end));
                    offset = end;
                }
                _ => break,
            }
        }
        units
    }
}

/// Case and whitespace folding shared by every adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct Normalizer {
    ignore_case: bool,
    whitespace: WhitespaceMode,
}

impl From<&DiffOptions> for Normalizer {
    fn from(options: &DiffOptions) -> Self {
        Normalizer::new(options.ignore_case, options.whitespace)
    }
}

impl Normalizer {
    fn same_char(&self, a: char, b: char) -> bool {
        a == b || (self.ignore_case && a.to_lowercase().eq(b.to_lowercase()))
    }

    pub fn equals(&self, a: &[char], b: &[char]) -> bool {
        match self.whitespace {
            WhitespaceMode::None => {
                a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| self.same_char(x, y))
            }
            WhitespaceMode::Collapse => self.equals_collapsed(a, b),
            WhitespaceMode::Ignore => {
                let mut left = a.iter().filter(|ch| !ch.is_whitespace());
                let mut right = b.iter().filter(|ch| !ch.is_whitespace());
                loop {
                    match (left.next(), right.next()) {
                        (None, None) => return true,
                        (Some(&x), Some(&y)) if self.same_char(x, y) => continue,
                        _ => return false,
                    }
                }
            }
        }
    }

    fn equals_collapsed(&self, a: &[char], b: &[char]) -> bool {
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            let (x, y) = (a[i], b[j]);
            match (x.is_whitespace(), y.is_whitespace()) {
                (true, true) => {
                    while i < a.len() && a[i].is_whitespace() {
                        i += 1;
                    }
                    while j < b.len() && b[j].is_whitespace() {
                        j += 1;
                    }
                }
                (false, false) if self.same_char(x, y) => {
                    i += 1;
                    j += 1;
                }
                _ => return false,
            }
        }
        i == a.len() && j == b.len()
    }

    pub fn hash(&self, unit: &[char]) -> u64 {
        let mut hash = HASH_SEED;
        let mut mix = |ch: char| {
            let ch = if self.ignore_case {
                ch.to_lowercase().next().unwrap_or(ch)
            } else {
                ch
            };
            hash = hash.wrapping_add(hash << 5) ^ u64::from(u32::from(ch));
        };

        let mut in_space = false;
        for &ch in unit {
            if self.whitespace != WhitespaceMode::None && ch.is_whitespace() {
                if self.whitespace == WhitespaceMode::Collapse && !in_space {
                    mix(' ');
                }
                in_space = true;
                continue;
            }
            in_space = false;
            mix(ch);
        }

        hash
    }
}

/// One unit per snapshot node
#[derive(Debug, Clone, new)]
pub struct SegmentSequence<'s> {
    text: &'s SegmentedText,
    normalizer: Normalizer,
}

impl ComparableSequence for SegmentSequence<'_> {
    fn size(&self) -> usize {
        self.text.buffer().len()
    }

    fn data(&self) -> &[char] {
        self.text.buffer()
    }

    fn next(&self, offset: usize) -> Option<usize> {
        self.text
            .index_at_offset(offset)
            .and_then(|index| self.text.get(index))
            .map(|segment| segment.end())
    }

    fn equals(&self, a: &[char], b: &[char]) -> bool {
        self.normalizer.equals(a, b)
    }

    fn hash(&self, unit: &[char]) -> u64 {
        self.normalizer.hash(unit)
    }
}

/// One unit per word token
///
/// Word texts are short, so unit ends are kept in a table indexed by offset
/// instead of being searched for.
#[derive(Debug, Clone)]
pub struct WordSequence<'s> {
    text: &'s SegmentedText,
    ends: Vec<Option<usize>>,
    normalizer: Normalizer,
}

impl<'s> WordSequence<'s> {
    pub fn new(text: &'s SegmentedText, normalizer: Normalizer) -> Self {
        let mut ends = vec![None; text.buffer().len()];
        for segment in text.segments() {
            ends[segment.offset] = Some(segment.end());
        }
        WordSequence {
            text,
            ends,
            normalizer,
        }
    }
}

impl ComparableSequence for WordSequence<'_> {
    fn size(&self) -> usize {
        self.text.buffer().len()
    }

    fn data(&self) -> &[char] {
        self.text.buffer()
    }

    fn next(&self, offset: usize) -> Option<usize> {
        self.ends.get(offset).copied().flatten()
    }

    fn equals(&self, a: &[char], b: &[char]) -> bool {
        self.normalizer.equals(a, b)
    }

    fn hash(&self, unit: &[char]) -> u64 {
        self.normalizer.hash(unit)
    }
}
