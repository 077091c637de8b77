use crate::artifacts::dom::node::{NodeId, NodeKind};
use derive_new::new;
use std::ops::Range;

/// Where a segment's text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentSource {
    /// The whole text of one snapshot node
    Node { id: NodeId, kind: NodeKind },
    /// A word, whitespace or punctuation token cut out of a longer string
    WordToken,
}

impl SegmentSource {
    pub fn node_id(&self) -> Option<NodeId> {
        match self {
            SegmentSource::Node { id, .. } => Some(*id),
            SegmentSource::WordToken => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct TextSegment {
    pub source: SegmentSource,
    /// Offset in code units into the owning buffer
    pub offset: usize,
    pub len: usize,
}

impl TextSegment {
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    pub fn span(&self) -> Range<usize> {
        self.offset..self.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Node,
    Word,
}

/// The concatenated text of one snapshot plus the segments that tile it
///
/// Segments are non-empty, strictly increasing by offset and cover the
/// buffer without gaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentedText {
    buffer: Vec<char>,
    segments: Vec<TextSegment>,
    granularity: Granularity,
}

impl SegmentedText {
    pub fn new(granularity: Granularity) -> Self {
        SegmentedText {
            buffer: Vec::new(),
            segments: Vec::new(),
            granularity,
        }
    }

    /// Appends `text` as one segment; empty text adds nothing
    pub fn push(&mut self, source: SegmentSource, text: &str) {
        let offset = self.buffer.len();
        self.buffer.extend(text.chars());
        let len = self.buffer.len() - offset;
        if len > 0 {
            self.segments.push(TextSegment::new(source, offset, len));
        }
    }

    pub fn buffer(&self) -> &[char] {
        &self.buffer
    }

    pub fn segments(&self) -> &[TextSegment] {
        &self.segments
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TextSegment> {
        self.segments.get(index)
    }

    /// Code units of segment `index`
    pub fn unit(&self, index: usize) -> &[char] {
        &self.buffer[self.segments[index].span()]
    }

    pub fn unit_string(&self, index: usize) -> String {
        self.unit(index).iter().collect()
    }

    /// Index of the segment starting exactly at `offset`
    pub fn index_at_offset(&self, offset: usize) -> Option<usize> {
        self.segments
            .binary_search_by_key(&offset, |segment| segment.offset)
            .ok()
    }

    /// Buffer offsets covered by the inclusive segment range `begin..=end`;
    /// an empty range (`end < begin`) maps to an empty span at `begin`
    pub fn offsets(&self, begin: isize, end: isize) -> Range<usize> {
        let start = usize::try_from(begin)
            .ok()
            .and_then(|b| self.segments.get(b))
            .map_or(self.buffer.len(), |segment| segment.offset);
        if end < begin {
            return start..start;
        }
        let stop = usize::try_from(end)
            .ok()
            .and_then(|e| self.segments.get(e))
            .map_or(self.buffer.len(), TextSegment::end);
        start..stop
    }

    /// Concatenated text of the inclusive segment range `begin..=end`
    pub fn text_between(&self, begin: isize, end: isize) -> String {
        self.buffer[self.offsets(begin, end)].iter().collect()
    }
}
