use crate::artifacts::segment::text_segment::{Granularity, SegmentSource, SegmentedText};

/// Punctuation that always forms a token of its own
const BREAK_CHARS: &str = ".,:;?[](){}<=>`'!\"#$%&^~\\|@+-*/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Word,
    Space,
    Break,
}

fn is_word_break(ch: char) -> bool {
    if u32::from(ch) < 0x100 {
        BREAK_CHARS.contains(ch)
    } else {
        !(ch.is_alphabetic() || ch.is_numeric())
    }
}

fn classify(ch: char) -> CharClass {
    if ch.is_whitespace() {
        CharClass::Space
    } else if is_word_break(ch) {
        CharClass::Break
    } else {
        CharClass::Word
    }
}

/// Re-segments one string into word, whitespace and punctuation runs
///
/// A run ends whenever the character class changes, and every break
/// character is a run by itself.
pub fn split_words(text: &str) -> SegmentedText {
    let mut segmented = SegmentedText::new(Granularity::Word);
    let mut run = String::new();
    let mut previous: Option<CharClass> = None;

    for ch in text.chars() {
        let class = classify(ch);
        if previous.is_some() && (class == CharClass::Break || Some(class) != previous) {
            segmented.push(SegmentSource::WordToken, &run);
            run.clear();
        }
        run.push(ch);
        previous = Some(class);
    }
    segmented.push(SegmentSource::WordToken, &run);

    segmented
}
