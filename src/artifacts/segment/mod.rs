//! Text extraction
//!
//! - `text_segment`: segments and the buffer they tile
//! - `segmenter`: one segment per visible text node or input value
//! - `word`: word-level re-segmentation of a single string

pub mod segmenter;
pub mod text_segment;
pub mod word;
