//! Sequence comparison
//!
//! - `options`: normalization and strategy settings
//! - `sequence`: the `ComparableSequence` trait and its node/word adapters
//! - `algorithm`: shortest edit script strategies
//! - `edit`: edit operations and scripts
//! - `diff_range`: aligned blocks and diff lists
//! - `translator`: edit script to block conversion
//! - `compare`: two- and three-pane comparison entry points
//! - `navigation`: moving through a diff list

pub mod algorithm;
pub mod compare;
pub mod diff_range;
pub mod edit;
pub mod navigation;
pub mod options;
pub mod sequence;
pub mod translator;
