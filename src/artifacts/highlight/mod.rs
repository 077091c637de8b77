//! Reconstruction of highlighted snapshots
//!
//! - `markers`: marker classes, attributes and node builders
//! - `projection`: where a block lands on a pane's nodes
//! - `highlighter`: applies a diff list to the documents
//! - `revert`: removes every marker again
//! - `serialize`: markup of modified nodes
//! - `stylesheet`: colour rules for the marker classes

pub mod highlighter;
pub mod markers;
pub mod projection;
pub mod revert;
pub mod serialize;
pub mod stylesheet;
