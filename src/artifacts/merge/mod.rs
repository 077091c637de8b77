//! Three-way reconciliation of pairwise diffs
//!
//! - `three_way`: merges base/left and base/right block lists into one
//!   three-pane alignment

pub mod three_way;
