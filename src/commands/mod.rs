//! Command implementations
//!
//! Commands are `impl Session` blocks split in two groups:
//!
//! - `plumbing`: views of intermediate state (segments, stylesheet)
//! - `porcelain`: the comparison workflow (compare, highlight, revert)

pub mod plumbing;
pub mod porcelain;
