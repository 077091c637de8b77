//! Structural comparison of DOM snapshots
//!
//! Two or three snapshots are reduced to comparable text, diffed with a
//! shortest-edit-script engine (merged three ways when a base is given), and
//! the resulting blocks are marked back onto the trees as highlight wrappers.
//!
//! - `artifacts`: the pure data structures and algorithms
//! - `areas`: snapshot I/O and the comparison session
//! - `commands`: CLI operations over a session

pub mod areas;
pub mod artifacts;
pub mod commands;
