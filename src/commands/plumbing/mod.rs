//! Plumbing commands
//!
//! Low-level views of the engine's intermediate state, mostly useful for
//! scripting and for checking what the comparison actually sees.
//!
//! ## Commands
//!
//! - `segments`: the comparable text of each snapshot
//! - `stylesheet`: colour rules for the marker classes

pub mod segments;
pub mod stylesheet;
