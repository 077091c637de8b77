//! Snapshot data structures and comparison algorithms
//!
//! - `core`: the shared error type and logging setup
//! - `dom`: the document arena and its JSON form
//! - `segment`: text extraction from documents
//! - `diff`: sequence comparison, diff lists and navigation
//! - `merge`: three-way reconciliation of pairwise diffs
//! - `highlight`: marking, reverting and serializing documents

pub mod core;
pub mod diff;
pub mod dom;
pub mod highlight;
pub mod merge;
pub mod segment;
