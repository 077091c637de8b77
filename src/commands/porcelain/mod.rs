//! Porcelain commands
//!
//! User-facing operations over a comparison session.
//!
//! ## Commands
//!
//! - `compare`: compute and print the diff list
//! - `highlight`: mark the diff list on the snapshots
//! - `revert`: remove markers from a highlighted snapshot

pub mod compare;
pub mod highlight;
pub mod revert;
