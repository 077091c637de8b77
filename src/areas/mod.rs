//! Stateful comparison components
//!
//! - `snapshot`: reading and writing snapshot files
//! - `session`: the documents under comparison with their current diff list,
//!   options, palette and selection

pub mod session;
pub mod snapshot;
