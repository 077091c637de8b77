//! Document snapshots
//!
//! - `node`: node kinds, attributes and the arena slot type
//! - `document`: the arena, JSON import/export and node lookup
//! - `html`: markup helpers shared by the serializer

pub mod document;
pub mod html;
pub mod node;
