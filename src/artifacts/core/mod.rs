//! Core utilities and shared types
//!
//! This module contains the pieces every other module leans on:
//!
//! - `error`: the engine-wide error type
//! - `logging`: subscriber setup for the binary

pub mod error;
pub mod logging;

pub use error::{DiffError, Result};
