//! # chartust-common
//!
//! Shared types, error definitions, the color utility, and constants used
//! across the entire Chartust workspace.
//!
//! This crate is the leaf of the dependency graph — it depends on no other
//! internal crate and provides the foundational primitives that all other
//! crates build upon.

pub mod color;
pub mod constants;
pub mod error;
pub mod types;
