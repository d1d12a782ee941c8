//! Core data model for Quiver.
//!
//! This crate provides the fundamental types shared by the optimizer and the
//! execution engine:
//! - `Value` and `DataType` for the type system
//! - `ColumnStats` and `StatsCatalog` for per-column facts consumed during
//!   optimization

pub mod stats;
pub mod types;

#[cfg(test)]
mod proptest_utils;

// Re-export commonly used types
pub use stats::{ColumnStats, StatsCatalog};
pub use types::{DataType, Value};
