//! Batch transformation executors.
//!
//! [`UnaryExecutor`] maps a per-value function over one string array,
//! preserving length and null pattern. [`BatchExecutor`] resolves a bound
//! function call to its kernel and runs it over one or many batches.

mod batch;
mod unary;

pub use batch::BatchExecutor;
pub use unary::UnaryExecutor;
