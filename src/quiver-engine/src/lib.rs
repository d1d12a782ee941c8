//! Batch execution engine for quiver.
//!
//! This crate runs optimized expressions over Arrow data:
//!
//! - [`executor`]: row-wise string transformation ([`UnaryExecutor`]) and
//!   batch/partition dispatch of bound function calls ([`BatchExecutor`])
//! - [`functions`]: case-conversion kernels and the [`KernelRegistry`] that
//!   maps a call's bound implementation to a kernel
//! - [`expr`]: the [`ExprEvaluator`] for whole expression trees
//!
//! Kernels are plain function pointers and inputs are immutable Arrow
//! arrays, so batches can be processed on any number of threads without
//! synchronization.

#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::unused_self)]

pub mod executor;
pub mod expr;
pub mod functions;

pub use executor::{BatchExecutor, UnaryExecutor};
pub use expr::ExprEvaluator;
pub use functions::{KernelRegistry, StringKernel};
