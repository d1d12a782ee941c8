//! Quiver - expression rewriting and statistics-driven kernel specialization
//!
//! Quiver is the expression core of an embedded analytical engine: it
//! simplifies algebraic identities without changing values, nulls or types,
//! and swaps string kernels for faster variants when column statistics prove
//! the input is ASCII.

#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

// Re-export member crates
pub use common_config as config;
pub use common_error as error;
pub use quiver_core as core;
pub use quiver_engine as engine;
pub use quiver_logical as logical;
pub use quiver_optimizer as optimizer;

/// Quiver version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
