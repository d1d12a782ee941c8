//! Logical expression layer for quiver.
//!
//! `quiver-logical` defines the expression tree the optimizer rewrites and
//! the engine evaluates:
//!
//! - [`expr`]: typed expression nodes (`LogicalExpr`) and builders
//! - [`functions`]: the builtin scalar function catalog, including the
//!   statistics propagation capability used for kernel specialization
//! - [`text`]: the textual expression format used by tests and tooling
//!
//! # Example
//!
//! ```rust
//! use quiver_core::DataType;
//! use quiver_logical::expr::{col, lit};
//! use quiver_logical::text;
//!
//! let expr = col("X", DataType::Int64).add_expr(lit(0i64));
//! assert_eq!(text::serialize(&expr), "(X + 0)");
//! assert_eq!(text::parse("X + 0").unwrap(), expr);
//! ```

pub mod expr;
pub mod functions;
pub mod text;

pub use expr::{col, lit, null_lit, BinaryOp, ColumnRef, FuncExpr, Implementation, LogicalExpr};
pub use functions::{FunctionDef, Propagation, StatsPropagateFn};
