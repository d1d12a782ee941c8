//! Expression optimizer for quiver.
//!
//! Optimization runs in two phases:
//!
//! 1. [`ExprSimplifier`] rewrites algebraic identities to fixpoint, keeping
//!    every value, null and static type unchanged.
//! 2. [`StatsPropagator`] walks the simplified tree bottom-up and rebinds
//!    function calls to specialized implementations when column statistics
//!    prove it safe.
//!
//! [`Optimizer`] runs both; [`RewriteHarness`] drives the first from text.

mod binder;
mod harness;
mod optimizer;
pub mod rules;

pub use binder::{Rebind, StatsPropagator};
pub use harness::RewriteHarness;
pub use optimizer::{OptimizedExpr, Optimizer};
pub use rules::{ExprSimplifier, RewriteRule};

use common_error::QuiverResult;
use quiver_logical::LogicalExpr;

/// Simplify an expression using the default rules.
pub fn simplify(expr: LogicalExpr) -> QuiverResult<LogicalExpr> {
    Ok(ExprSimplifier::default().simplify(expr)?.expr)
}
