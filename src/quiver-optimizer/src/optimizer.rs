//! Expression optimizer: simplification followed by specialization.

use common_config::OptimizerConfig;
use common_error::QuiverResult;
use log::debug;
use quiver_core::{ColumnStats, StatsCatalog};
use quiver_logical::LogicalExpr;

use crate::binder::{Rebind, StatsPropagator};
use crate::rules::{ArithmeticSimplification, ExprSimplifier, RuleTrace};

/// The result of optimizing one expression.
#[derive(Debug, Clone)]
pub struct OptimizedExpr {
    /// The simplified, specialized expression.
    pub expr: LogicalExpr,
    /// Statistics of the expression's result, if derivable.
    pub stats: Option<ColumnStats>,
    /// Function calls rebound to a specialized implementation.
    pub rebinds: Vec<Rebind>,
    /// Number of simplifier passes.
    pub iterations: usize,
    /// Number of rewrites applied.
    pub rewrites: usize,
    /// Rule applications (if tracing was enabled).
    pub trace: Vec<RuleTrace>,
}

/// Plans a single expression: simplifies it to fixpoint, then propagates
/// statistics to pick function implementations.
///
/// Runs once per plan on a single thread.
#[derive(Debug, Default)]
pub struct Optimizer {
    simplifier: ExprSimplifier,
}

impl Optimizer {
    /// Create an optimizer with the default rules and the given config.
    pub fn new(config: OptimizerConfig) -> Self {
        Self {
            simplifier: ExprSimplifier::with_config(
                vec![Box::new(ArithmeticSimplification)],
                config,
            ),
        }
    }

    /// Create an optimizer around a custom simplifier.
    pub const fn with_simplifier(simplifier: ExprSimplifier) -> Self {
        Self { simplifier }
    }

    /// The simplifier used in the first phase.
    pub const fn simplifier(&self) -> &ExprSimplifier {
        &self.simplifier
    }

    /// Optimize an expression against the given column statistics.
    pub fn optimize(
        &self,
        expr: LogicalExpr,
        catalog: &StatsCatalog,
    ) -> QuiverResult<OptimizedExpr> {
        let simplified = self.simplifier.simplify(expr)?;

        let mut expr = simplified.expr;
        let mut propagator = StatsPropagator::new();
        let stats = propagator.propagate(&mut expr, catalog);
        let rebinds = propagator.into_rebinds();

        debug!(
            "Optimized to {expr}: {} rewrites, {} rebinds",
            simplified.rewrites,
            rebinds.len()
        );

        Ok(OptimizedExpr {
            expr,
            stats,
            rebinds,
            iterations: simplified.iterations,
            rewrites: simplified.rewrites,
            trace: simplified.trace,
        })
    }
}
