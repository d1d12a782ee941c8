//! Statistics propagation and function specialization.
//!
//! After simplification the optimizer walks the tree once, bottom-up,
//! deriving a statistics snapshot per node. Functions that declare a
//! propagation capability get to inspect their arguments' snapshots and may
//! rebind themselves to a narrower implementation.

use log::debug;
use quiver_core::{ColumnStats, StatsCatalog};
use quiver_logical::functions;
use quiver_logical::{Implementation, LogicalExpr};

/// A function call whose implementation was switched during propagation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rebind {
    /// The function name as written in the expression.
    pub function: String,
    /// The implementation it was bound to.
    pub implementation: Implementation,
}

/// Bottom-up statistics propagator.
///
/// Missing statistics are never upgraded to "narrow": a node without a
/// snapshot keeps the implementation the binder chose, so plan correctness
/// never depends on statistics being present.
#[derive(Debug, Default)]
pub struct StatsPropagator {
    rebinds: Vec<Rebind>,
}

impl StatsPropagator {
    /// Create a propagator with no recorded rebinds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the snapshot of `expr`, rebinding specializable function calls
    /// along the way.
    pub fn propagate(
        &mut self,
        expr: &mut LogicalExpr,
        catalog: &StatsCatalog,
    ) -> Option<ColumnStats> {
        match expr {
            LogicalExpr::Column(col) => catalog.get(&col.name).cloned(),
            LogicalExpr::Literal(value) => Some(ColumnStats::for_literal(value)),
            LogicalExpr::Binary { left, right, .. } => {
                // Visited for nested function calls; arithmetic has no combinator.
                self.propagate(left, catalog);
                self.propagate(right, catalog);
                None
            }
            LogicalExpr::Function(func) => {
                let arg_stats: Vec<_> = func
                    .args
                    .iter_mut()
                    .map(|arg| self.propagate(arg, catalog))
                    .collect();

                let propagate = functions::lookup(&func.name)?.propagate_stats?;
                let propagation = propagate(&arg_stats);

                if let Some(implementation) = propagation.implementation {
                    if implementation != func.implementation {
                        debug!(
                            "Rebinding {} from {} to {implementation}",
                            func.name, func.implementation
                        );
                        func.rebind(implementation);
                        self.rebinds.push(Rebind {
                            function: func.name.clone(),
                            implementation,
                        });
                    }
                }

                propagation.stats
            }
        }
    }

    /// Rebinds recorded so far, in the order they happened.
    pub fn rebinds(&self) -> &[Rebind] {
        &self.rebinds
    }

    /// Consume the propagator, returning its rebinds.
    pub fn into_rebinds(self) -> Vec<Rebind> {
        self.rebinds
    }
}
