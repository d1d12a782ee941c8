//! Fixpoint expression simplifier.
//!
//! The simplifier walks the tree in post-order, applying the first matching
//! rule at each node, and repeats whole-tree passes until a pass changes
//! nothing or the configured iteration limit is reached.

use common_config::OptimizerConfig;
use common_error::{QuiverError, QuiverResult};
use log::{debug, warn};
use quiver_logical::LogicalExpr;

use super::arithmetic::ArithmeticSimplification;
use super::rule::{RewriteRule, RuleTrace, Simplified, Transformed};

/// Applies rewrite rules to an expression tree until fixpoint.
///
/// # Termination
///
/// Every registered rule must strictly shrink the node it rewrites; the
/// simplifier checks this on each application and reports a violation as an
/// internal error. `max_iterations` bounds the number of whole-tree passes.
pub struct ExprSimplifier {
    /// The rules to apply (in order).
    rules: Vec<Box<dyn RewriteRule>>,
    /// Configuration.
    config: OptimizerConfig,
}

/// Per-pass bookkeeping.
struct Pass<'a> {
    rewrites: usize,
    trace: Option<&'a mut Vec<RuleTrace>>,
}

impl ExprSimplifier {
    /// Create a new simplifier with the given rules.
    pub fn new(rules: Vec<Box<dyn RewriteRule>>) -> Self {
        Self {
            rules,
            config: OptimizerConfig::default(),
        }
    }

    /// Create a new simplifier with custom config.
    pub fn with_config(rules: Vec<Box<dyn RewriteRule>>, config: OptimizerConfig) -> Self {
        Self { rules, config }
    }

    /// Add a rule after the already registered ones.
    pub fn add_rule<R: RewriteRule + 'static>(&mut self, rule: R) {
        self.rules.push(Box::new(rule));
    }

    /// Names of the registered rules, in application order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// The active configuration.
    pub const fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Simplify an expression tree to fixpoint.
    pub fn simplify(&self, expr: LogicalExpr) -> QuiverResult<Simplified> {
        let mut current = expr;
        let mut iterations = 0;
        let mut rewrites = 0;
        let mut trace = Vec::new();

        loop {
            if iterations >= self.config.max_iterations {
                warn!(
                    "Simplifier reached max iterations ({}), stopping",
                    self.config.max_iterations
                );
                break;
            }

            iterations += 1;
            let mut pass = Pass {
                rewrites: 0,
                trace: self.config.enable_trace.then_some(&mut trace),
            };
            let result = self.simplify_node(current, &mut pass)?;
            rewrites += pass.rewrites;
            current = result.expr;

            if !result.changed {
                debug!("No changes in iteration {iterations}, reached fixpoint");
                break;
            }
        }

        Ok(Simplified {
            expr: current,
            iterations,
            rewrites,
            trace,
        })
    }

    fn simplify_node(&self, expr: LogicalExpr, pass: &mut Pass<'_>) -> QuiverResult<Transformed> {
        let Transformed { expr, changed } = self.simplify_children(expr, pass)?;

        let Some((rule, replacement)) = self
            .rules
            .iter()
            .find_map(|rule| rule.rewrite(&expr).map(|replacement| (rule, replacement)))
        else {
            return Ok(Transformed { expr, changed });
        };

        if replacement.node_count() >= expr.node_count() {
            return Err(QuiverError::internal(format!(
                "rule '{}' did not shrink {expr}",
                rule.name()
            )));
        }

        debug!("Rule '{}' rewrote {expr} to {replacement}", rule.name());
        pass.rewrites += 1;
        if let Some(trace) = pass.trace.as_deref_mut() {
            trace.push(RuleTrace::new(
                rule.name(),
                expr.to_string(),
                replacement.to_string(),
            ));
        }

        let result = self.simplify_node(replacement, pass)?;
        Ok(Transformed::yes(result.expr))
    }

    fn simplify_children(
        &self,
        expr: LogicalExpr,
        pass: &mut Pass<'_>,
    ) -> QuiverResult<Transformed> {
        match expr {
            LogicalExpr::Literal(_) | LogicalExpr::Column(_) => Ok(Transformed::no(expr)),
            LogicalExpr::Binary { left, op, right } => {
                let left = self.simplify_node(*left, pass)?;
                let right = self.simplify_node(*right, pass)?;
                let changed = left.changed || right.changed;
                Ok(Transformed {
                    expr: LogicalExpr::binary(left.expr, op, right.expr),
                    changed,
                })
            }
            LogicalExpr::Function(mut func) => {
                let mut changed = false;
                let mut args = Vec::with_capacity(func.args.len());
                for arg in func.args.drain(..) {
                    let arg = self.simplify_node(arg, pass)?;
                    changed |= arg.changed;
                    args.push(arg.expr);
                }
                func.args = args;
                Ok(Transformed {
                    expr: LogicalExpr::Function(func),
                    changed,
                })
            }
        }
    }
}

impl Default for ExprSimplifier {
    fn default() -> Self {
        Self::new(vec![Box::new(ArithmeticSimplification)])
    }
}

impl std::fmt::Debug for ExprSimplifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExprSimplifier")
            .field("rules", &self.rule_names())
            .field("config", &self.config)
            .finish()
    }
}
