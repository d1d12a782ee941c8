//! Rewrite rule trait and simplifier bookkeeping types.

use quiver_logical::LogicalExpr;

/// A local rewrite over a single expression node.
///
/// A rule inspects the node it is given (its children have already been
/// simplified) and either returns a replacement or `None`. Rules are pure
/// and stateless.
///
/// # Legality
///
/// A rewrite is legal only if, for every input row, the replacement:
///
/// 1. produces the same value, including the sign of floating-point zeros;
/// 2. produces null exactly where the original does;
/// 3. has the same static type as the original.
///
/// Every rule must also strictly decrease [`LogicalExpr::node_count`], which
/// guarantees that repeated rewriting terminates.
pub trait RewriteRule: Send + Sync {
    /// Get the name of this rule.
    fn name(&self) -> &'static str;

    /// Get a description of what this rule does.
    fn description(&self) -> &'static str {
        "No description available"
    }

    /// Try to rewrite `expr`, returning the replacement if the rule applies.
    fn rewrite(&self, expr: &LogicalExpr) -> Option<LogicalExpr>;
}

/// An expression paired with whether a rewrite changed it.
#[derive(Debug, Clone)]
pub struct Transformed {
    /// The (potentially rewritten) expression.
    pub expr: LogicalExpr,
    /// Whether the expression was actually changed.
    pub changed: bool,
}

impl Transformed {
    /// The expression was changed.
    pub const fn yes(expr: LogicalExpr) -> Self {
        Self {
            expr,
            changed: true,
        }
    }

    /// The expression was left as is.
    pub const fn no(expr: LogicalExpr) -> Self {
        Self {
            expr,
            changed: false,
        }
    }
}

impl From<LogicalExpr> for Transformed {
    fn from(expr: LogicalExpr) -> Self {
        Self::no(expr)
    }
}

/// A trace entry for a single rule application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTrace {
    /// The name of the rule that was applied.
    pub rule_name: String,
    /// The rewritten node before the rule was applied.
    pub before: String,
    /// The replacement node.
    pub after: String,
}

impl RuleTrace {
    /// Create a new trace entry.
    pub fn new(
        rule_name: impl Into<String>,
        before: impl Into<String>,
        after: impl Into<String>,
    ) -> Self {
        Self {
            rule_name: rule_name.into(),
            before: before.into(),
            after: after.into(),
        }
    }
}

impl std::fmt::Display for RuleTrace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} => {}", self.rule_name, self.before, self.after)
    }
}

/// The result of simplification with optional trace information.
#[derive(Debug, Clone)]
pub struct Simplified {
    /// The simplified expression.
    pub expr: LogicalExpr,
    /// Number of whole-tree passes performed.
    pub iterations: usize,
    /// Number of rewrites applied across all passes.
    pub rewrites: usize,
    /// Rule applications in order (if tracing was enabled).
    pub trace: Vec<RuleTrace>,
}

impl Simplified {
    /// Format the trace as a human-readable string.
    pub fn format_trace(&self) -> String {
        let mut output = format!(
            "Simplification completed in {} iterations, {} rewrites applied\n",
            self.iterations, self.rewrites
        );

        if self.trace.is_empty() {
            output.push_str("  (no trace available)\n");
        } else {
            for (i, entry) in self.trace.iter().enumerate() {
                output.push_str(&format!("  {}. {entry}\n", i + 1));
            }
        }

        output
    }
}
