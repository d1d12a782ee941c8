//! Expression rewrite rules.
//!
//! # Rewrite Safety
//!
//! A rewrite is **legal** if and only if, for every input row, the rewritten
//! expression yields the same value, the same nullness and the same static
//! type as the original.

mod arithmetic;
mod rule;
mod simplifier;

pub use arithmetic::ArithmeticSimplification;
pub use rule::{RewriteRule, RuleTrace, Simplified, Transformed};
pub use simplifier::ExprSimplifier;
