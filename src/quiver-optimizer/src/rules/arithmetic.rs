//! Arithmetic identity simplification.
//!
//! Removes operations whose literal operand is an identity element and turns
//! division by a literal zero into a typed null.

use quiver_core::Value;
use quiver_logical::{BinaryOp, LogicalExpr};

use super::rule::RewriteRule;

/// Arithmetic identity rule family.
///
/// # Patterns
///
/// Tried in this order; the first match wins:
///
/// | Pattern | Condition                  | Replacement                      |
/// |---------|----------------------------|----------------------------------|
/// | `L + R` | `R` is the additive identity | `L`                            |
/// | `L + R` | `L` is the additive identity | `R`                            |
/// | `L - R` | `R` is zero                | `L`                              |
/// | `L * R` | `R` is one                 | `L`                              |
/// | `L / R` | `R` is exactly zero        | `NULL` of the expression's type  |
/// | `L / R` | `R` is one                 | `L`                              |
///
/// # Legal When
///
/// - The identity operand is a literal constant (never a column or a null)
/// - The expression is well-typed
/// - The kept operand already has the static type of the whole expression,
///   so `int_col + 0.0` (a `Float64` expression) is left alone
///
/// For `Float64` the only additive identity is `-0.0` (`-0.0 + 0.0` is
/// `+0.0`), and only `+0.0` may be dropped from a subtraction.
pub struct ArithmeticSimplification;

impl RewriteRule for ArithmeticSimplification {
    fn name(&self) -> &'static str {
        "ArithmeticSimplification"
    }

    fn description(&self) -> &'static str {
        "Remove arithmetic identities and replace division by literal zero with NULL"
    }

    fn rewrite(&self, expr: &LogicalExpr) -> Option<LogicalExpr> {
        let LogicalExpr::Binary { left, op, right } = expr else {
            return None;
        };
        let result_type = expr.data_type().ok()?;

        let keep = |operand: &LogicalExpr| {
            (operand.data_type().ok() == Some(result_type)).then(|| operand.clone())
        };
        // An integer zero widened into a Float64 sum becomes +0.0, which is
        // not an additive identity.
        let additive = |v: &Value| v.is_additive_identity() && v.data_type() == result_type;

        match op {
            BinaryOp::Add => {
                if literal_matches(right, additive) {
                    if let Some(kept) = keep(left) {
                        return Some(kept);
                    }
                }
                if literal_matches(left, additive) {
                    return keep(right);
                }
                None
            }
            BinaryOp::Subtract if literal_matches(right, Value::is_subtractive_identity) => {
                keep(left)
            }
            BinaryOp::Multiply if literal_matches(right, Value::is_multiplicative_identity) => {
                keep(left)
            }
            BinaryOp::Divide if literal_matches(right, Value::is_zero) => {
                Some(LogicalExpr::null(result_type))
            }
            BinaryOp::Divide if literal_matches(right, Value::is_multiplicative_identity) => {
                keep(left)
            }
            _ => None,
        }
    }
}

fn literal_matches(operand: &LogicalExpr, pred: impl Fn(&Value) -> bool) -> bool {
    operand.try_as_literal().is_some_and(pred)
}
