//! Expression trees operated on by the rewrite engine.

mod binary;
mod expr;
mod func;

pub use binary::BinaryOp;
pub use expr::{col, lit, null_lit, ColumnRef, LogicalExpr};
pub use func::{FuncExpr, Implementation};
