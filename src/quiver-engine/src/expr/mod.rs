//! Expression evaluation over Arrow record batches.
//!
//! # Supported Expressions
//!
//! - `Literal` - Constant values, broadcast to the batch length (typed
//!   nulls become all-null arrays of their type)
//! - `Column` - Column references by name
//! - `Binary` - Arithmetic with `Int64` to `Float64` widening
//! - `Function` - Calls dispatched to the kernel bound at optimization time
//!
//! # Example
//!
//! ```rust,ignore
//! use quiver_engine::expr::ExprEvaluator;
//! use quiver_logical::{col, lit};
//!
//! let expr = col("x", DataType::Int64).add_expr(lit(1i64));
//! let evaluator = ExprEvaluator::new();
//! let result = evaluator.evaluate(&expr, &batch)?;
//! ```

mod evaluator;

pub use evaluator::ExprEvaluator;
