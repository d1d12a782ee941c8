//! Column statistics consumed by the optimizer.
//!
//! Snapshots are computed once per optimization pass, attached to column
//! references and re-derived for function calls by per-function combinators.
//! They are discarded when optimization ends; only the implementation choices
//! they justified survive into the executable expression.

mod catalog;
mod column_stats;

pub use catalog::StatsCatalog;
pub use column_stats::ColumnStats;
