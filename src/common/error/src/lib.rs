//! Error types and result aliases for Quiver.
//!
//! Every crate in the workspace returns [`QuiverResult`]; the variant names
//! the phase that produced the failure.

mod error;

pub use error::{QuiverError, QuiverResult};
