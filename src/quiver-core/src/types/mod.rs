//! Type system for Quiver values.
//!
//! `Value` is a typed constant as it appears in an expression tree and
//! `DataType` is the static type every expression resolves to.

mod data_type;
mod value;

pub use data_type::DataType;
pub use value::Value;
