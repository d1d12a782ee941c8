//! Data type definitions for Quiver expressions.

use arrow::datatypes::DataType as ArrowDataType;
use serde::{Deserialize, Serialize};

/// Static type of an expression or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Boolean type.
    Bool,
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point.
    Float64,
    /// UTF-8 string.
    String,
}

impl DataType {
    /// Check if this type is numeric.
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int64 | Self::Float64)
    }

    /// Check if this type is a string type.
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String)
    }

    /// Get the display name for this type.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::Int64 => "Int64",
            Self::Float64 => "Float64",
            Self::String => "String",
        }
    }

    /// Get the common numeric supertype of two types.
    ///
    /// Returns `None` unless both types are numeric.
    pub const fn numeric_supertype(&self, other: &Self) -> Option<Self> {
        match (self, other) {
            (Self::Int64, Self::Int64) => Some(Self::Int64),
            (Self::Float64, Self::Float64)
            | (Self::Int64, Self::Float64)
            | (Self::Float64, Self::Int64) => Some(Self::Float64),
            _ => None,
        }
    }

    /// The Arrow type used for batches of this type.
    pub fn to_arrow(&self) -> ArrowDataType {
        match self {
            Self::Bool => ArrowDataType::Boolean,
            Self::Int64 => ArrowDataType::Int64,
            Self::Float64 => ArrowDataType::Float64,
            Self::String => ArrowDataType::Utf8,
        }
    }

    /// Map an Arrow type back to a Quiver type, if supported.
    pub fn from_arrow(data_type: &ArrowDataType) -> Option<Self> {
        match data_type {
            ArrowDataType::Boolean => Some(Self::Bool),
            ArrowDataType::Int64 => Some(Self::Int64),
            ArrowDataType::Float64 => Some(Self::Float64),
            ArrowDataType::Utf8 => Some(Self::String),
            _ => None,
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
