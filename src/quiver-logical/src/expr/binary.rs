//! Binary arithmetic operators.

use quiver_core::DataType;
use serde::{Deserialize, Serialize};

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
}

impl BinaryOp {
    /// Get the result type of this operator given input types.
    ///
    /// Both operands must be numeric; mixed `Int64`/`Float64` widens to
    /// `Float64`. Returns `None` if the operation is not valid for the types.
    pub const fn result_type(&self, left: &DataType, right: &DataType) -> Option<DataType> {
        left.numeric_supertype(right)
    }

    /// Get the operator symbol for display.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }

    /// Parse an operator symbol.
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}
