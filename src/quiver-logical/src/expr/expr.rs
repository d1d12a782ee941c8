//! Logical expression tree.

use common_error::{QuiverError, QuiverResult};
use quiver_core::{DataType, Value};
use serde::{Deserialize, Serialize};

use super::{BinaryOp, FuncExpr};
use crate::functions;

/// A typed reference to an input column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    /// Column name.
    pub name: String,
    /// Static type of the column.
    pub data_type: DataType,
}

impl ColumnRef {
    /// Create a new column reference.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// A logical expression.
///
/// The tree is owned exclusively by whoever is rewriting it: children are
/// boxed, so a rewrite replaces a whole subtree by value and the old subtree
/// is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LogicalExpr {
    /// A typed constant (including typed nulls).
    Literal(Value),

    /// A column reference.
    Column(ColumnRef),

    /// A binary arithmetic operation.
    Binary {
        /// Left operand.
        left: Box<Self>,
        /// Binary operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Self>,
    },

    /// A scalar function call.
    Function(FuncExpr),
}

impl LogicalExpr {
    // ========== Constructors ==========

    /// Create a literal expression.
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// Create a typed null literal.
    pub const fn null(data_type: DataType) -> Self {
        Self::Literal(Value::Null(data_type))
    }

    /// Create a column reference.
    pub fn column(name: impl Into<String>, data_type: DataType) -> Self {
        Self::Column(ColumnRef::new(name, data_type))
    }

    /// Create a binary expression.
    pub fn binary(left: Self, op: BinaryOp, right: Self) -> Self {
        Self::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Create a function call expression.
    pub fn function(name: impl Into<String>, args: Vec<Self>) -> Self {
        Self::Function(FuncExpr::new(name, args))
    }

    // ========== Convenience builders ==========

    /// Create an addition expression.
    #[must_use]
    pub fn add_expr(self, other: Self) -> Self {
        Self::binary(self, BinaryOp::Add, other)
    }

    /// Create a subtraction expression.
    #[must_use]
    pub fn sub_expr(self, other: Self) -> Self {
        Self::binary(self, BinaryOp::Subtract, other)
    }

    /// Create a multiplication expression.
    #[must_use]
    pub fn mul_expr(self, other: Self) -> Self {
        Self::binary(self, BinaryOp::Multiply, other)
    }

    /// Create a division expression.
    #[must_use]
    pub fn div_expr(self, other: Self) -> Self {
        Self::binary(self, BinaryOp::Divide, other)
    }

    // ========== Analysis methods ==========

    /// Direct children, left to right.
    pub fn children(&self) -> Vec<&Self> {
        match self {
            Self::Literal(_) | Self::Column(_) => Vec::new(),
            Self::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            Self::Function(func) => func.args.iter().collect(),
        }
    }

    /// Number of nodes in the tree.
    ///
    /// Every simplification rule strictly decreases this count, which is what
    /// makes fixpoint rewriting terminate.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(Self::node_count)
            .sum::<usize>()
    }

    /// Check if this expression is a simple column reference.
    pub const fn is_column(&self) -> bool {
        matches!(self, Self::Column(_))
    }

    /// Check if this expression is a literal.
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Get the constant if this expression is a literal.
    pub const fn try_as_literal(&self) -> Option<&Value> {
        match self {
            Self::Literal(v) => Some(v),
            _ => None,
        }
    }

    /// Resolve the static type of this expression.
    pub fn data_type(&self) -> QuiverResult<DataType> {
        match self {
            Self::Literal(v) => Ok(v.data_type()),
            Self::Column(col) => Ok(col.data_type),
            Self::Binary { left, op, right } => {
                let left_type = left.data_type()?;
                let right_type = right.data_type()?;
                op.result_type(&left_type, &right_type).ok_or_else(|| {
                    QuiverError::type_error(format!(
                        "cannot apply '{op}' to {left_type} and {right_type}"
                    ))
                })
            }
            Self::Function(func) => {
                let def = functions::lookup(&func.name).ok_or_else(|| {
                    QuiverError::type_error(format!("unknown function '{}'", func.name))
                })?;
                let arg_types = func
                    .args
                    .iter()
                    .map(Self::data_type)
                    .collect::<QuiverResult<Vec<_>>>()?;
                def.bind_return_type(&arg_types)
            }
        }
    }
}

/// Create a column reference expression.
pub fn col(name: impl Into<String>, data_type: DataType) -> LogicalExpr {
    LogicalExpr::column(name, data_type)
}

/// Create a literal expression.
pub fn lit(value: impl Into<Value>) -> LogicalExpr {
    LogicalExpr::literal(value)
}

/// Create a typed null literal.
pub const fn null_lit(data_type: DataType) -> LogicalExpr {
    LogicalExpr::null(data_type)
}

fn write_literal(f: &mut std::fmt::Formatter<'_>, value: &Value) -> std::fmt::Result {
    match value {
        Value::Null(_) => write!(f, "NULL"),
        Value::Bool(true) => write!(f, "TRUE"),
        Value::Bool(false) => write!(f, "FALSE"),
        Value::Int64(i) => write!(f, "{i}"),
        Value::Float64(v) if v.is_nan() => write!(f, "NaN"),
        Value::Float64(v) if v.is_infinite() => {
            write!(f, "{}", if *v > 0.0 { "inf" } else { "-inf" })
        }
        // Debug keeps the decimal point (or exponent) that marks a float.
        Value::Float64(v) => write!(f, "{v:?}"),
        Value::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
    }
}

impl std::fmt::Display for LogicalExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(v) => write_literal(f, v),
            Self::Column(col) => write!(f, "{}", col.name),
            Self::Binary { left, op, right } => write!(f, "({left} {op} {right})"),
            Self::Function(func) => write!(f, "{func}"),
        }
    }
}
