//! Expression evaluator implementation.

use std::sync::Arc;

use arrow::array::{
    new_null_array, Array, ArrayRef, AsArray, BooleanArray, Float64Array, Int64Array,
    StringArray,
};
use arrow::compute::kernels::numeric;
use arrow::datatypes::{DataType as ArrowDataType, Float64Type, Int64Type};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

use common_error::{QuiverError, QuiverResult};
use quiver_core::{DataType, Value};
use quiver_logical::{BinaryOp, ColumnRef, FuncExpr, LogicalExpr};

use crate::executor::UnaryExecutor;
use crate::functions::KernelRegistry;

/// Expression evaluator for batch execution.
///
/// Converts `LogicalExpr` to Arrow arrays by evaluating against a `RecordBatch`.
/// Function calls run the kernel bound to their implementation slot.
#[derive(Debug, Default)]
pub struct ExprEvaluator {
    registry: KernelRegistry,
}

impl ExprEvaluator {
    /// Create a new expression evaluator with the default kernels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an evaluator with a custom kernel registry.
    pub const fn with_registry(registry: KernelRegistry) -> Self {
        Self { registry }
    }

    /// Evaluate an expression against a record batch.
    ///
    /// Returns an Arrow array with one row per batch row.
    pub fn evaluate(&self, expr: &LogicalExpr, batch: &RecordBatch) -> QuiverResult<ArrayRef> {
        match expr {
            LogicalExpr::Literal(value) => Ok(self.eval_literal(value, batch.num_rows())),

            LogicalExpr::Column(col) => self.eval_column(col, batch),

            LogicalExpr::Binary { left, op, right } => self.eval_binary(left, *op, right, batch),

            LogicalExpr::Function(func) => self.eval_function(func, batch),
        }
    }

    /// Evaluate a literal value, broadcasting it to `num_rows` rows.
    fn eval_literal(&self, value: &Value, num_rows: usize) -> ArrayRef {
        match value {
            Value::Null(data_type) => new_null_array(&data_type.to_arrow(), num_rows),

            Value::Bool(b) => Arc::new(BooleanArray::from(vec![*b; num_rows])),

            Value::Int64(i) => Arc::new(Int64Array::from(vec![*i; num_rows])),

            Value::Float64(f) => Arc::new(Float64Array::from(vec![*f; num_rows])),

            Value::String(s) => Arc::new(StringArray::from(vec![s.as_str(); num_rows])),
        }
    }

    /// Evaluate a column reference, checking the batch column has the
    /// referenced type.
    fn eval_column(&self, col: &ColumnRef, batch: &RecordBatch) -> QuiverResult<ArrayRef> {
        let array = batch.column_by_name(&col.name).cloned().ok_or_else(|| {
            QuiverError::execution(format!(
                "Column '{}' not found in batch with columns: {:?}",
                col.name,
                batch
                    .schema()
                    .fields()
                    .iter()
                    .map(|f| f.name())
                    .collect::<Vec<_>>()
            ))
        })?;

        match DataType::from_arrow(array.data_type()) {
            Some(data_type) if data_type == col.data_type => Ok(array),
            _ => Err(QuiverError::type_error(format!(
                "Column '{}' holds {:?}, expected {}",
                col.name,
                array.data_type(),
                col.data_type
            ))),
        }
    }

    /// Evaluate a binary arithmetic expression.
    fn eval_binary(
        &self,
        left: &LogicalExpr,
        op: BinaryOp,
        right: &LogicalExpr,
        batch: &RecordBatch,
    ) -> QuiverResult<ArrayRef> {
        let left_arr = self.evaluate(left, batch)?;
        let right_arr = self.evaluate(right, batch)?;
        let (left_arr, right_arr) = coerce_numeric(left_arr, right_arr)?;

        // Float division would yield inf/NaN; a runtime zero is a data error
        // for every numeric type.
        if op == BinaryOp::Divide && has_zero_divisor(&right_arr) {
            return Err(QuiverError::execution("division by zero"));
        }

        let result = match op {
            BinaryOp::Add => numeric::add(&left_arr, &right_arr),
            BinaryOp::Subtract => numeric::sub(&left_arr, &right_arr),
            BinaryOp::Multiply => numeric::mul(&left_arr, &right_arr),
            BinaryOp::Divide => numeric::div(&left_arr, &right_arr),
        };

        result.map_err(|e| match e {
            ArrowError::DivideByZero => QuiverError::execution("division by zero"),
            other => QuiverError::execution(other.to_string()),
        })
    }

    /// Evaluate a function call through its bound kernel.
    fn eval_function(&self, func: &FuncExpr, batch: &RecordBatch) -> QuiverResult<ArrayRef> {
        let [arg] = func.args.as_slice() else {
            return Err(QuiverError::execution(format!(
                "{} expects one argument, got {}",
                func.name,
                func.args.len()
            )));
        };

        let kernel = self.registry.resolve(func)?;
        let input = self.evaluate(arg, batch)?;
        let strings = input.as_any().downcast_ref::<StringArray>().ok_or_else(|| {
            QuiverError::type_error(format!(
                "{} requires a string argument, got {:?}",
                func.name,
                input.data_type()
            ))
        })?;

        Ok(Arc::new(UnaryExecutor::execute(strings, kernel)?))
    }
}

/// Whether any valid (non-null) row of `divisor` is zero, of either sign.
fn has_zero_divisor(divisor: &ArrayRef) -> bool {
    match divisor.data_type() {
        ArrowDataType::Int64 => divisor
            .as_primitive::<Int64Type>()
            .iter()
            .flatten()
            .any(|v| v == 0),
        ArrowDataType::Float64 => divisor
            .as_primitive::<Float64Type>()
            .iter()
            .flatten()
            .any(|v| v == 0.0),
        _ => false,
    }
}

/// Widen an `Int64` side to `Float64` when the other side is `Float64`.
fn coerce_numeric(left: ArrayRef, right: ArrayRef) -> QuiverResult<(ArrayRef, ArrayRef)> {
    use arrow::compute::cast;

    match (left.data_type(), right.data_type()) {
        (ArrowDataType::Int64, ArrowDataType::Float64) => {
            Ok((cast(&left, &ArrowDataType::Float64)?, right))
        }
        (ArrowDataType::Float64, ArrowDataType::Int64) => {
            Ok((left, cast(&right, &ArrowDataType::Float64)?))
        }
        _ => Ok((left, right)),
    }
}
