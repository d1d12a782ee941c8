//! Optimize-then-execute scenarios and kernel properties.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType as ArrowDataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use proptest::prelude::*;

use common_error::QuiverError;
use quiver_core::{ColumnStats, DataType, StatsCatalog};
use quiver_engine::functions::caseconvert::{
    lower_ascii, lower_unicode, upper_ascii, upper_unicode,
};
use quiver_engine::{BatchExecutor, ExprEvaluator, UnaryExecutor};
use quiver_logical::{col, lit, FuncExpr, Implementation, LogicalExpr};
use quiver_optimizer::Optimizer;

fn batch(names: Vec<Option<&str>>) -> RecordBatch {
    let len = names.len() as i64;
    let schema = Arc::new(Schema::new(vec![
        Field::new("s", ArrowDataType::Utf8, true),
        Field::new("x", ArrowDataType::Int64, false),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(names)),
        Arc::new(Int64Array::from((1..=len).collect::<Vec<_>>())),
    ];
    RecordBatch::try_new(schema, columns).unwrap()
}

fn bound_implementation(expr: &LogicalExpr) -> Implementation {
    match expr {
        LogicalExpr::Function(func) => func.implementation,
        other => panic!("expected a function call, got {other}"),
    }
}

#[test]
fn lower_literal_with_narrow_stats_uses_fast_path() {
    let optimized = Optimizer::default()
        .optimize(LogicalExpr::lower(lit("HELLO")), &StatsCatalog::new())
        .unwrap();
    assert_eq!(bound_implementation(&optimized.expr), Implementation::NarrowDomain);

    let result = ExprEvaluator::new()
        .evaluate(&optimized.expr, &batch(vec![Some("ignored")]))
        .unwrap();
    let strings = result.as_any().downcast_ref::<StringArray>().unwrap();
    assert_eq!(strings.value(0), "hello");
}

#[test]
fn multibyte_input_uses_general_path_with_correct_size() {
    let catalog = StatsCatalog::new().with_column("s", ColumnStats::wide());
    let optimized = Optimizer::default()
        .optimize(LogicalExpr::upper(col("s", DataType::String)), &catalog)
        .unwrap();
    assert_eq!(bound_implementation(&optimized.expr), Implementation::General);

    let input = batch(vec![Some("ı"), None, Some("ȿx")]);
    let result = ExprEvaluator::new().evaluate(&optimized.expr, &input).unwrap();
    let strings = result.as_any().downcast_ref::<StringArray>().unwrap();

    assert_eq!(strings.value(0), "I");
    assert_eq!(strings.value(0).len(), 1);
    assert!(strings.is_null(1));
    assert_eq!(strings.value(2), "\u{2C7E}X");
}

#[test]
fn ascii_data_without_proof_stays_general() {
    let wide = StatsCatalog::new().with_column("s", ColumnStats::wide());
    let none = StatsCatalog::new();

    for catalog in [&wide, &none] {
        let optimized = Optimizer::default()
            .optimize(LogicalExpr::lower(col("s", DataType::String)), catalog)
            .unwrap();
        assert_eq!(bound_implementation(&optimized.expr), Implementation::General);

        let result = ExprEvaluator::new()
            .evaluate(&optimized.expr, &batch(vec![Some("ABC")]))
            .unwrap();
        let strings = result.as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(strings.value(0), "abc");
    }
}

#[test]
fn literal_zero_divisor_becomes_null_but_runtime_zero_errors() {
    let input = batch(vec![Some("a"), Some("b")]);

    // X / 0 is rewritten to a typed null before execution.
    let optimized = Optimizer::default()
        .optimize(col("x", DataType::Int64).div_expr(lit(0i64)), &StatsCatalog::new())
        .unwrap();
    let result = ExprEvaluator::new().evaluate(&optimized.expr, &input).unwrap();
    assert_eq!(result.data_type(), &ArrowDataType::Int64);
    assert_eq!(result.null_count(), 2);

    // X / (X - X) only reaches zero at run time.
    let x = || col("x", DataType::Int64);
    let runtime_zero = x().div_expr(x().sub_expr(x()));
    let err = ExprEvaluator::new().evaluate(&runtime_zero, &input).unwrap_err();
    assert!(matches!(err, QuiverError::ExecutionError(_)));
}

fn float_batch(values: Vec<Option<f64>>) -> RecordBatch {
    let len = values.len() as i64;
    let schema = Arc::new(Schema::new(vec![
        Field::new("f", ArrowDataType::Float64, true),
        Field::new("x", ArrowDataType::Int64, false),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Float64Array::from(values)),
        Arc::new(Int64Array::from((1..=len).collect::<Vec<_>>())),
    ];
    RecordBatch::try_new(schema, columns).unwrap()
}

#[test]
fn float_literal_zero_divisor_becomes_null_but_runtime_zero_errors() {
    let input = float_batch(vec![Some(1.5), Some(0.0)]);
    let f = || col("f", DataType::Float64);
    let evaluator = ExprEvaluator::new();

    let optimized = Optimizer::default()
        .optimize(f().div_expr(lit(0.0)), &StatsCatalog::new())
        .unwrap();
    let result = evaluator.evaluate(&optimized.expr, &input).unwrap();
    assert_eq!(result.data_type(), &ArrowDataType::Float64);
    assert_eq!(result.null_count(), 2);

    for divisor in [f().sub_expr(f()), lit(0.0), lit(-0.0)] {
        let err = evaluator.evaluate(&f().div_expr(divisor), &input).unwrap_err();
        assert!(matches!(err, QuiverError::ExecutionError(_)));
    }
}

#[test]
fn mixed_type_runtime_zero_divisor_errors() {
    let input = float_batch(vec![Some(0.0), Some(2.0)]);
    let f = || col("f", DataType::Float64);
    let x = || col("x", DataType::Int64);
    let evaluator = ExprEvaluator::new();

    // Int64 / Float64 with a zero row in the float column.
    let err = evaluator.evaluate(&x().div_expr(f()), &input).unwrap_err();
    assert!(matches!(err, QuiverError::ExecutionError(_)));

    // Float64 / Int64 where the integer side is zero at run time.
    let err = evaluator
        .evaluate(&f().div_expr(x().sub_expr(x())), &input)
        .unwrap_err();
    assert!(matches!(err, QuiverError::ExecutionError(_)));

    // Non-zero divisors still divide.
    let result = evaluator.evaluate(&f().div_expr(x()), &input).unwrap();
    let quotients = result.as_any().downcast_ref::<Float64Array>().unwrap();
    assert_eq!(quotients.value(0), 0.0);
    assert_eq!(quotients.value(1), 1.0);
}

#[test]
fn identities_do_not_change_results() {
    let input = batch(vec![Some("a"), Some("b"), Some("c")]);
    let x = || col("x", DataType::Int64);
    let expr = x().add_expr(lit(0i64)).mul_expr(lit(1i64)).sub_expr(lit(0i64));

    let evaluator = ExprEvaluator::new();
    let before = evaluator.evaluate(&expr, &input).unwrap();
    let optimized = Optimizer::default().optimize(expr, &StatsCatalog::new()).unwrap();
    let after = evaluator.evaluate(&optimized.expr, &input).unwrap();

    assert_eq!(optimized.expr, x());
    assert_eq!(&before, &after);
}

#[test]
fn batch_executor_runs_bound_kernel() {
    let func = FuncExpr::new("ucase", vec![col("s", DataType::String)])
        .with_implementation(Implementation::NarrowDomain);
    let input = StringArray::from(vec![Some("hello"), None]);
    let output = BatchExecutor::default().execute(&input, &func).unwrap();
    assert_eq!(output.value(0), "HELLO");
    assert!(output.is_null(1));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn fast_and_general_agree_on_ascii(s in "[\\x00-\\x7F]{0,64}") {
        prop_assert_eq!(upper_ascii(&s).unwrap(), upper_unicode(&s).unwrap());
        prop_assert_eq!(lower_ascii(&s).unwrap(), lower_unicode(&s).unwrap());
    }

    #[test]
    fn general_path_matches_char_mapping_when_one_to_one(s in "\\PC{0,32}") {
        let upper = upper_unicode(&s).unwrap();
        prop_assert_eq!(upper.chars().count(), s.chars().count());
        if s.chars().all(|c| c.to_uppercase().count() == 1) {
            prop_assert_eq!(upper, s.to_uppercase());
        }
    }

    #[test]
    fn nulls_propagate_and_length_is_preserved(
        rows in proptest::collection::vec(proptest::option::of("\\PC{0,8}"), 0..64)
    ) {
        let input = StringArray::from(rows.clone());
        let mut calls = 0usize;
        let output = UnaryExecutor::execute(&input, |v| {
            calls += 1;
            lower_unicode(v)
        })
        .unwrap();

        prop_assert_eq!(output.len(), rows.len());
        prop_assert_eq!(calls, rows.iter().filter(|r| r.is_some()).count());
        for (i, row) in rows.iter().enumerate() {
            prop_assert_eq!(output.is_null(i), row.is_none());
        }
    }
}
