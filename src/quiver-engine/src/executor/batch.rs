//! Batch-level execution of bound function calls.

use arrow::array::{Array, StringArray};
use log::trace;
use rayon::prelude::*;

use common_config::ExecutionConfig;
use common_error::{ensure, QuiverError, QuiverResult};
use quiver_logical::FuncExpr;

use super::unary::UnaryExecutor;
use crate::functions::{KernelRegistry, StringKernel};

/// Runs a bound string function over batches.
#[derive(Debug, Clone, Default)]
pub struct BatchExecutor {
    config: ExecutionConfig,
    registry: KernelRegistry,
}

impl BatchExecutor {
    /// Create an executor with the default kernels.
    pub fn new(config: ExecutionConfig) -> Self {
        Self {
            config,
            registry: KernelRegistry::default(),
        }
    }

    /// Replace the kernel registry.
    #[must_use]
    pub fn with_registry(mut self, registry: KernelRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The active configuration.
    pub const fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Execute `func`'s bound kernel over one batch.
    pub fn execute(&self, input: &StringArray, func: &FuncExpr) -> QuiverResult<StringArray> {
        let kernel = self.registry.resolve(func)?;
        self.run(input, func, kernel)
    }

    /// Execute over several batches in parallel, returning outputs in input
    /// order.
    pub fn execute_partitions(
        &self,
        inputs: &[StringArray],
        func: &FuncExpr,
    ) -> QuiverResult<Vec<StringArray>> {
        let kernel = self.registry.resolve(func)?;
        let run_all = || {
            inputs
                .par_iter()
                .map(|input| self.run(input, func, kernel))
                .collect::<QuiverResult<Vec<_>>>()
        };

        match self.config.parallelism {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| QuiverError::execution(e.to_string()))?
                .install(run_all),
            None => run_all(),
        }
    }

    fn run(
        &self,
        input: &StringArray,
        func: &FuncExpr,
        kernel: StringKernel,
    ) -> QuiverResult<StringArray> {
        ensure!(
            input.len() <= self.config.batch_size,
            ExecutionError: "batch of {} rows exceeds the configured batch size {}",
            input.len(),
            self.config.batch_size
        );
        trace!(
            "Executing {} ({}) on {} rows",
            func.name,
            func.implementation,
            input.len()
        );
        UnaryExecutor::execute(input, kernel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiver_logical::{lit, Implementation};

    fn upper() -> FuncExpr {
        FuncExpr::new("upper", vec![lit("")])
    }

    #[test]
    fn test_execute_general_and_narrow() {
        let executor = BatchExecutor::default();
        let input = StringArray::from(vec![Some("hello"), None]);

        let general = executor.execute(&input, &upper()).unwrap();
        let narrow = executor
            .execute(&input, &upper().with_implementation(Implementation::NarrowDomain))
            .unwrap();

        assert_eq!(general, narrow);
        assert_eq!(general.value(0), "HELLO");
        assert!(general.is_null(1));
    }

    #[test]
    fn test_batch_size_limit() {
        let executor = BatchExecutor::new(ExecutionConfig::default().with_batch_size(2));
        let input = StringArray::from(vec!["a", "b", "c"]);
        let err = executor.execute(&input, &upper()).unwrap_err();
        assert!(matches!(err, QuiverError::ExecutionError(_)));
    }

    #[test]
    fn test_partitions_keep_order() {
        let executor = BatchExecutor::new(ExecutionConfig::default().with_parallelism(2));
        let inputs: Vec<_> = (0..8)
            .map(|i| StringArray::from(vec![format!("row{i}"), format!("ı{i}")]))
            .collect();

        let outputs = executor.execute_partitions(&inputs, &upper()).unwrap();
        assert_eq!(outputs.len(), 8);
        for (i, output) in outputs.iter().enumerate() {
            assert_eq!(output.value(0), format!("ROW{i}"));
            assert_eq!(output.value(1), format!("I{i}"));
        }
    }

    #[test]
    fn test_unknown_function() {
        let executor = BatchExecutor::default();
        let func = FuncExpr::new("reverse", vec![lit("")]);
        let input = StringArray::from(vec!["a"]);
        assert!(executor.execute(&input, &func).is_err());
        assert!(executor.execute_partitions(&[input], &func).is_err());
    }
}
