//! Kernel resolution for bound function calls.

use std::collections::HashMap;

use common_error::{QuiverError, QuiverResult};
use quiver_logical::functions::{self, builtin};
use quiver_logical::{FuncExpr, Implementation};

use super::caseconvert;

/// A per-value string kernel.
pub type StringKernel = fn(&str) -> QuiverResult<String>;

/// Maps (canonical function name, bound implementation) to a kernel.
#[derive(Debug, Clone)]
pub struct KernelRegistry {
    kernels: HashMap<(&'static str, Implementation), StringKernel>,
}

impl Default for KernelRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(builtin::LOWER, Implementation::General, caseconvert::lower_unicode);
        registry.register(builtin::LOWER, Implementation::NarrowDomain, caseconvert::lower_ascii);
        registry.register(builtin::UPPER, Implementation::General, caseconvert::upper_unicode);
        registry.register(builtin::UPPER, Implementation::NarrowDomain, caseconvert::upper_ascii);
        registry
    }
}

impl KernelRegistry {
    /// A registry with no kernels.
    pub fn empty() -> Self {
        Self {
            kernels: HashMap::new(),
        }
    }

    /// Register (or replace) the kernel for a function implementation.
    pub fn register(
        &mut self,
        name: &'static str,
        implementation: Implementation,
        kernel: StringKernel,
    ) {
        self.kernels.insert((name, implementation), kernel);
    }

    /// Resolve the kernel for a function call's bound implementation.
    pub fn resolve(&self, func: &FuncExpr) -> QuiverResult<StringKernel> {
        let def = functions::lookup(&func.name).ok_or_else(|| {
            QuiverError::not_implemented(format!("function '{}'", func.name))
        })?;
        self.kernels
            .get(&(def.name, func.implementation))
            .copied()
            .ok_or_else(|| {
                QuiverError::not_implemented(format!(
                    "{} implementation of '{}'",
                    func.implementation, def.name
                ))
            })
    }
}
