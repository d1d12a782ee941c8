//! Scalar function kernels.

pub mod caseconvert;
mod registry;

pub use registry::{KernelRegistry, StringKernel};
