//! Function call expressions.

use serde::{Deserialize, Serialize};

use super::LogicalExpr;

/// The executable variant bound to a function call.
///
/// The binder always starts from `General`; the optimizer may switch to
/// `NarrowDomain` when statistics prove every argument value is ASCII. Both
/// variants must produce identical results on every input for which the
/// narrow variant can be chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Implementation {
    /// Correct for every input.
    #[default]
    General,
    /// Only correct for single-byte (ASCII) inputs.
    NarrowDomain,
}

impl std::fmt::Display for Implementation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::General => write!(f, "general"),
            Self::NarrowDomain => write!(f, "narrow_domain"),
        }
    }
}

/// Function call expression with its bound implementation slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncExpr {
    /// Function name as written (may be an alias).
    pub name: String,
    /// Function arguments.
    pub args: Vec<LogicalExpr>,
    /// Implementation chosen at optimization time.
    pub implementation: Implementation,
}

impl FuncExpr {
    /// Create a new function expression bound to the general implementation.
    pub fn new(name: impl Into<String>, args: Vec<LogicalExpr>) -> Self {
        Self {
            name: name.into(),
            args,
            implementation: Implementation::General,
        }
    }

    /// Set the bound implementation.
    #[must_use]
    pub fn with_implementation(mut self, implementation: Implementation) -> Self {
        self.implementation = implementation;
        self
    }

    /// Replace the bound implementation in place.
    pub fn rebind(&mut self, implementation: Implementation) {
        self.implementation = implementation;
    }
}

impl std::fmt::Display for FuncExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
    }
}

impl LogicalExpr {
    /// Create a `lower` function call.
    pub fn lower(expr: Self) -> Self {
        Self::Function(FuncExpr::new(crate::functions::builtin::LOWER, vec![expr]))
    }

    /// Create an `upper` function call.
    pub fn upper(expr: Self) -> Self {
        Self::Function(FuncExpr::new(crate::functions::builtin::UPPER, vec![expr]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::lit;

    #[test]
    fn test_new_binds_general() {
        let func = FuncExpr::new("lower", vec![lit("A")]);
        assert_eq!(func.implementation, Implementation::General);
    }

    #[test]
    fn test_rebind() {
        let mut func = FuncExpr::new("upper", vec![lit("a")]);
        func.rebind(Implementation::NarrowDomain);
        assert_eq!(func.implementation, Implementation::NarrowDomain);

        let general = FuncExpr::new("upper", vec![lit("a")]);
        assert_ne!(func, general);
        assert_eq!(func, general.with_implementation(Implementation::NarrowDomain));
    }

    #[test]
    fn test_display() {
        let func = FuncExpr::new("lcase", vec![lit("Hi")]);
        assert_eq!(func.to_string(), "lcase('Hi')");
        assert_eq!(Implementation::NarrowDomain.to_string(), "narrow_domain");
    }
}
