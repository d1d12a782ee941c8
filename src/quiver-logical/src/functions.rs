//! Builtin scalar function catalog.
//!
//! Each entry describes a function's signature and, optionally, how the
//! statistics of its arguments map to the statistics of its result. A
//! function without a propagation capability is never specialized.

use common_error::{type_err, QuiverError, QuiverResult};
use quiver_core::{ColumnStats, DataType};

use crate::expr::Implementation;

/// Built-in function names.
pub mod builtin {
    /// Lowercase conversion.
    pub const LOWER: &str = "lower";
    /// Alias of [`LOWER`].
    pub const LCASE: &str = "lcase";
    /// Uppercase conversion.
    pub const UPPER: &str = "upper";
    /// Alias of [`UPPER`].
    pub const UCASE: &str = "ucase";
}

/// Outcome of propagating statistics through one function call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Propagation {
    /// Statistics of the call's result, if derivable.
    pub stats: Option<ColumnStats>,
    /// Implementation the call should be rebound to, if any.
    pub implementation: Option<Implementation>,
}

impl Propagation {
    /// No statistics and no rebind.
    pub const fn unknown() -> Self {
        Self {
            stats: None,
            implementation: None,
        }
    }
}

/// Maps argument statistics (one slot per argument, `None` when unknown) to
/// result statistics and an optional implementation choice.
pub type StatsPropagateFn = fn(&[Option<ColumnStats>]) -> Propagation;

/// Catalog entry for a scalar function.
#[derive(Debug, Clone, Copy)]
pub struct FunctionDef {
    /// Canonical name.
    pub name: &'static str,
    /// Alternative names resolving to the same function.
    pub aliases: &'static [&'static str],
    /// Expected argument types.
    pub arg_types: &'static [DataType],
    /// Result type.
    pub return_type: DataType,
    /// Statistics propagation capability.
    pub propagate_stats: Option<StatsPropagateFn>,
}

impl FunctionDef {
    /// Whether `name` refers to this function (case-insensitive, aliases included).
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(name))
    }

    /// Check argument types and return the result type.
    pub fn bind_return_type(&self, arg_types: &[DataType]) -> QuiverResult<DataType> {
        if arg_types.len() != self.arg_types.len() {
            return Err(QuiverError::type_error(format!(
                "{} expects {} argument(s), got {}",
                self.name,
                self.arg_types.len(),
                arg_types.len()
            )));
        }
        for (i, (actual, expected)) in arg_types.iter().zip(self.arg_types).enumerate() {
            if actual != expected {
                type_err!("{} argument {} must be {expected}, got {actual}", self.name, i + 1);
            }
        }
        Ok(self.return_type)
    }
}

/// Statistics combinator shared by the case-conversion family.
///
/// Case conversion of an ASCII string is ASCII and preserves nulls, so a
/// narrow argument yields a narrow result and allows the table-driven
/// implementation. Bounds are dropped since casing reorders strings.
pub fn propagate_case_conversion_stats(args: &[Option<ColumnStats>]) -> Propagation {
    match args {
        [Some(stats)] if stats.has_only_narrow_domain() => Propagation {
            stats: Some(ColumnStats::new(true, stats.has_null())),
            implementation: Some(Implementation::NarrowDomain),
        },
        _ => Propagation::unknown(),
    }
}

static BUILTIN_FUNCTIONS: [FunctionDef; 2] = [
    FunctionDef {
        name: builtin::LOWER,
        aliases: &[builtin::LCASE],
        arg_types: &[DataType::String],
        return_type: DataType::String,
        propagate_stats: Some(propagate_case_conversion_stats),
    },
    FunctionDef {
        name: builtin::UPPER,
        aliases: &[builtin::UCASE],
        arg_types: &[DataType::String],
        return_type: DataType::String,
        propagate_stats: Some(propagate_case_conversion_stats),
    },
];

/// All builtin functions.
pub fn builtin_functions() -> &'static [FunctionDef] {
    &BUILTIN_FUNCTIONS
}

/// Look up a builtin function by name or alias.
pub fn lookup(name: &str) -> Option<&'static FunctionDef> {
    BUILTIN_FUNCTIONS.iter().find(|def| def.matches(name))
}
