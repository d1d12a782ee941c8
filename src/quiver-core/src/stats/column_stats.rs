//! Per-column statistics snapshot.

use serde::{Deserialize, Serialize};

use crate::types::Value;

/// Immutable facts about every value a column (or derived expression) can
/// produce.
///
/// `has_only_narrow_domain` asserts that every value is representable using
/// only single-byte code units (ASCII). The producer of a snapshot is
/// responsible for that claim being true: consumers may select kernels that
/// are only correct under it, and a false positive is an upstream contract
/// violation rather than something consumers defend against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    has_only_narrow_domain: bool,
    has_null: bool,
    min: Option<Value>,
    max: Option<Value>,
}

impl ColumnStats {
    /// Create a snapshot with the two flags and no bounds.
    pub const fn new(has_only_narrow_domain: bool, has_null: bool) -> Self {
        Self {
            has_only_narrow_domain,
            has_null,
            min: None,
            max: None,
        }
    }

    /// Snapshot of a column known to hold only ASCII strings.
    pub const fn narrow() -> Self {
        Self::new(true, false)
    }

    /// Snapshot of a column that may hold multi-byte strings.
    pub const fn wide() -> Self {
        Self::new(false, false)
    }

    /// Derive the snapshot of a constant.
    ///
    /// A null constant holds no values, so it is vacuously narrow.
    pub fn for_literal(value: &Value) -> Self {
        match value {
            Value::Null(_) => Self::new(true, true),
            Value::String(s) => {
                Self::new(s.is_ascii(), false).with_bounds(value.clone(), value.clone())
            }
            other => Self::new(true, false).with_bounds(other.clone(), other.clone()),
        }
    }

    /// Mark whether the column contains nulls.
    #[must_use]
    pub fn with_null(mut self, has_null: bool) -> Self {
        self.has_null = has_null;
        self
    }

    /// Attach min/max bounds.
    #[must_use]
    pub fn with_bounds(mut self, min: Value, max: Value) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Whether every value uses only single-byte code units.
    pub const fn has_only_narrow_domain(&self) -> bool {
        self.has_only_narrow_domain
    }

    /// Whether the column may contain nulls.
    pub const fn has_null(&self) -> bool {
        self.has_null
    }

    /// Lower bound, if known.
    pub const fn min(&self) -> Option<&Value> {
        self.min.as_ref()
    }

    /// Upper bound, if known.
    pub const fn max(&self) -> Option<&Value> {
        self.max.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataType;

    #[test]
    fn test_literal_stats() {
        let ascii = ColumnStats::for_literal(&Value::from("HELLO"));
        assert!(ascii.has_only_narrow_domain());
        assert!(!ascii.has_null());
        assert_eq!(ascii.min(), Some(&Value::from("HELLO")));

        let wide = ColumnStats::for_literal(&Value::from("café"));
        assert!(!wide.has_only_narrow_domain());

        let null = ColumnStats::for_literal(&Value::null(DataType::String));
        assert!(null.has_null());
        assert!(null.has_only_narrow_domain());
        assert_eq!(null.min(), None);
    }

    #[test]
    fn test_builders() {
        let stats = ColumnStats::narrow()
            .with_null(true)
            .with_bounds(Value::from("a"), Value::from("z"));

        assert!(stats.has_only_narrow_domain());
        assert!(stats.has_null());
        assert_eq!(stats.max(), Some(&Value::from("z")));
        assert!(!ColumnStats::wide().has_only_narrow_domain());
    }
}
