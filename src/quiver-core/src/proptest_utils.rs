//! Property-based tests for quiver-core types.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::stats::ColumnStats;
    use crate::types::{DataType, Value};

    // =========================================================================
    // Arbitrary Strategies
    // =========================================================================

    fn arb_data_type() -> impl Strategy<Value = DataType> {
        prop_oneof![
            Just(DataType::Bool),
            Just(DataType::Int64),
            Just(DataType::Float64),
            Just(DataType::String),
        ]
    }

    /// Values that roundtrip through JSON (integer-representable floats).
    fn arb_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            arb_data_type().prop_map(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::Int64),
            any::<i32>().prop_map(|i| Value::Float64(f64::from(i))),
            ".*".prop_map(Value::String),
        ]
    }

    // =========================================================================
    // Property Tests
    // =========================================================================

    proptest! {
        /// Value serialization roundtrips correctly.
        #[test]
        fn value_serde_roundtrip(value in arb_value()) {
            let serialized = serde_json::to_string(&value).unwrap();
            let deserialized: Value = serde_json::from_str(&serialized).unwrap();
            prop_assert_eq!(value, deserialized);
        }

        /// A null keeps the type it was created with.
        #[test]
        fn null_keeps_its_type(dt in arb_data_type()) {
            prop_assert_eq!(Value::null(dt).data_type(), dt);
        }

        /// The numeric supertype is symmetric.
        #[test]
        fn numeric_supertype_symmetric(a in arb_data_type(), b in arb_data_type()) {
            prop_assert_eq!(a.numeric_supertype(&b), b.numeric_supertype(&a));
        }

        /// Literal statistics report narrow exactly for ASCII strings.
        #[test]
        fn literal_stats_narrow_iff_ascii(s in ".*") {
            let stats = ColumnStats::for_literal(&Value::String(s.clone()));
            prop_assert_eq!(stats.has_only_narrow_domain(), s.is_ascii());
            prop_assert!(!stats.has_null());
        }

        /// No nonzero integer is an identity for addition.
        #[test]
        fn only_zero_is_additive_identity(i in any::<i64>()) {
            prop_assert_eq!(Value::Int64(i).is_additive_identity(), i == 0);
        }
    }
}
