//! Typed constant values.

use serde::{Deserialize, Serialize};

use super::DataType;

/// A typed constant as it appears in an expression tree.
///
/// Nulls are first-class values that keep their static type: a `NULL` of type
/// `Int64` is `Value::Null(DataType::Int64)`, distinct from zero or empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// Typed null value.
    Null(DataType),
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit floating point.
    Float64(f64),
    /// UTF-8 string.
    String(String),
}

/// Structural equality: floats compare bitwise, so `-0.0 != 0.0` and a NaN
/// equals itself.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null(a), Self::Null(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int64(a), Self::Int64(b)) => a == b,
            (Self::Float64(a), Self::Float64(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Value {
    /// Create a null of the given type.
    pub const fn null(data_type: DataType) -> Self {
        Self::Null(data_type)
    }

    /// Static type of this value.
    pub const fn data_type(&self) -> DataType {
        match self {
            Self::Null(dt) => *dt,
            Self::Bool(_) => DataType::Bool,
            Self::Int64(_) => DataType::Int64,
            Self::Float64(_) => DataType::Float64,
            Self::String(_) => DataType::String,
        }
    }

    /// Check if this value is null.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null(_))
    }

    /// Whether this is the numeric zero constant, of either sign.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Int64(i) => *i == 0,
            Self::Float64(f) => *f == 0.0,
            _ => false,
        }
    }

    /// Whether `x + self` and `self + x` equal `x` for every `x` of this type.
    ///
    /// For floats only `-0.0` qualifies: `-0.0 + 0.0` is `0.0`.
    pub fn is_additive_identity(&self) -> bool {
        match self {
            Self::Int64(i) => *i == 0,
            Self::Float64(f) => *f == 0.0 && f.is_sign_negative(),
            _ => false,
        }
    }

    /// Whether `x - self` equals `x` for every `x` of this type.
    ///
    /// For floats only `+0.0` qualifies: `-0.0 - -0.0` is `0.0`.
    pub fn is_subtractive_identity(&self) -> bool {
        match self {
            Self::Int64(i) => *i == 0,
            Self::Float64(f) => *f == 0.0 && f.is_sign_positive(),
            _ => false,
        }
    }

    /// Whether `x * self` and `x / self` equal `x` for every `x` of this type.
    pub fn is_multiplicative_identity(&self) -> bool {
        match self {
            Self::Int64(i) => *i == 1,
            Self::Float64(f) => *f == 1.0,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int64(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int64(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float64(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from(42i64), Value::Int64(42));
        assert_eq!(Value::from(7i32), Value::Int64(7));
        assert_eq!(Value::from(2.5f64), Value::Float64(2.5));
        assert_eq!(Value::from("hello"), Value::String("hello".to_string()));
        assert_eq!(Value::from(true), Value::Bool(true));
    }

    #[test]
    fn test_typed_null() {
        let null = Value::null(DataType::Int64);
        assert!(null.is_null());
        assert_eq!(null.data_type(), DataType::Int64);
        assert_ne!(null, Value::null(DataType::String));
        assert_ne!(null, Value::Int64(0));
    }

    #[test]
    fn test_integer_identities() {
        assert!(Value::Int64(0).is_zero());
        assert!(Value::Int64(0).is_additive_identity());
        assert!(Value::Int64(0).is_subtractive_identity());
        assert!(Value::Int64(1).is_multiplicative_identity());
        assert!(!Value::Int64(2).is_multiplicative_identity());
        assert!(!Value::null(DataType::Int64).is_zero());
    }

    #[test]
    fn test_float_signed_zero_identities() {
        let pos = Value::Float64(0.0);
        let neg = Value::Float64(-0.0);

        assert!(pos.is_zero());
        assert!(neg.is_zero());

        assert!(!pos.is_additive_identity());
        assert!(neg.is_additive_identity());

        assert!(pos.is_subtractive_identity());
        assert!(!neg.is_subtractive_identity());

        assert!(Value::Float64(1.0).is_multiplicative_identity());
    }

    #[test]
    fn test_strings_are_not_identities() {
        let s = Value::from("0");
        assert!(!s.is_zero());
        assert!(!s.is_additive_identity());
        assert_eq!(s.data_type(), DataType::String);
    }

    #[test]
    fn test_float_equality_is_bitwise() {
        assert_ne!(Value::Float64(0.0), Value::Float64(-0.0));
        assert_eq!(Value::Float64(f64::NAN), Value::Float64(f64::NAN));
        assert_ne!(Value::Float64(1.0), Value::Int64(1));
    }
}
