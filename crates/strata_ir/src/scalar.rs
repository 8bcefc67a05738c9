//! Scalar values carried by leaf nodes and attributes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Largest integer a float can hold without losing precision (2^53 - 1).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A primitive value: string, number, boolean or null.
///
/// Numbers are split into [`Scalar::Integer`] and [`Scalar::Float`]. Adapters
/// preserve whatever type their delegated parser resolved; they never
/// re-interpret a value after the fact.
///
/// Serializes untagged, so `Scalar::Integer(6)` becomes `6` and
/// `Scalar::Null` becomes `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// An explicit null (`~`, `null`, or an empty YAML value).
    Null,
    /// A boolean.
    Bool(bool),
    /// An integral number.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// A string, kept exactly as the adapter produced it.
    String(String),
}

impl Scalar {
    /// Creates a numeric scalar from a float.
    ///
    /// Integral values inside the 53-bit safe range become
    /// [`Scalar::Integer`], so `6.00` and `6` resolve to the same value.
    pub fn number(value: f64) -> Self {
        if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
            Self::Integer(value as i64)
        } else {
            Self::Float(value)
        }
    }

    /// Returns the string value, if this is a string.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if this is [`Scalar::Null`].
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true if this is an integer or a float.
    #[inline]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}
