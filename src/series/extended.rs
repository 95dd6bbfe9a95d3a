//! Extended non-negative reals `[0, ∞]`.
//!
//! Radii of convergence live in `[0, ∞]`. Infinity is a distinct variant
//! rather than a floating-point `inf`, so that "converges everywhere" can
//! never be produced by accident through overflow, and so that comparisons
//! with it are exact.

use std::cmp::Ordering;
use std::fmt;

use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::space::traits::scalar::SeriesScalar;

/// Errors raised when constructing an [`ExtendedNonNeg`] from a float.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExtendedValueError {
    /// The value is NaN.
    #[error("NaN is not an extended non-negative real")]
    NaN,
    /// The value is negative.
    #[error("Negative value {value} is not an extended non-negative real")]
    Negative {
        /// String representation of the value.
        value: String,
    },
}

/// A value in `[0, ∞]`.
///
/// # Examples
///
/// ```
/// use multilinear_series::series::extended::ExtendedNonNeg;
///
/// let r = ExtendedNonNeg::new(0.5_f64).unwrap();
/// assert!(r < ExtendedNonNeg::Infinite);
/// assert_eq!(r.recip(), ExtendedNonNeg::Finite(2.0));
/// assert_eq!(ExtendedNonNeg::<f64>::zero().recip(), ExtendedNonNeg::Infinite);
/// assert_eq!(ExtendedNonNeg::<f64>::Infinite.to_string(), "∞");
/// ```
///
/// Building [`Finite`](Self::Finite) directly skips the checks of
/// [`new`](Self::new); deserialization goes through `new` and rejects
/// negative values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "UncheckedExtended<T>",
    bound(deserialize = "T: SeriesScalar")
)]
pub enum ExtendedNonNeg<T> {
    /// A finite non-negative value.
    Finite(T),
    /// `∞`.
    Infinite,
}

/// A radius of convergence.
pub type Radius<T> = ExtendedNonNeg<T>;

/// Wire form of [`ExtendedNonNeg`] before validation.
#[derive(Deserialize)]
enum UncheckedExtended<T> {
    Finite(T),
    Infinite,
}

impl<T: SeriesScalar> TryFrom<UncheckedExtended<T>> for ExtendedNonNeg<T> {
    type Error = ExtendedValueError;

    fn try_from(value: UncheckedExtended<T>) -> Result<Self, Self::Error> {
        match value {
            UncheckedExtended::Finite(x) => Self::new(x),
            UncheckedExtended::Infinite => Ok(Self::Infinite),
        }
    }
}

impl<T: SeriesScalar> ExtendedNonNeg<T> {
    /// Converts a float; `+inf` maps to [`Infinite`](Self::Infinite).
    ///
    /// # Errors
    ///
    /// Returns [`ExtendedValueError`] for NaN or negative values.
    pub fn new(value: T) -> Result<Self, ExtendedValueError> {
        if value.is_nan() {
            return Err(ExtendedValueError::NaN);
        }
        if value < T::zero() {
            return Err(ExtendedValueError::Negative {
                value: format!("{value:?}"),
            });
        }
        if value.is_infinite() {
            Ok(Self::Infinite)
        } else {
            Ok(Self::Finite(value))
        }
    }

    /// Zero.
    #[must_use]
    pub fn zero() -> Self {
        Self::Finite(T::zero())
    }

    /// Returns `true` for [`Infinite`](Self::Infinite).
    #[must_use]
    pub const fn is_infinite(&self) -> bool {
        matches!(self, Self::Infinite)
    }

    /// Returns `true` for a finite value.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        matches!(self, Self::Finite(_))
    }

    /// Returns `true` for zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Finite(x) if *x == T::zero())
    }

    /// The finite value, if any.
    #[must_use]
    pub const fn finite(&self) -> Option<T> {
        match self {
            Self::Finite(x) => Some(*x),
            Self::Infinite => None,
        }
    }

    /// The value as a float, with `∞` mapped to `T::infinity()`.
    #[must_use]
    pub fn to_float(self) -> T {
        match self {
            Self::Finite(x) => x,
            Self::Infinite => T::infinity(),
        }
    }

    /// The reciprocal, with `1/0 = ∞` and `1/∞ = 0`.
    ///
    /// A reciprocal that overflows the float range is reported as `∞`.
    #[must_use]
    pub fn recip(self) -> Self {
        match self {
            Self::Infinite => Self::zero(),
            Self::Finite(x) if x == T::zero() => Self::Infinite,
            Self::Finite(x) => {
                let r = Float::recip(x);
                if r.is_infinite() {
                    Self::Infinite
                } else {
                    Self::Finite(r)
                }
            }
        }
    }

    /// The smaller of two values.
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        if other < self { other } else { self }
    }

    /// The larger of two values.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        if other > self { other } else { self }
    }

    /// Whether the finite value `t` lies strictly below this value.
    #[must_use]
    pub fn exceeds(&self, t: T) -> bool {
        match self {
            Self::Infinite => !t.is_nan(),
            Self::Finite(x) => t < *x,
        }
    }
}

impl<T: SeriesScalar> PartialOrd for ExtendedNonNeg<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Infinite, Self::Infinite) => Some(Ordering::Equal),
            (Self::Infinite, Self::Finite(_)) => Some(Ordering::Greater),
            (Self::Finite(_), Self::Infinite) => Some(Ordering::Less),
            (Self::Finite(a), Self::Finite(b)) => a.partial_cmp(b),
        }
    }
}

impl<T: fmt::Display> fmt::Display for ExtendedNonNeg<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(x) => x.fmt(f),
            Self::Infinite => f.write_str("∞"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_rejects_nan_and_negative() {
        assert_eq!(ExtendedNonNeg::new(f64::NAN), Err(ExtendedValueError::NaN));
        assert!(matches!(
            ExtendedNonNeg::new(-1.0_f64),
            Err(ExtendedValueError::Negative { .. })
        ));
        assert_eq!(ExtendedNonNeg::new(f64::INFINITY), Ok(ExtendedNonNeg::Infinite));
        assert_eq!(ExtendedNonNeg::new(0.0_f64), Ok(ExtendedNonNeg::zero()));
    }

    #[test]
    fn infinity_is_the_top_element() {
        let big = ExtendedNonNeg::Finite(f64::MAX);
        assert!(big < ExtendedNonNeg::Infinite);
        assert_eq!(big.min(ExtendedNonNeg::Infinite), big);
        assert_eq!(big.max(ExtendedNonNeg::Infinite), ExtendedNonNeg::Infinite);
        assert_eq!(
            ExtendedNonNeg::<f64>::Infinite.partial_cmp(&ExtendedNonNeg::Infinite),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn reciprocal_conventions() {
        assert_eq!(ExtendedNonNeg::<f64>::Infinite.recip(), ExtendedNonNeg::zero());
        assert_eq!(ExtendedNonNeg::<f64>::zero().recip(), ExtendedNonNeg::Infinite);
        assert_eq!(ExtendedNonNeg::Finite(4.0_f64).recip(), ExtendedNonNeg::Finite(0.25));
        // 1 / (smallest subnormal) overflows.
        assert_eq!(
            ExtendedNonNeg::Finite(f64::from_bits(1)).recip(),
            ExtendedNonNeg::Infinite
        );
    }

    #[test]
    fn exceeds_is_strict() {
        let r = ExtendedNonNeg::Finite(1.0_f64);
        assert!(r.exceeds(0.5));
        assert!(!r.exceeds(1.0));
        assert!(ExtendedNonNeg::<f64>::Infinite.exceeds(1e300));
        assert!(!ExtendedNonNeg::<f64>::zero().exceeds(0.0));
    }

    #[test]
    fn display_and_serde() {
        assert_eq!(ExtendedNonNeg::Finite(1.5_f64).to_string(), "1.5");
        let json = serde_json::to_string(&ExtendedNonNeg::<f64>::Infinite).unwrap();
        let back: ExtendedNonNeg<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ExtendedNonNeg::Infinite);
        let finite: ExtendedNonNeg<f64> =
            serde_json::from_str(&serde_json::to_string(&ExtendedNonNeg::Finite(0.25)).unwrap())
                .unwrap();
        assert_eq!(finite, ExtendedNonNeg::Finite(0.25));
    }

    #[test]
    fn deserialization_rejects_negative_values() {
        let err = serde_json::from_str::<ExtendedNonNeg<f64>>(r#"{"Finite":-1.0}"#).unwrap_err();
        assert!(err.to_string().contains("Negative value"));
        assert!(serde_json::from_str::<ExtendedNonNeg<f64>>(r#"{"Finite":0.0}"#).is_ok());
        assert!(serde_json::from_str::<ExtendedNonNeg<f64>>(r#""Unknown""#).is_err());
    }
}
