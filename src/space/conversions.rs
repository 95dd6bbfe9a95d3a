//! Safe scalar conversions between numeric types.
//!
//! These functions replace the `cast(x).unwrap_or(fallback)` pattern with
//! explicit error reporting, and check for non-finite values where a finite
//! value is required.

use num_traits::cast;

use crate::space::traits::scalar::SeriesScalar;

/// Errors that can occur while converting scalar values.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScalarConversionError {
    /// The value cannot be represented in the target type.
    #[error("Failed to convert {value} from {from_type} to {to_type}")]
    ConversionFailed {
        /// String representation of the problematic value.
        value: String,
        /// Source type name.
        from_type: &'static str,
        /// Target type name.
        to_type: &'static str,
    },
    /// Non-finite value (NaN or infinity) where a finite value is required.
    #[error("Non-finite value (NaN or infinity): {value}")]
    NonFiniteValue {
        /// String representation of the non-finite value.
        value: String,
    },
}

/// Safely convert a scalar value from type T to f64.
///
/// # Errors
///
/// Returns `ScalarConversionError::NonFiniteValue` if the value is NaN or infinite,
/// `ScalarConversionError::ConversionFailed` if the conversion fails.
///
/// # Example
///
/// ```
/// use multilinear_series::space::conversions::safe_scalar_to_f64;
///
/// let value_f64 = safe_scalar_to_f64(42.5f32).unwrap();
/// assert_eq!(value_f64, 42.5f64);
/// assert!(safe_scalar_to_f64(f32::NAN).is_err());
/// ```
pub fn safe_scalar_to_f64<T: SeriesScalar>(value: T) -> Result<f64, ScalarConversionError> {
    if !value.is_finite_generic() {
        return Err(ScalarConversionError::NonFiniteValue {
            value: format!("{value:?}"),
        });
    }

    cast(value).ok_or_else(|| ScalarConversionError::ConversionFailed {
        value: format!("{value:?}"),
        from_type: std::any::type_name::<T>(),
        to_type: "f64",
    })
}

/// Safely convert a scalar value from f64 to type T.
///
/// # Errors
///
/// Returns `ScalarConversionError::NonFiniteValue` if the value is NaN or infinite,
/// `ScalarConversionError::ConversionFailed` if the value overflows `T`.
///
/// # Examples
///
/// ```
/// use multilinear_series::space::conversions::safe_scalar_from_f64;
///
/// let value_f32: f32 = safe_scalar_from_f64(123.456f64).unwrap();
/// assert!((value_f32 - 123.456f32).abs() < 1e-6);
///
/// let overflow: Result<f32, _> = safe_scalar_from_f64(1e300);
/// assert!(overflow.is_err());
/// ```
pub fn safe_scalar_from_f64<T: SeriesScalar>(value: f64) -> Result<T, ScalarConversionError> {
    if !value.is_finite() {
        return Err(ScalarConversionError::NonFiniteValue {
            value: format!("{value:?}"),
        });
    }

    let converted: T = cast(value).ok_or_else(|| ScalarConversionError::ConversionFailed {
        value: format!("{value:?}"),
        from_type: "f64",
        to_type: std::any::type_name::<T>(),
    })?;

    // num-traits saturates f64 -> f32 overflow to infinity instead of failing.
    if converted.is_finite_generic() {
        Ok(converted)
    } else {
        Err(ScalarConversionError::ConversionFailed {
            value: format!("{value:?}"),
            from_type: "f64",
            to_type: std::any::type_name::<T>(),
        })
    }
}

/// Safely convert a `usize` (typically a degree) to a scalar type T.
///
/// The conversion is exact or it fails: a value whose round trip through `T`
/// does not give back the same integer is rejected.
///
/// # Errors
///
/// Returns `ScalarConversionError::ConversionFailed` if the value cannot be
/// represented exactly in `T`.
///
/// # Examples
///
/// ```
/// use multilinear_series::space::conversions::safe_usize_to_scalar;
///
/// let n: f64 = safe_usize_to_scalar(42_usize).unwrap();
/// assert_eq!(n, 42.0);
///
/// // 2^24 + 1 has no exact f32 representation.
/// let inexact: Result<f32, _> = safe_usize_to_scalar((1_usize << 24) + 1);
/// assert!(inexact.is_err());
/// ```
pub fn safe_usize_to_scalar<T: SeriesScalar>(value: usize) -> Result<T, ScalarConversionError> {
    let failed = || ScalarConversionError::ConversionFailed {
        value: format!("{value}"),
        from_type: "usize",
        to_type: std::any::type_name::<T>(),
    };

    let converted: T = cast(value).ok_or_else(failed)?;
    let round_trip: usize = cast(converted).ok_or_else(failed)?;
    if round_trip == value {
        Ok(converted)
    } else {
        Err(failed())
    }
}
