//! Normed vector spaces over a [`SeriesScalar`] field.
//!
//! [`NormedSpace`] is the capability set the series kernel needs from the
//! surrounding numerics: a zero vector, addition, scaling, a norm, and a way
//! to reject non-finite values before they enter a computation. Any type can
//! take part in a series by implementing it; this crate provides scalars,
//! fixed-dimension Euclidean vectors ([`Vector`](crate::space::vector::Vector))
//! and product spaces ([`Product`](crate::space::product::Product)).

use std::fmt::Debug;

use num_traits::{Float, One};

use super::scalar::SeriesScalar;

/// Errors that can occur while validating a vector.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SpaceValidationError {
    /// A component is NaN or infinite.
    #[error(
        "Non-finite component at index {component_index} of a {dimension}-dimensional vector: {component_value}"
    )]
    NonFiniteComponent {
        /// Flattened index of the offending component.
        component_index: usize,
        /// String representation of the offending value.
        component_value: String,
        /// Dimension of the enclosing space.
        dimension: usize,
    },
}

/// A normed vector space.
///
/// Implementations must satisfy the usual axioms up to floating-point
/// rounding: `‖v‖ ≥ 0`, `‖v + w‖ ≤ ‖v‖ + ‖w‖` and `‖a·v‖ = |a|·‖v‖`.
///
/// # Examples
///
/// ```
/// use multilinear_series::space::traits::normed_space::NormedSpace;
///
/// let v = 3.0_f64;
/// assert_eq!(NormedSpace::norm(&v.scale(-2.0)), 6.0);
/// assert_eq!(<f64 as NormedSpace>::zero(), 0.0);
/// assert_eq!(<f64 as NormedSpace>::dim(), 1);
/// ```
pub trait NormedSpace: Clone + Debug + PartialEq + Send + Sync + 'static {
    /// The scalar field.
    type Scalar: SeriesScalar;

    /// The zero vector.
    fn zero() -> Self;

    /// Number of scalar components of a vector of this space.
    fn dim() -> usize;

    /// Vector addition.
    #[must_use]
    fn add(&self, other: &Self) -> Self;

    /// Multiplication by a scalar.
    #[must_use]
    fn scale(&self, factor: Self::Scalar) -> Self;

    /// The norm `‖self‖`.
    fn norm(&self) -> Self::Scalar;

    /// Checks that every component is finite.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceValidationError::NonFiniteComponent`] for the first
    /// NaN or infinite component.
    fn validate(&self) -> Result<(), SpaceValidationError>;

    /// Additive inverse.
    #[must_use]
    fn neg(&self) -> Self {
        self.scale(-<Self::Scalar as One>::one())
    }

    /// Vector subtraction.
    #[must_use]
    fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Distance `‖self − other‖`.
    fn distance(&self, other: &Self) -> Self::Scalar {
        self.sub(other).norm()
    }
}

macro_rules! impl_scalar_space {
    ($($t:ty),*) => {
        $(
            impl NormedSpace for $t {
                type Scalar = $t;

                #[inline]
                fn zero() -> Self {
                    0.0
                }

                #[inline]
                fn dim() -> usize {
                    1
                }

                #[inline]
                fn add(&self, other: &Self) -> Self {
                    *self + *other
                }

                #[inline]
                fn scale(&self, factor: Self::Scalar) -> Self {
                    *self * factor
                }

                #[inline]
                fn norm(&self) -> Self::Scalar {
                    Float::abs(*self)
                }

                fn validate(&self) -> Result<(), SpaceValidationError> {
                    if self.is_finite() {
                        Ok(())
                    } else {
                        Err(SpaceValidationError::NonFiniteComponent {
                            component_index: 0,
                            component_value: format!("{self:?}"),
                            dimension: 1,
                        })
                    }
                }
            }
        )*
    };
}

// Scalars are one-dimensional normed spaces over themselves.
impl_scalar_space!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn scalar_space_operations() {
        let a = 1.5_f64;
        let b = -4.0_f64;
        assert_relative_eq!(NormedSpace::add(&a, &b), -2.5);
        assert_relative_eq!(NormedSpace::sub(&a, &b), 5.5);
        assert_relative_eq!(NormedSpace::neg(&b), 4.0);
        assert_relative_eq!(NormedSpace::norm(&b), 4.0);
        assert_relative_eq!(a.distance(&b), 5.5);
    }

    #[test]
    fn scalar_space_validation() {
        assert!(NormedSpace::validate(&2.0_f32).is_ok());
        let err = NormedSpace::validate(&f64::NAN).unwrap_err();
        assert!(matches!(
            err,
            SpaceValidationError::NonFiniteComponent {
                component_index: 0,
                dimension: 1,
                ..
            }
        ));
    }
}
