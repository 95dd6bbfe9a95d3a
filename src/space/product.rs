//! Product of two normed spaces.

use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::space::traits::normed_space::{NormedSpace, SpaceValidationError};

/// An element `(fst, snd)` of the product space `A × B`.
///
/// The norm is the sup norm `max(‖fst‖, ‖snd‖)`, which makes both
/// projections and both inclusions norm-non-increasing.
///
/// # Examples
///
/// ```rust
/// use multilinear_series::space::product::Product;
/// use multilinear_series::space::traits::normed_space::NormedSpace;
/// use multilinear_series::space::vector::Vector;
///
/// let p = Product::new(Vector::new([3.0, 4.0]), -2.0_f64);
/// assert_eq!(p.norm(), 5.0);
///
/// let q: Product<f64, f64> = (1.0, 2.0).into();
/// assert_eq!(q.fst, 1.0);
/// assert_eq!(q.snd, 2.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Product<A, B> {
    /// First component.
    pub fst: A,
    /// Second component.
    pub snd: B,
}

impl<A, B> Product<A, B> {
    /// Creates the pair `(fst, snd)`.
    #[inline]
    pub const fn new(fst: A, snd: B) -> Self {
        Self { fst, snd }
    }

    /// Splits the pair into its components.
    #[inline]
    pub fn into_parts(self) -> (A, B) {
        (self.fst, self.snd)
    }
}

impl<A, B> Product<A, B>
where
    A: NormedSpace,
    B: NormedSpace<Scalar = A::Scalar>,
{
    /// The inclusion `a ↦ (a, 0)`.
    #[must_use]
    pub fn inl(fst: A) -> Self {
        Self::new(fst, B::zero())
    }

    /// The inclusion `b ↦ (0, b)`.
    #[must_use]
    pub fn inr(snd: B) -> Self {
        Self::new(A::zero(), snd)
    }
}

impl<A, B> From<(A, B)> for Product<A, B> {
    #[inline]
    fn from((fst, snd): (A, B)) -> Self {
        Self { fst, snd }
    }
}

impl<A, B> NormedSpace for Product<A, B>
where
    A: NormedSpace,
    B: NormedSpace<Scalar = A::Scalar>,
{
    type Scalar = A::Scalar;

    fn zero() -> Self {
        Self::new(A::zero(), B::zero())
    }

    fn dim() -> usize {
        A::dim() + B::dim()
    }

    fn add(&self, other: &Self) -> Self {
        Self::new(self.fst.add(&other.fst), self.snd.add(&other.snd))
    }

    fn scale(&self, factor: Self::Scalar) -> Self {
        Self::new(self.fst.scale(factor), self.snd.scale(factor))
    }

    fn norm(&self) -> Self::Scalar {
        Float::max(self.fst.norm(), self.snd.norm())
    }

    fn validate(&self) -> Result<(), SpaceValidationError> {
        self.fst.validate()?;
        // Report component indices of the second factor in the flattened layout.
        self.snd.validate().map_err(|err| match err {
            SpaceValidationError::NonFiniteComponent {
                component_index,
                component_value,
                ..
            } => SpaceValidationError::NonFiniteComponent {
                component_index: A::dim() + component_index,
                component_value,
                dimension: Self::dim(),
            },
        })
    }
}
