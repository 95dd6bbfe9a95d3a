//! Concrete multilinear maps and the map algebra used by series operations.
//!
//! [`ZeroMap`] and [`ConstantMap`] appear in every series (degree-`n` zero
//! terms past a finite support, the constant term of an expansion).
//! [`SumMap`] and [`ScaledMap`] realise the pointwise vector-space structure
//! on terms of equal degree. [`ScalarMonomial`] is the scalar building block
//! `c · x₁ ⋯ xₙ` of ordinary power series.

use std::fmt::{self, Debug};
use std::marker::PhantomData;
use std::sync::Arc;

use num_traits::Float;

use crate::maps::traits::{MapError, MultilinearMap};
use crate::space::traits::normed_space::NormedSpace;
use crate::space::traits::scalar::SeriesScalar;

// =============================================================================
// ZERO AND CONSTANT MAPS
// =============================================================================

/// The zero map `Eⁿ → F` of a given degree.
pub struct ZeroMap<E, F> {
    degree: usize,
    _spaces: PhantomData<fn() -> (E, F)>,
}

impl<E, F> ZeroMap<E, F> {
    /// Creates the zero map of degree `degree`.
    #[must_use]
    pub const fn new(degree: usize) -> Self {
        Self {
            degree,
            _spaces: PhantomData,
        }
    }
}

impl<E, F> Debug for ZeroMap<E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZeroMap")
            .field("degree", &self.degree)
            .finish()
    }
}

impl<E, F> MultilinearMap<E, F> for ZeroMap<E, F>
where
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
{
    fn degree(&self) -> usize {
        self.degree
    }

    fn eval(&self, _args: &[E]) -> F {
        F::zero()
    }

    fn op_norm(&self) -> E::Scalar {
        <E::Scalar as num_traits::Zero>::zero()
    }

    fn is_zero(&self) -> bool {
        true
    }
}

/// The degree-0 map returning a fixed value.
///
/// Its operator norm is the norm of the value.
pub struct ConstantMap<E, F> {
    value: F,
    _domain: PhantomData<fn() -> E>,
}

impl<E, F> ConstantMap<E, F> {
    /// Creates the constant map with the given value.
    pub const fn new(value: F) -> Self {
        Self {
            value,
            _domain: PhantomData,
        }
    }

    /// The constant value.
    pub const fn value(&self) -> &F {
        &self.value
    }
}

impl<E, F: Debug> Debug for ConstantMap<E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstantMap")
            .field("value", &self.value)
            .finish()
    }
}

impl<E, F> MultilinearMap<E, F> for ConstantMap<E, F>
where
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
{
    fn degree(&self) -> usize {
        0
    }

    fn eval(&self, _args: &[E]) -> F {
        self.value.clone()
    }

    fn op_norm(&self) -> E::Scalar {
        self.value.norm()
    }

    fn is_zero(&self) -> bool {
        self.value == F::zero()
    }
}

// =============================================================================
// MAP ALGEBRA
// =============================================================================

/// Pointwise sum of two multilinear maps of the same degree.
///
/// When both summands are scalar monomials the sum is the monomial with the
/// summed coefficient, and [`op_norm`](MultilinearMap::op_norm) is exact.
/// Otherwise it reports the triangle-inequality bound `‖A‖ + ‖B‖`.
pub struct SumMap<E, F>
where
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
{
    left: Arc<dyn MultilinearMap<E, F>>,
    right: Arc<dyn MultilinearMap<E, F>>,
}

impl<E, F> SumMap<E, F>
where
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
{
    /// Creates `left + right`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::DomainMismatch`] if the degrees differ.
    pub fn new(
        left: Arc<dyn MultilinearMap<E, F>>,
        right: Arc<dyn MultilinearMap<E, F>>,
    ) -> Result<Self, MapError> {
        if left.degree() != right.degree() {
            return Err(MapError::DomainMismatch {
                context: "sum of multilinear maps",
                expected: left.degree(),
                found: right.degree(),
            });
        }
        Ok(Self { left, right })
    }
}

impl<E, F> Debug for SumMap<E, F>
where
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SumMap")
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

impl<E, F> MultilinearMap<E, F> for SumMap<E, F>
where
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
{
    fn degree(&self) -> usize {
        self.left.degree()
    }

    fn eval(&self, args: &[E]) -> F {
        self.left.eval(args).add(&self.right.eval(args))
    }

    fn op_norm(&self) -> E::Scalar {
        self.monomial_coefficient().map_or_else(
            || self.left.op_norm() + self.right.op_norm(),
            Float::abs,
        )
    }

    fn is_zero(&self) -> bool {
        (self.left.is_zero() && self.right.is_zero())
            || self.monomial_coefficient() == Some(<E::Scalar as num_traits::Zero>::zero())
    }

    fn monomial_coefficient(&self) -> Option<E::Scalar> {
        // ∞ − ∞ has no coefficient; the triangle bound still applies.
        let c = self.left.monomial_coefficient()? + self.right.monomial_coefficient()?;
        (!c.is_nan()).then_some(c)
    }
}

/// A multilinear map multiplied by a scalar.
pub struct ScaledMap<E, F>
where
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
{
    inner: Arc<dyn MultilinearMap<E, F>>,
    factor: E::Scalar,
}

impl<E, F> ScaledMap<E, F>
where
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
{
    /// Creates `factor · inner`.
    pub fn new(inner: Arc<dyn MultilinearMap<E, F>>, factor: E::Scalar) -> Self {
        Self { inner, factor }
    }
}

impl<E, F> Debug for ScaledMap<E, F>
where
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScaledMap")
            .field("factor", &self.factor)
            .field("inner", &self.inner)
            .finish()
    }
}

impl<E, F> MultilinearMap<E, F> for ScaledMap<E, F>
where
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
{
    fn degree(&self) -> usize {
        self.inner.degree()
    }

    fn eval(&self, args: &[E]) -> F {
        self.inner.eval(args).scale(self.factor)
    }

    fn op_norm(&self) -> E::Scalar {
        Float::abs(self.factor) * self.inner.op_norm()
    }

    fn is_zero(&self) -> bool {
        self.factor == <E::Scalar as num_traits::Zero>::zero() || self.inner.is_zero()
    }

    fn monomial_coefficient(&self) -> Option<E::Scalar> {
        self.inner.monomial_coefficient().map(|c| c * self.factor)
    }
}

// =============================================================================
// SCALAR MONOMIALS
// =============================================================================

/// The scalar multilinear map `(x₁, …, xₙ) ↦ c · x₁ ⋯ xₙ` on `Tⁿ → T`.
///
/// Its operator norm is exactly `|c|`. A power series `Σ cₙ zⁿ` is the
/// formal multilinear series whose `n`-th term is `ScalarMonomial::new(n, cₙ)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalarMonomial<T> {
    degree: usize,
    coefficient: T,
}

impl<T: SeriesScalar> ScalarMonomial<T> {
    /// Creates `c · x₁ ⋯ xₙ` of degree `degree`.
    #[must_use]
    pub const fn new(degree: usize, coefficient: T) -> Self {
        Self {
            degree,
            coefficient,
        }
    }

    /// The coefficient `c`.
    #[must_use]
    pub const fn coefficient(&self) -> T {
        self.coefficient
    }
}

impl<T> MultilinearMap<T, T> for ScalarMonomial<T>
where
    T: SeriesScalar + NormedSpace<Scalar = T>,
{
    fn degree(&self) -> usize {
        self.degree
    }

    fn eval(&self, args: &[T]) -> T {
        args.iter().fold(self.coefficient, |acc, &x| acc * x)
    }

    fn op_norm(&self) -> T {
        Float::abs(self.coefficient)
    }

    fn is_zero(&self) -> bool {
        self.coefficient == <T as num_traits::Zero>::zero()
    }

    fn monomial_coefficient(&self) -> Option<T> {
        Some(self.coefficient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::vector::Vector;
    use approx::assert_relative_eq;

    type V2 = Vector<f64, 2>;

    fn monomial(degree: usize, c: f64) -> Arc<dyn MultilinearMap<f64, f64>> {
        Arc::new(ScalarMonomial::new(degree, c))
    }

    #[test]
    fn zero_map_has_zero_norm_and_value() {
        let zero: ZeroMap<V2, f64> = ZeroMap::new(3);
        let v = Vector::new([1.0, 2.0]);
        assert_eq!(zero.degree(), 3);
        assert!(zero.is_zero());
        assert_relative_eq!(zero.op_norm(), 0.0);
        assert_relative_eq!(zero.apply(&[v, v, v]).unwrap(), 0.0);
    }

    #[test]
    fn constant_map_ignores_empty_argument_list() {
        let c: ConstantMap<f64, V2> = ConstantMap::new(Vector::new([3.0, 4.0]));
        assert_eq!(c.degree(), 0);
        assert_eq!(c.apply(&[]).unwrap(), Vector::new([3.0, 4.0]));
        assert_relative_eq!(c.op_norm(), 5.0);
        assert!(!c.is_zero());
        assert!(matches!(
            c.apply(&[1.0]),
            Err(MapError::DomainMismatch {
                expected: 0,
                found: 1,
                ..
            })
        ));
    }

    #[test]
    fn sum_and_scale_are_pointwise() {
        let sum = SumMap::new(monomial(2, 3.0), monomial(2, -1.0)).unwrap();
        assert_relative_eq!(sum.apply(&[2.0, 5.0]).unwrap(), 20.0);
        assert_relative_eq!(sum.op_norm(), 2.0);
        assert_eq!(sum.monomial_coefficient(), Some(2.0));

        let scaled = ScaledMap::new(monomial(2, 3.0), -0.5);
        assert_relative_eq!(scaled.apply(&[2.0, 2.0]).unwrap(), -6.0);
        assert_relative_eq!(scaled.op_norm(), 1.5);
        assert!(ScaledMap::new(monomial(1, 3.0), 0.0).is_zero());
    }

    #[test]
    fn cancelling_monomials_sum_to_zero() {
        let negated: Arc<dyn MultilinearMap<f64, f64>> =
            Arc::new(ScaledMap::new(monomial(3, 16.0), -1.0));
        let sum = SumMap::new(monomial(3, 16.0), negated).unwrap();
        assert!(sum.is_zero());
        assert_relative_eq!(sum.op_norm(), 0.0);
        assert_relative_eq!(sum.apply_diagonal(&5.0), 0.0);
    }

    #[test]
    fn non_monomial_sums_report_the_triangle_bound() {
        let a: Arc<dyn MultilinearMap<f64, V2>> =
            Arc::new(ConstantMap::new(Vector::new([3.0, 0.0])));
        let b: Arc<dyn MultilinearMap<f64, V2>> =
            Arc::new(ConstantMap::new(Vector::new([0.0, 4.0])));
        let sum = SumMap::new(a, b).unwrap();
        assert_eq!(sum.monomial_coefficient(), None);
        assert_relative_eq!(sum.op_norm(), 7.0);
        assert_eq!(sum.apply(&[]).unwrap(), Vector::new([3.0, 4.0]));
    }

    #[test]
    fn sum_rejects_mixed_degrees() {
        let err = SumMap::new(monomial(1, 1.0), monomial(2, 1.0)).unwrap_err();
        assert_eq!(
            err,
            MapError::DomainMismatch {
                context: "sum of multilinear maps",
                expected: 1,
                found: 2,
            }
        );
    }

    #[test]
    fn apply_rejects_non_finite_arguments() {
        let m = ScalarMonomial::new(2, 1.0);
        assert!(matches!(
            m.apply(&[1.0, f64::NAN]),
            Err(MapError::NonFiniteInput {
                argument_index: 1,
                ..
            })
        ));
    }

    #[test]
    fn scalar_monomial_diagonal_is_power() {
        let m = ScalarMonomial::new(4, 0.5);
        assert_relative_eq!(m.apply_diagonal(&3.0), 0.5 * 81.0);
        assert_relative_eq!(ScalarMonomial::new(0, 7.0).apply_diagonal(&3.0), 7.0);
        assert_relative_eq!(ScalarMonomial::new(3, -2.0).op_norm(), 2.0);
    }
}
