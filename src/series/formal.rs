//! Formal multilinear series.
//!
//! A formal multilinear series from `E` to `F` is a sequence `p₀, p₁, …`
//! where `pₙ` is a continuous multilinear map `Eⁿ → F`. No convergence is
//! assumed: the series is a purely algebraic object until its radius of
//! convergence is computed.
//!
//! Terms are produced on demand by a generator closure and memoized, so a
//! series may be infinite. A [`Support`] records when every term past some
//! degree is known to vanish; such terms are never generated.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::collections::FastHashMap;
use crate::maps::multilinear::{ScalarMonomial, ScaledMap, SumMap, ZeroMap};
use crate::maps::traits::{MapError, MultilinearMap};
use crate::series::extended::Radius;
use crate::series::radius::{RadiusConfig, RadiusReport, radius_report};
use crate::space::conversions::ScalarConversionError;
use crate::space::traits::normed_space::{NormedSpace, SpaceValidationError};
use crate::space::traits::scalar::SeriesScalar;

// =============================================================================
// ERRORS
// =============================================================================

/// Errors raised by series construction, evaluation and radius computation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SeriesError {
    /// A term could not be built or applied.
    #[error(transparent)]
    Map(#[from] MapError),
    /// The term produced for degree `expected` has degree `found`.
    #[error("Term generated for degree {expected} has degree {found}")]
    DegreeMismatch {
        /// Requested degree.
        expected: usize,
        /// Degree of the produced term.
        found: usize,
    },
    /// A base point or displacement is NaN or infinite.
    #[error("Non-finite input: {0}")]
    NonFiniteInput(#[from] SpaceValidationError),
    /// The root test `‖pₙ‖^{1/n}` is undefined for `n = 0`.
    #[error("Root test is undefined at degree 0")]
    ZeroDegreeRoot,
    /// A term reported a NaN or negative operator norm.
    #[error("Operator norm of degree {degree} term is not a non-negative number: {value}")]
    InvalidNorm {
        /// Degree of the offending term.
        degree: usize,
        /// String representation of the reported norm.
        value: String,
    },
    /// A scalar argument is out of its domain.
    #[error("Invalid value for {name}: {value}")]
    InvalidArgument {
        /// Name of the argument.
        name: &'static str,
        /// String representation of the value.
        value: String,
    },
    /// A radius configuration is unusable.
    #[error("Invalid radius configuration: {reason}")]
    InvalidConfig {
        /// Why the configuration was rejected.
        reason: String,
    },
    /// A degree or norm could not be represented in the scalar type.
    #[error(transparent)]
    Conversion(#[from] ScalarConversionError),
    /// A displacement lies on or outside the ball of convergence.
    #[error("Displacement of norm {norm} is outside the radius of convergence {radius}")]
    OutsideRadius {
        /// String representation of the displacement norm.
        norm: String,
        /// String representation of the radius.
        radius: String,
    },
}

// =============================================================================
// SUPPORT
// =============================================================================

/// Which degrees of a series may carry non-zero terms.
///
/// # Examples
///
/// ```
/// use multilinear_series::series::formal::Support;
///
/// let s = Support::UpTo(2);
/// assert!(s.contains(2));
/// assert!(!s.contains(3));
/// assert_eq!(s.union(Support::UpTo(5)), Support::UpTo(5));
/// assert_eq!(s.intersect(Support::Unbounded), Support::UpTo(2));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Support {
    /// Every term of degree greater than the given one is zero.
    UpTo(usize),
    /// No degree is known to vanish.
    Unbounded,
}

impl Support {
    /// Whether a term of this degree may be non-zero.
    #[must_use]
    pub const fn contains(self, degree: usize) -> bool {
        match self {
            Self::UpTo(last) => degree <= last,
            Self::Unbounded => true,
        }
    }

    /// The last possibly non-zero degree, if the support is finite.
    #[must_use]
    pub const fn last_degree(self) -> Option<usize> {
        match self {
            Self::UpTo(last) => Some(last),
            Self::Unbounded => None,
        }
    }

    /// The support of a sum.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        match (self, other) {
            (Self::UpTo(a), Self::UpTo(b)) => Self::UpTo(a.max(b)),
            _ => Self::Unbounded,
        }
    }

    /// The support of a truncation.
    #[must_use]
    pub fn intersect(self, other: Self) -> Self {
        match (self, other) {
            (Self::UpTo(a), Self::UpTo(b)) => Self::UpTo(a.min(b)),
            (Self::UpTo(a), Self::Unbounded) | (Self::Unbounded, Self::UpTo(a)) => Self::UpTo(a),
            (Self::Unbounded, Self::Unbounded) => Self::Unbounded,
        }
    }
}

// =============================================================================
// SERIES
// =============================================================================

/// A shared, type-erased term of a series.
pub type Term<E, F> = Arc<dyn MultilinearMap<E, F>>;

type Generator<E, F> = dyn Fn(usize) -> Result<Term<E, F>, SeriesError> + Send + Sync;

/// The zero term of a given degree.
#[must_use]
pub fn zero_term<E, F>(degree: usize) -> Term<E, F>
where
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
{
    Arc::new(ZeroMap::new(degree))
}

struct SeriesInner<E, F>
where
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
{
    generator: Box<Generator<E, F>>,
    support: Support,
    cache: ArcSwap<FastHashMap<usize, Term<E, F>>>,
}

/// A formal multilinear series `Σ pₙ` from `E` to `F`.
///
/// Cloning is cheap and clones share the term cache. Every term is generated
/// at most once per series (concurrent first requests may race, in which case
/// the first stored result wins).
///
/// # Examples
///
/// ```
/// use approx::assert_relative_eq;
/// use multilinear_series::series::formal::{FormalMultilinearSeries, Support};
///
/// // The geometric series Σ zⁿ.
/// let p = FormalMultilinearSeries::<f64, f64>::from_scalar_coefficients(Support::Unbounded, |_| 1.0);
/// let sum = p.evaluate_partial_sum(&0.5, 60).unwrap();
/// assert_relative_eq!(sum, 2.0, epsilon = 1e-12);
/// ```
pub struct FormalMultilinearSeries<E, F>
where
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
{
    inner: Arc<SeriesInner<E, F>>,
}

impl<E, F> Clone for FormalMultilinearSeries<E, F>
where
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E, F> fmt::Debug for FormalMultilinearSeries<E, F>
where
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormalMultilinearSeries")
            .field("support", &self.inner.support)
            .field("cached_degrees", &self.cached_degrees())
            .finish_non_exhaustive()
    }
}

impl<E, F> FormalMultilinearSeries<E, F>
where
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
{
    // =========================================================================
    // CONSTRUCTION
    // =========================================================================

    fn from_fallible<G>(support: Support, generator: G) -> Self
    where
        G: Fn(usize) -> Result<Term<E, F>, SeriesError> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(SeriesInner {
                generator: Box::new(generator),
                support,
                cache: ArcSwap::from_pointee(FastHashMap::default()),
            }),
        }
    }

    /// Creates a series whose `n`-th term is `generator(n)`.
    ///
    /// The generator is only called for degrees inside `support`, at most
    /// once per degree. It must return a map of degree `n`; a mismatch is
    /// reported by [`term`](Self::term).
    pub fn from_generator<G>(support: Support, generator: G) -> Self
    where
        G: Fn(usize) -> Term<E, F> + Send + Sync + 'static,
    {
        Self::from_fallible(support, move |degree| Ok(generator(degree)))
    }

    /// Creates the finite series `terms[0] + terms[1] + …`.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::DegreeMismatch`] if `terms[n]` does not have
    /// degree `n`.
    pub fn from_terms(terms: Vec<Term<E, F>>) -> Result<Self, SeriesError> {
        for (degree, term) in terms.iter().enumerate() {
            if term.degree() != degree {
                return Err(SeriesError::DegreeMismatch {
                    expected: degree,
                    found: term.degree(),
                });
            }
        }
        let Some(last) = terms.len().checked_sub(1) else {
            return Ok(Self::zero());
        };
        Ok(Self::from_generator(Support::UpTo(last), move |degree| {
            terms
                .get(degree)
                .map_or_else(|| zero_term(degree), Arc::clone)
        }))
    }

    /// The zero series.
    #[must_use]
    pub fn zero() -> Self {
        Self::from_generator(Support::UpTo(0), zero_term)
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// The support of the series.
    #[must_use]
    pub fn support(&self) -> Support {
        self.inner.support
    }

    /// The term of degree `degree`, generating and caching it on first use.
    ///
    /// Degrees outside the support yield the zero map without calling the
    /// generator.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::DegreeMismatch`] if the generator produced a map
    /// of the wrong degree, or any error of the generator itself.
    pub fn term(&self, degree: usize) -> Result<Term<E, F>, SeriesError> {
        if !self.inner.support.contains(degree) {
            return Ok(zero_term(degree));
        }
        if let Some(term) = self.inner.cache.load().get(&degree) {
            return Ok(Arc::clone(term));
        }

        let term = (self.inner.generator)(degree)?;
        if term.degree() != degree {
            return Err(SeriesError::DegreeMismatch {
                expected: degree,
                found: term.degree(),
            });
        }
        tracing::trace!(degree, "generated series term");

        let _previous = self.inner.cache.rcu(|cache| {
            let mut updated = (**cache).clone();
            updated.entry(degree).or_insert_with(|| Arc::clone(&term));
            updated
        });
        Ok(self
            .inner
            .cache
            .load()
            .get(&degree)
            .map_or(term, Arc::clone))
    }

    /// The operator norm `‖pₙ‖` of the term of degree `degree`.
    ///
    /// # Errors
    ///
    /// Propagates errors of [`term`](Self::term).
    pub fn term_norm(&self, degree: usize) -> Result<E::Scalar, SeriesError> {
        let term = self.term(degree)?;
        if term.is_zero() {
            Ok(<E::Scalar as Zero>::zero())
        } else {
            Ok(term.op_norm())
        }
    }

    /// Degrees whose terms have been generated so far, in increasing order.
    #[must_use]
    pub fn cached_degrees(&self) -> Vec<usize> {
        let mut degrees: Vec<usize> = self.inner.cache.load().keys().copied().collect();
        degrees.sort_unstable();
        degrees
    }

    /// The smallest degree `n ≤ limit` whose term is not zero, if any.
    ///
    /// # Errors
    ///
    /// Propagates errors of [`term`](Self::term).
    pub fn order(&self, limit: usize) -> Result<Option<usize>, SeriesError> {
        for degree in 0..=limit {
            if !self.inner.support.contains(degree) {
                break;
            }
            if self.term_norm(degree)? > <E::Scalar as Zero>::zero() {
                return Ok(Some(degree));
            }
        }
        Ok(None)
    }

    // =========================================================================
    // EVALUATION
    // =========================================================================

    /// Evaluates `Σ_{n=0}^{max_degree} pₙ(d, …, d)`.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::NonFiniteInput`] if `d` is not finite, or
    /// propagates errors of [`term`](Self::term).
    ///
    /// # Examples
    ///
    /// ```
    /// use multilinear_series::series::formal::{FormalMultilinearSeries, Support};
    ///
    /// // 1 + 2z + 3z²
    /// let p = FormalMultilinearSeries::<f64, f64>::from_scalar_coefficients(
    ///     Support::UpTo(2),
    ///     |n| (n + 1) as f64,
    /// );
    /// assert_eq!(p.evaluate_partial_sum(&2.0, 0).unwrap(), 1.0);
    /// assert_eq!(p.evaluate_partial_sum(&2.0, 1).unwrap(), 5.0);
    /// assert_eq!(p.evaluate_partial_sum(&2.0, 10).unwrap(), 17.0);
    /// ```
    pub fn evaluate_partial_sum(&self, d: &E, max_degree: usize) -> Result<F, SeriesError> {
        d.validate()?;
        let mut sum = F::zero();
        for degree in 0..=max_degree {
            if !self.inner.support.contains(degree) {
                break;
            }
            let term = self.term(degree)?;
            if !term.is_zero() {
                sum = sum.add(&term.apply_diagonal(d));
            }
        }
        Ok(sum)
    }

    /// The sequence of partial sums `S₀(d), S₁(d), …` as an unbounded
    /// iterator.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::NonFiniteInput`] if `d` is not finite.
    pub fn partial_sums(&self, d: &E) -> Result<PartialSums<'_, E, F>, SeriesError> {
        d.validate()?;
        Ok(PartialSums {
            series: self,
            displacement: d.clone(),
            next_degree: 0,
            sum: F::zero(),
            failed: false,
        })
    }

    /// The majorant partial sum `Σ_{n=0}^{max_degree} ‖pₙ‖ tⁿ`.
    ///
    /// Bounded for every `max_degree` when `t` is inside the radius of
    /// convergence.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::InvalidArgument`] if `t` is negative or not
    /// finite, or propagates errors of [`term`](Self::term).
    pub fn majorant_partial_sum(
        &self,
        t: E::Scalar,
        max_degree: usize,
    ) -> Result<E::Scalar, SeriesError> {
        check_non_negative("t", t)?;
        let mut sum = <E::Scalar as Zero>::zero();
        let mut power = <E::Scalar as One>::one();
        for degree in 0..=max_degree {
            if !self.inner.support.contains(degree) {
                break;
            }
            let norm = self.term_norm(degree)?;
            if norm > <E::Scalar as Zero>::zero() {
                sum = sum + norm * power;
            }
            power = power * t;
        }
        Ok(sum)
    }

    /// Whether `‖pₙ‖ rⁿ ≤ c` for every `n ≤ max_degree`.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::InvalidArgument`] if `c` or `r` is negative or
    /// not finite, or propagates errors of [`term`](Self::term).
    pub fn is_bounded_by(
        &self,
        c: E::Scalar,
        r: E::Scalar,
        max_degree: usize,
    ) -> Result<bool, SeriesError> {
        check_non_negative("c", c)?;
        check_non_negative("r", r)?;
        let mut power = <E::Scalar as One>::one();
        for degree in 0..=max_degree {
            if !self.inner.support.contains(degree) {
                break;
            }
            let norm = self.term_norm(degree)?;
            if norm > <E::Scalar as Zero>::zero() && norm * power > c {
                return Ok(false);
            }
            power = power * r;
        }
        Ok(true)
    }

    /// The radius of convergence, with the default [`RadiusConfig`].
    ///
    /// # Errors
    ///
    /// See [`radius_report`].
    pub fn radius(&self) -> Result<Radius<E::Scalar>, SeriesError> {
        self.radius_report(&RadiusConfig::default())
            .map(|report| report.radius)
    }

    /// The radius of convergence together with how it was obtained.
    ///
    /// # Errors
    ///
    /// See [`radius_report`].
    pub fn radius_report(
        &self,
        config: &RadiusConfig<E::Scalar>,
    ) -> Result<RadiusReport<E::Scalar>, SeriesError> {
        radius_report(self, config)
    }

    // =========================================================================
    // ALGEBRA
    // =========================================================================

    /// The termwise sum `Σ (pₙ + qₙ)`.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let (left, right) = (self.clone(), other.clone());
        Self::from_fallible(self.support().union(other.support()), move |degree| {
            let (a, b) = (left.term(degree)?, right.term(degree)?);
            if a.is_zero() {
                return Ok(b);
            }
            if b.is_zero() {
                return Ok(a);
            }
            let sum = SumMap::new(a, b)?;
            if sum.is_zero() {
                return Ok(zero_term(degree));
            }
            let sum: Term<E, F> = Arc::new(sum);
            Ok(sum)
        })
    }

    /// The termwise product with a scalar.
    #[must_use]
    pub fn scale(&self, factor: E::Scalar) -> Self {
        let series = self.clone();
        Self::from_fallible(self.support(), move |degree| {
            let term = series.term(degree)?;
            if factor == <E::Scalar as Zero>::zero() {
                return Ok(zero_term(degree));
            }
            if factor == <E::Scalar as One>::one() || term.is_zero() {
                return Ok(term);
            }
            let scaled: Term<E, F> = Arc::new(ScaledMap::new(term, factor));
            Ok(scaled)
        })
    }

    /// The termwise negation.
    #[must_use]
    pub fn neg(&self) -> Self {
        self.scale(-<E::Scalar as One>::one())
    }

    /// The termwise difference `Σ (pₙ − qₙ)`.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// The series with every term of degree greater than `max_degree`
    /// replaced by zero.
    #[must_use]
    pub fn truncate(&self, max_degree: usize) -> Self {
        let series = self.clone();
        Self::from_fallible(
            self.support().intersect(Support::UpTo(max_degree)),
            move |degree| series.term(degree),
        )
    }

    /// The series with its constant term replaced by zero.
    #[must_use]
    pub fn remove_zero(&self) -> Self {
        let series = self.clone();
        Self::from_fallible(self.support(), move |degree| {
            if degree == 0 {
                Ok(zero_term(0))
            } else {
                series.term(degree)
            }
        })
    }
}

impl<T> FormalMultilinearSeries<T, T>
where
    T: SeriesScalar + NormedSpace<Scalar = T>,
{
    /// The scalar power series `Σ cₙ zⁿ`, with `cₙ = coefficient(n)`.
    pub fn from_scalar_coefficients<C>(support: Support, coefficient: C) -> Self
    where
        C: Fn(usize) -> T + Send + Sync + 'static,
    {
        Self::from_generator(support, move |degree| {
            Arc::new(ScalarMonomial::new(degree, coefficient(degree)))
        })
    }
}

fn check_non_negative<T: SeriesScalar>(name: &'static str, value: T) -> Result<(), SeriesError> {
    if value.is_finite() && value >= T::zero() {
        Ok(())
    } else {
        Err(SeriesError::InvalidArgument {
            name,
            value: format!("{value:?}"),
        })
    }
}

// =============================================================================
// PARTIAL SUMS
// =============================================================================

/// Iterator over the partial sums `S_N(d) = Σ_{n=0}^{N} pₙ(d, …, d)`.
///
/// Created by [`FormalMultilinearSeries::partial_sums`]. After yielding an
/// error it yields nothing further.
pub struct PartialSums<'a, E, F>
where
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
{
    series: &'a FormalMultilinearSeries<E, F>,
    displacement: E,
    next_degree: usize,
    sum: F,
    failed: bool,
}

impl<E, F> Iterator for PartialSums<'_, E, F>
where
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
{
    type Item = Result<F, SeriesError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let degree = self.next_degree;
        self.next_degree = degree.checked_add(1)?;
        match self.series.term(degree) {
            Ok(term) => {
                if !term.is_zero() {
                    self.sum = self.sum.add(&term.apply_diagonal(&self.displacement));
                }
                Some(Ok(self.sum.clone()))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::vector::Vector;
    use approx::assert_relative_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn geometric(c: f64) -> FormalMultilinearSeries<f64, f64> {
        FormalMultilinearSeries::from_scalar_coefficients(Support::Unbounded, move |n| {
            c.powi(i32::try_from(n).unwrap())
        })
    }

    #[test]
    fn terms_are_generated_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let p: FormalMultilinearSeries<f64, f64> =
            FormalMultilinearSeries::from_generator(Support::Unbounded, move |n| {
                counter.fetch_add(1, Ordering::SeqCst);
                Arc::new(ScalarMonomial::new(n, 1.0))
            });

        for _ in 0..3 {
            p.term(4).unwrap();
            p.clone().term(2).unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(p.cached_degrees(), vec![2, 4]);
    }

    #[test]
    fn terms_outside_support_are_zero_and_not_generated() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let p: FormalMultilinearSeries<f64, f64> =
            FormalMultilinearSeries::from_generator(Support::UpTo(1), move |n| {
                counter.fetch_add(1, Ordering::SeqCst);
                Arc::new(ScalarMonomial::new(n, 2.0))
            });
        let far = p.term(7).unwrap();
        assert_eq!(far.degree(), 7);
        assert!(far.is_zero());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn generator_degree_mismatch_is_reported() {
        let p: FormalMultilinearSeries<f64, f64> =
            FormalMultilinearSeries::from_generator(Support::Unbounded, |_| {
                Arc::new(ScalarMonomial::new(1, 1.0))
            });
        assert!(p.term(1).is_ok());
        assert_eq!(
            p.term(3).unwrap_err(),
            SeriesError::DegreeMismatch {
                expected: 3,
                found: 1
            }
        );
    }

    #[test]
    fn from_terms_checks_degrees() {
        let terms: Vec<Term<f64, f64>> = vec![
            Arc::new(ScalarMonomial::new(0, 1.0)),
            Arc::new(ScalarMonomial::new(2, 1.0)),
        ];
        assert_eq!(
            FormalMultilinearSeries::from_terms(terms).unwrap_err(),
            SeriesError::DegreeMismatch {
                expected: 1,
                found: 2
            }
        );
        let empty = FormalMultilinearSeries::<f64, f64>::from_terms(Vec::new()).unwrap();
        assert_eq!(empty.support(), Support::UpTo(0));
        assert!(empty.term(0).unwrap().is_zero());
    }

    #[test]
    fn partial_sums_of_geometric_series() {
        let p = geometric(0.5);
        let sums: Vec<f64> = p
            .partial_sums(&1.0)
            .unwrap()
            .take(4)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(sums, vec![1.0, 1.5, 1.75, 1.875]);
        assert_relative_eq!(p.evaluate_partial_sum(&1.0, 60).unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn evaluation_rejects_non_finite_displacement() {
        let p = geometric(0.5);
        assert!(matches!(
            p.evaluate_partial_sum(&f64::NAN, 3),
            Err(SeriesError::NonFiniteInput(_))
        ));
        assert!(p.partial_sums(&f64::INFINITY).is_err());
    }

    #[test]
    fn algebra_is_termwise() {
        let p = geometric(2.0);
        let q = geometric(3.0);
        let sum = p.add(&q);
        let diff = q.sub(&p);
        for n in 0..6 {
            let expected = 2.0_f64.powi(n) + 3.0_f64.powi(n);
            let degree = usize::try_from(n).unwrap();
            assert_relative_eq!(sum.term(degree).unwrap().apply_diagonal(&1.0), expected);
            assert_relative_eq!(
                diff.term(degree).unwrap().apply_diagonal(&1.0),
                3.0_f64.powi(n) - 2.0_f64.powi(n)
            );
        }
        assert!(p.sub(&p).term(3).unwrap().is_zero());
        assert_relative_eq!(sum.term_norm(3).unwrap(), 35.0);
        assert_relative_eq!(p.scale(-0.5).term_norm(3).unwrap(), 4.0);
        assert!(p.scale(0.0).term(3).unwrap().is_zero());
        assert_relative_eq!(p.neg().term(2).unwrap().apply_diagonal(&1.0), -4.0);
    }

    #[test]
    fn difference_with_itself_has_infinite_radius() {
        let p = geometric(2.0);
        let zero = p.sub(&p);
        assert_relative_eq!(zero.term_norm(3).unwrap(), 0.0);
        assert_eq!(zero.evaluate_partial_sum(&5.0, 10).unwrap(), 0.0);
        assert_eq!(zero.radius().unwrap(), Radius::Infinite);
        assert_eq!(zero.order(20).unwrap(), None);
    }

    #[test]
    fn truncation_and_constant_removal() {
        let p = geometric(2.0);
        let t = p.truncate(3);
        assert_eq!(t.support(), Support::UpTo(3));
        assert_relative_eq!(t.term_norm(3).unwrap(), 8.0);
        assert_relative_eq!(t.term_norm(4).unwrap(), 0.0);

        let r = p.remove_zero();
        assert!(r.term(0).unwrap().is_zero());
        assert_relative_eq!(r.term_norm(1).unwrap(), 2.0);
        assert_eq!(r.order(10).unwrap(), Some(1));
        assert_eq!(FormalMultilinearSeries::<f64, f64>::zero().order(10).unwrap(), None);
    }

    #[test]
    fn majorant_sums_and_bounds() {
        let p = geometric(2.0);
        // Σ 2ⁿ (1/4)ⁿ = Σ 2⁻ⁿ → 2
        assert_relative_eq!(p.majorant_partial_sum(0.25, 80).unwrap(), 2.0, epsilon = 1e-12);
        assert!(p.is_bounded_by(1.0, 0.5, 200).unwrap());
        assert!(!p.is_bounded_by(1.0, 0.6, 200).unwrap());
        assert!(matches!(
            p.majorant_partial_sum(-1.0, 3),
            Err(SeriesError::InvalidArgument { name: "t", .. })
        ));
    }

    #[test]
    fn vector_valued_terms() {
        let v: Term<f64, Vector<f64, 2>> =
            Arc::new(crate::maps::multilinear::ConstantMap::new(Vector::new([1.0, -1.0])));
        let p = FormalMultilinearSeries::from_terms(vec![v]).unwrap();
        assert_eq!(p.evaluate_partial_sum(&3.0, 5).unwrap(), Vector::new([1.0, -1.0]));
        assert_relative_eq!(p.term_norm(0).unwrap(), 2.0_f64.sqrt());
    }
}
