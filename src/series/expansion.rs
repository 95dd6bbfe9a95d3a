//! Local power-series expansions of functions.
//!
//! A [`LocalExpansion`] bundles a base point `x`, a series `p` and its radius
//! `r`, asserting that `f(x + d) = Σ pₙ(d, …, d)` for `‖d‖ < r`. The
//! expansions built here come from the linear and bilinear builders, for
//! which the assertion holds exactly with `r = ∞`.

use crate::maps::traits::{BilinearMap, LinearMap};
use crate::series::bilinear::build_bilinear_series;
use crate::series::extended::Radius;
use crate::series::formal::{FormalMultilinearSeries, SeriesError};
use crate::series::linear::build_linear_series;
use crate::space::product::Product;
use crate::space::traits::normed_space::NormedSpace;

/// A series expansion of a function around a base point.
#[derive(Clone, Debug)]
pub struct LocalExpansion<E, F>
where
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
{
    base: E,
    series: FormalMultilinearSeries<E, F>,
    radius: Radius<E::Scalar>,
}

impl<E, F> LocalExpansion<E, F>
where
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
{
    /// Bundles `series` with its base point, computing its radius.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::NonFiniteInput`] for a non-finite base point
    /// and propagates errors of the radius computation.
    pub fn new(base: E, series: FormalMultilinearSeries<E, F>) -> Result<Self, SeriesError> {
        base.validate()?;
        let radius = series.radius()?;
        Ok(Self {
            base,
            series,
            radius,
        })
    }

    /// The base point.
    pub const fn base(&self) -> &E {
        &self.base
    }

    /// The series.
    pub const fn series(&self) -> &FormalMultilinearSeries<E, F> {
        &self.series
    }

    /// The radius of convergence.
    pub const fn radius(&self) -> Radius<E::Scalar> {
        self.radius
    }

    /// Whether `‖d‖ < r`.
    pub fn contains(&self, d: &E) -> bool {
        self.radius.exceeds(d.norm())
    }

    /// The partial sum of degree `max_degree` at displacement `d`.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::OutsideRadius`] unless `‖d‖ < r`, plus the
    /// errors of [`FormalMultilinearSeries::evaluate_partial_sum`].
    pub fn evaluate(&self, d: &E, max_degree: usize) -> Result<F, SeriesError> {
        d.validate()?;
        if !self.contains(d) {
            return Err(SeriesError::OutsideRadius {
                norm: d.norm().to_string(),
                radius: self.radius.to_string(),
            });
        }
        self.series.evaluate_partial_sum(d, max_degree)
    }

    /// `‖f(x + d) − S_N(d)‖` for the function `f` this expansion represents.
    ///
    /// # Errors
    ///
    /// See [`evaluate`](Self::evaluate).
    pub fn approximation_error<Fun>(
        &self,
        f: Fun,
        d: &E,
        max_degree: usize,
    ) -> Result<E::Scalar, SeriesError>
    where
        Fun: Fn(&E) -> F,
    {
        let approximation = self.evaluate(d, max_degree)?;
        let exact = f(&self.base.add(d));
        Ok(exact.distance(&approximation))
    }
}

/// The expansion of the linear map `f` around `x`.
///
/// # Errors
///
/// See [`build_linear_series`].
pub fn linear_expansion<L, E, F>(f: L, x: E) -> Result<LocalExpansion<E, F>, SeriesError>
where
    L: LinearMap<E, F> + 'static,
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
{
    let series = build_linear_series(f, &x)?;
    LocalExpansion::new(x, series)
}

/// The expansion of the bilinear map `f` around `point`.
///
/// # Errors
///
/// See [`build_bilinear_series`].
///
/// # Examples
///
/// ```
/// use multilinear_series::maps::bilinear::ScalarProduct;
/// use multilinear_series::series::expansion::bilinear_expansion;
/// use multilinear_series::space::product::Product;
///
/// let e = bilinear_expansion(ScalarProduct::new(1.0_f64), Product::new(1.0, 1.0)).unwrap();
/// let d = Product::new(0.5, -2.0);
/// let err = e.approximation_error(|p: &Product<f64, f64>| p.fst * p.snd, &d, 2).unwrap();
/// assert_eq!(err, 0.0);
/// // Truncating after the linear term leaves the cross term 0.5 · (−2).
/// assert_eq!(e.approximation_error(|p: &Product<f64, f64>| p.fst * p.snd, &d, 1).unwrap(), 1.0);
/// ```
pub fn bilinear_expansion<B, E, F, G>(
    f: B,
    point: Product<E, F>,
) -> Result<LocalExpansion<Product<E, F>, G>, SeriesError>
where
    B: BilinearMap<E, F, G> + 'static,
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
    G: NormedSpace<Scalar = E::Scalar>,
{
    let series = build_bilinear_series(f, &point)?;
    LocalExpansion::new(point, series)
}
