//! Radius of convergence of a formal multilinear series.
//!
//! The radius is
//!
//! ```text
//! r(p) = liminf_{n → ∞} 1 / ‖pₙ‖^{1/n}
//! ```
//!
//! taken over `n ≥ 1`, with `1/0 = ∞` and `1/∞ = 0` applied to each term
//! before the liminf. Degree 0 has no root and imposes no constraint.
//!
//! # Exact and approximate radii
//!
//! When the series has finite support (every term past degree `k` is zero),
//! the tail of the root-test sequence is constantly `∞`, so the radius is `∞`
//! exactly. [`radius_report`] derives this from the root-test value of a zero
//! norm at degree `k + 1` and marks the result as exact.
//!
//! Otherwise the liminf is approximated by scanning degrees in windows of
//! [`RadiusConfig::window`] terms. The infimum over each window estimates the
//! tail infimum; the scan stops once [`RadiusConfig::stable_windows`]
//! consecutive window infima agree to within
//! `tolerance · max(1, r)`, and reports the last window infimum. If
//! [`RadiusConfig::max_degree`] is reached first, the last window infimum is
//! reported with `converged = false`.
//!
//! Windows whose infimum is `∞` (every norm in them is zero) never settle the
//! scan, since a series may start late. An unbounded series whose scanned
//! norms are all zero is reported as `∞` with `converged = false`; only a
//! finite [`Support`](crate::series::formal::Support) makes `∞` exact.
//!
//! Norms of sums are exact for scalar power series. For other sums the
//! triangle bound `‖A‖ + ‖B‖` is used, which can only lower the radius.
//!
//! For a converged estimate `r̂` of a sequence whose tail is monotone from the
//! examined window on, `|r̂ − r| ≤ tolerance · max(1, r̂)`. Sequences whose
//! infimum is only attained far past `max_degree` (sparse spikes in the norms)
//! can defeat any finite scan.

use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::series::extended::{ExtendedNonNeg, Radius};
use crate::series::formal::{FormalMultilinearSeries, SeriesError};
use crate::space::conversions::safe_usize_to_scalar;
use crate::space::traits::normed_space::NormedSpace;
use crate::space::traits::scalar::SeriesScalar;

/// Default number of degrees scanned before giving up.
pub const DEFAULT_MAX_DEGREE: usize = 256;

/// Default number of degrees per window.
pub const DEFAULT_WINDOW: usize = 16;

/// Default number of consecutive agreeing windows required to stop.
pub const DEFAULT_STABLE_WINDOWS: usize = 2;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Configuration of the windowed liminf scan.
///
/// # Examples
///
/// ```
/// use multilinear_series::series::radius::{RadiusConfig, RadiusConfigBuilder};
///
/// let config: RadiusConfig<f64> = RadiusConfigBuilder::default()
///     .max_degree(64)
///     .window(8)
///     .build()
///     .unwrap();
/// assert_eq!(config.stable_windows, 2);
/// assert_eq!(config.tolerance, 1e-9);
///
/// assert!(RadiusConfigBuilder::<f64>::default().window(0).build().is_err());
/// ```
#[derive(Builder, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[builder(build_fn(validate = "Self::validate"))]
#[serde(bound(serialize = "", deserialize = ""))]
pub struct RadiusConfig<T: SeriesScalar> {
    /// Largest degree examined.
    #[builder(default = "DEFAULT_MAX_DEGREE")]
    pub max_degree: usize,
    /// Degrees per window.
    #[builder(default = "DEFAULT_WINDOW")]
    pub window: usize,
    /// Consecutive agreeing windows required to stop.
    #[builder(default = "DEFAULT_STABLE_WINDOWS")]
    pub stable_windows: usize,
    /// Relative agreement tolerance between window infima.
    #[builder(default = "T::default_radius_tolerance()")]
    pub tolerance: T,
}

fn check_config<T: SeriesScalar>(
    max_degree: usize,
    window: usize,
    stable_windows: usize,
    tolerance: T,
) -> Result<(), String> {
    if window == 0 {
        return Err("window must contain at least one degree".to_string());
    }
    if stable_windows == 0 {
        return Err("stable_windows must be at least 1".to_string());
    }
    if max_degree < window {
        return Err(format!(
            "max_degree {max_degree} is smaller than one window of {window} degrees"
        ));
    }
    if !(tolerance.is_finite() && tolerance > T::zero()) {
        return Err(format!("tolerance must be positive and finite, got {tolerance:?}"));
    }
    Ok(())
}

impl<T: SeriesScalar> RadiusConfigBuilder<T> {
    fn validate(&self) -> Result<(), String> {
        check_config(
            self.max_degree.unwrap_or(DEFAULT_MAX_DEGREE),
            self.window.unwrap_or(DEFAULT_WINDOW),
            self.stable_windows.unwrap_or(DEFAULT_STABLE_WINDOWS),
            self.tolerance.unwrap_or_else(T::default_radius_tolerance),
        )
    }
}

impl<T: SeriesScalar> RadiusConfig<T> {
    /// Checks a configuration built without the builder.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::InvalidConfig`] if the window or the number of
    /// stable windows is zero, if `max_degree` is smaller than one window,
    /// or if the tolerance is not positive and finite.
    pub fn validate(&self) -> Result<(), SeriesError> {
        check_config(
            self.max_degree,
            self.window,
            self.stable_windows,
            self.tolerance,
        )
        .map_err(|reason| SeriesError::InvalidConfig { reason })
    }
}

impl<T: SeriesScalar> Default for RadiusConfig<T> {
    fn default() -> Self {
        Self {
            max_degree: DEFAULT_MAX_DEGREE,
            window: DEFAULT_WINDOW,
            stable_windows: DEFAULT_STABLE_WINDOWS,
            tolerance: T::default_radius_tolerance(),
        }
    }
}

impl From<RadiusConfigBuilderError> for SeriesError {
    fn from(err: RadiusConfigBuilderError) -> Self {
        Self::InvalidConfig {
            reason: err.to_string(),
        }
    }
}

// =============================================================================
// RESULTS
// =============================================================================

/// A radius together with how it was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: SeriesScalar"))]
pub struct RadiusReport<T> {
    /// The radius of convergence.
    pub radius: Radius<T>,
    /// Whether the radius is exact (finite support) rather than estimated.
    pub exact: bool,
    /// Whether the windowed scan settled before `max_degree`. Always `true`
    /// for exact radii.
    pub converged: bool,
    /// Number of degrees whose norms were examined.
    pub degrees_examined: usize,
}

/// Result of [`windowed_liminf`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: SeriesScalar"))]
pub struct LiminfEstimate<T> {
    /// The last window infimum.
    pub value: ExtendedNonNeg<T>,
    /// Whether consecutive window infima settled.
    pub converged: bool,
    /// Number of sequence entries examined.
    pub terms_examined: usize,
}

// =============================================================================
// ROOT TEST
// =============================================================================

/// The root-test value `1 / norm^{1/degree}` of a single term.
///
/// `norm = 0` gives `∞` and `norm = ∞` gives `0`, without relying on
/// floating-point division semantics.
///
/// # Errors
///
/// Returns [`SeriesError::ZeroDegreeRoot`] for `degree = 0`,
/// [`SeriesError::InvalidNorm`] for a NaN or negative norm, and
/// [`SeriesError::Conversion`] if `degree` is not exactly representable.
///
/// # Examples
///
/// ```
/// use multilinear_series::series::extended::ExtendedNonNeg;
/// use multilinear_series::series::radius::root_test_value;
///
/// assert_eq!(root_test_value(4.0_f64, 2).unwrap(), ExtendedNonNeg::Finite(0.5));
/// assert_eq!(root_test_value(0.0_f64, 3).unwrap(), ExtendedNonNeg::Infinite);
/// assert_eq!(root_test_value(f64::INFINITY, 3).unwrap(), ExtendedNonNeg::Finite(0.0));
/// assert!(root_test_value(1.0_f64, 0).is_err());
/// ```
pub fn root_test_value<T: SeriesScalar>(
    norm: T,
    degree: usize,
) -> Result<ExtendedNonNeg<T>, SeriesError> {
    if degree == 0 {
        return Err(SeriesError::ZeroDegreeRoot);
    }
    if norm.is_nan() || norm < T::zero() {
        return Err(SeriesError::InvalidNorm {
            degree,
            value: format!("{norm:?}"),
        });
    }
    if norm == T::zero() {
        return Ok(ExtendedNonNeg::Infinite);
    }
    if norm.is_infinite() {
        return Ok(ExtendedNonNeg::zero());
    }
    let n: T = safe_usize_to_scalar(degree)?;
    Ok(ExtendedNonNeg::Finite(norm.powf(n.recip())).recip())
}

/// Whether two consecutive window infima agree.
///
/// Infinite infima never agree: a run of zero norms says nothing about the
/// terms after it.
fn settled<T: SeriesScalar>(a: ExtendedNonNeg<T>, b: ExtendedNonNeg<T>, tolerance: T) -> bool {
    match (a, b) {
        (ExtendedNonNeg::Finite(x), ExtendedNonNeg::Finite(y)) => {
            let scale = T::one().max(x.max(y));
            (x - y).abs() <= tolerance * scale
        }
        _ => false,
    }
}

/// Approximates `liminf_{n → ∞} a(n)` of a sequence in `[0, ∞]` indexed from
/// `n = 1`, by scanning windows as described in the module documentation.
///
/// # Errors
///
/// Returns [`SeriesError::InvalidConfig`] for an invalid configuration and
/// propagates the first error of `sequence`.
pub fn windowed_liminf<T, S>(
    mut sequence: S,
    config: &RadiusConfig<T>,
) -> Result<LiminfEstimate<T>, SeriesError>
where
    T: SeriesScalar,
    S: FnMut(usize) -> Result<ExtendedNonNeg<T>, SeriesError>,
{
    config.validate()?;

    let mut previous: Option<ExtendedNonNeg<T>> = None;
    let mut agreeing = 0_usize;
    let mut last = ExtendedNonNeg::Infinite;
    let mut start = 1_usize;

    while start <= config.max_degree {
        let end = start
            .saturating_add(config.window - 1)
            .min(config.max_degree);
        let mut window_inf = ExtendedNonNeg::Infinite;
        for n in start..=end {
            window_inf = window_inf.min(sequence(n)?);
        }
        tracing::debug!(start, end, window_inf = %window_inf, "root-test window");

        agreeing = match previous {
            Some(prev) if settled(prev, window_inf, config.tolerance) => agreeing + 1,
            _ => 1,
        };
        previous = Some(window_inf);
        last = window_inf;

        if agreeing >= config.stable_windows {
            return Ok(LiminfEstimate {
                value: last,
                converged: true,
                terms_examined: end,
            });
        }
        start = end + 1;
    }

    tracing::warn!(
        max_degree = config.max_degree,
        estimate = %last,
        "liminf scan did not settle; reporting the last window infimum"
    );
    Ok(LiminfEstimate {
        value: last,
        converged: false,
        terms_examined: config.max_degree,
    })
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// The radius of convergence of `series` and how it was obtained.
///
/// # Errors
///
/// Returns [`SeriesError::InvalidConfig`] for an invalid configuration,
/// [`SeriesError::InvalidNorm`] if a term reports a NaN or negative norm, or
/// propagates errors of [`FormalMultilinearSeries::term`].
///
/// # Examples
///
/// ```
/// use approx::assert_relative_eq;
/// use multilinear_series::series::formal::{FormalMultilinearSeries, Support};
/// use multilinear_series::series::radius::{RadiusConfig, radius_report};
///
/// // ‖pₙ‖ = 3ⁿ
/// let p = FormalMultilinearSeries::<f64, f64>::from_scalar_coefficients(
///     Support::Unbounded,
///     |n| 3.0_f64.powi(n as i32),
/// );
/// let report = radius_report(&p, &RadiusConfig::default()).unwrap();
/// assert!(report.converged && !report.exact);
/// assert_relative_eq!(report.radius.finite().unwrap(), 1.0 / 3.0, max_relative = 1e-9);
/// ```
pub fn radius_report<E, F>(
    series: &FormalMultilinearSeries<E, F>,
    config: &RadiusConfig<E::Scalar>,
) -> Result<RadiusReport<E::Scalar>, SeriesError>
where
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
{
    config.validate()?;

    if let Some(last) = series.support().last_degree() {
        // Every degree past `last` has a zero norm; the tail is constant.
        let radius = root_test_value(<E::Scalar as Zero>::zero(), last.saturating_add(1))?;
        tracing::debug!(last_degree = last, radius = %radius, "finite support radius");
        return Ok(RadiusReport {
            radius,
            exact: true,
            converged: true,
            degrees_examined: 0,
        });
    }

    let estimate = windowed_liminf(
        |degree| root_test_value(series.term_norm(degree)?, degree),
        config,
    )?;
    Ok(RadiusReport {
        radius: estimate.value,
        exact: false,
        converged: estimate.converged,
        degrees_examined: estimate.terms_examined,
    })
}

/// The radius of convergence of `series`, with the default configuration.
///
/// # Errors
///
/// See [`radius_report`].
pub fn radius<E, F>(series: &FormalMultilinearSeries<E, F>) -> Result<Radius<E::Scalar>, SeriesError>
where
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
{
    radius_report(series, &RadiusConfig::default()).map(|report| report.radius)
}
