//! Integration tests for the radius of convergence.
//!
//! Covers exact radii of finitely supported series, windowed estimates for
//! geometric and factorial norm growth, and the majorant guarantee inside and
//! outside the radius.

use approx::assert_relative_eq;
use multilinear_series::prelude::*;
use proptest::prelude::*;
use std::sync::Arc;

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

// =============================================================================
// TEST HELPERS
// =============================================================================

/// `Σ cⁿ zⁿ`, whose radius is `1 / c`.
fn geometric(c: f64) -> FormalMultilinearSeries<f64, f64> {
    FormalMultilinearSeries::from_scalar_coefficients(Support::Unbounded, move |n| {
        c.powi(i32::try_from(n).unwrap_or(i32::MAX))
    })
}

/// `Σ n! zⁿ`, whose radius is 0.
fn factorial_series() -> FormalMultilinearSeries<f64, f64> {
    FormalMultilinearSeries::from_scalar_coefficients(Support::Unbounded, |n| {
        (1..=n).map(|k| k as f64).product::<f64>()
    })
}

/// A term reporting a NaN operator norm.
#[derive(Debug)]
struct BrokenNorm(usize);

impl MultilinearMap<f64, f64> for BrokenNorm {
    fn degree(&self) -> usize {
        self.0
    }

    fn eval(&self, _args: &[f64]) -> f64 {
        0.0
    }

    fn op_norm(&self) -> f64 {
        f64::NAN
    }
}

// =============================================================================
// FINITE SUPPORT
// =============================================================================

proptest! {
    /// Property: a series with nonzero terms only up to degree k has radius ∞.
    #[test]
    fn prop_finite_support_radius_is_infinite(
        coefficients in prop::collection::vec(1.0..1e6_f64, 1..12),
    ) {
        init_tracing();
        let terms: Vec<Term<f64, f64>> = coefficients
            .iter()
            .enumerate()
            .map(|(n, &c)| Arc::new(ScalarMonomial::new(n, c)) as Term<f64, f64>)
            .collect();
        let p = FormalMultilinearSeries::from_terms(terms).unwrap();

        let report = p.radius_report(&RadiusConfig::default()).unwrap();
        prop_assert_eq!(report.radius, ExtendedNonNeg::Infinite);
        prop_assert!(report.exact);
        prop_assert!(report.converged);
    }

    /// Property: truncating any series yields radius ∞.
    #[test]
    fn prop_truncation_has_infinite_radius(c in 0.1..50.0_f64, k in 0_usize..40) {
        init_tracing();
        let p = geometric(c).truncate(k);
        prop_assert_eq!(p.radius().unwrap(), ExtendedNonNeg::Infinite);
        prop_assert!(p.term(k + 1).unwrap().is_zero());
    }

    /// Property: the radius of Σ cⁿ zⁿ is 1/c.
    #[test]
    fn prop_geometric_radius(c in 0.05..20.0_f64) {
        init_tracing();
        let report = geometric(c).radius_report(&RadiusConfig::default()).unwrap();
        prop_assert!(report.converged);
        prop_assert!(!report.exact);
        let r = report.radius.finite().unwrap();
        prop_assert!(approx::relative_eq!(r, 1.0 / c, max_relative = 1e-9));
    }

    /// Property: every partial sum of the zero series is zero.
    #[test]
    fn prop_zero_series_evaluates_to_zero(
        d in (-1e6..1e6_f64).prop_filter("must be finite", |x: &f64| x.is_finite()),
        max_degree in 0_usize..40,
    ) {
        init_tracing();
        let p: FormalMultilinearSeries<f64, f64> =
            FormalMultilinearSeries::from_generator(Support::Unbounded, zero_term);
        prop_assert_eq!(p.evaluate_partial_sum(&d, max_degree).unwrap(), 0.0);
    }
}

#[test]
fn generator_with_finite_support_is_exact() {
    init_tracing();
    // The generator would produce nonzero terms forever; the support cuts it.
    let p = FormalMultilinearSeries::<f64, f64>::from_scalar_coefficients(Support::UpTo(5), |n| {
        10.0_f64.powi(i32::try_from(n).unwrap_or(i32::MAX))
    });
    let report = p.radius_report(&RadiusConfig::default()).unwrap();
    assert_eq!(report.radius, ExtendedNonNeg::Infinite);
    assert!(report.exact);
    assert_eq!(report.degrees_examined, 0);
    assert!(p.term(6).unwrap().is_zero());
}

#[test]
fn unbounded_zero_series_has_infinite_radius() {
    init_tracing();
    let p: FormalMultilinearSeries<Vector<f64, 3>, f64> =
        FormalMultilinearSeries::from_generator(Support::Unbounded, zero_term);
    let report = p.radius_report(&RadiusConfig::default()).unwrap();
    assert_eq!(report.radius, ExtendedNonNeg::Infinite);
    assert!(!report.exact);
    // Zero norms up to max_degree do not certify the tail.
    assert!(!report.converged);
    assert_eq!(report.degrees_examined, 256);

    let zero_support = FormalMultilinearSeries::<f64, f64>::zero();
    assert_eq!(zero_support.radius().unwrap(), ExtendedNonNeg::Infinite);
}

// =============================================================================
// UNBOUNDED SUPPORT
// =============================================================================

#[test]
fn geometric_radii() {
    init_tracing();
    for c in [0.5, 1.0, 2.0, 3.0, 7.5] {
        let r = geometric(c).radius().unwrap().finite().unwrap();
        assert_relative_eq!(r, 1.0 / c, max_relative = 1e-9);
    }
}

#[test]
fn late_nonzero_terms_are_found() {
    init_tracing();
    // Σ_{n ≥ 40} zⁿ has radius 1; the first 39 terms are zero.
    let p = FormalMultilinearSeries::<f64, f64>::from_scalar_coefficients(Support::Unbounded, |n| {
        if n >= 40 { 1.0 } else { 0.0 }
    });
    assert_eq!(p.order(100).unwrap(), Some(40));

    let report = p.radius_report(&RadiusConfig::default()).unwrap();
    assert!(report.converged);
    assert!(!report.exact);
    assert_eq!(report.radius, ExtendedNonNeg::Finite(1.0));
    assert_eq!(report.degrees_examined, 64);

    // Outside the radius the majorant blows up; inside it stays bounded.
    assert!(!report.radius.exceeds(2.0));
    assert!(p.majorant_partial_sum(2.0, 200).unwrap() > 1e50);
    assert!(p.is_bounded_by(1.0, 0.5, 200).unwrap());
}

#[test]
fn late_terms_past_the_scan_are_not_certified() {
    init_tracing();
    let p = FormalMultilinearSeries::<f64, f64>::from_scalar_coefficients(Support::Unbounded, |n| {
        if n > 100 { 3.0_f64.powi(i32::try_from(n).unwrap_or(i32::MAX)) } else { 0.0 }
    });
    let config = RadiusConfigBuilder::default()
        .max_degree(64)
        .window(8)
        .build()
        .unwrap();
    let report = p.radius_report(&config).unwrap();
    assert_eq!(report.radius, ExtendedNonNeg::Infinite);
    assert!(!report.converged);
    assert!(!report.exact);
}

#[test]
fn factorial_growth_has_zero_radius() {
    init_tracing();
    let report = factorial_series()
        .radius_report(&RadiusConfig::default())
        .unwrap();
    assert!(report.radius.is_zero());
    assert!(report.converged);
}

#[test]
fn infinite_norms_have_zero_radius() {
    init_tracing();
    let p = FormalMultilinearSeries::<f64, f64>::from_scalar_coefficients(Support::Unbounded, |n| {
        if n == 0 { 1.0 } else { f64::INFINITY }
    });
    assert_eq!(p.radius().unwrap(), ExtendedNonNeg::Finite(0.0));
}

#[test]
fn inverse_factorial_scan_reports_non_convergence() {
    init_tracing();
    // Σ zⁿ / n! has radius ∞, approached only slowly by the root test.
    let p = FormalMultilinearSeries::<f64, f64>::from_scalar_coefficients(Support::Unbounded, |n| {
        1.0 / (1..=n).map(|k| k as f64).product::<f64>()
    });
    let config = RadiusConfigBuilder::default()
        .max_degree(32)
        .window(8)
        .build()
        .unwrap();
    let report = p.radius_report(&config).unwrap();
    assert!(!report.converged);
    assert!(!report.exact);
    assert_eq!(report.degrees_examined, 32);
    // The last window infimum (n!)^{1/n} at n = 25 is still finite.
    assert!(report.radius.is_finite());
    assert!(report.radius.finite().unwrap() > 5.0);
}

#[test]
fn interleaved_zero_terms_do_not_hide_growth() {
    init_tracing();
    // Only even degrees are nonzero, with norm 4ⁿ.
    let p = FormalMultilinearSeries::<f64, f64>::from_scalar_coefficients(Support::Unbounded, |n| {
        if n % 2 == 0 {
            4.0_f64.powi(i32::try_from(n).unwrap_or(i32::MAX))
        } else {
            0.0
        }
    });
    let r = p.radius().unwrap().finite().unwrap();
    assert_relative_eq!(r, 0.25, max_relative = 1e-9);
}

#[test]
fn radius_of_sum_is_the_smaller_radius() {
    init_tracing();
    let p = geometric(2.0).add(&geometric(5.0));
    let r = p.radius().unwrap().finite().unwrap();
    assert_relative_eq!(r, 0.2, max_relative = 1e-6);
}

#[test]
fn scaling_preserves_the_radius() {
    init_tracing();
    let r = geometric(3.0).scale(1e-3).radius().unwrap().finite().unwrap();
    // The factor enters as (10⁻³)^{1/n}, which fades with n but not fully
    // within the default scan.
    assert_relative_eq!(r, 1.0 / 3.0, max_relative = 1e-1);
    assert_eq!(geometric(3.0).scale(0.0).radius().unwrap(), ExtendedNonNeg::Infinite);
}

#[test]
fn single_precision_radius() {
    init_tracing();
    let p = FormalMultilinearSeries::<f32, f32>::from_scalar_coefficients(Support::Unbounded, |n| {
        2.0_f32.powi(i32::try_from(n).unwrap_or(i32::MAX))
    });
    let r = p.radius().unwrap().finite().unwrap();
    assert_relative_eq!(r, 0.5_f32, max_relative = 1e-4);
}

// =============================================================================
// MAJORANT GUARANTEE
// =============================================================================

#[test]
fn majorant_is_bounded_inside_the_radius() {
    init_tracing();
    // r = 1/2
    let p = geometric(2.0);
    let r = p.radius().unwrap();
    assert!(r.exceeds(0.4));

    // Σ 0.8ⁿ = 5
    let sum = p.majorant_partial_sum(0.4, 200).unwrap();
    assert_relative_eq!(sum, 5.0, max_relative = 1e-9);
    assert!(p.is_bounded_by(1.0, 0.4, 200).unwrap());
}

#[test]
fn majorant_is_unbounded_outside_the_radius() {
    init_tracing();
    let p = geometric(2.0);
    assert!(!p.radius().unwrap().exceeds(0.6));

    // Σ 1.2ⁿ grows without bound.
    assert!(p.majorant_partial_sum(0.6, 200).unwrap() > 1e10);
    assert!(!p.is_bounded_by(1e6, 0.6, 200).unwrap());
}

#[test]
fn partial_sums_converge_inside_the_radius() {
    init_tracing();
    // Σ (z/2)ⁿ = 2 / (2 − z)
    let p = geometric(0.5);
    let z = 1.0;
    let last = p
        .partial_sums(&z)
        .unwrap()
        .take(80)
        .last()
        .unwrap()
        .unwrap();
    assert_relative_eq!(last, 2.0, epsilon = 1e-12);
}

// =============================================================================
// ERROR HANDLING
// =============================================================================

#[test]
fn nan_term_norm_is_reported() {
    init_tracing();
    let p: FormalMultilinearSeries<f64, f64> =
        FormalMultilinearSeries::from_generator(Support::Unbounded, |n| {
            if n == 3 {
                Arc::new(BrokenNorm(n)) as Term<f64, f64>
            } else {
                zero_term(n)
            }
        });
    assert!(matches!(
        p.radius(),
        Err(SeriesError::InvalidNorm { degree: 3, .. })
    ));
}

#[test]
fn mismatched_generator_degree_is_reported() {
    init_tracing();
    let p: FormalMultilinearSeries<f64, f64> =
        FormalMultilinearSeries::from_generator(Support::Unbounded, |_| zero_term(1));
    assert!(matches!(
        p.radius(),
        Err(SeriesError::DegreeMismatch { expected: 2, found: 1 })
    ));
}

#[test]
fn invalid_configurations_are_rejected() {
    init_tracing();
    assert!(RadiusConfigBuilder::<f64>::default().window(0).build().is_err());
    assert!(
        RadiusConfigBuilder::<f64>::default()
            .stable_windows(0)
            .build()
            .is_err()
    );
    assert!(
        RadiusConfigBuilder::<f64>::default()
            .tolerance(-1.0)
            .build()
            .is_err()
    );
    assert!(
        RadiusConfigBuilder::<f64>::default()
            .max_degree(4)
            .window(8)
            .build()
            .is_err()
    );

    let config = RadiusConfig {
        tolerance: f64::NAN,
        ..RadiusConfig::default()
    };
    assert!(matches!(
        geometric(2.0).radius_report(&config),
        Err(SeriesError::InvalidConfig { .. })
    ));
}

#[test]
fn majorant_rejects_invalid_arguments() {
    init_tracing();
    let p = geometric(2.0);
    assert!(matches!(
        p.majorant_partial_sum(-1.0, 5),
        Err(SeriesError::InvalidArgument { name: "t", .. })
    ));
    assert!(matches!(
        p.is_bounded_by(1.0, f64::INFINITY, 5),
        Err(SeriesError::InvalidArgument { name: "r", .. })
    ));
}
