//! Scalar field traits for normed spaces and series coefficients.
//!
//! The scalar field of every space in this crate is a floating-point type. The
//! traits here collect the bounds such a type must satisfy:
//!
//! - **`SeriesScalar`**: trait alias consolidating all scalar requirements,
//!   with per-type comparison and radius tolerances
//! - **`FiniteCheck`**: validation of scalar values (no NaN or infinity)
//! - **`OrderedEq`**: NaN-aware equality that treats NaN values as equal to themselves
//! - **`HashScalar`**: hashing consistent with `OrderedEq`
//!
//! Floating-point fields are non-discrete: arbitrarily small non-zero values
//! exist, so a ball of positive radius is always a non-trivial neighborhood.
//!
//! # Examples
//!
//! ```rust
//! use multilinear_series::space::traits::scalar::{FiniteCheck, SeriesScalar};
//!
//! assert!(2.5_f64.is_finite_generic());
//! assert!(!f64::NAN.is_finite_generic());
//! assert!(f64::default_radius_tolerance() < f32::default_radius_tolerance().into());
//! ```

use num_traits::Float;
use ordered_float::OrderedFloat;
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::{Debug, Display};
use std::hash::{Hash, Hasher};

/// Default tolerance for f32 floating-point comparisons.
pub const DEFAULT_TOLERANCE_F32: f32 = 1e-6;

/// Default tolerance for f64 floating-point comparisons.
pub const DEFAULT_TOLERANCE_F64: f64 = 1e-15;

/// Default relative tolerance used to decide that the windowed liminf
/// estimate has settled, for f32.
pub const DEFAULT_RADIUS_TOLERANCE_F32: f32 = 1e-4;

/// Default relative tolerance used to decide that the windowed liminf
/// estimate has settled, for f64.
///
/// The n-th root `(cⁿ)^{1/n}` of a geometric norm sequence is recovered to a
/// few ulps for the degrees scanned by default, so `1e-9` leaves ample room
/// for rounding while still separating genuinely different window infima.
pub const DEFAULT_RADIUS_TOLERANCE_F64: f64 = 1e-9;

// =============================================================================
// SUPPORTING TRAITS
// =============================================================================

/// Helper trait for checking finiteness of scalars.
///
/// # Examples
///
/// ```
/// use multilinear_series::space::traits::scalar::FiniteCheck;
///
/// assert!(3.14f64.is_finite_generic());
/// assert!(!f64::NAN.is_finite_generic());
/// assert!(!f32::INFINITY.is_finite_generic());
/// ```
pub trait FiniteCheck {
    /// Returns true if the value is finite (not NaN or infinite).
    fn is_finite_generic(&self) -> bool;
}

macro_rules! impl_finite_check {
    (float: $($t:ty),*) => {
        $(
            impl FiniteCheck for $t {
                #[inline(always)]
                fn is_finite_generic(&self) -> bool {
                    self.is_finite()
                }
            }
        )*
    };
}

impl_finite_check!(float: f32, f64);

/// Helper trait for `OrderedFloat`-based equality comparison that handles NaN properly.
///
/// # Examples
///
/// ```
/// use multilinear_series::space::traits::scalar::OrderedEq;
///
/// assert!(1.0f64.ordered_eq(&1.0f64));
/// assert!(f64::NAN.ordered_eq(&f64::NAN));
/// assert!(!f64::INFINITY.ordered_eq(&f64::NEG_INFINITY));
/// ```
pub trait OrderedEq {
    /// Compares two values for equality using ordered comparison semantics.
    fn ordered_eq(&self, other: &Self) -> bool;
}

macro_rules! impl_ordered_eq {
    (float: $($t:ty),*) => {
        $(
            impl OrderedEq for $t {
                #[inline(always)]
                fn ordered_eq(&self, other: &Self) -> bool {
                    OrderedFloat(*self) == OrderedFloat(*other)
                }
            }
        )*
    };
}

impl_ordered_eq!(float: f32, f64);

/// Hashing of scalars consistent with [`OrderedEq`], so that vectors can be
/// used as hash keys.
///
/// # Examples
///
/// ```
/// use multilinear_series::space::traits::scalar::HashScalar;
/// use rustc_hash::FxHasher;
/// use std::hash::Hasher;
///
/// let mut a = FxHasher::default();
/// let mut b = FxHasher::default();
/// f64::NAN.hash_scalar(&mut a);
/// f64::NAN.hash_scalar(&mut b);
/// assert_eq!(a.finish(), b.finish());
/// ```
pub trait HashScalar {
    /// Writes the value to `state`.
    fn hash_scalar<H: Hasher>(&self, state: &mut H);
}

macro_rules! impl_hash_scalar {
    (float: $($t:ty),*) => {
        $(
            impl HashScalar for $t {
                #[inline(always)]
                fn hash_scalar<H: Hasher>(&self, state: &mut H) {
                    OrderedFloat(*self).hash(state);
                }
            }
        )*
    };
}

impl_hash_scalar!(float: f32, f64);

/// Trait alias for the scalar field of every normed space in this crate.
///
/// # Required Traits
///
/// - `Float`: floating-point arithmetic (absolute value, powers, roots)
/// - `OrderedEq`: NaN-aware equality comparison
/// - `HashScalar`: hashing consistent with `OrderedEq`
/// - `FiniteCheck`: validation of values
/// - `Default`, `Debug`, `Display`, `Send`, `Sync`, `'static`: value-object plumbing
/// - `Serialize`, `DeserializeOwned`: serde support
///
/// # Usage
///
/// ```rust
/// use multilinear_series::space::traits::scalar::SeriesScalar;
///
/// fn close<T: SeriesScalar>(a: T, b: T) -> bool {
///     (a - b).abs() <= T::default_tolerance()
/// }
///
/// assert!(close(1.0_f64, 1.0));
/// ```
pub trait SeriesScalar:
    Float
    + OrderedEq
    + HashScalar
    + FiniteCheck
    + Default
    + Debug
    + Display
    + Send
    + Sync
    + Serialize
    + DeserializeOwned
    + 'static
{
    /// Returns the default tolerance for floating-point comparisons.
    ///
    /// - For `f32`: `1e-6`
    /// - For `f64`: `1e-15`
    fn default_tolerance() -> Self;

    /// Returns the default relative tolerance for the windowed radius estimate.
    ///
    /// - For `f32`: `1e-4`
    /// - For `f64`: `1e-9`
    fn default_radius_tolerance() -> Self;
}

impl SeriesScalar for f32 {
    fn default_tolerance() -> Self {
        DEFAULT_TOLERANCE_F32
    }

    fn default_radius_tolerance() -> Self {
        DEFAULT_RADIUS_TOLERANCE_F32
    }
}

impl SeriesScalar for f64 {
    fn default_tolerance() -> Self {
        DEFAULT_TOLERANCE_F64
    }

    fn default_radius_tolerance() -> Self {
        DEFAULT_RADIUS_TOLERANCE_F64
    }
}
