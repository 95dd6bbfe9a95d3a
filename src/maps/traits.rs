//! Multilinear, linear and bilinear map abstractions.
//!
//! These traits are the seam between the series kernel and whatever numerics
//! library supplies concrete maps. A [`MultilinearMap`] of degree `n` is a
//! continuous map `Eⁿ → F` that is linear in each argument separately; its
//! operator norm is `sup { ‖M(v₁, …, vₙ)‖ : ‖vᵢ‖ ≤ 1 }`.

use std::fmt::Debug;

use crate::space::conversions::ScalarConversionError;
use crate::space::traits::normed_space::{NormedSpace, SpaceValidationError};

/// Errors raised when applying or constructing maps.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum MapError {
    /// The arguments do not match the domain of the map: wrong argument
    /// count, or map data of the wrong shape.
    #[error("Domain mismatch in {context}: expected {expected}, found {found}")]
    DomainMismatch {
        /// What was being checked.
        context: &'static str,
        /// Expected count or length.
        expected: usize,
        /// Actual count or length.
        found: usize,
    },
    /// An argument or a coefficient is NaN or infinite.
    #[error("Non-finite value in argument {argument_index}: {source}")]
    NonFiniteInput {
        /// Index of the offending argument.
        argument_index: usize,
        /// Underlying validation failure.
        #[source]
        source: SpaceValidationError,
    },
    /// A coefficient could not be converted while computing a norm.
    #[error(transparent)]
    Conversion(#[from] ScalarConversionError),
}

/// A continuous multilinear map `Eⁿ → F` of a fixed degree `n`.
///
/// Degree 0 maps are constants and degree 1 maps are linear maps. Implementors
/// provide [`eval`](Self::eval); callers normally go through
/// [`apply`](Self::apply), which checks the argument count and finiteness.
///
/// # Examples
///
/// ```
/// use multilinear_series::maps::multilinear::ScalarMonomial;
/// use multilinear_series::maps::traits::{MapError, MultilinearMap};
///
/// // (x, y, z) ↦ 2xyz
/// let m = ScalarMonomial::new(3, 2.0_f64);
/// assert_eq!(m.apply(&[1.0, 2.0, 3.0]).unwrap(), 12.0);
/// assert_eq!(m.apply_diagonal(&2.0), 16.0);
/// assert!(matches!(
///     m.apply(&[1.0, 2.0]),
///     Err(MapError::DomainMismatch { expected: 3, found: 2, .. })
/// ));
/// ```
pub trait MultilinearMap<E, F>: Debug + Send + Sync
where
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
{
    /// Number of arguments.
    fn degree(&self) -> usize;

    /// Evaluates the map.
    ///
    /// `args.len()` equals [`degree`](Self::degree); implementations may
    /// index `args` directly.
    fn eval(&self, args: &[E]) -> F;

    /// The operator norm, or an upper bound for it where the supremum has no
    /// closed form. Implementations document which.
    fn op_norm(&self) -> E::Scalar;

    /// Whether this is known to be the zero map of its degree.
    fn is_zero(&self) -> bool {
        false
    }

    /// The coefficient `c` if this map is the scalar monomial
    /// `(x₁, …, xₙ) ↦ c · x₁ ⋯ xₙ`.
    ///
    /// Sums of monomials combine coefficients through this, so their norm is
    /// exact instead of the triangle bound.
    fn monomial_coefficient(&self) -> Option<E::Scalar> {
        None
    }

    /// Evaluates the map after checking the argument count and that every
    /// argument is finite.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::DomainMismatch`] when `args.len()` differs from the
    /// degree and [`MapError::NonFiniteInput`] for a NaN or infinite argument.
    fn apply(&self, args: &[E]) -> Result<F, MapError> {
        if args.len() != self.degree() {
            return Err(MapError::DomainMismatch {
                context: "multilinear map arguments",
                expected: self.degree(),
                found: args.len(),
            });
        }
        for (argument_index, arg) in args.iter().enumerate() {
            arg.validate()
                .map_err(|source| MapError::NonFiniteInput {
                    argument_index,
                    source,
                })?;
        }
        Ok(self.eval(args))
    }

    /// Evaluates the map on `n` copies of `v`, i.e. `M(v, …, v)`.
    fn apply_diagonal(&self, v: &E) -> F {
        let args = vec![v.clone(); self.degree()];
        self.eval(&args)
    }
}

/// A continuous linear map `E → F`.
pub trait LinearMap<E, F>: Debug + Send + Sync
where
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
{
    /// Applies the map.
    fn apply(&self, v: &E) -> F;

    /// The operator norm `sup { ‖f(v)‖ : ‖v‖ ≤ 1 }`.
    fn op_norm(&self) -> E::Scalar;
}

/// A continuous bilinear map `E × F → G`.
pub trait BilinearMap<E, F, G>: Debug + Send + Sync
where
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
    G: NormedSpace<Scalar = E::Scalar>,
{
    /// Applies the map.
    fn apply(&self, a: &E, b: &F) -> G;

    /// The operator norm `sup { ‖f(a, b)‖ : ‖a‖ ≤ 1, ‖b‖ ≤ 1 }`, or an upper
    /// bound for it. Implementations document which.
    fn op_norm(&self) -> E::Scalar;
}
