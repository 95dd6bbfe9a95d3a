//! The formal multilinear series of a continuous linear map.
//!
//! A linear map `f` is its own Taylor expansion at every point:
//! `f(x + d) = f(x) + f(d)`. The series at `x` therefore has the constant
//! term `f(x)`, the linear term `f` and nothing else.

use std::fmt::{self, Debug};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::maps::multilinear::ConstantMap;
use crate::maps::traits::{LinearMap, MultilinearMap};
use crate::series::formal::{FormalMultilinearSeries, SeriesError, Term};
use crate::space::traits::normed_space::NormedSpace;

/// A linear map viewed as a multilinear map of degree 1.
pub struct LinearAsMultilinear<L, E, F> {
    map: Arc<L>,
    _spaces: PhantomData<fn() -> (E, F)>,
}

impl<L, E, F> LinearAsMultilinear<L, E, F> {
    /// Wraps a shared linear map.
    pub const fn new(map: Arc<L>) -> Self {
        Self {
            map,
            _spaces: PhantomData,
        }
    }
}

impl<L: Debug, E, F> Debug for LinearAsMultilinear<L, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LinearAsMultilinear").field(&self.map).finish()
    }
}

impl<L, E, F> MultilinearMap<E, F> for LinearAsMultilinear<L, E, F>
where
    L: LinearMap<E, F>,
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
{
    fn degree(&self) -> usize {
        1
    }

    fn eval(&self, args: &[E]) -> F {
        self.map.apply(&args[0])
    }

    fn op_norm(&self) -> E::Scalar {
        self.map.op_norm()
    }
}

/// The formal multilinear series of the linear map `f` at the point `x`.
///
/// Term 0 is the constant `f(x)`, term 1 is `f` and every higher term is
/// zero, so the radius of convergence is `∞` and every partial sum of
/// degree at least 1 equals `f(x + d)`.
///
/// # Errors
///
/// Returns [`SeriesError::NonFiniteInput`] if `x` is not finite.
///
/// # Examples
///
/// ```
/// use multilinear_series::maps::linear::MatrixMap;
/// use multilinear_series::series::extended::ExtendedNonNeg;
/// use multilinear_series::series::linear::build_linear_series;
/// use multilinear_series::vector;
///
/// let f = MatrixMap::new([[1.0, 2.0], [3.0, 4.0]]).unwrap();
/// let p = build_linear_series(f, &vector![1.0, 0.0]).unwrap();
///
/// assert_eq!(p.evaluate_partial_sum(&vector![0.0, 1.0], 1).unwrap(), vector![3.0, 7.0]);
/// assert_eq!(p.radius().unwrap(), ExtendedNonNeg::Infinite);
/// assert!(p.term(2).unwrap().is_zero());
/// ```
pub fn build_linear_series<L, E, F>(f: L, x: &E) -> Result<FormalMultilinearSeries<E, F>, SeriesError>
where
    L: LinearMap<E, F> + 'static,
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
{
    x.validate()?;
    let f = Arc::new(f);
    let constant: Term<E, F> = Arc::new(ConstantMap::new(f.apply(x)));
    let linear: Term<E, F> = Arc::new(LinearAsMultilinear::new(Arc::clone(&f)));
    tracing::debug!(map = ?f, "built linear series");
    FormalMultilinearSeries::from_terms(vec![constant, linear])
}
