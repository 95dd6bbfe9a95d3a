//! The formal multilinear series of a continuous bilinear map.
//!
//! For bilinear `f: E × F → G` and a point `(x, y)`,
//!
//! ```text
//! f(x + dx, y + dy) = f(x, y) + [f(x, dy) + f(dx, y)] + f(dx, dy)
//! ```
//!
//! exactly. The three brackets are the terms of degree 0, 1 and 2 of the
//! series on `E × F`; the last one is the uncurried form of `f`.

use std::fmt::{self, Debug};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::maps::multilinear::ConstantMap;
use crate::maps::traits::{BilinearMap, MultilinearMap};
use crate::series::formal::{FormalMultilinearSeries, SeriesError, Term};
use crate::space::product::Product;
use crate::space::traits::normed_space::NormedSpace;

// =============================================================================
// UNCURRIED FORM
// =============================================================================

/// The degree-2 map `((a, b), (a', b')) ↦ f(a, b')` on `E × F`.
///
/// With the sup norm on `E × F` its operator norm equals `‖f‖`.
pub struct UncurriedBilinear<B, E, F, G> {
    map: Arc<B>,
    _spaces: PhantomData<fn() -> (E, F, G)>,
}

impl<B, E, F, G> UncurriedBilinear<B, E, F, G> {
    /// Wraps a shared bilinear map.
    pub const fn new(map: Arc<B>) -> Self {
        Self {
            map,
            _spaces: PhantomData,
        }
    }
}

impl<B: Debug, E, F, G> Debug for UncurriedBilinear<B, E, F, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UncurriedBilinear").field(&self.map).finish()
    }
}

impl<B, E, F, G> MultilinearMap<Product<E, F>, G> for UncurriedBilinear<B, E, F, G>
where
    B: BilinearMap<E, F, G>,
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
    G: NormedSpace<Scalar = E::Scalar>,
{
    fn degree(&self) -> usize {
        2
    }

    fn eval(&self, args: &[Product<E, F>]) -> G {
        self.map.apply(&args[0].fst, &args[1].snd)
    }

    fn op_norm(&self) -> E::Scalar {
        self.map.op_norm()
    }
}

/// Uncurries a bilinear map into a degree-2 multilinear map on the product.
///
/// # Examples
///
/// ```
/// use multilinear_series::maps::bilinear::ScalarProduct;
/// use multilinear_series::maps::traits::MultilinearMap;
/// use multilinear_series::series::bilinear::uncurry_bilinear;
/// use multilinear_series::space::product::Product;
///
/// let m = uncurry_bilinear(ScalarProduct::new(1.0_f64));
/// let first = Product::new(2.0, 3.0);
/// let second = Product::new(5.0, 7.0);
/// // f(a, b') = 2 · 7
/// assert_eq!(m.apply(&[first, second]).unwrap(), 14.0);
/// ```
pub fn uncurry_bilinear<B, E, F, G>(f: B) -> UncurriedBilinear<B, E, F, G>
where
    B: BilinearMap<E, F, G>,
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
    G: NormedSpace<Scalar = E::Scalar>,
{
    UncurriedBilinear::new(Arc::new(f))
}

// =============================================================================
// DERIVATIVE
// =============================================================================

/// The derivative `(dx, dy) ↦ f(x, dy) + f(dx, y)` of a bilinear map at
/// `(x, y)`.
///
/// The reported operator norm is the bound `‖f‖ (‖x‖ + ‖y‖)`.
pub struct BilinearDerivative<B, E, F, G> {
    map: Arc<B>,
    base: Product<E, F>,
    _codomain: PhantomData<fn() -> G>,
}

impl<B, E, F, G> BilinearDerivative<B, E, F, G> {
    /// The derivative of `map` at `base`.
    pub const fn new(map: Arc<B>, base: Product<E, F>) -> Self {
        Self {
            map,
            base,
            _codomain: PhantomData,
        }
    }
}

impl<B: Debug, E: Debug, F: Debug, G> Debug for BilinearDerivative<B, E, F, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BilinearDerivative")
            .field("map", &self.map)
            .field("base", &self.base)
            .finish()
    }
}

impl<B, E, F, G> MultilinearMap<Product<E, F>, G> for BilinearDerivative<B, E, F, G>
where
    B: BilinearMap<E, F, G>,
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
    G: NormedSpace<Scalar = E::Scalar>,
{
    fn degree(&self) -> usize {
        1
    }

    fn eval(&self, args: &[Product<E, F>]) -> G {
        let d = &args[0];
        self.map
            .apply(&self.base.fst, &d.snd)
            .add(&self.map.apply(&d.fst, &self.base.snd))
    }

    fn op_norm(&self) -> E::Scalar {
        self.map.op_norm() * (self.base.fst.norm() + self.base.snd.norm())
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// The formal multilinear series of the bilinear map `f` at `point = (x, y)`.
///
/// Term 0 is `f(x, y)`, term 1 is [`BilinearDerivative`], term 2 is
/// [`UncurriedBilinear`] and every higher term is zero, so the radius of
/// convergence is `∞` and every partial sum of degree at least 2 equals
/// `f(x + dx, y + dy)`.
///
/// # Errors
///
/// Returns [`SeriesError::NonFiniteInput`] if the point is not finite.
///
/// # Examples
///
/// ```
/// use multilinear_series::maps::bilinear::ScalarProduct;
/// use multilinear_series::series::bilinear::build_bilinear_series;
/// use multilinear_series::series::extended::ExtendedNonNeg;
/// use multilinear_series::space::product::Product;
///
/// let p = build_bilinear_series(ScalarProduct::new(1.0_f64), &Product::new(2.0, 3.0)).unwrap();
/// // (2 + 1)(3 + 4) = 21
/// assert_eq!(p.evaluate_partial_sum(&Product::new(1.0, 4.0), 2).unwrap(), 21.0);
/// assert_eq!(p.radius().unwrap(), ExtendedNonNeg::Infinite);
/// ```
pub fn build_bilinear_series<B, E, F, G>(
    f: B,
    point: &Product<E, F>,
) -> Result<FormalMultilinearSeries<Product<E, F>, G>, SeriesError>
where
    B: BilinearMap<E, F, G> + 'static,
    E: NormedSpace,
    F: NormedSpace<Scalar = E::Scalar>,
    G: NormedSpace<Scalar = E::Scalar>,
{
    point.validate()?;
    let f = Arc::new(f);
    let constant: Term<Product<E, F>, G> =
        Arc::new(ConstantMap::new(f.apply(&point.fst, &point.snd)));
    let derivative: Term<Product<E, F>, G> =
        Arc::new(BilinearDerivative::new(Arc::clone(&f), point.clone()));
    let uncurried: Term<Product<E, F>, G> = Arc::new(UncurriedBilinear::new(Arc::clone(&f)));
    tracing::debug!(map = ?f, "built bilinear series");
    FormalMultilinearSeries::from_terms(vec![constant, derivative, uncurried])
}
