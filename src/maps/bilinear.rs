//! Concrete continuous bilinear maps.

use std::fmt::{self, Debug};
use std::marker::PhantomData;

use num_traits::Float;

use crate::maps::linear::{matrix_to_f64, spectral_norm};
use crate::maps::traits::{BilinearMap, MapError};
use crate::space::conversions::safe_scalar_from_f64;
use crate::space::traits::normed_space::NormedSpace;
use crate::space::traits::scalar::SeriesScalar;
use crate::space::vector::Vector;

/// A bilinear map `ℝ^P × ℝ^Q → ℝ^R` given by a coefficient tensor.
///
/// Output component `k` of `f(a, b)` is `aᵀ Tₖ b`, where `Tₖ` is the `P × Q`
/// slice `tensor[k]`.
///
/// The reported operator norm is `sqrt(Σₖ σ_max(Tₖ)²)`, an upper bound for
/// the true norm that is exact when `R = 1`.
///
/// # Examples
///
/// ```
/// use approx::assert_relative_eq;
/// use multilinear_series::maps::bilinear::TensorBilinear;
/// use multilinear_series::maps::traits::BilinearMap;
/// use multilinear_series::vector;
///
/// // The 2D cross product (a, b) ↦ a₀b₁ − a₁b₀.
/// let cross = TensorBilinear::new([[[0.0, 1.0], [-1.0, 0.0]]]).unwrap();
/// assert_eq!(cross.apply(&vector![1.0, 0.0], &vector![0.0, 2.0]), vector![2.0]);
/// assert_relative_eq!(cross.op_norm(), 1.0, epsilon = 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TensorBilinear<T, const P: usize, const Q: usize, const R: usize> {
    tensor: [[[T; Q]; P]; R],
    op_norm: T,
}

impl<T, const P: usize, const Q: usize, const R: usize> TensorBilinear<T, P, Q, R>
where
    T: SeriesScalar,
{
    /// Creates the map from its `R` slices of shape `P × Q`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::NonFiniteInput`] for a NaN or infinite entry and
    /// [`MapError::Conversion`] if the norm bound does not fit in `T`.
    pub fn new(tensor: [[[T; Q]; P]; R]) -> Result<Self, MapError> {
        let mut sum_of_squares = 0.0_f64;
        for slice in &tensor {
            let rows: Vec<&[T]> = slice.iter().map(|row| row.as_slice()).collect();
            let entries = matrix_to_f64(&rows, Q)?;
            let sigma = spectral_norm(P, Q, |i, j| entries[i][j]);
            sum_of_squares += sigma * sigma;
        }
        Ok(Self {
            tensor,
            op_norm: safe_scalar_from_f64(sum_of_squares.sqrt())?,
        })
    }

    /// Creates the map from dynamically sized slices.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::DomainMismatch`] if the data is not `R` slices of
    /// `P` rows of length `Q`, plus the errors of [`new`](Self::new).
    pub fn from_slices(slices: &[Vec<Vec<T>>]) -> Result<Self, MapError> {
        if slices.len() != R {
            return Err(MapError::DomainMismatch {
                context: "tensor output dimension",
                expected: R,
                found: slices.len(),
            });
        }
        let mut tensor = [[[T::zero(); Q]; P]; R];
        for (target, slice) in tensor.iter_mut().zip(slices) {
            if slice.len() != P {
                return Err(MapError::DomainMismatch {
                    context: "tensor slice row count",
                    expected: P,
                    found: slice.len(),
                });
            }
            for (target_row, row) in target.iter_mut().zip(slice) {
                if row.len() != Q {
                    return Err(MapError::DomainMismatch {
                        context: "tensor slice row length",
                        expected: Q,
                        found: row.len(),
                    });
                }
                target_row.copy_from_slice(row);
            }
        }
        Self::new(tensor)
    }
}

impl<T, const P: usize, const Q: usize, const R: usize>
    BilinearMap<Vector<T, P>, Vector<T, Q>, Vector<T, R>> for TensorBilinear<T, P, Q, R>
where
    T: SeriesScalar,
{
    fn apply(&self, a: &Vector<T, P>, b: &Vector<T, Q>) -> Vector<T, R> {
        let mut out = [T::zero(); R];
        for (value, slice) in out.iter_mut().zip(&self.tensor) {
            *value = slice
                .iter()
                .zip(a.coords())
                .fold(T::zero(), |acc, (row, &ai)| {
                    acc + ai * row
                        .iter()
                        .zip(b.coords())
                        .fold(T::zero(), |inner, (&t, &bj)| inner + t * bj)
                });
        }
        Vector::new(out)
    }

    fn op_norm(&self) -> T {
        self.op_norm
    }
}

/// The Euclidean inner product `ℝᴰ × ℝᴰ → ℝ`. Its operator norm is 1 for
/// `D > 0` (Cauchy–Schwarz).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InnerProduct<T, const D: usize> {
    _scalar: PhantomData<fn() -> T>,
}

impl<T, const D: usize> InnerProduct<T, D> {
    /// Creates the inner product.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _scalar: PhantomData,
        }
    }
}

impl<T, const D: usize> BilinearMap<Vector<T, D>, Vector<T, D>, T> for InnerProduct<T, D>
where
    T: SeriesScalar + NormedSpace<Scalar = T>,
{
    fn apply(&self, a: &Vector<T, D>, b: &Vector<T, D>) -> T {
        a.dot(b)
    }

    fn op_norm(&self) -> T {
        if D == 0 {
            <T as num_traits::Zero>::zero()
        } else {
            <T as num_traits::One>::one()
        }
    }
}

/// Scalar multiplication `𝕜 × E → E`, `(c, v) ↦ c · v`.
///
/// Its operator norm is 1 unless `E` is the zero space.
pub struct ScalarMultiplication<E> {
    _space: PhantomData<fn() -> E>,
}

impl<E> ScalarMultiplication<E> {
    /// Creates the scalar multiplication of `E`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _space: PhantomData,
        }
    }
}

impl<E> Default for ScalarMultiplication<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Debug for ScalarMultiplication<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ScalarMultiplication")
    }
}

impl<E> BilinearMap<E::Scalar, E, E> for ScalarMultiplication<E>
where
    E: NormedSpace,
    E::Scalar: NormedSpace<Scalar = E::Scalar>,
{
    fn apply(&self, c: &E::Scalar, v: &E) -> E {
        v.scale(*c)
    }

    fn op_norm(&self) -> E::Scalar {
        if E::dim() == 0 {
            <E::Scalar as num_traits::Zero>::zero()
        } else {
            <E::Scalar as num_traits::One>::one()
        }
    }
}

/// The scalar product `(a, b) ↦ c · a · b` on `𝕜 × 𝕜 → 𝕜`. Its operator norm
/// is `|c|`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalarProduct<T> {
    coefficient: T,
}

impl<T: SeriesScalar> ScalarProduct<T> {
    /// Creates `(a, b) ↦ coefficient · a · b`.
    #[must_use]
    pub const fn new(coefficient: T) -> Self {
        Self { coefficient }
    }
}

impl<T> BilinearMap<T, T, T> for ScalarProduct<T>
where
    T: SeriesScalar + NormedSpace<Scalar = T>,
{
    fn apply(&self, a: &T, b: &T) -> T {
        self.coefficient * *a * *b
    }

    fn op_norm(&self) -> T {
        Float::abs(self.coefficient)
    }
}
