//! Concrete continuous linear maps.
//!
//! Matrix operator norms are computed once, at construction, as the largest
//! singular value of the matrix (the spectral norm, which is the operator
//! norm for Euclidean norms on both sides). The decomposition runs in `f64`
//! through `nalgebra`.

use std::fmt::{self, Debug};
use std::marker::PhantomData;

use num_traits::Float;

use crate::maps::traits::{LinearMap, MapError};
use crate::space::conversions::{safe_scalar_from_f64, safe_scalar_to_f64};
use crate::space::traits::normed_space::{NormedSpace, SpaceValidationError};
use crate::space::traits::scalar::SeriesScalar;
use crate::space::vector::Vector;

/// Largest singular value of a row-major `f64` matrix.
///
/// Empty matrices have norm zero.
pub(crate) fn spectral_norm(rows: usize, cols: usize, entry: impl Fn(usize, usize) -> f64) -> f64 {
    if rows == 0 || cols == 0 {
        return 0.0;
    }
    let matrix = na::DMatrix::<f64>::from_fn(rows, cols, entry);
    matrix
        .singular_values()
        .iter()
        .copied()
        .fold(0.0, f64::max)
}

/// Converts every entry of a row-major matrix to `f64`, reporting the first
/// non-finite entry by its flattened index.
pub(crate) fn matrix_to_f64<T: SeriesScalar>(
    rows: &[&[T]],
    cols: usize,
) -> Result<Vec<Vec<f64>>, MapError> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            row.iter()
                .enumerate()
                .map(|(j, &x)| {
                    safe_scalar_to_f64(x).map_err(|_| MapError::NonFiniteInput {
                        argument_index: 0,
                        source: SpaceValidationError::NonFiniteComponent {
                            component_index: i * cols + j,
                            component_value: format!("{x:?}"),
                            dimension: rows.len() * cols,
                        },
                    })
                })
                .collect()
        })
        .collect()
}

// =============================================================================
// MATRIX MAPS
// =============================================================================

/// The linear map `ℝᴺ → ℝᴹ` given by an `M × N` matrix.
///
/// # Examples
///
/// ```
/// use approx::assert_relative_eq;
/// use multilinear_series::maps::linear::MatrixMap;
/// use multilinear_series::maps::traits::LinearMap;
/// use multilinear_series::vector;
///
/// let f = MatrixMap::new([[2.0, 0.0], [0.0, -3.0]]).unwrap();
/// assert_eq!(f.apply(&vector![1.0, 1.0]), vector![2.0, -3.0]);
/// assert_relative_eq!(f.op_norm(), 3.0, epsilon = 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MatrixMap<T, const M: usize, const N: usize> {
    rows: [[T; N]; M],
    op_norm: T,
}

impl<T, const M: usize, const N: usize> MatrixMap<T, M, N>
where
    T: SeriesScalar,
{
    /// Creates the map from its rows.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::NonFiniteInput`] for a NaN or infinite entry and
    /// [`MapError::Conversion`] if the spectral norm does not fit in `T`.
    pub fn new(rows: [[T; N]; M]) -> Result<Self, MapError> {
        let borrowed: Vec<&[T]> = rows.iter().map(|row| row.as_slice()).collect();
        let entries = matrix_to_f64(&borrowed, N)?;
        let norm = spectral_norm(M, N, |i, j| entries[i][j]);
        Ok(Self {
            rows,
            op_norm: safe_scalar_from_f64(norm)?,
        })
    }

    /// Creates the map from dynamically sized rows.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::DomainMismatch`] if there are not `M` rows of
    /// length `N`, plus the errors of [`new`](Self::new).
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, MapError> {
        if rows.len() != M {
            return Err(MapError::DomainMismatch {
                context: "matrix row count",
                expected: M,
                found: rows.len(),
            });
        }
        let mut fixed = [[T::zero(); N]; M];
        for (target, row) in fixed.iter_mut().zip(rows) {
            if row.len() != N {
                return Err(MapError::DomainMismatch {
                    context: "matrix row length",
                    expected: N,
                    found: row.len(),
                });
            }
            target.copy_from_slice(row);
        }
        Self::new(fixed)
    }

    /// The identity map on `ℝᴺ` (square matrices only).
    ///
    /// # Errors
    ///
    /// Returns [`MapError::DomainMismatch`] if `M != N`.
    pub fn identity() -> Result<Self, MapError> {
        if M != N {
            return Err(MapError::DomainMismatch {
                context: "identity matrix shape",
                expected: N,
                found: M,
            });
        }
        let mut rows = [[T::zero(); N]; M];
        for (i, row) in rows.iter_mut().enumerate() {
            row[i] = T::one();
        }
        Self::new(rows)
    }

    /// The rows of the matrix.
    #[must_use]
    pub const fn rows(&self) -> &[[T; N]; M] {
        &self.rows
    }
}

impl<T, const M: usize, const N: usize> LinearMap<Vector<T, N>, Vector<T, M>> for MatrixMap<T, M, N>
where
    T: SeriesScalar,
{
    fn apply(&self, v: &Vector<T, N>) -> Vector<T, M> {
        let mut out = [T::zero(); M];
        for (value, row) in out.iter_mut().zip(&self.rows) {
            *value = row
                .iter()
                .zip(v.coords())
                .fold(T::zero(), |acc, (&a, &x)| acc + a * x);
        }
        Vector::new(out)
    }

    fn op_norm(&self) -> T {
        self.op_norm
    }
}

// =============================================================================
// SCALAR MAPS
// =============================================================================

/// The homothety `v ↦ c · v` on any normed space. Its operator norm is `|c|`.
pub struct Homothety<E: NormedSpace> {
    factor: E::Scalar,
    _space: PhantomData<fn() -> E>,
}

impl<E: NormedSpace> Homothety<E> {
    /// Creates `v ↦ factor · v`.
    pub const fn new(factor: E::Scalar) -> Self {
        Self {
            factor,
            _space: PhantomData,
        }
    }

    /// The identity map, `v ↦ v`.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(<E::Scalar as num_traits::One>::one())
    }
}

impl<E: NormedSpace> Debug for Homothety<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Homothety")
            .field("factor", &self.factor)
            .finish()
    }
}

impl<E: NormedSpace> LinearMap<E, E> for Homothety<E> {
    fn apply(&self, v: &E) -> E {
        v.scale(self.factor)
    }

    fn op_norm(&self) -> E::Scalar {
        Float::abs(self.factor)
    }
}

/// The functional `v ↦ ⟨w, v⟩` on `ℝᴰ`. Its operator norm is `‖w‖`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Functional<T: SeriesScalar, const D: usize> {
    weights: Vector<T, D>,
}

impl<T: SeriesScalar, const D: usize> Functional<T, D> {
    /// Creates `v ↦ ⟨weights, v⟩`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::NonFiniteInput`] if a weight is NaN or infinite.
    pub fn new(weights: Vector<T, D>) -> Result<Self, MapError> {
        weights
            .validate()
            .map_err(|source| MapError::NonFiniteInput {
                argument_index: 0,
                source,
            })?;
        Ok(Self { weights })
    }
}

impl<T: SeriesScalar, const D: usize> LinearMap<Vector<T, D>, T> for Functional<T, D>
where
    T: NormedSpace<Scalar = T>,
{
    fn apply(&self, v: &Vector<T, D>) -> T {
        self.weights.dot(v)
    }

    fn op_norm(&self) -> T {
        self.weights.norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn matrix_map_applies_rows() {
        let f = MatrixMap::new([[1.0, 2.0, 3.0], [0.0, -1.0, 0.5]]).unwrap();
        let y = f.apply(&Vector::new([1.0, 1.0, 2.0]));
        assert_eq!(y.to_array(), [9.0, 0.0]);
    }

    #[test]
    fn spectral_norm_of_rank_one_matrix() {
        // u vᵀ with ‖u‖ = 5 and ‖v‖ = 1 has spectral norm 5.
        let f = MatrixMap::new([[3.0, 0.0], [4.0, 0.0]]).unwrap();
        assert_relative_eq!(f.op_norm(), 5.0, epsilon = 1e-12);
        let rotation = MatrixMap::new([[0.0, -1.0], [1.0, 0.0]]).unwrap();
        assert_relative_eq!(rotation.op_norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn from_rows_checks_shape() {
        let ok: MatrixMap<f64, 2, 2> = MatrixMap::from_rows(&[vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
        assert_eq!(ok, MatrixMap::identity().unwrap());

        let short: Result<MatrixMap<f64, 2, 2>, _> = MatrixMap::from_rows(&[vec![1.0, 0.0]]);
        assert!(matches!(
            short,
            Err(MapError::DomainMismatch {
                context: "matrix row count",
                expected: 2,
                found: 1
            })
        ));

        let ragged: Result<MatrixMap<f64, 2, 2>, _> =
            MatrixMap::from_rows(&[vec![1.0, 0.0], vec![0.0]]);
        assert!(matches!(
            ragged,
            Err(MapError::DomainMismatch {
                context: "matrix row length",
                ..
            })
        ));

        let not_square: Result<MatrixMap<f64, 2, 3>, _> = MatrixMap::identity();
        assert!(not_square.is_err());
    }

    #[test]
    fn non_finite_entries_are_rejected() {
        let err = MatrixMap::new([[1.0, 2.0], [f64::INFINITY, 0.0]]).unwrap_err();
        assert!(matches!(
            err,
            MapError::NonFiniteInput {
                source: SpaceValidationError::NonFiniteComponent {
                    component_index: 2,
                    dimension: 4,
                    ..
                },
                ..
            }
        ));
    }

    #[test]
    fn empty_matrix_has_zero_norm() {
        let f: MatrixMap<f64, 0, 3> = MatrixMap::new([]).unwrap();
        assert_relative_eq!(f.op_norm(), 0.0);
    }

    #[test]
    fn homothety_and_functional() {
        let h: Homothety<Vector<f64, 2>> = Homothety::new(-2.0);
        assert_eq!(h.apply(&Vector::new([1.0, 3.0])).to_array(), [-2.0, -6.0]);
        assert_relative_eq!(h.op_norm(), 2.0);
        assert_relative_eq!(Homothety::<f64>::identity().apply(&4.0), 4.0);

        let w = Functional::new(Vector::new([3.0, 4.0])).unwrap();
        assert_relative_eq!(w.apply(&Vector::new([1.0, 1.0])), 7.0);
        assert_relative_eq!(w.op_norm(), 5.0);
        assert!(Functional::new(Vector::new([f64::NAN, 0.0])).is_err());
    }
}
