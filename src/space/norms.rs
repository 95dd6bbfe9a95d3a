//! Vector norm computations.
//!
//! Numerically stable Euclidean norms of coordinate arrays, used by the
//! normed-space implementations of this crate.

use num_traits::Float;

use crate::space::traits::scalar::SeriesScalar;

/// Compute 2D hypot using the scaled algorithm.
///
/// Scaling by the larger magnitude keeps `x² + y²` from overflowing or
/// underflowing.
pub(in crate::space) fn scaled_hypot_2d<T: SeriesScalar>(x: T, y: T) -> T {
    let max_abs = Float::abs(x).max(Float::abs(y));
    if max_abs == T::zero() {
        return T::zero();
    }
    let x_scaled = x / max_abs;
    let y_scaled = y / max_abs;
    max_abs * Float::sqrt(x_scaled * x_scaled + y_scaled * y_scaled)
}

/// Sum of squares of the components.
///
/// # Examples
///
/// ```
/// use multilinear_series::space::norms::squared_norm;
///
/// assert_eq!(squared_norm(&[3.0, 4.0]), 25.0);
/// assert_eq!(squared_norm(&[1.0, 2.0, 2.0]), 9.0);
/// ```
pub fn squared_norm<T, const D: usize>(coords: &[T; D]) -> T
where
    T: SeriesScalar,
{
    coords.iter().fold(T::zero(), |acc, &x| acc + x * x)
}

/// Compute the Euclidean norm of a coordinate array.
///
/// For 2D this uses [`Float::hypot`]; in higher dimensions every component
/// is scaled by the largest magnitude before squaring, which avoids overflow
/// and underflow the same way.
///
/// # Examples
///
/// ```
/// use multilinear_series::space::norms::hypot;
///
/// assert_eq!(hypot(&[3.0, 4.0]), 5.0);
/// assert_eq!(hypot(&[1.0, 2.0, 2.0]), 3.0);
/// assert_eq!(hypot(&[1.0, 1.0, 1.0, 1.0]), 2.0);
/// ```
pub fn hypot<T, const D: usize>(coords: &[T; D]) -> T
where
    T: SeriesScalar,
{
    match D {
        0 => T::zero(),
        1 => Float::abs(coords[0]),
        2 => {
            let result = Float::hypot(coords[0], coords[1]);
            if result.is_finite_generic() {
                result
            } else {
                scaled_hypot_2d(coords[0], coords[1])
            }
        }
        _ => {
            let max_abs = coords
                .iter()
                .map(|&x| Float::abs(x))
                .fold(T::zero(), |acc, x| if x > acc { x } else { acc });

            if max_abs == T::zero() {
                return T::zero();
            }

            let sum_of_scaled_squares = coords
                .iter()
                .map(|&x| {
                    let scaled = x / max_abs;
                    scaled * scaled
                })
                .fold(T::zero(), |acc, x| acc + x);

            max_abs * Float::sqrt(sum_of_scaled_squares)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hypot_low_dimensions() {
        assert_relative_eq!(hypot::<f64, 0>(&[]), 0.0);
        assert_relative_eq!(hypot(&[-5.0]), 5.0);
        assert_relative_eq!(hypot(&[-3.0, 4.0]), 5.0, epsilon = 1e-10);
        assert_relative_eq!(hypot(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_hypot_higher_dimensions() {
        assert_relative_eq!(hypot(&[1.0, 2.0, 2.0]), 3.0, epsilon = 1e-10);
        assert_relative_eq!(hypot(&[1.0, 1.0, 1.0, 1.0, 1.0]), 5.0_f64.sqrt(), epsilon = 1e-10);
        assert_relative_eq!(hypot(&[0.0, 0.0, 0.0]), 0.0);

        let mixed = hypot(&[1e10, 1e-10, 1e5]);
        assert!(mixed.is_finite());
        assert_relative_eq!(mixed, 1e10, max_relative = 1e-9);
    }

    #[test]
    fn test_hypot_avoids_overflow() {
        let large = hypot(&[1e200, 1e200, 1e200]);
        assert!(large.is_finite());
        assert_relative_eq!(large, 3.0_f64.sqrt() * 1e200, max_relative = 1e-12);

        let large_2d = hypot(&[1e300_f64, 1e300]);
        assert!(large_2d.is_finite());
    }

    #[test]
    fn test_scaled_hypot_2d() {
        assert_relative_eq!(scaled_hypot_2d(3.0, 4.0), 5.0, epsilon = 1e-10);
        assert_relative_eq!(scaled_hypot_2d(0.0, 0.0), 0.0);
        assert_relative_eq!(scaled_hypot_2d(-3.0, -4.0), 5.0, epsilon = 1e-10);
        let large_result = scaled_hypot_2d(1e10, 1e10);
        assert_relative_eq!(large_result, 2.0_f64.sqrt() * 1e10, epsilon = 1e-5);
    }

    #[test]
    fn test_squared_norm() {
        assert_relative_eq!(squared_norm(&[3.0, 4.0]), 25.0);
        assert_relative_eq!(squared_norm(&[1.0, 1.0, 1.0, 1.0, 1.0]), 5.0);
        assert_relative_eq!(squared_norm(&[0.0_f32, 0.0]), 0.0);
    }
}
