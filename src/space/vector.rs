//! Fixed-dimension Euclidean vectors.
//!
//! [`Vector<T, D>`] is the finite-dimensional normed space `T^D` with the
//! Euclidean norm. Equality treats NaN components as equal to themselves so
//! that equality stays reflexive; use [`NormedSpace::validate`] to reject
//! non-finite vectors before they enter a computation.

#![forbid(unsafe_code)]

use num_traits::cast;
use serde::de::{Error, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Add, Index, Mul, Neg, Sub};

use crate::space::conversions::ScalarConversionError;
use crate::space::norms::hypot;
use crate::space::traits::normed_space::{NormedSpace, SpaceValidationError};
use crate::space::traits::scalar::SeriesScalar;

/// Convenience macro for creating a [`Vector`] from its components.
///
/// # Examples
///
/// ```rust
/// use multilinear_series::vector;
/// use multilinear_series::space::vector::Vector;
///
/// let v: Vector<f64, 3> = vector![1.0, 2.0, 3.0];
/// assert_eq!(v.coords(), &[1.0, 2.0, 3.0]);
/// ```
#[macro_export]
macro_rules! vector {
    ($($component:expr),* $(,)?) => {
        $crate::space::vector::Vector::new([$($component),*])
    };
}

// Re-export the macro at the module level for convenience
pub use crate::vector;

// =============================================================================
// VECTOR STRUCT DEFINITION
// =============================================================================

/// A vector of the D-dimensional Euclidean space over `T`.
///
/// Vectors are immutable once created; arithmetic returns new values.
///
/// # Examples
///
/// ```rust
/// use multilinear_series::space::traits::normed_space::NormedSpace;
/// use multilinear_series::space::vector::Vector;
///
/// let v = Vector::new([3.0, 4.0]);
/// let w = Vector::new([1.0, -1.0]);
/// assert_eq!((v + w).coords(), &[4.0, 3.0]);
/// assert_eq!(v.norm(), 5.0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Vector<T, const D: usize>
where
    T: SeriesScalar,
{
    coords: [T; D],
}

// =============================================================================
// PUBLIC API
// =============================================================================

impl<T, const D: usize> Vector<T, D>
where
    T: SeriesScalar,
{
    /// Creates a vector from its components.
    #[inline]
    #[must_use]
    pub const fn new(coords: [T; D]) -> Self {
        Self { coords }
    }

    /// Returns a reference to the components.
    #[inline]
    #[must_use]
    pub const fn coords(&self) -> &[T; D] {
        &self.coords
    }

    /// Returns the components by value.
    #[inline]
    #[must_use]
    pub const fn to_array(&self) -> [T; D] {
        self.coords
    }

    /// Returns the component at `index`, or `None` when out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        self.coords.get(index).copied()
    }

    /// The `index`-th standard basis vector, or `None` when out of bounds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use multilinear_series::space::vector::Vector;
    ///
    /// let e1: Vector<f64, 3> = Vector::basis(1).unwrap();
    /// assert_eq!(e1.coords(), &[0.0, 1.0, 0.0]);
    /// assert!(Vector::<f64, 3>::basis(3).is_none());
    /// ```
    #[must_use]
    pub fn basis(index: usize) -> Option<Self> {
        if index >= D {
            return None;
        }
        let mut coords = [T::zero(); D];
        coords[index] = T::one();
        Some(Self { coords })
    }

    /// Euclidean inner product.
    #[must_use]
    pub fn dot(&self, other: &Self) -> T {
        self.coords
            .iter()
            .zip(other.coords.iter())
            .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
    }

    /// Applies `f` to every component.
    #[must_use]
    pub fn map(&self, f: impl Fn(T) -> T) -> Self {
        Self {
            coords: self.coords.map(f),
        }
    }
}

// =============================================================================
// NORMED SPACE
// =============================================================================

impl<T, const D: usize> NormedSpace for Vector<T, D>
where
    T: SeriesScalar,
{
    type Scalar = T;

    #[inline]
    fn zero() -> Self {
        Self {
            coords: [T::zero(); D],
        }
    }

    #[inline]
    fn dim() -> usize {
        D
    }

    #[inline]
    fn add(&self, other: &Self) -> Self {
        *self + *other
    }

    #[inline]
    fn scale(&self, factor: T) -> Self {
        *self * factor
    }

    #[inline]
    fn norm(&self) -> T {
        hypot(&self.coords)
    }

    fn validate(&self) -> Result<(), SpaceValidationError> {
        for (index, &component) in self.coords.iter().enumerate() {
            if !component.is_finite_generic() {
                return Err(SpaceValidationError::NonFiniteComponent {
                    component_index: index,
                    component_value: format!("{component:?}"),
                    dimension: D,
                });
            }
        }
        Ok(())
    }

    #[inline]
    fn sub(&self, other: &Self) -> Self {
        *self - *other
    }
}

// =============================================================================
// ARITHMETIC OPERATORS
// =============================================================================

impl<T, const D: usize> Add for Vector<T, D>
where
    T: SeriesScalar,
{
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut coords = self.coords;
        for (c, r) in coords.iter_mut().zip(rhs.coords) {
            *c = *c + r;
        }
        Self { coords }
    }
}

impl<T, const D: usize> Sub for Vector<T, D>
where
    T: SeriesScalar,
{
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let mut coords = self.coords;
        for (c, r) in coords.iter_mut().zip(rhs.coords) {
            *c = *c - r;
        }
        Self { coords }
    }
}

impl<T, const D: usize> Neg for Vector<T, D>
where
    T: SeriesScalar,
{
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|c| -c)
    }
}

impl<T, const D: usize> Mul<T> for Vector<T, D>
where
    T: SeriesScalar,
{
    type Output = Self;

    fn mul(self, factor: T) -> Self {
        self.map(|c| c * factor)
    }
}

impl<T, const D: usize> Index<usize> for Vector<T, D>
where
    T: SeriesScalar,
{
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.coords[index]
    }
}

// =============================================================================
// STANDARD TRAIT IMPLEMENTATIONS
// =============================================================================

impl<T, const D: usize> PartialEq for Vector<T, D>
where
    T: SeriesScalar,
{
    fn eq(&self, other: &Self) -> bool {
        self.coords
            .iter()
            .zip(other.coords.iter())
            .all(|(a, b)| a.ordered_eq(b))
    }
}

impl<T, const D: usize> Eq for Vector<T, D> where T: SeriesScalar {}

impl<T, const D: usize> Hash for Vector<T, D>
where
    T: SeriesScalar,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        for component in &self.coords {
            component.hash_scalar(state);
        }
    }
}

impl<T, const D: usize> Default for Vector<T, D>
where
    T: SeriesScalar,
{
    fn default() -> Self {
        Self {
            coords: [T::default(); D],
        }
    }
}

impl<T, const D: usize> From<[T; D]> for Vector<T, D>
where
    T: SeriesScalar,
{
    #[inline]
    fn from(coords: [T; D]) -> Self {
        Self::new(coords)
    }
}

impl<T, const D: usize> From<Vector<T, D>> for [T; D]
where
    T: SeriesScalar,
{
    #[inline]
    fn from(vector: Vector<T, D>) -> [T; D] {
        vector.coords
    }
}

impl<T, const D: usize> TryFrom<&[f64]> for Vector<T, D>
where
    T: SeriesScalar,
{
    type Error = ScalarConversionError;

    /// Converts a slice of `f64` components, failing on a length mismatch,
    /// a non-finite component or a value that does not fit `T`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use multilinear_series::space::vector::Vector;
    ///
    /// let v = Vector::<f32, 2>::try_from([1.0_f64, 2.0].as_slice()).unwrap();
    /// assert_eq!(v.coords(), &[1.0_f32, 2.0]);
    /// assert!(Vector::<f32, 3>::try_from([1.0_f64, 2.0].as_slice()).is_err());
    /// ```
    fn try_from(components: &[f64]) -> Result<Self, Self::Error> {
        if components.len() != D {
            return Err(ScalarConversionError::ConversionFailed {
                value: format!("{components:?}"),
                from_type: "&[f64]",
                to_type: any::type_name::<Self>(),
            });
        }
        let mut coords = [T::zero(); D];
        for (slot, &component) in coords.iter_mut().zip(components) {
            if !component.is_finite() {
                return Err(ScalarConversionError::NonFiniteValue {
                    value: format!("{component:?}"),
                });
            }
            let converted: T =
                cast(component).ok_or_else(|| ScalarConversionError::ConversionFailed {
                    value: format!("{component:?}"),
                    from_type: "f64",
                    to_type: any::type_name::<T>(),
                })?;
            if !converted.is_finite_generic() {
                return Err(ScalarConversionError::NonFiniteValue {
                    value: format!("{converted:?}"),
                });
            }
            *slot = converted;
        }
        Ok(Self::new(coords))
    }
}

// =============================================================================
// SERIALIZATION
// =============================================================================

impl<T, const D: usize> Serialize for Vector<T, D>
where
    T: SeriesScalar,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeTuple;
        let mut tuple = serializer.serialize_tuple(D)?;
        for component in &self.coords {
            tuple.serialize_element(component)?;
        }
        tuple.end()
    }
}

impl<'de, T, const D: usize> Deserialize<'de> for Vector<T, D>
where
    T: SeriesScalar,
{
    fn deserialize<DE>(deserializer: DE) -> Result<Self, DE::Error>
    where
        DE: serde::Deserializer<'de>,
    {
        struct ArrayVisitor<T, const D: usize>(PhantomData<T>);

        impl<'de, T, const D: usize> Visitor<'de> for ArrayVisitor<T, D>
        where
            T: SeriesScalar,
        {
            type Value = Vector<T, D>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_fmt(format_args!("an array of {D} numeric components"))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut coords = [T::zero(); D];
                for (i, slot) in coords.iter_mut().enumerate() {
                    *slot = seq
                        .next_element()?
                        .ok_or_else(|| Error::invalid_length(i, &self))?;
                }
                Ok(Vector::new(coords))
            }
        }

        deserializer.deserialize_tuple(D, ArrayVisitor(PhantomData))
    }
}
