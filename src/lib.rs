//! # multilinear-series
//!
//! Formal multilinear series over normed spaces, their radius of convergence,
//! and the exact series expansions of continuous linear and bilinear maps.
//!
//! A formal multilinear series from `E` to `F` is a sequence `p₀, p₁, …`
//! where `pₙ` is a continuous multilinear map `Eⁿ → F`. It represents a
//! function `f` near a point `x` when `f(x + d) = Σ pₙ(d, …, d)` for small
//! `d`. This crate provides:
//!
//! - Lazy, memoized series with termwise algebra and partial-sum evaluation
//! - The radius of convergence `liminf 1 / ‖pₙ‖^{1/n}` as an extended
//!   non-negative real, exact (`∞`) for finitely supported series and
//!   approximated by a windowed scan otherwise
//! - Series builders for linear maps (`f(x) + f(d)`) and bilinear maps
//!   (`f(x, y) + [f(x, dy) + f(dx, y)] + f(dx, dy)`)
//! - Euclidean vectors, product spaces, matrix and tensor maps with
//!   operator norms
//! - Serialization/Deserialization of vectors, radii and configurations with
//!   [serde](https://serde.rs)
//!
//! # Basic Usage
//!
//! ```rust
//! use multilinear_series::prelude::*;
//!
//! // The series of a linear map is exact to first order and converges everywhere.
//! let f = MatrixMap::new([[1.0, 2.0], [0.0, 1.0]]).unwrap();
//! let p = build_linear_series(f, &vector![1.0, 1.0]).unwrap();
//! assert_eq!(p.radius().unwrap(), ExtendedNonNeg::Infinite);
//! assert_eq!(p.evaluate_partial_sum(&vector![0.5, -1.0], 1).unwrap(), vector![1.5, 0.0]);
//!
//! // The radius of Σ 2ⁿ zⁿ is 1/2.
//! let q = FormalMultilinearSeries::<f64, f64>::from_scalar_coefficients(
//!     Support::Unbounded,
//!     |n| 2.0_f64.powi(n as i32),
//! );
//! let r = q.radius().unwrap().finite().unwrap();
//! assert!((r - 0.5).abs() < 1e-9);
//! ```
//!
//! # Bilinear maps
//!
//! ```rust
//! use multilinear_series::prelude::*;
//!
//! let f = InnerProduct::<f64, 2>::new();
//! let point = Product::new(vector![1.0, 2.0], vector![3.0, -1.0]);
//! let p = build_bilinear_series(f, &point).unwrap();
//!
//! let d = Product::new(vector![0.5, 0.5], vector![-1.0, 2.0]);
//! // ⟨x + dx, y + dy⟩ = ⟨(1.5, 2.5), (2, 1)⟩ = 5.5
//! assert_eq!(p.evaluate_partial_sum(&d, 2).unwrap(), 5.5);
//! assert!(p.term(3).unwrap().is_zero());
//! ```

// Forbid unsafe code throughout the entire crate
#![forbid(unsafe_code)]

#[macro_use]
extern crate derive_builder;

/// Collection aliases used by term caches.
pub mod collections;

/// Continuous multilinear, linear and bilinear maps between normed spaces.
///
/// The traits here are the boundary to whatever numerics supplies concrete
/// maps; the concrete maps cover Euclidean vectors and scalars.
pub mod maps {
    pub mod bilinear;
    pub mod linear;
    pub mod multilinear;
    pub mod traits;
    pub use bilinear::*;
    pub use linear::*;
    pub use multilinear::*;
    pub use traits::*;
}

/// Formal multilinear series, radius of convergence and series builders.
pub mod series {
    /// Series of bilinear maps and the uncurried second-order term
    pub mod bilinear;
    /// Local expansions bundling a base point, a series and its radius
    pub mod expansion;
    pub mod extended;
    pub mod formal;
    /// Series of linear maps
    pub mod linear;
    pub mod radius;
    pub use bilinear::*;
    pub use expansion::*;
    pub use extended::*;
    pub use formal::*;
    pub use linear::*;
    pub use radius::*;
}

/// Normed spaces: scalar traits, Euclidean vectors and products.
pub mod space {
    pub mod conversions;
    /// Euclidean norm computations
    pub mod norms;
    pub mod product;
    /// Traits for scalar fields and normed spaces.
    ///
    /// `SeriesScalar` collects the requirements on the scalar field, with
    /// supporting traits for validation (`FiniteCheck`) and NaN-aware
    /// equality (`OrderedEq`). `NormedSpace` is the capability set every
    /// domain and codomain of a series provides.
    pub mod traits {
        pub mod normed_space;
        pub mod scalar;
        pub use normed_space::*;
        pub use scalar::*;
    }
    pub mod vector;
    pub use conversions::*;
    pub use norms::*;
    pub use product::*;
    pub use traits::*;
    pub use vector::*;
}

/// A prelude module that re-exports commonly used types and macros.
/// This makes it easier to import the most commonly used items from the crate.
pub mod prelude {
    // Re-export from maps
    pub use crate::maps::{bilinear::*, linear::*, multilinear::*, traits::*};

    // Re-export from series
    pub use crate::series::{
        bilinear::*, expansion::*, extended::*, formal::*, linear::*, radius::*,
    };

    // Re-export from space
    pub use crate::space::{
        product::*,
        traits::{normed_space::*, scalar::*},
        vector::*,
    };

    pub use crate::collections::FastHashMap;

    // Convenience macros
    pub use crate::vector;
}

/// The function `is_normal` checks that structs implement `auto` traits.
/// Traits are checked at compile time, so this function is only used for
/// testing.
#[must_use]
pub const fn is_normal<T: Sized + Send + Sync + Unpin>() -> bool {
    true
}

// =============================================================================
// TESTS
// =============================================================================
