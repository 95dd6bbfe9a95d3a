//! Collection aliases used for term caches.

use rustc_hash::FxHashMap;

/// Optimized `HashMap` type for hot lookup paths.
///
/// Keys here are small integers (term degrees), for which `FxHash` is
/// considerably faster than the DoS-resistant default hasher.
///
/// # Examples
///
/// ```rust
/// use multilinear_series::collections::FastHashMap;
///
/// let mut map: FastHashMap<usize, f64> = FastHashMap::default();
/// map.insert(3, 0.5);
/// assert_eq!(map.get(&3), Some(&0.5));
/// ```
pub type FastHashMap<K, V> = FxHashMap<K, V>;
