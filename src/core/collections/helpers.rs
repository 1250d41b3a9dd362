use super::aliases::{FastBuildHasher, FastHashMap, FastHashSet};

/// Creates a [`FastHashMap`] with room for `capacity` entries.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::core::collections::fast_hash_map_with_capacity;
///
/// let map = fast_hash_map_with_capacity::<u64, usize>(64);
/// assert!(map.capacity() >= 64);
/// ```
#[inline]
#[must_use]
pub fn fast_hash_map_with_capacity<K, V>(capacity: usize) -> FastHashMap<K, V> {
    FastHashMap::with_capacity_and_hasher(capacity, FastBuildHasher::default())
}

/// Creates a [`FastHashSet`] with room for `capacity` entries.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::core::collections::fast_hash_set_with_capacity;
///
/// let mut set = fast_hash_set_with_capacity::<u32>(16);
/// assert!(set.insert(3));
/// assert!(!set.insert(3));
/// ```
#[inline]
#[must_use]
pub fn fast_hash_set_with_capacity<T>(capacity: usize) -> FastHashSet<T> {
    FastHashSet::with_capacity_and_hasher(capacity, FastBuildHasher::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_helpers() {
        let map = fast_hash_map_with_capacity::<usize, usize>(100);
        assert!(map.capacity() >= 100);
        assert!(map.is_empty());

        let set = fast_hash_set_with_capacity::<usize>(10);
        assert!(set.capacity() >= 10);
    }
}
