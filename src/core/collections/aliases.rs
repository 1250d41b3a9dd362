use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};
use smallvec::SmallVec;

#[cfg(not(feature = "dense-slotmap"))]
use slotmap::SlotMap;

#[cfg(feature = "dense-slotmap")]
use slotmap::DenseSlotMap;

use crate::core::triangle_collection::TriangleKey;

// =============================================================================
// STORAGE BACKEND
// =============================================================================

/// Arena backing the triangle and vertex stores.
///
/// `DenseSlotMap` with the default `dense-slotmap` feature, `SlotMap`
/// otherwise. Keys stay generation-checked with either backend, so a key of a
/// deleted triangle never aliases a newer one.
///
/// ```rust,ignore
/// let triangles: StorageMap<TriangleKey, Triangle> = StorageMap::with_key();
/// ```
#[cfg(not(feature = "dense-slotmap"))]
pub type StorageMap<K, V> = SlotMap<K, V>;

/// Arena backing the triangle and vertex stores.
///
/// `DenseSlotMap` with the default `dense-slotmap` feature, `SlotMap`
/// otherwise. Keys stay generation-checked with either backend, so a key of a
/// deleted triangle never aliases a newer one.
#[cfg(feature = "dense-slotmap")]
pub type StorageMap<K, V> = DenseSlotMap<K, V>;

// =============================================================================
// HASH CONTAINERS
// =============================================================================

/// `HashMap` with the `FxHasher` from `rustc_hash`.
///
/// Not DoS-resistant; keys are internal arena handles only.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::core::collections::FastHashMap;
///
/// let mut map: FastHashMap<u32, &str> = FastHashMap::default();
/// map.insert(1, "one");
/// assert_eq!(map.get(&1), Some(&"one"));
/// ```
pub type FastHashMap<K, V> = FxHashMap<K, V>;

/// `HashSet` with the `FxHasher` from `rustc_hash`.
///
/// Used for the visited set of adjacency walks.
pub type FastHashSet<T> = FxHashSet<T>;

/// Build hasher shared by [`FastHashMap`] and [`FastHashSet`].
pub type FastBuildHasher = FxBuildHasher;

// =============================================================================
// SMALL BUFFERS
// =============================================================================

/// Inline-first vector; spills to the heap only past `N` elements.
pub type SmallBuffer<T, const N: usize> = SmallVec<[T; N]>;

/// Vertex attributes. Most meshes carry at most a handful per vertex.
pub type AttributeBuffer = SmallBuffer<f64, 4>;

/// Triangles touched by a single split or flip (at most four).
pub type TriangleBuffer = SmallBuffer<TriangleKey, 4>;
