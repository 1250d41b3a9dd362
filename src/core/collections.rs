//! Collection types used by the mesh.
//!
//! Storage arenas, fast non-cryptographic hash containers, and small inline
//! buffers are referred to through the aliases defined here so that the
//! concrete backend can change without touching the algorithms.
//!
//! - [`StorageMap`]: generation-checked arena (`DenseSlotMap` by default)
//! - [`FastHashMap`] / [`FastHashSet`]: `rustc_hash` containers for key sets
//! - [`SmallBuffer`]: `smallvec` buffer that stays on the stack for small sizes

mod aliases;
mod helpers;

pub use aliases::*;
pub use helpers::*;
