//! Hash containers keyed with fixed seeds.

use core::any::TypeId;
use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};
use hashbrown::hash_map::Entry;

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x5A17_C0DE_9E37_79B9);

/// Fixed-seed `foldhash` state, so hashing is deterministic across runs.
#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FoldHasher<'static>;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

pub(crate) type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;
pub(crate) type HashSet<T> = hashbrown::HashSet<T, FixedHashState>;

// -----------------------------------------------------------------------------
// TypeIdMap

/// Passes a `TypeId`'s own `u64` hash straight through.
#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(u64::from(*byte));
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}

/// A map keyed by [`TypeId`].
pub(crate) struct TypeIdMap<V>(hashbrown::HashMap<TypeId, V, NoOpHashState>);

impl<V> TypeIdMap<V> {
    #[inline]
    pub(crate) const fn new() -> Self {
        Self(hashbrown::HashMap::with_hasher(NoOpHashState))
    }

    /// Insert `f()` if `type_id` is absent. Returns whether it inserted.
    #[inline]
    pub(crate) fn try_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> bool {
        match self.0.entry(type_id) {
            Entry::Vacant(entry) => {
                entry.insert(f());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    #[inline]
    pub(crate) fn get_or_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> &mut V {
        match self.0.entry(type_id) {
            Entry::Vacant(entry) => entry.insert(f()),
            Entry::Occupied(entry) => entry.into_mut(),
        }
    }

    #[inline]
    pub(crate) fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }

    #[inline]
    pub(crate) fn contains(&self, type_id: &TypeId) -> bool {
        self.0.contains_key(type_id)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub(crate) fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.0.values()
    }
}
