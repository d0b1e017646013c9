//! Key index: key -> live heap nodes, tolerant of duplicate keys
//!
//! Each live node appears in exactly one bucket, exactly once. A bucket is
//! removed as soon as it empties so that `contains` stays accurate. Lookup
//! by key picks an arbitrary occurrence among duplicates, never all of them.

use std::hash::Hash;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Secondary index from keys to node handles.
///
/// `H` is an opaque, copyable node handle. Buckets are inlined for the
/// common case of at most two occurrences of a key.
pub(crate) struct KeyIndex<K, H> {
    buckets: FxHashMap<K, SmallVec<[H; 2]>>,
}

impl<K, H> KeyIndex<K, H> {
    pub(crate) fn new() -> Self {
        KeyIndex {
            buckets: FxHashMap::default(),
        }
    }

    /// Empties the index, yielding every indexed handle exactly once.
    pub(crate) fn drain(&mut self) -> impl Iterator<Item = H> + '_ {
        self.buckets.drain().flat_map(|(_, bucket)| bucket)
    }
}

impl<K: Eq + Hash, H: Copy + PartialEq> KeyIndex<K, H> {
    /// Records `handle` as one of the live nodes holding `key`.
    pub(crate) fn insert(&mut self, key: K, handle: H) {
        self.buckets.entry(key).or_default().push(handle);
    }

    pub(crate) fn contains(&self, key: &K) -> bool {
        self.buckets.contains_key(key)
    }

    /// Removes and returns an arbitrary occurrence of `key`.
    pub(crate) fn take_any(&mut self, key: &K) -> Option<H> {
        let bucket = self.buckets.get_mut(key)?;
        let handle = bucket.remove(0);
        if bucket.is_empty() {
            self.buckets.remove(key);
        }
        Some(handle)
    }

    /// Removes the specific occurrence `handle` from `key`'s bucket.
    /// Returns false if it was not indexed under that key.
    pub(crate) fn remove(&mut self, key: &K, handle: H) -> bool {
        let Some(bucket) = self.buckets.get_mut(key) else {
            return false;
        };
        let Some(position) = bucket.iter().position(|&h| h == handle) else {
            return false;
        };
        bucket.remove(position);
        if bucket.is_empty() {
            self.buckets.remove(key);
        }
        true
    }

    /// Bucket-concatenates `other` into `self`; existing occurrences are
    /// never overwritten.
    pub(crate) fn absorb(&mut self, other: KeyIndex<K, H>) {
        for (key, handles) in other.buckets {
            self.buckets.entry(key).or_default().extend(handles);
        }
    }
}
