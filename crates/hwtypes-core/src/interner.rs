//! Weak interning table for canonical type handles.
//!
//! Maps a key to the single live [`Type`] created for it. The table never
//! keeps a type alive: an entry whose type has been dropped reads as absent,
//! and dead entries are pruned whenever a new one is inserted.
//!
//! Resolution is split in two so callers can build a candidate without
//! holding the lock (building may recursively resolve other keys):
//! [`InstanceCache::get`] first, then [`InstanceCache::insert_if_absent`],
//! which returns whichever handle won.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Weak;

use parking_lot::Mutex;

use crate::Result;
use crate::types::{Type, TypeNode};

pub(crate) struct InstanceCache<K> {
    map: Mutex<HashMap<K, Weak<TypeNode>>>,
}

impl<K: Eq + Hash> InstanceCache<K> {
    pub(crate) fn new() -> Self {
        Self {
            map: Mutex::new(HashMap::new()),
        }
    }

    /// Live handle for `key`, if any.
    pub(crate) fn get(&self, key: &K) -> Option<Type> {
        self.map.lock().get(key).and_then(Weak::upgrade).map(Type)
    }

    /// Store `candidate` unless a live handle already exists for `key`.
    ///
    /// Returns the canonical handle: the existing one if another caller got
    /// there first, otherwise `candidate`.
    pub(crate) fn insert_if_absent(&self, key: K, candidate: Type) -> Type {
        let mut map = self.map.lock();
        if let Some(existing) = map.get(&key).and_then(Weak::upgrade) {
            return Type(existing);
        }
        map.retain(|_, entry| entry.strong_count() > 0);
        map.insert(key, candidate.downgrade());
        candidate
    }

    /// Resolve `key`, building a candidate with `create` on a miss.
    pub(crate) fn resolve_or_create(
        &self,
        key: K,
        create: impl FnOnce() -> Result<Type>,
    ) -> Result<Type> {
        if let Some(existing) = self.get(&key) {
            return Ok(existing);
        }
        let candidate = create()?;
        Ok(self.insert_if_absent(key, candidate))
    }

    /// Number of entries whose type is still alive.
    pub(crate) fn live_len(&self) -> usize {
        self.map
            .lock()
            .values()
            .filter(|entry| entry.strong_count() > 0)
            .count()
    }
}
