//! Caller-owned cache of loaded or generated table bundles.
//!
//! The engine never caches. A caller that wants to avoid regenerating or
//! re-reading tables on every refresh keeps a TableCache, keys it by a hash
//! of whatever determines the tables, and invalidates entries explicitly.

use crate::{dataset::KpiTables, sample_data::{self, SampleParams}};
use std::{
    collections::{hash_map::DefaultHasher, HashMap},
    hash::{Hash, Hasher},
    sync::Arc,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey(u64);

impl CacheKey {
    pub fn of<T: Hash + ?Sized>(value: &T) -> Self {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        CacheKey(hasher.finish())
    }
}

#[derive(Debug, Default)]
pub struct TableCache {
    entries: HashMap<CacheKey, Arc<KpiTables>>,
    hits:    u64,
    misses:  u64,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: CacheKey) -> Option<Arc<KpiTables>> {
        self.entries.get(&key).cloned()
    }

    /// Return the cached bundle for `key`, or run `load` and cache its result.
    /// A failed load caches nothing.
    pub fn get_or_try_insert_with<E>(
        &mut self,
        key: CacheKey,
        load: impl FnOnce() -> Result<KpiTables, E>,
    ) -> Result<Arc<KpiTables>, E> {
        if let Some(tables) = self.entries.get(&key) {
            self.hits += 1;
            return Ok(Arc::clone(tables));
        }
        self.misses += 1;
        let tables = Arc::new(load()?);
        self.entries.insert(key, Arc::clone(&tables));
        Ok(tables)
    }

    pub fn get_or_generate(&mut self, params: &SampleParams) -> Arc<KpiTables> {
        let loaded: Result<_, std::convert::Infallible> =
            self.get_or_try_insert_with(CacheKey::of(params), || Ok(sample_data::generate(params)));
        match loaded {
            Ok(tables) => tables,
            Err(never) => match never {},
        }
    }

    /// Drop one entry. Returns whether it was present.
    pub fn invalidate(&mut self, key: CacheKey) -> bool {
        self.entries.remove(&key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
