//! A simple in-memory cache system for etheroll-rs.
//!
//! Values are stored behind an [`Arc`] and grouped under a single active *scope* (for example
//! the chain a decoder is pointed at). Entries only live for the lifetime of the owning
//! [`ScopedCache`], and switching to a different scope drops every entry at once.

use std::{
    fmt,
    hash::Hash,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use hashbrown::HashMap;
use tracing::{debug, trace};

use error::Error;

pub mod error;

/// The state guarded by the cache lock.
struct Inner<S, K, V> {
    scope: Option<S>,
    entries: HashMap<K, Arc<V>>,
}

/// A read-mostly cache of `K -> V`, valid for one scope `S` at a time.
///
/// Values are built outside of the lock and published as a whole [`Arc`], so concurrent
/// readers either see no value or a complete one. When two callers race to build the same
/// key, both builds run and the last one to publish wins.
pub struct ScopedCache<S, K, V> {
    inner: RwLock<Inner<S, K, V>>,
}

impl<S, K, V> Default for ScopedCache<S, K, V> {
    fn default() -> Self {
        Self { inner: RwLock::new(Inner { scope: None, entries: HashMap::new() }) }
    }
}

impl<S, K, V> fmt::Debug for ScopedCache<S, K, V>
where
    S: fmt::Debug,
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.read() {
            Ok(inner) => f
                .debug_struct("ScopedCache")
                .field("scope", &inner.scope)
                .field("keys", &inner.entries.keys().collect::<Vec<_>>())
                .finish(),
            Err(_) => f.debug_struct("ScopedCache").field("poisoned", &true).finish(),
        }
    }
}

impl<S, K, V> ScopedCache<S, K, V>
where
    S: Clone + PartialEq + fmt::Debug,
    K: Clone + Eq + Hash + fmt::Debug,
{
    /// Creates an empty cache with no active scope.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner<S, K, V>>, Error> {
        self.inner.read().map_err(|_| Error::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner<S, K, V>>, Error> {
        self.inner.write().map_err(|_| Error::Poisoned)
    }

    /// Returns the currently active scope, if any value was ever stored.
    pub fn scope(&self) -> Result<Option<S>, Error> {
        Ok(self.read()?.scope.clone())
    }

    /// Switches the cache to `scope`. If it differs from the active scope every entry is
    /// dropped and `true` is returned.
    ///
    /// ```
    /// use etheroll_cache::ScopedCache;
    ///
    /// let cache: ScopedCache<u64, &str, String> = ScopedCache::new();
    /// cache.insert(1, "key", "value".to_string()).expect("!");
    ///
    /// assert!(!cache.set_scope(1).expect("!"));
    /// assert!(cache.set_scope(3).expect("!"));
    /// assert!(cache.is_empty().expect("!"));
    /// ```
    pub fn set_scope(&self, scope: S) -> Result<bool, Error> {
        let mut inner = self.write()?;
        if inner.scope.as_ref() == Some(&scope) {
            return Ok(false);
        }

        let invalidated = !inner.entries.is_empty();
        if invalidated {
            debug!("scope changed from {:?} to {:?}, dropping {} entries", inner.scope, scope, inner.entries.len());
        }
        inner.entries.clear();
        inner.scope = Some(scope);

        Ok(invalidated)
    }

    /// Read a cached value. Values stored under another scope are never returned.
    ///
    /// ```
    /// use etheroll_cache::ScopedCache;
    ///
    /// let cache: ScopedCache<u64, &str, String> = ScopedCache::new();
    /// cache.insert(1, "key", "value".to_string()).expect("!");
    ///
    /// assert_eq!(cache.get(&1, &"key").expect("!").as_deref(), Some(&"value".to_string()));
    /// assert!(cache.get(&3, &"key").expect("!").is_none());
    /// ```
    pub fn get(&self, scope: &S, key: &K) -> Result<Option<Arc<V>>, Error> {
        let inner = self.read()?;
        if inner.scope.as_ref() != Some(scope) {
            return Ok(None);
        }
        Ok(inner.entries.get(key).cloned())
    }

    /// Store a value under `scope`, replacing any previous value for `key`. Storing under a
    /// new scope invalidates every entry of the previous one.
    pub fn insert(&self, scope: S, key: K, value: V) -> Result<Arc<V>, Error> {
        let value = Arc::new(value);
        let mut inner = self.write()?;

        if inner.scope.as_ref() != Some(&scope) {
            debug!("scope changed from {:?} to {:?}, dropping {} entries", inner.scope, scope, inner.entries.len());
            inner.entries.clear();
            inner.scope = Some(scope);
        }

        trace!("storing cache entry for key: {:?}", key);
        inner.entries.insert(key, value.clone());
        Ok(value)
    }

    /// If `key` is cached under `scope`, returns it. Otherwise calls `build`, stores the
    /// result and returns it. `build` runs without holding the lock, and its error is
    /// returned untouched (nothing is stored).
    ///
    /// ```
    /// use etheroll_cache::{error::Error, ScopedCache};
    ///
    /// let cache: ScopedCache<u64, &str, usize> = ScopedCache::new();
    /// let value = cache.get_or_try_insert_with(&1, &"key", || Ok::<_, Error>(42)).expect("!");
    /// assert_eq!(*value, 42);
    ///
    /// // the second build never runs
    /// let value = cache.get_or_try_insert_with(&1, &"key", || Ok::<_, Error>(7)).expect("!");
    /// assert_eq!(*value, 42);
    /// ```
    pub fn get_or_try_insert_with<F, E>(&self, scope: &S, key: &K, build: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Result<V, E>,
        E: From<Error>,
    {
        if let Some(value) = self.get(scope, key)? {
            debug!("cache hit for key: {:?}", key);
            return Ok(value);
        }

        debug!("cache miss for key: {:?}", key);
        let value = build()?;
        Ok(self.insert(scope.clone(), key.clone(), value)?)
    }

    /// Drops a single entry, returning whether it existed.
    pub fn remove(&self, key: &K) -> Result<bool, Error> {
        Ok(self.write()?.entries.remove(key).is_some())
    }

    /// Drops every entry and forgets the active scope.
    pub fn invalidate(&self) -> Result<(), Error> {
        let mut inner = self.write()?;
        inner.entries.clear();
        inner.scope = None;
        Ok(())
    }

    /// Lists the keys cached under the active scope.
    pub fn keys(&self) -> Result<Vec<K>, Error> {
        Ok(self.read()?.entries.keys().cloned().collect())
    }

    /// Number of cached entries.
    pub fn len(&self) -> Result<usize, Error> {
        Ok(self.read()?.entries.len())
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> Result<bool, Error> {
        Ok(self.read()?.entries.is_empty())
    }
}

#[cfg(test)]
mod tests;
