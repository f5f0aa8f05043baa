//! SharedMemo: lock-guarded memo handle with hit/miss statistics

use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::memo::Memo;
use crate::stats::CacheStats;

/// Cloneable handle to one memo backend shared between callers
///
/// Every operation takes the lock exactly once; the lock is never held
/// across a recursive [`compute`](crate::compute) step.
pub struct SharedMemo<M, K, V> {
    /// Underlying backend
    inner: Arc<Mutex<M>>,

    /// Hit/miss counters
    stats: Arc<CacheStats>,

    _marker: PhantomData<fn(K) -> V>,
}

impl<M, K, V> SharedMemo<M, K, V>
where
    M: Memo<K, V>,
{
    /// Wrap a backend
    pub fn new(memo: M) -> Self {
        Self {
            inner: Arc::new(Mutex::new(memo)),
            stats: Arc::new(CacheStats::new()),
            _marker: PhantomData,
        }
    }

    /// Look up a key, counting the hit or miss
    pub fn lookup(&self, key: &K) -> Option<V> {
        let value = self.inner.lock().lookup(key);
        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        value
    }

    /// Store a value, counting the insert and any eviction
    pub fn store(&self, key: K, value: V) -> Option<(K, V)> {
        let evicted = self.inner.lock().store(key, value);
        self.stats.record_insert();
        if evicted.is_some() {
            self.stats.record_eviction();
        }
        evicted
    }

    /// Clear the backend and reset statistics
    pub fn clear(&self) {
        self.inner.lock().clear();
        self.stats.reset();
    }

    /// Clear the backend, keeping statistics accumulated so far
    pub fn clear_entries(&self) {
        self.inner.lock().clear();
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if nothing is cached
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Statistics shared by every clone of this handle
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Run `f` with exclusive access to the backend
    pub fn with<R>(&self, f: impl FnOnce(&mut M) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }
}

impl<M, K, V> Clone for SharedMemo<M, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            stats: Arc::clone(&self.stats),
            _marker: PhantomData,
        }
    }
}

impl<M, K, V> Memo<K, V> for SharedMemo<M, K, V>
where
    M: Memo<K, V>,
{
    fn lookup(&mut self, key: &K) -> Option<V> {
        SharedMemo::lookup(self, key)
    }

    fn store(&mut self, key: K, value: V) -> Option<(K, V)> {
        SharedMemo::store(self, key, value)
    }

    fn clear(&mut self) {
        SharedMemo::clear(self)
    }

    fn len(&self) -> usize {
        SharedMemo::len(self)
    }
}
