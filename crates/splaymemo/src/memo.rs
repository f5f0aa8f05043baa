//! Common lookup/store interface over the memo backends

use std::hash::Hash;

use crate::lru::BoundedMemoCache;
use crate::splay::SplayTree;

/// A key/value store consulted by [`compute`](crate::compute)
///
/// Both calls may reorganise the structure (recency order, tree shape),
/// hence `&mut self` even for lookups.
pub trait Memo<K, V> {
    /// Cached value for `key`, if any
    fn lookup(&mut self, key: &K) -> Option<V>;

    /// Remember `value` for `key`.
    ///
    /// Returns the entry pushed out to make room, if the backend evicts.
    fn store(&mut self, key: K, value: V) -> Option<(K, V)>;

    /// Forget every entry
    fn clear(&mut self);

    /// Number of cached entries
    fn len(&self) -> usize;

    /// Check if nothing is cached
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Ord, V: Clone> Memo<K, V> for SplayTree<K, V> {
    fn lookup(&mut self, key: &K) -> Option<V> {
        self.search(key).cloned()
    }

    fn store(&mut self, key: K, value: V) -> Option<(K, V)> {
        self.insert(key, value);
        None
    }

    fn clear(&mut self) {
        SplayTree::clear(self);
    }

    fn len(&self) -> usize {
        SplayTree::len(self)
    }
}

impl<K: Hash + Eq + Clone, V: Clone> Memo<K, V> for BoundedMemoCache<K, V> {
    fn lookup(&mut self, key: &K) -> Option<V> {
        self.get(key).cloned()
    }

    fn store(&mut self, key: K, value: V) -> Option<(K, V)> {
        self.put(key, value)
    }

    fn clear(&mut self) {
        BoundedMemoCache::clear(self);
    }

    fn len(&self) -> usize {
        BoundedMemoCache::len(self)
    }
}

/// Backend picked at runtime, see [`MemoConfig::build`](crate::MemoConfig::build)
pub enum MemoBackend<K, V> {
    /// Self-adjusting tree, never evicts
    Splay(SplayTree<K, V>),
    /// Recency-ordered cache
    Lru(BoundedMemoCache<K, V>),
}

impl<K, V> MemoBackend<K, V> {
    /// Short backend name for logs
    pub fn name(&self) -> &'static str {
        match self {
            MemoBackend::Splay(_) => "splay",
            MemoBackend::Lru(_) => "lru",
        }
    }
}

impl<K, V> Memo<K, V> for MemoBackend<K, V>
where
    K: Ord + Hash + Clone,
    V: Clone,
{
    fn lookup(&mut self, key: &K) -> Option<V> {
        match self {
            MemoBackend::Splay(tree) => tree.lookup(key),
            MemoBackend::Lru(cache) => cache.lookup(key),
        }
    }

    fn store(&mut self, key: K, value: V) -> Option<(K, V)> {
        match self {
            MemoBackend::Splay(tree) => tree.store(key, value),
            MemoBackend::Lru(cache) => cache.store(key, value),
        }
    }

    fn clear(&mut self) {
        match self {
            MemoBackend::Splay(tree) => Memo::clear(tree),
            MemoBackend::Lru(cache) => Memo::clear(cache),
        }
    }

    fn len(&self) -> usize {
        match self {
            MemoBackend::Splay(tree) => tree.len(),
            MemoBackend::Lru(cache) => cache.len(),
        }
    }
}
