//! Bounded LRU (Least Recently Used) memo cache
//!
//! Hash index into a slot arena threaded with a doubly-linked recency
//! list, so get, put and eviction are all O(1). Head is the most recently
//! used entry, tail the next eviction victim.

use std::collections::HashMap;
use std::hash::Hash;
use std::num::NonZeroUsize;

use ahash::RandomState;
use tracing::{debug, trace};

use crate::error::{Error, Result};

/// Maximum number of entries a [`BoundedMemoCache`] may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Capacity {
    /// Evict once this many entries are present
    Bounded(NonZeroUsize),
    /// Never evict
    #[default]
    Unbounded,
}

impl Capacity {
    /// Bounded capacity; zero is rejected
    pub fn bounded(capacity: usize) -> Result<Self> {
        NonZeroUsize::new(capacity)
            .map(Capacity::Bounded)
            .ok_or(Error::ZeroCapacity)
    }

    /// Entry limit, or `None` when unbounded
    pub fn limit(&self) -> Option<usize> {
        match self {
            Capacity::Bounded(n) => Some(n.get()),
            Capacity::Unbounded => None,
        }
    }

    fn is_full(&self, len: usize) -> bool {
        self.limit().is_some_and(|limit| len >= limit)
    }
}

/// Slot in the recency list
struct Entry<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Key/value cache with strict LRU eviction
pub struct BoundedMemoCache<K, V> {
    map: HashMap<K, usize, RandomState>,
    slots: Vec<Option<Entry<K, V>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    capacity: Capacity,
}

impl<K, V> BoundedMemoCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create an empty cache
    pub fn new(capacity: Capacity) -> Self {
        let reserve = capacity.limit().unwrap_or(0);
        Self {
            map: HashMap::with_capacity_and_hasher(reserve, RandomState::new()),
            slots: Vec::with_capacity(reserve),
            head: None,
            tail: None,
            free_list: Vec::new(),
            capacity,
        }
    }

    /// Create a cache holding at most `capacity` entries
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self::new(Capacity::bounded(capacity)?))
    }

    /// Create a cache that never evicts
    pub fn unbounded() -> Self {
        Self::new(Capacity::Unbounded)
    }

    /// Get a value and mark it most recently used
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let idx = *self.map.get(key)?;
        self.move_to_front(idx);
        self.slots[idx].as_ref().map(|entry| &entry.value)
    }

    /// Get a value without touching recency order
    pub fn peek(&self, key: &K) -> Option<&V> {
        let idx = *self.map.get(key)?;
        self.slots[idx].as_ref().map(|entry| &entry.value)
    }

    /// Check if a key is cached, without touching recency order
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Insert or overwrite a value and mark it most recently used.
    ///
    /// Inserting a new key into a full cache evicts the least recently
    /// used entry first; that entry is handed back to the caller.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&idx) = self.map.get(&key) {
            if let Some(entry) = &mut self.slots[idx] {
                entry.value = value;
            }
            self.move_to_front(idx);
            return None;
        }

        let evicted = if self.capacity.is_full(self.map.len()) {
            self.evict()
        } else {
            None
        };

        let idx = self.alloc_slot();
        self.slots[idx] = Some(Entry {
            key: key.clone(),
            value,
            prev: None,
            next: self.head,
        });

        if let Some(head_idx) = self.head {
            if let Some(head) = &mut self.slots[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }

        self.map.insert(key, idx);
        debug_assert!(self.capacity.limit().map_or(true, |limit| self.map.len() <= limit));
        evicted
    }

    /// Remove a key from the cache
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.map.remove(key)?;
        self.unlink(idx);
        self.free_slot(idx);
        self.slots[idx].take().map(|entry| entry.value)
    }

    /// Remove every entry for which `keep` returns false.
    ///
    /// Recency order of the surviving entries is unchanged. Returns the
    /// number of entries removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&K, &V) -> bool,
    {
        let doomed: Vec<K> = self
            .slots
            .iter()
            .flatten()
            .filter(|entry| !keep(&entry.key, &entry.value))
            .map(|entry| entry.key.clone())
            .collect();

        for key in &doomed {
            self.remove(key);
        }
        doomed.len()
    }

    /// Current number of entries
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Configured capacity
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Drop every entry and reset recency order
    pub fn clear(&mut self) {
        debug!(entries = self.map.len(), "clearing memo cache");
        self.map.clear();
        self.slots.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }

        self.unlink(idx);

        if let Some(entry) = &mut self.slots[idx] {
            entry.prev = None;
            entry.next = self.head;
        }

        if let Some(head_idx) = self.head {
            if let Some(head) = &mut self.slots[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match &self.slots[idx] {
            Some(entry) => (entry.prev, entry.next),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_entry) = &mut self.slots[prev_idx] {
                    prev_entry.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_idx) => {
                if let Some(next_entry) = &mut self.slots[next_idx] {
                    next_entry.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    fn evict(&mut self) -> Option<(K, V)> {
        let tail_idx = self.tail?;
        self.unlink(tail_idx);
        let entry = self.slots[tail_idx].take()?;
        self.map.remove(&entry.key);
        self.free_slot(tail_idx);
        trace!(slot = tail_idx, "evicted least recently used entry");
        Some((entry.key, entry.value))
    }

    fn alloc_slot(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.slots.len();
            self.slots.push(None);
            idx
        }
    }

    fn free_slot(&mut self, idx: usize) {
        self.free_list.push(idx);
    }
}
