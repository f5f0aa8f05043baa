//! Backend selection

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use tracing::warn;

use crate::error::{Error, Result};
use crate::fib::MIN_FIB_CAPACITY;
use crate::lru::{BoundedMemoCache, Capacity};
use crate::memo::MemoBackend;
use crate::splay::SplayTree;

/// Which structure backs the memo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// [`SplayTree`]
    #[default]
    Splay,
    /// [`BoundedMemoCache`]
    Lru,
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "splay" => Ok(Backend::Splay),
            "lru" => Ok(Backend::Lru),
            _ => Err(Error::UnknownBackend(s.to_string())),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Splay => f.write_str("splay"),
            Backend::Lru => f.write_str("lru"),
        }
    }
}

impl FromStr for Capacity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("unbounded") {
            return Ok(Capacity::Unbounded);
        }
        let n: usize = s.parse().map_err(|_| Error::InvalidCapacity(s.to_string()))?;
        Capacity::bounded(n)
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capacity::Bounded(n) => write!(f, "{n}"),
            Capacity::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// Memo backend configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoConfig {
    /// Backing structure
    pub backend: Backend,
    /// Entry limit; only the LRU backend evicts
    pub capacity: Capacity,
}

impl MemoConfig {
    /// Configuration for the given backend and capacity
    pub fn new(backend: Backend, capacity: Capacity) -> Self {
        Self { backend, capacity }
    }

    /// True when an LRU this small evicts `f(n - 2)` before it is read,
    /// turning memoized Fibonacci exponential
    pub fn thrashes_fibonacci(&self) -> bool {
        self.backend == Backend::Lru
            && matches!(self.capacity.limit(), Some(n) if n < MIN_FIB_CAPACITY)
    }

    /// Build an empty backend
    pub fn build<K, V>(&self) -> MemoBackend<K, V>
    where
        K: Hash + Eq + Clone,
    {
        match self.backend {
            Backend::Splay => {
                if let Capacity::Bounded(n) = self.capacity {
                    warn!(capacity = n.get(), "splay backend never evicts, ignoring capacity");
                }
                MemoBackend::Splay(SplayTree::new())
            }
            Backend::Lru => MemoBackend::Lru(BoundedMemoCache::new(self.capacity)),
        }
    }
}
