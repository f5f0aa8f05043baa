//! # splaymemo
//!
//! Two interchangeable memoization backends for recursive numeric functions.
//!
//! ## Architecture
//! - **SplayTree**: self-adjusting BST, every access splays its key to the root
//! - **BoundedMemoCache**: hash index + recency list, strict LRU eviction (O(1))
//! - **Memo**: the `lookup`/`store` seam both backends sit behind
//! - **compute**: memoized Fibonacci recursion over any `Memo`
//! - **SharedMemo**: one lock per operation plus hit/miss statistics
//! - **RangeSum**: LRU-cached range sums, invalidated on update

#![warn(missing_docs)]

mod config;
mod error;
mod fib;
mod lru;
mod memo;
mod node;
mod range;
mod shared;
mod splay;
mod stats;

#[cfg(test)]
mod proptests;

pub use config::{Backend, MemoConfig};
pub use error::{Error, Result};
pub use fib::{compute, compute_observed, MIN_FIB_CAPACITY};
pub use lru::{BoundedMemoCache, Capacity};
pub use memo::{Memo, MemoBackend};
pub use range::{Query, RangeSum, DEFAULT_RANGE_CAPACITY};
pub use shared::SharedMemo;
pub use splay::{Iter, SplayTree};
pub use stats::{CacheStats, StatsSnapshot};
