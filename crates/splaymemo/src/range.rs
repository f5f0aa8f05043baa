//! Memoized range sums over a mutable array
//!
//! Sums are cached per normalized `(lo, hi)` range in a
//! [`BoundedMemoCache`]. Updating an element drops every cached range
//! that covers it, so a cached sum is never stale.

use tracing::trace;

use crate::error::{Error, Result};
use crate::lru::{BoundedMemoCache, Capacity};
use crate::stats::CacheStats;

/// Default number of cached ranges
pub const DEFAULT_RANGE_CAPACITY: usize = 50_000;

/// A query against a [`RangeSum`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    /// Sum of the elements between two indices, both inclusive, in either order
    Range(usize, usize),
    /// Overwrite one element
    Update(usize, i64),
}

/// Array with an LRU cache of range sums
pub struct RangeSum {
    values: Vec<i64>,
    cache: BoundedMemoCache<(usize, usize), i64>,
    stats: CacheStats,
}

impl RangeSum {
    /// Wrap `values` with a cache of the given capacity
    pub fn new(values: Vec<i64>, capacity: Capacity) -> Self {
        Self {
            values,
            cache: BoundedMemoCache::new(capacity),
            stats: CacheStats::new(),
        }
    }

    /// Wrap `values` with [`DEFAULT_RANGE_CAPACITY`] cached ranges
    pub fn with_default_capacity(values: Vec<i64>) -> Self {
        let capacity = Capacity::bounded(DEFAULT_RANGE_CAPACITY).unwrap_or_default();
        Self::new(values, capacity)
    }

    /// Sum of `values[l..=r]`; `l > r` is treated as `r..=l`
    pub fn sum(&mut self, l: usize, r: usize) -> Result<i64> {
        let range = self.normalize(l, r)?;

        if let Some(&sum) = self.cache.get(&range) {
            self.stats.record_hit();
            return Ok(sum);
        }

        self.stats.record_miss();
        let sum = self.values[range.0..=range.1].iter().sum();
        if self.cache.put(range, sum).is_some() {
            self.stats.record_eviction();
        }
        self.stats.record_insert();
        Ok(sum)
    }

    /// Sum computed directly, bypassing and not touching the cache
    pub fn sum_uncached(&self, l: usize, r: usize) -> Result<i64> {
        let (lo, hi) = self.normalize(l, r)?;
        Ok(self.values[lo..=hi].iter().sum())
    }

    /// Overwrite `values[index]` and drop the cached ranges covering it
    pub fn update(&mut self, index: usize, value: i64) -> Result<()> {
        self.check(index)?;
        self.values[index] = value;

        let dropped = self.cache.retain(|&(lo, hi), _| index < lo || index > hi);
        trace!(index, dropped, "invalidated cached ranges");
        Ok(())
    }

    /// Run one query; range queries yield their sum
    pub fn apply(&mut self, query: Query) -> Result<Option<i64>> {
        match query {
            Query::Range(l, r) => self.sum(l, r).map(Some),
            Query::Update(index, value) => self.update(index, value).map(|()| None),
        }
    }

    /// Current array contents
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Number of cached ranges
    pub fn cached_ranges(&self) -> usize {
        self.cache.len()
    }

    /// Hit/miss counters
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Drop every cached sum and reset statistics
    pub fn clear_cache(&mut self) {
        self.cache.clear();
        self.stats.reset();
    }

    fn normalize(&self, l: usize, r: usize) -> Result<(usize, usize)> {
        let (lo, hi) = if l > r { (r, l) } else { (l, r) };
        self.check(hi)?;
        Ok((lo, hi))
    }

    fn check(&self, index: usize) -> Result<()> {
        if index < self.values.len() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index,
                len: self.values.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RangeSum {
        RangeSum::new(vec![5, 1, 4, 2, 8, 3], Capacity::bounded(16).unwrap())
    }

    #[test]
    fn test_range_sum_basic() {
        let mut sums = sample();

        assert_eq!(sums.sum(0, 5), Ok(23));
        assert_eq!(sums.sum(2, 2), Ok(4));
        assert_eq!(sums.sum(1, 3), Ok(7));
        assert_eq!(sums.stats().misses(), 3);
        assert_eq!(sums.cached_ranges(), 3);
    }

    #[test]
    fn test_range_sum_cache_hit() {
        let mut sums = sample();

        sums.sum(1, 4).unwrap();
        assert_eq!(sums.sum(1, 4), Ok(15));
        assert_eq!(sums.stats().hits(), 1);
        assert_eq!(sums.stats().misses(), 1);
    }

    #[test]
    fn test_range_sum_swapped_bounds() {
        let mut sums = sample();

        assert_eq!(sums.sum(4, 1), Ok(15));
        // Same cache entry as the ordered query
        assert_eq!(sums.sum(1, 4), Ok(15));
        assert_eq!(sums.stats().hits(), 1);
        assert_eq!(sums.cached_ranges(), 1);
    }

    #[test]
    fn test_update_invalidates_covering_ranges() {
        let mut sums = sample();

        sums.sum(0, 5).unwrap();
        sums.sum(0, 1).unwrap();
        sums.sum(3, 5).unwrap();
        assert_eq!(sums.cached_ranges(), 3);

        sums.update(4, 100).unwrap();

        // (3, 5) and (0, 5) covered index 4; (0, 1) did not
        assert_eq!(sums.cached_ranges(), 1);
        assert_eq!(sums.sum(0, 5), Ok(115));
        assert_eq!(sums.sum(3, 5), Ok(105));
        assert_eq!(sums.sum(0, 1), Ok(6));
        assert_eq!(sums.stats().hits(), 1);
    }

    #[test]
    fn test_no_stale_sum_after_update() {
        let mut sums = sample();

        assert_eq!(sums.sum(2, 2), Ok(4));
        sums.update(2, -7).unwrap();
        assert_eq!(sums.sum(2, 2), Ok(-7));
        assert_eq!(sums.sum(2, 2), sums.sum_uncached(2, 2));
    }

    #[test]
    fn test_out_of_range() {
        let mut sums = sample();

        assert_eq!(
            sums.sum(0, 6),
            Err(Error::IndexOutOfRange { index: 6, len: 6 })
        );
        assert_eq!(
            sums.sum(9, 2),
            Err(Error::IndexOutOfRange { index: 9, len: 6 })
        );
        assert_eq!(
            sums.update(6, 1),
            Err(Error::IndexOutOfRange { index: 6, len: 6 })
        );
        assert_eq!(sums.values(), &[5, 1, 4, 2, 8, 3]);
    }

    #[test]
    fn test_bounded_cache_evicts_ranges() {
        let mut sums = RangeSum::new((0..10).collect(), Capacity::bounded(2).unwrap());

        sums.sum(0, 1).unwrap();
        sums.sum(0, 2).unwrap();
        sums.sum(0, 3).unwrap();

        assert_eq!(sums.cached_ranges(), 2);
        assert_eq!(sums.stats().evictions(), 1);
        // (0, 1) was evicted and gets recomputed
        assert_eq!(sums.sum(0, 1), Ok(1));
        assert_eq!(sums.stats().misses(), 4);
    }

    #[test]
    fn test_apply_queries() {
        let mut sums = sample();
        let queries = [
            Query::Range(0, 2),
            Query::Update(1, 10),
            Query::Range(2, 0),
            Query::Range(5, 5),
        ];

        let results: Vec<_> = queries
            .into_iter()
            .map(|q| sums.apply(q).unwrap())
            .collect();
        assert_eq!(results, vec![Some(10), None, Some(19), Some(3)]);
    }

    #[test]
    fn test_clear_cache() {
        let mut sums = RangeSum::with_default_capacity(vec![1, 2, 3]);

        sums.sum(0, 2).unwrap();
        sums.clear_cache();

        assert_eq!(sums.cached_ranges(), 0);
        assert_eq!(sums.stats().misses(), 0);
        assert_eq!(sums.sum(0, 2), Ok(6));
    }
}
