//! Memoized Fibonacci recursion
//!
//! `f(0) = 0`, `f(1) = 1`, `f(n) = f(n - 1) + f(n - 2)`. The memo is
//! consulted before every descent and every computed value, base cases
//! included, is written back. The value type bounds how far `n` may go:
//! `u64` holds `f(93)`, `u128` holds `f(186)`.

use std::ops::Add;

use crate::memo::Memo;

/// Smallest LRU capacity that keeps `f(n - 1)` and `f(n - 2)` resident
///
/// Below this each `f(n - 2)` lookup misses and the recursion goes
/// exponential.
pub const MIN_FIB_CAPACITY: usize = 3;

/// Compute `f(n)` through `memo`
pub fn compute<M, V>(n: u64, memo: &mut M) -> V
where
    M: Memo<u64, V> + ?Sized,
    V: Clone + Add<Output = V> + From<u8>,
{
    compute_observed(n, memo, &mut |_| {})
}

/// Like [`compute`], calling `observer(k)` each time `f(k)` has to be
/// recomputed because the memo missed.
pub fn compute_observed<M, V, F>(n: u64, memo: &mut M, observer: &mut F) -> V
where
    M: Memo<u64, V> + ?Sized,
    V: Clone + Add<Output = V> + From<u8>,
    F: FnMut(u64),
{
    if let Some(value) = memo.lookup(&n) {
        return value;
    }

    observer(n);
    let value = match n {
        0 => V::from(0),
        1 => V::from(1),
        _ => compute_observed(n - 1, memo, observer) + compute_observed(n - 2, memo, observer),
    };

    memo.store(n, value.clone());
    value
}
