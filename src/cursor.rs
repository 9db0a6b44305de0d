//! The padded atomic counter every node and barrier is built from.

use std::sync::atomic::Ordering;
#[cfg(not(loom))]
use std::sync::atomic::AtomicI64;

#[cfg(loom)]
use loom::sync::atomic::AtomicI64;

use crossbeam_utils::CachePadded;
#[cfg(not(loom))]
use static_assertions::const_assert;

/// Sentinel meaning "nothing has been reserved or published yet".
pub const UNSET: i64 = -1;

/// A cache-line-padded `i64` counter.
///
/// Every producer, consumer, and barrier owns at least one of these as its
/// published position. Padding keeps a hot counter that's written by one
/// thread and polled by others off the cache line of its neighbors, which
/// matters far more here than in ordinary code — without it, a consumer
/// spinning on `load` would repeatedly invalidate the producer's store line
/// and vice versa.
#[derive(Debug)]
pub struct Cursor {
    value: CachePadded<AtomicI64>,
}

#[cfg(not(loom))]
const_assert!(std::mem::align_of::<CachePadded<AtomicI64>>() >= 64);

impl Cursor {
    /// A position cursor: nothing published yet.
    pub fn new() -> Self {
        Self {
            value: CachePadded::new(AtomicI64::new(UNSET)),
        }
    }

    /// A count cursor: zero events so far. Used where the counter tracks how
    /// many commits have happened rather than which index was last
    /// published (see the multi-producer node's commit count).
    pub fn counter() -> Self {
        Self {
            value: CachePadded::new(AtomicI64::new(0)),
        }
    }

    #[inline(always)]
    pub fn load(&self, order: Ordering) -> i64 {
        self.value.load(order)
    }

    #[inline(always)]
    pub fn store(&self, value: i64, order: Ordering) {
        self.value.store(value, order);
    }

    /// Returns the value prior to the add, matching `AtomicI64::fetch_add`.
    #[inline(always)]
    pub fn fetch_add(&self, delta: i64, order: Ordering) -> i64 {
        self.value.fetch_add(delta, order)
    }

    #[inline(always)]
    pub fn compare_exchange_weak(
        &self,
        current: i64,
        new: i64,
        success: Ordering,
        failure: Ordering,
    ) -> Result<i64, i64> {
        self.value.compare_exchange_weak(current, new, success, failure)
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}
