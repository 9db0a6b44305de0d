use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::cursor::Cursor;
use crate::error::{validate_capacity, CapacityError};
use crate::yield_policy::YieldPolicy;

/// Publisher node safe for concurrent use by many producer threads.
///
/// Reservation is a compare-and-swap loop on a shared cursor, so two threads
/// racing for the same slot never both win it. Commit, however, only
/// increments a separate count — it does not tag which index finished. See
/// the module note on [`crate::variant_a`] for what that means downstream.
pub struct MpProducer {
    reservation: Cursor,
    committed: Arc<Cursor>,
    consumer: Option<Arc<Cursor>>,
    capacity: usize,
    yield_policy: YieldPolicy,
}

impl MpProducer {
    pub fn try_new(capacity: usize) -> Result<Self, CapacityError> {
        validate_capacity(capacity)?;
        Ok(Self {
            reservation: Cursor::new(),
            committed: Arc::new(Cursor::counter()),
            consumer: None,
            capacity,
            yield_policy: YieldPolicy::default(),
        })
    }

    pub fn new(capacity: usize) -> Self {
        Self::try_new(capacity).expect("MpProducer capacity must be a power of two >= 2")
    }

    pub fn with_yield_policy(mut self, policy: YieldPolicy) -> Self {
        self.yield_policy = policy;
        self
    }

    /// The handle downstream consumers should depend on: the commit count,
    /// not the reservation cursor.
    pub fn committed(&self) -> Arc<Cursor> {
        self.committed.clone()
    }

    pub fn set_dependency(&mut self, consumer: Arc<Cursor>) {
        self.consumer = Some(consumer);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Races with every other thread holding this producer for the next
    /// slot; returns only once this thread has won a distinct index.
    #[inline]
    pub fn reserve(&self) -> i64 {
        let consumer = self
            .consumer
            .as_ref()
            .expect("MpProducer dependency not set before reserve");
        loop {
            let previous = self.reservation.load(Ordering::Relaxed);
            while previous - consumer.load(Ordering::Acquire) == self.capacity as i64 {
                self.yield_policy.park();
            }
            if self
                .reservation
                .compare_exchange_weak(previous, previous + 1, Ordering::AcqRel, Ordering::Relaxed)
                .is_ok()
            {
                return previous + 1;
            }
            #[cfg(feature = "tracing")]
            tracing::trace!(previous, "mp_producer lost the reservation race, retrying");
        }
    }

    /// Increments the shared commit count. `index` is accepted for symmetry
    /// with the other node types but isn't recorded anywhere.
    #[inline]
    pub fn commit(&self, _index: i64) {
        self.committed.fetch_add(1, Ordering::Release);
    }
}
