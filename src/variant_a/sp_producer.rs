use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::cursor::Cursor;
use crate::error::{validate_capacity, CapacityError};
use crate::yield_policy::YieldPolicy;

/// Single-writer publisher node.
///
/// `reserve` does not advance the cursor — it only checks that the next slot
/// is clear of the downstream dependency and hands back the index to write
/// into. `commit` is what actually publishes it. Calling `reserve` twice
/// without an intervening `commit` returns the same index both times; the
/// slot stays unpublished until `commit` runs.
pub struct SpProducer {
    cursor: Arc<Cursor>,
    consumer: Option<Arc<Cursor>>,
    capacity: usize,
    yield_policy: YieldPolicy,
}

impl SpProducer {
    pub fn try_new(capacity: usize) -> Result<Self, CapacityError> {
        validate_capacity(capacity)?;
        Ok(Self {
            cursor: Arc::new(Cursor::new()),
            consumer: None,
            capacity,
            yield_policy: YieldPolicy::default(),
        })
    }

    pub fn new(capacity: usize) -> Self {
        Self::try_new(capacity).expect("SpProducer capacity must be a power of two >= 2")
    }

    pub fn with_yield_policy(mut self, policy: YieldPolicy) -> Self {
        self.yield_policy = policy;
        self
    }

    /// The handle downstream consumers should depend on.
    pub fn committed(&self) -> Arc<Cursor> {
        self.cursor.clone()
    }

    /// Wires the node this producer must not overrun.
    pub fn set_dependency(&mut self, consumer: Arc<Cursor>) {
        self.consumer = Some(consumer);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Busy-waits until the next slot is clear, then returns its index.
    #[inline]
    pub fn reserve(&self) -> i64 {
        let consumer = self
            .consumer
            .as_ref()
            .expect("SpProducer dependency not set before reserve");
        let next = self.cursor.load(Ordering::Relaxed) + 1;
        if next - consumer.load(Ordering::Acquire) > self.capacity as i64 {
            #[cfg(feature = "tracing")]
            tracing::trace!(next, capacity = self.capacity, "sp_producer stalled behind consumer");
            while next - consumer.load(Ordering::Acquire) > self.capacity as i64 {
                self.yield_policy.park();
            }
        }
        next
    }

    /// Publishes `index`, making it visible to downstream consumers.
    #[inline]
    pub fn commit(&self, index: i64) {
        self.cursor.store(index, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserve_is_stable_until_commit() {
        let mut producer = SpProducer::new(4);
        let consumer = Arc::new(Cursor::new());
        producer.set_dependency(consumer);
        assert_eq!(producer.reserve(), 0);
        assert_eq!(producer.reserve(), 0);
        producer.commit(0);
        assert_eq!(producer.reserve(), 1);
    }
}
