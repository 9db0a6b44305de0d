use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::cursor::Cursor;
use crate::error::{validate_capacity, CapacityError};
use crate::yield_policy::YieldPolicy;

/// Single-reader consumer node.
///
/// Mirrors [`super::SpProducer`]: `reserve` busy-waits until the upstream
/// producer's cursor shows at least one unread slot, then returns the next
/// index to read. `commit` advances this node's own cursor, which is what
/// the upstream producer polls to avoid lapping an unread slot.
pub struct SpConsumer {
    cursor: Arc<Cursor>,
    producer: Option<Arc<Cursor>>,
    yield_policy: YieldPolicy,
}

impl SpConsumer {
    pub fn try_new(capacity: usize) -> Result<Self, CapacityError> {
        validate_capacity(capacity)?;
        Ok(Self {
            cursor: Arc::new(Cursor::new()),
            producer: None,
            yield_policy: YieldPolicy::default(),
        })
    }

    pub fn new(capacity: usize) -> Self {
        Self::try_new(capacity).expect("SpConsumer capacity must be a power of two >= 2")
    }

    pub fn with_yield_policy(mut self, policy: YieldPolicy) -> Self {
        self.yield_policy = policy;
        self
    }

    /// The handle upstream producers (or barriers) should depend on.
    pub fn committed(&self) -> Arc<Cursor> {
        self.cursor.clone()
    }

    /// Wires the node this consumer reads from.
    pub fn set_dependency(&mut self, producer: Arc<Cursor>) {
        self.producer = Some(producer);
    }

    /// Busy-waits until the next slot is readable, then returns its index.
    #[inline]
    pub fn reserve(&self) -> i64 {
        let producer = self
            .producer
            .as_ref()
            .expect("SpConsumer dependency not set before reserve");
        let next = self.cursor.load(Ordering::Relaxed) + 1;
        while producer.load(Ordering::Acquire) - (next - 1) < 1 {
            self.yield_policy.park();
        }
        next
    }

    /// Marks `index` as read, freeing its slot for reuse upstream.
    #[inline]
    pub fn commit(&self, index: i64) {
        self.cursor.store(index, Ordering::Release);
    }
}
