use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::cursor::Cursor;
use crate::error::{validate_capacity, CapacityError};
use crate::variant_b::generation::GenerationArray;
use crate::yield_policy::YieldPolicy;

/// A producer node safe for concurrent use by many producer threads,
/// coordinating through per-cell generation tags.
///
/// Reservation is the same compare-and-swap loop as
/// [`crate::variant_a::MpProducer`], but additionally busy-waits on the
/// generation gate before every CAS attempt, so a thread never wins a slot
/// the downstream dependency hasn't actually cleared yet.
pub struct GenMultiNode {
    cursor: Cursor,
    committed: Arc<GenerationArray>,
    dependency: Option<Arc<GenerationArray>>,
    barrier: i64,
    shift: u32,
    yield_policy: YieldPolicy,
}

impl GenMultiNode {
    pub fn try_new(capacity: usize, leader: bool) -> Result<Self, CapacityError> {
        validate_capacity(capacity)?;
        Ok(Self {
            cursor: Cursor::new(),
            committed: Arc::new(GenerationArray::new(capacity)),
            dependency: None,
            barrier: if leader { capacity as i64 } else { 0 },
            shift: capacity.trailing_zeros(),
            yield_policy: YieldPolicy::default(),
        })
    }

    pub fn new(capacity: usize, leader: bool) -> Self {
        Self::try_new(capacity, leader).expect("GenMultiNode capacity must be a power of two >= 2")
    }

    pub fn with_yield_policy(mut self, policy: YieldPolicy) -> Self {
        self.yield_policy = policy;
        self
    }

    pub fn committed(&self) -> Arc<GenerationArray> {
        self.committed.clone()
    }

    pub fn set_dependency(&mut self, dependency: Arc<GenerationArray>) {
        self.dependency = Some(dependency);
    }

    #[inline]
    pub fn reserve(&self) -> i64 {
        let dependency = self
            .dependency
            .as_ref()
            .expect("GenMultiNode dependency not set before reserve");
        loop {
            let previous = self.cursor.load(Ordering::Relaxed);
            let next = previous + 1;
            let gate = next - self.barrier;
            let wanted = (gate >> self.shift) as i32;
            while dependency.load(next, Ordering::Acquire) != wanted {
                self.yield_policy.park();
            }
            if self
                .cursor
                .compare_exchange_weak(previous, next, Ordering::AcqRel, Ordering::Relaxed)
                .is_ok()
            {
                return next;
            }
        }
    }

    #[inline]
    pub fn commit(&self, index: i64) {
        let generation = (index >> self.shift) as i32;
        self.committed.store(index, generation, Ordering::Release);
    }
}
