use std::cell::Cell;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::error::{validate_capacity, CapacityError};
use crate::variant_b::generation::GenerationArray;
use crate::yield_policy::YieldPolicy;

/// A producer or consumer node driven by exactly one thread, coordinating
/// through per-cell generation tags.
///
/// `Cell<i64>` makes this type `!Sync` on purpose: a `GenNode` is meant to
/// live on one thread for its whole life. Sharing one across threads would
/// need [`super::GenMultiNode`] instead, which pays for a CAS loop to make
/// that safe.
pub struct GenNode {
    cursor: Cell<i64>,
    committed: Arc<GenerationArray>,
    dependency: Option<Arc<GenerationArray>>,
    barrier: i64,
    shift: u32,
    yield_policy: YieldPolicy,
}

impl GenNode {
    /// `leader` marks the node that starts a ring's dependency cycle (the
    /// lead producer in a single-producer topology): it begins with its
    /// full capacity of slack against its dependency instead of none.
    pub fn try_new(capacity: usize, leader: bool) -> Result<Self, CapacityError> {
        validate_capacity(capacity)?;
        Ok(Self {
            cursor: Cell::new(-1),
            committed: Arc::new(GenerationArray::new(capacity)),
            dependency: None,
            barrier: if leader { capacity as i64 } else { 0 },
            shift: capacity.trailing_zeros(),
            yield_policy: YieldPolicy::default(),
        })
    }

    pub fn new(capacity: usize, leader: bool) -> Self {
        Self::try_new(capacity, leader).expect("GenNode capacity must be a power of two >= 2")
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

    /// Busy-waits until the dependency's tag for the next index matches the
    /// lap this node expects, then returns that index.
    #[inline]
    pub fn reserve(&self) -> i64 {
        let dependency = self
            .dependency
            .as_ref()
            .expect("GenNode dependency not set before reserve");
        let index = self.cursor.get() + 1;
        self.cursor.set(index);
        let gate = index - self.barrier;
        let wanted = (gate >> self.shift) as i32;
        while dependency.load(index, Ordering::Acquire) != wanted {
            self.yield_policy.park();
        }
        index
    }

    /// Publishes `index` by tagging its cell with the current lap.
    #[inline]
    pub fn commit(&self, index: i64) {
        let generation = (index >> self.shift) as i32;
        self.committed.store(index, generation, Ordering::Release);
    }
}
