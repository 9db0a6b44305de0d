use std::sync::atomic::Ordering;
#[cfg(not(loom))]
use std::sync::atomic::{AtomicBool, AtomicI64};
use std::sync::Arc;

#[cfg(loom)]
use loom::sync::atomic::{AtomicBool, AtomicI64};

use crate::error::{validate_capacity, CapacityError};
use crate::variant_b::generation::GenerationArray;
use crate::yield_policy::YieldPolicy;

/// Aggregates several per-cell generation dependencies into one.
///
/// Unlike [`crate::variant_a::CursorBarrier`], which republishes a running
/// minimum, this barrier advances cell by cell: for each index it busy-waits
/// on every dependency's tag for that exact cell before tagging its own,
/// which is what lets something downstream of several producers trust a
/// specific index rather than an aggregate count.
///
/// The barrier's own progress counter is a plain atomic, not a `Cell`, even
/// though only the thread running [`GenerationBarrier::run`] ever writes it
/// — `stop` needs to be callable from another thread holding the same
/// `Arc<GenerationBarrier>`, which requires `Sync`.
pub struct GenerationBarrier {
    cursor: AtomicI64,
    committed: Arc<GenerationArray>,
    dependencies: Vec<Arc<GenerationArray>>,
    shift: u32,
    running: Arc<AtomicBool>,
    yield_policy: YieldPolicy,
}

impl GenerationBarrier {
    pub fn try_new(capacity: usize) -> Result<Self, CapacityError> {
        validate_capacity(capacity)?;
        Ok(Self {
            cursor: AtomicI64::new(-1),
            committed: Arc::new(GenerationArray::new(capacity)),
            dependencies: Vec::new(),
            shift: capacity.trailing_zeros(),
            running: Arc::new(AtomicBool::new(false)),
            yield_policy: YieldPolicy::default(),
        })
    }

    pub fn new(capacity: usize) -> Self {
        Self::try_new(capacity).expect("GenerationBarrier capacity must be a power of two >= 2")
    }

    pub fn with_yield_policy(mut self, policy: YieldPolicy) -> Self {
        self.yield_policy = policy;
        self
    }

    pub fn committed(&self) -> Arc<GenerationArray> {
        self.committed.clone()
    }

    pub fn add_dependency(&mut self, dependency: Arc<GenerationArray>) {
        self.dependencies.push(dependency);
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Runs until [`GenerationBarrier::stop`] is called from another thread.
    pub fn run(&self) {
        debug_assert!(!self.dependencies.is_empty(), "barrier has no dependencies wired");
        self.running.store(true, Ordering::Release);
        'outer: while self.running.load(Ordering::Acquire) {
            let index = self.cursor.load(Ordering::Relaxed) + 1;
            let wanted = (index >> self.shift) as i32;
            for dependency in &self.dependencies {
                while dependency.load(index, Ordering::Acquire) != wanted {
                    if !self.running.load(Ordering::Acquire) {
                        break 'outer;
                    }
                    self.yield_policy.park();
                }
            }
            self.cursor.store(index, Ordering::Relaxed);
            self.committed.store(index, wanted, Ordering::Release);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_only_once_every_dependency_clears_the_index() {
        let mut barrier = GenerationBarrier::new(4);
        let a = GenerationArray::new(4);
        let b = GenerationArray::new(4);
        a.store(0, 0, Ordering::Release);
        b.store(0, 0, Ordering::Release);
        barrier.add_dependency(Arc::new(a));
        barrier.add_dependency(Arc::new(b));

        let index = barrier.cursor.load(Ordering::Relaxed) + 1;
        let wanted = (index >> barrier.shift) as i32;
        for dependency in &barrier.dependencies {
            assert_eq!(dependency.load(index, Ordering::Acquire), wanted);
        }
        barrier.cursor.store(index, Ordering::Relaxed);
        barrier.committed.store(index, wanted, Ordering::Release);
        assert_eq!(barrier.committed().load(0, Ordering::Acquire), 0);
    }
}
