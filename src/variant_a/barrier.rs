use std::sync::atomic::Ordering;
#[cfg(not(loom))]
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[cfg(loom)]
use loom::sync::atomic::AtomicBool;

use crate::cursor::Cursor;
use crate::yield_policy::YieldPolicy;

/// Aggregates several upstream cursors into one, publishing the running
/// minimum.
///
/// A barrier is not driven by `reserve`/`commit` calls from its caller; it
/// runs its own loop (spawn it on a dedicated thread) and continuously
/// republishes `min(dependencies)` until [`CursorBarrier::stop`] is called.
/// Anything downstream that depends on the barrier's cursor is guaranteed to
/// never run ahead of the slowest upstream dependency.
pub struct CursorBarrier {
    cursor: Arc<Cursor>,
    dependencies: Vec<Arc<Cursor>>,
    running: Arc<AtomicBool>,
    yield_policy: YieldPolicy,
}

impl CursorBarrier {
    pub fn new() -> Self {
        Self {
            cursor: Arc::new(Cursor::new()),
            dependencies: Vec::new(),
            running: Arc::new(AtomicBool::new(false)),
            yield_policy: YieldPolicy::default(),
        }
    }

    pub fn with_yield_policy(mut self, policy: YieldPolicy) -> Self {
        self.yield_policy = policy;
        self
    }

    /// The handle downstream nodes should depend on.
    pub fn committed(&self) -> Arc<Cursor> {
        self.cursor.clone()
    }

    pub fn add_dependency(&mut self, dependency: Arc<Cursor>) {
        self.dependencies.push(dependency);
    }

    /// Runs until [`CursorBarrier::stop`] is called from another thread.
    pub fn run(&self) {
        debug_assert!(!self.dependencies.is_empty(), "barrier has no dependencies wired");
        self.running.store(true, Ordering::Release);
        while self.running.load(Ordering::Acquire) {
            let mut lowest = i64::MAX;
            for dependency in &self.dependencies {
                lowest = lowest.min(dependency.load(Ordering::Acquire));
            }
            self.cursor.store(lowest, Ordering::Release);
            self.yield_policy.park();
        }
    }

    /// Signals a running barrier loop to exit. Best-effort: the loop may
    /// complete one more pass before observing the flag.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

impl Default for CursorBarrier {
    fn default() -> Self {
        Self::new()
    }
}
