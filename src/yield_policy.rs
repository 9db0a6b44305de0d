//! Cooperative stall strategies for busy-wait loops.
//!
//! Every reserve path in this crate busy-waits rather than parking on a
//! condition variable or semaphore — there is no OS wait anywhere in this
//! crate. `YieldPolicy` only controls how aggressively a stalled thread gives
//! up CPU between polls; it generalizes the two strategies actually used by
//! the source this crate is descended from (a plain scheduler yield, and a
//! fixed sleep for lower-priority background stages).

use std::time::Duration;

/// How a thread should behave while busy-waiting for a dependency to advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YieldPolicy {
    /// Spin on a CPU hint (`core::hint::spin_loop`). Lowest latency, burns a
    /// full core. Appropriate for producers/consumers pinned to dedicated
    /// cores.
    SpinLoop,
    /// Yield the OS thread's remaining quantum (`std::thread::yield_now`).
    /// A reasonable default when cores are oversubscribed.
    ThreadYield,
    /// Sleep a fixed duration between polls. Highest latency, lowest CPU
    /// cost; suited to background or best-effort stages.
    Sleep(Duration),
}

impl Default for YieldPolicy {
    fn default() -> Self {
        YieldPolicy::SpinLoop
    }
}

impl YieldPolicy {
    #[inline(always)]
    pub fn park(&self) {
        match self {
            YieldPolicy::SpinLoop => std::hint::spin_loop(),
            YieldPolicy::ThreadYield => std::thread::yield_now(),
            YieldPolicy::Sleep(duration) => std::thread::sleep(*duration),
        }
    }
}
