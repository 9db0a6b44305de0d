//! Lock-free coordination for fixed-capacity ring buffers.
//!
//! This crate implements the cursor and barrier machinery behind an
//! LMAX-Disruptor-style pipeline without owning any payload storage itself:
//! callers put their own array behind the indices this crate hands out.
//! There are two coordination schemes, chosen per node:
//!
//! - [`variant_a`] — a single shared position cursor per node. Cheapest,
//!   and the right default for single-producer pipelines.
//! - [`variant_b`] — per-cell generation tags. Slightly more expensive, but
//!   gives downstream readers an accurate per-slot completion signal when
//!   several producers share a ring.
//!
//! [`topology`] wires up the common shapes (SPSC, MPSC, fan-out/join) so
//! most callers never construct a node directly.
//!
//! Every `reserve` call busy-waits cooperatively — [`YieldPolicy`] controls
//! how — rather than blocking on a condition variable or semaphore. There is
//! no OS wait anywhere in this crate.

pub mod constants;
pub mod cursor;
pub mod error;
pub mod topology;
pub mod variant_a;
pub mod variant_b;
pub mod yield_policy;

pub use cursor::Cursor;
pub use error::CapacityError;
pub use topology::{disruptor_fan_out, mpsc, spsc, DisruptorTopology, MpscQueue, SpscQueue};
pub use variant_a::{CursorBarrier, MpProducer, SpConsumer, SpProducer};
pub use variant_b::{GenMultiNode, GenNode, GenerationArray, GenerationBarrier};
pub use yield_policy::YieldPolicy;
