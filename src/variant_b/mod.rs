//! Per-cell generation-tag coordination (variant B).
//!
//! Instead of one shared position cursor, every node owns an array of
//! generation tags, one per ring cell, recording which lap of the ring last
//! wrote that cell. A dependent busy-waits on the exact cell it's about to
//! touch rather than on a single aggregate counter, so multiple producers
//! committing out of order still give downstream readers an accurate
//! per-slot completion signal. This is the scheme to reach for whenever more
//! than one producer shares a ring and something downstream needs to know
//! precisely which slots are done, not just how many.
//!
//! The trade-off is one more array read per reserve/commit than
//! [`crate::variant_a`] pays, and a barrier here has to wait on every
//! dependency's tag for every cell rather than tracking one running
//! minimum.

mod barrier;
mod generation;
mod multi_node;
mod node;

pub use barrier::GenerationBarrier;
pub use generation::GenerationArray;
pub use multi_node::GenMultiNode;
pub use node::GenNode;
