//! Shared-cursor coordination (variant A).
//!
//! A producer or consumer node here owns one [`crate::cursor::Cursor`] as its
//! published position and polls an upstream or downstream node's cursor as
//! its dependency. This is the cheaper of the two schemes in this crate and
//! the right default for single-producer pipelines.
//!
//! Its one gap: [`MpProducer`]'s commit only advances a shared count, not a
//! per-index tag, so a downstream consumer sees "N commits have happened"
//! rather than "this exact index is safe to read". For a single producer
//! that's immaterial (the count and the index march in lockstep), but with
//! several producers committing out of order it means a consumer can
//! observe the count reach a value before every slot behind it is actually
//! written. Use [`crate::variant_b`] when multiple producers must share a
//! ring and downstream correctness depends on per-slot completion.

mod barrier;
mod mp_producer;
mod sp_consumer;
mod sp_producer;

pub use barrier::CursorBarrier;
pub use mp_producer::MpProducer;
pub use sp_consumer::SpConsumer;
pub use sp_producer::SpProducer;
