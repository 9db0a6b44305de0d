//! Pre-wired producer/consumer graphs for the common shapes.
//!
//! Each builder returns the constructed nodes already wired to each other
//! (dependency edges set, including the reclaim edge back to the producer)
//! so callers only need to move the pieces to the threads that will drive
//! them and start calling `reserve`/`commit`.

use std::sync::Arc;

use crate::variant_a::{CursorBarrier, SpConsumer, SpProducer};
use crate::variant_b::{GenMultiNode, GenNode};

/// A single-producer, single-consumer queue.
pub struct SpscQueue {
    pub producer: SpProducer,
    pub consumer: SpConsumer,
}

/// Wires a producer and a consumer so the producer waits on the consumer's
/// read position and the consumer waits on the producer's write position.
pub fn spsc(capacity: usize) -> SpscQueue {
    let mut producer = SpProducer::new(capacity);
    let mut consumer = SpConsumer::new(capacity);
    producer.set_dependency(consumer.committed());
    consumer.set_dependency(producer.committed());
    SpscQueue { producer, consumer }
}

/// A multi-producer, single-consumer queue built on the per-cell generation
/// scheme, so the consumer sees accurate per-slot completion even though
/// producers commit out of order.
pub struct MpscQueue {
    pub producer: Arc<GenMultiNode>,
    pub consumer: GenNode,
}

/// Wires several producers' shared node to a single consumer. The producer
/// side is returned already behind an `Arc` since it's meant to be cloned
/// into every producer thread.
pub fn mpsc(capacity: usize) -> MpscQueue {
    let mut producer = GenMultiNode::new(capacity, true);
    let mut consumer = GenNode::new(capacity, false);
    consumer.set_dependency(producer.committed());
    producer.set_dependency(consumer.committed());
    MpscQueue {
        producer: Arc::new(producer),
        consumer,
    }
}

/// A single producer fanning out to several parallel consumers, joined by a
/// barrier, then handed to one terminal consumer — with the reclaim edge
/// closing the cycle back to the producer through the terminal consumer
/// rather than through any of the fan-out branches directly.
pub struct DisruptorTopology {
    pub producer: SpProducer,
    pub consumers: Vec<SpConsumer>,
    pub barrier: CursorBarrier,
    pub terminal: SpConsumer,
}

/// Builds a fan-out/join pipeline: one producer, `fan_out` parallel
/// consumers each reading every published slot independently, a barrier
/// waiting for all of them, and a terminal consumer gating the producer.
pub fn disruptor_fan_out(capacity: usize, fan_out: usize) -> DisruptorTopology {
    assert!(fan_out >= 1, "fan-out topology needs at least one parallel consumer");

    let mut producer = SpProducer::new(capacity);
    let mut consumers: Vec<SpConsumer> = (0..fan_out).map(|_| SpConsumer::new(capacity)).collect();
    for consumer in &mut consumers {
        consumer.set_dependency(producer.committed());
    }

    let mut barrier = CursorBarrier::new();
    for consumer in &consumers {
        barrier.add_dependency(consumer.committed());
    }

    let mut terminal = SpConsumer::new(capacity);
    terminal.set_dependency(barrier.committed());

    producer.set_dependency(terminal.committed());

    DisruptorTopology {
        producer,
        consumers,
        barrier,
        terminal,
    }
}
