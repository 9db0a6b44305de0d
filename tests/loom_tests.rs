//! Exhaustive interleaving checks for the reserve/commit protocol, run under
//! loom rather than real threads.
//!
//! loom replaces the standard library's atomics and threads with its own so
//! it can explore every legal interleaving instead of relying on luck to
//! hit a race. Run with:
//!
//!   RUSTFLAGS="--cfg loom" cargo test --release --test loom_tests
//!
//! Left out of ordinary `cargo test` runs since loom model checking is slow
//! and these builds aren't meant to run outside a loom-cfg'd build anyway —
//! the whole file is gated on `cfg(loom)`.

#![cfg(loom)]

use loom::thread;
use ringfabric::topology::spsc;

#[test]
fn spsc_single_event_round_trip_has_no_lost_or_duplicated_publish() {
    loom::model(|| {
        let queue = spsc(2);
        let producer = queue.producer;
        let consumer = queue.consumer;

        let reader = thread::spawn(move || {
            let index = consumer.reserve();
            consumer.commit(index);
            index
        });

        let index = producer.reserve();
        producer.commit(index);

        let read = reader.join().unwrap();
        assert_eq!(read, index);
    });
}

#[test]
fn spsc_two_events_preserve_order_under_every_interleaving() {
    loom::model(|| {
        let queue = spsc(4);
        let producer = queue.producer;
        let consumer = queue.consumer;

        let reader = thread::spawn(move || {
            let first = consumer.reserve();
            consumer.commit(first);
            let second = consumer.reserve();
            consumer.commit(second);
            (first, second)
        });

        let first = producer.reserve();
        producer.commit(first);
        let second = producer.reserve();
        producer.commit(second);

        let (read_first, read_second) = reader.join().unwrap();
        assert_eq!((read_first, read_second), (first, second));
        assert!(read_first < read_second);
    });
}
