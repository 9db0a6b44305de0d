//! End-to-end scenario tests across both coordination schemes and every
//! pre-wired topology.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

use ringfabric::topology::{disruptor_fan_out, mpsc, spsc};

const RING_SIZE: usize = 64;

/// A producer publishing every index from 0..N must be read back by its
/// consumer in the same order, with no gaps and no repeats.
#[test]
fn spsc_preserves_order_across_many_events() {
    let queue = spsc(RING_SIZE);
    let producer = queue.producer;
    let consumer = queue.consumer;

    const EVENTS: u64 = 50_000;
    let slots: Arc<Vec<AtomicU64>> = Arc::new((0..RING_SIZE).map(|_| AtomicU64::new(0)).collect());

    let reader_slots = slots.clone();
    let reader = thread::spawn(move || {
        let mut expected = 1u64;
        for _ in 0..EVENTS {
            let index = consumer.reserve();
            let value = reader_slots[index as usize % RING_SIZE].load(Ordering::Relaxed);
            assert_eq!(value, expected, "out-of-order delivery at event {expected}");
            expected += 1;
            consumer.commit(index);
        }
    });

    for i in 1..=EVENTS {
        let index = producer.reserve();
        slots[index as usize % RING_SIZE].store(i, Ordering::Relaxed);
        producer.commit(index);
    }

    reader.join().unwrap();
}

/// A single-producer pipeline never lets the producer lap the consumer: the
/// gap between what's published and what's been read never exceeds the
/// ring's capacity, even when the consumer deliberately lags.
#[test]
fn spsc_producer_never_overruns_consumer() {
    let capacity = 8i64;
    let queue = spsc(capacity as usize);
    let producer = queue.producer;
    let consumer = queue.consumer;
    let producer_cursor = producer.committed();
    let consumer_cursor = consumer.committed();

    const EVENTS: i64 = 5_000;

    let reader = thread::spawn(move || {
        for step in 0..EVENTS {
            if step % 3 == 0 {
                thread::yield_now();
            }
            let index = consumer.reserve();
            consumer.commit(index);
        }
    });

    for _ in 0..EVENTS {
        let index = producer.reserve();
        producer.commit(index);
        let gap = producer_cursor.load(Ordering::Acquire) - consumer_cursor.load(Ordering::Acquire);
        assert!(gap <= capacity, "producer overran consumer: gap {gap} > capacity {capacity}");
    }

    reader.join().unwrap();
}

/// Several producers racing on the same MPSC ring hand out strictly
/// distinct indices, and the consumer observes every one of them exactly
/// once.
#[test]
fn mpsc_delivers_every_event_from_every_producer_exactly_once() {
    let queue = mpsc(256);
    let producer = queue.producer;
    let consumer = queue.consumer;

    const PRODUCERS: u64 = 6;
    const PER_PRODUCER: u64 = 5_000;
    const TOTAL: u64 = PRODUCERS * PER_PRODUCER;

    let slots: Arc<Vec<AtomicU64>> = Arc::new((0..256).map(|_| AtomicU64::new(0)).collect());

    let reader_slots = slots.clone();
    let reader = thread::spawn(move || {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..TOTAL {
            let index = consumer.reserve();
            let value = reader_slots[index as usize % 256].load(Ordering::Relaxed);
            assert!(seen.insert(value), "value {value} observed twice");
            consumer.commit(index);
        }
        seen.len() as u64
    });

    thread::scope(|scope| {
        for producer_id in 0..PRODUCERS {
            let producer = producer.clone();
            let slots = slots.clone();
            scope.spawn(move || {
                for i in 0..PER_PRODUCER {
                    let index = producer.reserve();
                    slots[index as usize % 256].store(producer_id * PER_PRODUCER + i + 1, Ordering::Relaxed);
                    producer.commit(index);
                }
            });
        }
    });

    let delivered = reader.join().unwrap();
    assert_eq!(delivered, TOTAL);
}

/// A fan-out/join topology delivers every event to both parallel consumers,
/// and the terminal consumer never observes an index the barrier hasn't
/// cleared through both branches.
#[test]
fn fan_out_join_agrees_across_branches() {
    let topology = disruptor_fan_out(64, 2);
    let producer = topology.producer;
    let mut consumers = topology.consumers;
    let barrier = Arc::new(topology.barrier);
    let terminal = topology.terminal;

    let c2 = consumers.pop().unwrap();
    let c1 = consumers.pop().unwrap();

    const EVENTS: u64 = 20_000;
    let slots: Arc<Vec<AtomicU64>> = Arc::new((0..64).map(|_| AtomicU64::new(0)).collect());

    let checksum_a = {
        let slots = slots.clone();
        thread::spawn(move || {
            let mut sum = 0u128;
            for _ in 0..EVENTS {
                let index = c1.reserve();
                sum += slots[index as usize % 64].load(Ordering::Relaxed) as u128;
                c1.commit(index);
            }
            sum
        })
    };

    let checksum_b = {
        let slots = slots.clone();
        thread::spawn(move || {
            let mut sum = 0u128;
            for _ in 0..EVENTS {
                let index = c2.reserve();
                sum += slots[index as usize % 64].load(Ordering::Relaxed) as u128;
                c2.commit(index);
            }
            sum
        })
    };

    let barrier_thread = {
        let barrier = barrier.clone();
        thread::spawn(move || barrier.run())
    };

    let terminal_thread = thread::spawn(move || {
        for _ in 0..EVENTS {
            let index = terminal.reserve();
            terminal.commit(index);
        }
    });

    for i in 1..=EVENTS {
        let index = producer.reserve();
        slots[index as usize % 64].store(i, Ordering::Relaxed);
        producer.commit(index);
    }

    let sum_a = checksum_a.join().unwrap();
    let sum_b = checksum_b.join().unwrap();
    terminal_thread.join().unwrap();
    barrier.stop();
    barrier_thread.join().unwrap();

    assert_eq!(sum_a, sum_b);
    assert_eq!(sum_a, (1..=EVENTS as u128).sum::<u128>());
}

/// Wrap-around: a ring many times smaller than the event count still
/// delivers every event in order, proving index arithmetic handles laps
/// correctly.
#[test]
fn spsc_survives_many_laps_around_a_small_ring() {
    let queue = spsc(4);
    let producer = queue.producer;
    let consumer = queue.consumer;

    const EVENTS: u64 = 100_000;
    let reader = thread::spawn(move || {
        for expected in 0..EVENTS as i64 {
            let index = consumer.reserve();
            assert_eq!(index, expected);
            consumer.commit(index);
        }
    });

    for expected in 0..EVENTS as i64 {
        let index = producer.reserve();
        assert_eq!(index, expected);
        producer.commit(index);
    }

    reader.join().unwrap();
}
