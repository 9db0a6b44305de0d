//! Multi-producer, single-consumer queue — four producers racing to publish
//! 250,000 events each, one consumer summing everything.
//!
//! Uses the per-cell generation scheme so the consumer's view of "done" is
//! exact even though the four producers commit out of order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use ringfabric::topology::mpsc;

const RING_SIZE: usize = 1 << 16;
const PRODUCERS: u64 = 4;
const PER_PRODUCER: u64 = 250_000;

fn main() {
    println!("mpsc_queue: {PRODUCERS} producers x {PER_PRODUCER} events");

    let queue = mpsc(RING_SIZE);
    let producer = queue.producer;
    let consumer = queue.consumer;

    let slots: Arc<Vec<AtomicU64>> = Arc::new((0..RING_SIZE).map(|_| AtomicU64::new(0)).collect());

    let start = Instant::now();

    let reader_slots = slots.clone();
    let total_events = PRODUCERS * PER_PRODUCER;
    let reader = thread::spawn(move || {
        let mut sum = 0u128;
        let mut count = 0u64;
        while count < total_events {
            let index = consumer.reserve();
            let value = reader_slots[index as usize & (RING_SIZE - 1)].load(Ordering::Relaxed);
            sum += value as u128;
            count += 1;
            consumer.commit(index);
        }
        (sum, count)
    });

    thread::scope(|scope| {
        for producer_id in 0..PRODUCERS {
            let producer = producer.clone();
            let slots = slots.clone();
            scope.spawn(move || {
                for i in 0..PER_PRODUCER {
                    let index = producer.reserve();
                    slots[index as usize & (RING_SIZE - 1)]
                        .store(producer_id * PER_PRODUCER + i + 1, Ordering::Relaxed);
                    producer.commit(index);
                }
            });
        }
    });

    let (sum, count) = reader.join().unwrap();
    let elapsed = start.elapsed();

    println!("consumed {count} events from {PRODUCERS} producers in {elapsed:?}");
    println!("sum: {sum}");
}
