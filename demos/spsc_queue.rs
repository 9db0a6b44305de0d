//! Single-producer, single-consumer queue — average of 1..=1,000,000.
//!
//! This crate coordinates indices only; the payload array is ours to own.
//! Demonstrates the minimal shape: reserve, write, commit, reserve, read,
//! commit.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use ringfabric::topology::spsc;

const RING_SIZE: usize = 1 << 16;
const MAX_NUMBER: u64 = 1_000_000;

fn main() {
    println!("spsc_queue: averaging 1..={MAX_NUMBER}");

    let queue = spsc(RING_SIZE);
    let producer = queue.producer;
    let consumer = queue.consumer;

    let slots: Arc<Vec<AtomicU64>> = Arc::new((0..RING_SIZE).map(|_| AtomicU64::new(0)).collect());

    let start = Instant::now();

    let reader_slots = slots.clone();
    let reader = thread::spawn(move || {
        let mut sum = 0u128;
        let mut count = 0u64;
        while count < MAX_NUMBER {
            let index = consumer.reserve();
            let value = reader_slots[index as usize & (RING_SIZE - 1)].load(Ordering::Relaxed);
            sum += value as u128;
            count += 1;
            consumer.commit(index);
        }
        (sum, count)
    });

    let mut number = 1u64;
    while number <= MAX_NUMBER {
        let index = producer.reserve();
        slots[index as usize & (RING_SIZE - 1)].store(number, Ordering::Relaxed);
        producer.commit(index);
        number += 1;
    }

    let (sum, count) = reader.join().unwrap();
    let elapsed = start.elapsed();

    println!("consumed {count} events in {elapsed:?}");
    println!("average: {:.2}", sum as f64 / count as f64);
}
