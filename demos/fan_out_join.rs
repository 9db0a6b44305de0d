//! Fan-out/join pipeline: one producer, two independent parallel consumers,
//! a join barrier, and a terminal consumer that gates the producer.
//!
//! P -> {C1, C2} -> barrier -> terminal -> P (reclaim edge)

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use ringfabric::topology::disruptor_fan_out;

const RING_SIZE: usize = 1 << 14;
const EVENTS: u64 = 200_000;

fn main() {
    println!("fan_out_join: {EVENTS} events through a 2-way fan out");

    let topology = disruptor_fan_out(RING_SIZE, 2);
    let producer = topology.producer;
    let mut consumers = topology.consumers;
    let barrier = Arc::new(topology.barrier);
    let terminal = topology.terminal;

    let c2 = consumers.pop().unwrap();
    let c1 = consumers.pop().unwrap();

    let slots: Arc<Vec<AtomicU64>> = Arc::new((0..RING_SIZE).map(|_| AtomicU64::new(0)).collect());

    let start = Instant::now();

    let checksum_a = {
        let slots = slots.clone();
        thread::spawn(move || {
            let mut sum = 0u128;
            for _ in 0..EVENTS {
                let index = c1.reserve();
                sum += slots[index as usize & (RING_SIZE - 1)].load(Ordering::Relaxed) as u128;
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
                sum += slots[index as usize & (RING_SIZE - 1)].load(Ordering::Relaxed) as u128;
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
        let mut count = 0u64;
        while count < EVENTS {
            let index = terminal.reserve();
            terminal.commit(index);
            count += 1;
        }
    });

    for i in 0..EVENTS {
        let index = producer.reserve();
        slots[index as usize & (RING_SIZE - 1)].store(i + 1, Ordering::Relaxed);
        producer.commit(index);
    }

    let sum_a = checksum_a.join().unwrap();
    let sum_b = checksum_b.join().unwrap();
    terminal_thread.join().unwrap();
    barrier.stop();
    barrier_thread.join().unwrap();

    println!("both consumers agree: {}", sum_a == sum_b);
    println!("elapsed: {:?}", start.elapsed());
}
