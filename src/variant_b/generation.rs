use std::sync::atomic::Ordering;
#[cfg(not(loom))]
use std::sync::atomic::AtomicI32;

#[cfg(loom)]
use loom::sync::atomic::AtomicI32;

/// One generation tag per ring cell.
///
/// A cell's tag is the lap number (`index >> shift`) of the last write to
/// that cell, or `-1` if it has never been written. Readers index with
/// `index & mask` and compare against the lap they expect; a match means
/// "this exact index has been published", which is what makes the scheme
/// safe for out-of-order multi-producer commits in a way a single shared
/// counter is not.
pub struct GenerationArray {
    cells: Box<[AtomicI32]>,
    mask: usize,
    shift: u32,
}

impl GenerationArray {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity.is_power_of_two() && capacity >= 2);
        let cells = (0..capacity).map(|_| AtomicI32::new(-1)).collect::<Vec<_>>();
        Self {
            cells: cells.into_boxed_slice(),
            mask: capacity - 1,
            shift: capacity.trailing_zeros(),
        }
    }

    pub fn mask(&self) -> usize {
        self.mask
    }

    pub fn shift(&self) -> u32 {
        self.shift
    }

    #[inline(always)]
    pub fn load(&self, index: i64, order: Ordering) -> i32 {
        self.cells[index as usize & self.mask].load(order)
    }

    #[inline(always)]
    pub fn store(&self, index: i64, generation: i32, order: Ordering) {
        self.cells[index as usize & self.mask].store(generation, order);
    }
}
