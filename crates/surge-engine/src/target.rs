//! Torn-read-free target storage.

use std::sync::atomic::{AtomicU64, Ordering};

use surge_core::Cell;

/// One team's target cell, writable from a control thread at any time.
///
/// Both coordinates live packed in a single `AtomicU64`, so a concurrent
/// writer can never be observed with `x` updated and `y` stale. Slots
/// are independent per team; setting one team's target never serializes
/// against another's.
#[derive(Debug)]
pub struct TargetSlot(AtomicU64);

impl TargetSlot {
    /// Create a slot holding `cell`.
    pub fn new(cell: Cell) -> Self {
        Self(AtomicU64::new(pack(cell)))
    }

    /// Read the current target.
    pub fn load(&self) -> Cell {
        unpack(self.0.load(Ordering::Acquire))
    }

    /// Replace the target.
    pub fn store(&self, cell: Cell) {
        self.0.store(pack(cell), Ordering::Release);
    }
}

fn pack(cell: Cell) -> u64 {
    ((cell.x as u32 as u64) << 32) | (cell.y as u32 as u64)
}

fn unpack(bits: u64) -> Cell {
    Cell::new((bits >> 32) as u32 as i32, bits as u32 as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn roundtrips_coordinates() {
        let slot = TargetSlot::new(Cell::new(12, 34));
        assert_eq!(slot.load(), Cell::new(12, 34));
        slot.store(Cell::new(0, 7));
        assert_eq!(slot.load(), Cell::new(0, 7));
    }

    #[test]
    fn roundtrips_negative_coordinates() {
        // Clamping normally keeps targets non-negative, but the packing
        // itself must not corrupt any i32 pair.
        let slot = TargetSlot::new(Cell::new(-3, -9));
        assert_eq!(slot.load(), Cell::new(-3, -9));
    }

    #[test]
    fn concurrent_writes_never_tear() {
        let slot = Arc::new(TargetSlot::new(Cell::new(1, 2)));
        let writer = {
            let slot = Arc::clone(&slot);
            thread::spawn(move || {
                for _ in 0..10_000 {
                    slot.store(Cell::new(1, 2));
                    slot.store(Cell::new(30, 40));
                }
            })
        };
        for _ in 0..10_000 {
            let seen = slot.load();
            assert!(
                seen == Cell::new(1, 2) || seen == Cell::new(30, 40),
                "observed torn target {seen}"
            );
        }
        writer.join().unwrap();
    }
}
