//! Single-slot in-flight token.
//!
//! Each workflow may have at most one operation in flight. New invocations
//! are rejected while the slot is occupied instead of queuing; the host UI
//! additionally disables the trigger, but the slot is what actually
//! enforces the invariant.

use std::sync::atomic::{AtomicBool, Ordering};

/// A one-capacity occupancy token.
#[derive(Debug, Default)]
pub struct InFlightSlot {
    occupied: AtomicBool,
}

impl InFlightSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tries to occupy the slot.
    ///
    /// Returns `None` when an operation is already in flight. The slot is
    /// released when the returned guard is dropped.
    pub fn try_acquire(&self) -> Option<InFlightGuard<'_>> {
        if self.occupied.swap(true, Ordering::SeqCst) {
            None
        } else {
            Some(InFlightGuard { slot: self })
        }
    }

    /// True while an operation is in flight.
    pub fn is_occupied(&self) -> bool {
        self.occupied.load(Ordering::SeqCst)
    }
}

/// Releases the slot on drop.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    slot: &'a InFlightSlot,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.slot.occupied.store(false, Ordering::SeqCst);
    }
}
