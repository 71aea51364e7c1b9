//! Render hand-off between the simulation thread and a render thread
//!
//! A single in-flight buffer with a ready flag. The producer never waits: if
//! the previous frame has not been claimed yet, the new one is dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use fruitland_render::DrawList;

#[derive(Debug, Default)]
struct Slot {
    frame: DrawList,
    ready: bool,
    closed: bool,
}

#[derive(Debug, Default)]
pub struct FrameHandoff {
    slot: Mutex<Slot>,
    cond: Condvar,
}

impl FrameHandoff {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Offer a frame. Returns false (frame dropped) when one is still
    /// pending or the hand-off is closed.
    pub fn publish(&self, frame: &DrawList) -> bool {
        let mut slot = self.lock();
        if slot.ready || slot.closed {
            return false;
        }
        slot.frame.clear();
        slot.frame.extend(frame.iter().copied());
        slot.ready = true;
        drop(slot);
        self.cond.notify_one();
        true
    }

    /// Block until a frame is ready and copy it into `out`.
    ///
    /// Returns false once the hand-off is closed and drained.
    pub fn take(&self, out: &mut DrawList) -> bool {
        let mut slot = self.lock();
        while !slot.ready && !slot.closed {
            slot = self.cond.wait(slot).unwrap_or_else(PoisonError::into_inner);
        }
        if !slot.ready {
            return false;
        }
        out.clear();
        out.extend(slot.frame.iter().copied());
        slot.ready = false;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.lock().ready
    }

    /// Wake the consumer and refuse further frames.
    pub fn close(&self) {
        self.lock().closed = true;
        self.cond.notify_all();
    }
}

/// Shared quit flag checked at the top of every tick.
#[derive(Debug, Clone, Default)]
pub struct QuitSignal(Arc<AtomicBool>);

impl QuitSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
