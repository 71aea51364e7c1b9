//! Time sources for the game loop

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Microsecond clock with the ability to wait.
pub trait Clock {
    /// Microseconds since the clock was created
    fn now_us(&self) -> u64;
    fn sleep_us(&self, us: u64);
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }

    fn sleep_us(&self, us: u64) {
        (**self).sleep_us(us)
    }
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_us(&self) -> u64 {
        self.origin.elapsed().as_micros() as u64
    }

    fn sleep_us(&self, us: u64) {
        std::thread::sleep(Duration::from_micros(us));
    }
}

/// Test clock: time only moves when told to; sleeping advances it instantly.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
    slept: AtomicU64,
}

impl ManualClock {
    pub fn new(start_us: u64) -> Self {
        Self {
            now: AtomicU64::new(start_us),
            slept: AtomicU64::new(0),
        }
    }

    pub fn advance(&self, us: u64) {
        self.now.fetch_add(us, Ordering::SeqCst);
    }

    pub fn set(&self, us: u64) {
        self.now.store(us, Ordering::SeqCst);
    }

    /// Total microseconds spent in `sleep_us`
    pub fn slept_us(&self) -> u64 {
        self.slept.load(Ordering::SeqCst)
    }
}

impl Clock for ManualClock {
    fn now_us(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }

    fn sleep_us(&self, us: u64) {
        self.slept.fetch_add(us, Ordering::SeqCst);
        self.advance(us);
    }
}
