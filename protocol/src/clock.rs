//! # Block Time
//!
//! The vault core never reads the system clock directly. Time comes from
//! the execution substrate — one timestamp per transaction, identical for
//! every check within that transaction. The [`Clock`] trait is that seam.
//!
//! Two implementations:
//!
//! - [`SystemClock`] — wall-clock seconds via `chrono`, for the node
//!   binary and demos.
//! - [`ManualClock`] — an explicitly advanced clock for tests. Daily
//!   windows and time-locks are untestable against a real clock unless
//!   you enjoy 24-hour CI runs.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

/// A source of the current block timestamp, in Unix seconds.
pub trait Clock: Send + Sync {
    /// The current timestamp. Within one vault operation this is read
    /// once and reused, so a single call observes a consistent instant.
    fn now(&self) -> u64;
}

/// Wall-clock time. What the node binary runs on.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        // Pre-1970 system clocks are not a supported configuration.
        Utc::now().timestamp().max(0) as u64
    }
}

/// A manually advanced clock for deterministic tests.
#[derive(Debug)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    /// Creates a clock frozen at `start` seconds.
    pub fn new(start: u64) -> Self {
        Self {
            now: AtomicU64::new(start),
        }
    }

    /// Moves the clock forward by `secs`.
    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }

    /// Jumps the clock to an absolute timestamp.
    pub fn set(&self, now: u64) {
        self.now.store(now, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
