//! Running statistics over probe attempts.
//!
//! A single [`Statistics`] instance is shared (behind an `Arc`) between the
//! probe loop, which records every completed attempt, and the shutdown path,
//! which reads one snapshot once the loop has exited.

use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Counters {
    sent: u64,
    responded: u64,
    min_ms: f64,
    max_ms: f64,
    total_ms: f64,
}

/// Thread-safe accumulator of attempt outcomes.
///
/// The lock is held only for the duration of [`update`](Self::update) and
/// [`snapshot`](Self::snapshot), never across I/O.
#[derive(Debug, Default)]
pub struct Statistics {
    inner: Mutex<Counters>,
}

impl Statistics {
    /// Create an empty aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed attempt.
    pub fn update(&self, elapsed_ms: f64, success: bool) {
        let mut c = self.lock();

        c.sent += 1;
        if !success {
            return;
        }

        c.responded += 1;
        c.total_ms += elapsed_ms;

        // First response seeds both ends of the range.
        if c.responded == 1 {
            c.min_ms = elapsed_ms;
            c.max_ms = elapsed_ms;
            return;
        }

        if elapsed_ms < c.min_ms {
            c.min_ms = elapsed_ms;
        }
        if elapsed_ms > c.max_ms {
            c.max_ms = elapsed_ms;
        }
    }

    /// Read all counters at once and derive the average.
    pub fn snapshot(&self) -> Snapshot {
        let c = self.lock();
        let avg_ms = if c.responded > 0 {
            c.total_ms / c.responded as f64
        } else {
            0.0
        };

        Snapshot {
            sent: c.sent,
            responded: c.responded,
            min_ms: c.min_ms,
            max_ms: c.max_ms,
            avg_ms,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Counters> {
        // Counters stay consistent even if a holder panicked mid-update.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Point-in-time copy of the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Snapshot {
    pub sent: u64,
    pub responded: u64,
    /// Only meaningful when `responded > 0`.
    pub min_ms: f64,
    /// Only meaningful when `responded > 0`.
    pub max_ms: f64,
    /// `0.0` when nothing responded.
    pub avg_ms: f64,
}

impl Snapshot {
    /// Attempts that did not get a connection.
    pub fn lost(&self) -> u64 {
        self.sent - self.responded
    }

    /// Percentage of lost attempts, `0.0` when nothing was sent.
    pub fn loss_percent(&self) -> f64 {
        if self.sent == 0 {
            return 0.0;
        }
        self.lost() as f64 / self.sent as f64 * 100.0
    }
}
