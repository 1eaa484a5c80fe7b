//! Validated run options handed to the probe core.

use crate::scheduler::Schedule;
use crate::types::FamilyPreference;
use std::time::Duration;

/// Options for one run. Immutable once validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOptions {
    pub family: FamilyPreference,
    /// Number of attempts; 0 runs until interrupted.
    pub count: u64,
    pub interval: Duration,
    pub timeout: Duration,
    pub color: bool,
    pub verbose: bool,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            family: FamilyPreference::Auto,
            count: 0,
            interval: Duration::from_millis(1000),
            timeout: Duration::from_millis(1000),
            color: false,
            verbose: false,
        }
    }
}

impl ProbeOptions {
    /// Pacing for the probe loop.
    pub fn schedule(&self) -> Schedule {
        Schedule {
            count: self.count,
            interval: self.interval,
        }
    }
}
