//! One attempt end to end: probe, record, report.

use crate::error::ConnectError;
use crate::output::Reporter;
use crate::probe::traits::{as_millis_f64, ProbeOutcome, Prober};
use crate::stats::Statistics;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// How a completed attempt ended.
#[derive(Debug)]
pub enum Outcome {
    Success,
    Failure(ConnectError),
}

/// A completed attempt. Interrupted attempts never produce one.
#[derive(Debug)]
pub struct AttemptResult {
    /// 0-based, monotonic within a run.
    pub seq: u64,
    pub elapsed_ms: f64,
    pub outcome: Outcome,
}

impl AttemptResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success)
    }
}

/// Runs attempts through a [`Prober`], feeding the shared statistics and the
/// reporter.
pub struct Executor<P> {
    prober: P,
    stats: Arc<Statistics>,
    reporter: Reporter,
}

impl<P: Prober> Executor<P> {
    pub fn new(prober: P, stats: Arc<Statistics>, reporter: Reporter) -> Self {
        Self {
            prober,
            stats,
            reporter,
        }
    }

    /// Make attempt `seq`.
    ///
    /// Returns `None` when `cancel` fired mid-attempt; such an attempt is
    /// reported as aborted and left out of the statistics.
    pub async fn attempt(&self, seq: u64, cancel: &CancellationToken) -> Option<AttemptResult> {
        let target = self.prober.target();

        let result = match self.prober.probe(cancel).await {
            ProbeOutcome::Interrupted => {
                debug!(seq, "attempt interrupted");
                self.reporter.attempt_aborted();
                return None;
            }
            ProbeOutcome::Connected {
                elapsed,
                local_addr,
            } => {
                let elapsed_ms = as_millis_f64(elapsed);
                self.stats.update(elapsed_ms, true);
                self.reporter.success(target, seq, elapsed_ms, local_addr);
                AttemptResult {
                    seq,
                    elapsed_ms,
                    outcome: Outcome::Success,
                }
            }
            ProbeOutcome::Failed { elapsed, error } => {
                let elapsed_ms = as_millis_f64(elapsed);
                self.stats.update(elapsed_ms, false);
                self.reporter.failure(target, seq, elapsed_ms, &error);
                AttemptResult {
                    seq,
                    elapsed_ms,
                    outcome: Outcome::Failure(error),
                }
            }
        };

        debug!(
            seq,
            elapsed_ms = result.elapsed_ms,
            success = result.is_success(),
            "attempt complete"
        );
        Some(result)
    }
}
