//! Shutdown coordination.
//!
//! Runs the probe loop as a background task and races it against an
//! interrupt. Whichever finishes first, the loop task has fully exited before
//! the statistics are read and the summary is printed, exactly once.

use crate::output::Reporter;
use crate::probe::Prober;
use crate::scheduler::{LoopReport, ProbeLoop};
use crate::stats::{Snapshot, Statistics};
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// How a coordinated run ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shutdown {
    /// Final statistics, read after the loop exited.
    pub snapshot: Snapshot,
    /// True when an interrupt, not the attempt count, ended the run.
    pub interrupted: bool,
}

/// Owns the run's cancellation token and performs finalization.
pub struct Coordinator {
    cancel: CancellationToken,
    stats: Arc<Statistics>,
    reporter: Reporter,
}

impl Coordinator {
    pub fn new(stats: Arc<Statistics>, reporter: Reporter) -> Self {
        Self {
            cancel: CancellationToken::new(),
            stats,
            reporter,
        }
    }

    /// The token the probe loop must observe.
    pub fn token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run `probe_loop` to completion or until `interrupt` resolves, then
    /// print the summary for `host`.
    pub async fn run<P, F>(self, probe_loop: ProbeLoop<P>, host: &str, interrupt: F) -> Shutdown
    where
        P: Prober + 'static,
        F: Future<Output = ()>,
    {
        let mut task = tokio::spawn(probe_loop.run(self.token()));

        let finished = tokio::select! {
            joined = &mut task => Some(joined),
            _ = interrupt => None,
        };

        let interrupted = finished.is_none();
        let joined = match finished {
            Some(joined) => joined,
            None => {
                debug!("interrupt received, cancelling probe loop");
                self.reporter.interrupted();
                self.cancel.cancel();
                task.await
            }
        };

        match joined {
            Ok(report) => log_report(&report),
            Err(e) => warn!(error = %e, "probe loop task failed"),
        }

        let snapshot = self.stats.snapshot();
        self.reporter.summary(host, &snapshot);

        Shutdown {
            snapshot,
            interrupted,
        }
    }
}

fn log_report(report: &LoopReport) {
    debug!(
        completed = report.completed,
        cancelled = report.cancelled,
        "probe loop exited"
    );
}

/// Resolves on the first OS interrupt: Ctrl-C everywhere, SIGTERM on Unix.
///
/// Never resolves if no handler could be installed.
pub async fn os_interrupt() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                let ctrl_c = tokio::select! {
                    res = tokio::signal::ctrl_c() => Some(res),
                    _ = terminate.recv() => None,
                };
                if let Some(Err(e)) = ctrl_c {
                    warn!(error = %e, "failed to listen for Ctrl-C");
                    terminate.recv().await;
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                ctrl_c_or_never().await;
            }
        }
    }

    #[cfg(not(unix))]
    ctrl_c_or_never().await;
}

async fn ctrl_c_or_never() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
