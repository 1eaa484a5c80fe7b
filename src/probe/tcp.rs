//! TCP connect prober.
//!
//! Performs a full TCP handshake using the operating system's socket API,
//! times it, and closes the connection straight away. No data is exchanged.

use crate::error::ConnectError;
use crate::probe::traits::{ProbeOutcome, Prober};
use crate::types::ResolvedTarget;
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// TCP connect prober.
///
/// Does not require elevated privileges.
pub struct TcpProber {
    target: ResolvedTarget,
    timeout: Duration,
}

impl TcpProber {
    /// Create a new prober.
    ///
    /// # Arguments
    /// * `target` - Resolved address and port to connect to
    /// * `timeout` - Deadline for each connect attempt
    pub fn new(target: ResolvedTarget, timeout: Duration) -> Self {
        Self { target, timeout }
    }
}

#[async_trait]
impl Prober for TcpProber {
    fn target(&self) -> &ResolvedTarget {
        &self.target
    }

    async fn probe(&self, cancel: &CancellationToken) -> ProbeOutcome {
        let addr = self.target.socket_addr();
        let start = Instant::now();

        let attempt = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            res = timeout(self.timeout, TcpStream::connect(addr)) => Some(res),
        };
        let elapsed = start.elapsed();

        // Returning here drops any stream that raced the cancellation.
        if cancel.is_cancelled() {
            trace!(%addr, "attempt cancelled");
            return ProbeOutcome::Interrupted;
        }

        match attempt {
            None => ProbeOutcome::Interrupted,
            Some(Ok(Ok(stream))) => {
                let local_addr = stream.local_addr().ok();
                drop(stream);
                ProbeOutcome::Connected {
                    elapsed,
                    local_addr,
                }
            }
            Some(Ok(Err(e))) => {
                trace!(%addr, error = %e, "connect failed");
                ProbeOutcome::Failed {
                    elapsed,
                    error: ConnectError::classify(e),
                }
            }
            Some(Err(_)) => ProbeOutcome::Failed {
                elapsed,
                error: ConnectError::TimedOut,
            },
        }
    }
}
