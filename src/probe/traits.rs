//! Prober trait abstraction.
//!
//! Defines a common interface for a single timed connect attempt, so the
//! executor and the probe loop can be driven by fakes in tests.

use crate::error::ConnectError;
use crate::types::ResolvedTarget;
use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Raw outcome of one connect attempt.
#[derive(Debug)]
pub enum ProbeOutcome {
    /// The handshake completed. The connection is already closed.
    Connected {
        elapsed: Duration,
        local_addr: Option<SocketAddr>,
    },
    /// The connect call failed or hit its deadline.
    Failed {
        elapsed: Duration,
        error: ConnectError,
    },
    /// Parent cancellation fired while the attempt was in flight.
    Interrupted,
}

/// Common interface for connect probers.
#[async_trait]
pub trait Prober: Send + Sync {
    /// The target every attempt is made against.
    fn target(&self) -> &ResolvedTarget;

    /// Make one attempt.
    ///
    /// Must return [`ProbeOutcome::Interrupted`] rather than a failure when
    /// `cancel` fires first, and must not leave a connection open on any path.
    async fn probe(&self, cancel: &CancellationToken) -> ProbeOutcome;
}

/// Convert a duration to fractional milliseconds with microsecond resolution.
pub fn as_millis_f64(elapsed: Duration) -> f64 {
    elapsed.as_micros() as f64 / 1000.0
}
