//! Text of every line tcping prints, without styling.

use crate::error::ConnectError;
use crate::stats::Snapshot;
use crate::types::ResolvedTarget;
use std::net::SocketAddr;

pub fn header(target: &ResolvedTarget) -> String {
    format!(
        "TCP ping {} ({} - {}) port {}",
        target.host,
        target.family(),
        target.ip,
        target.port
    )
}

pub fn success(target: &ResolvedTarget, seq: u64, elapsed_ms: f64) -> String {
    format!(
        "Reply from {}: seq={} time={:.2}ms",
        target.endpoint(),
        seq,
        elapsed_ms
    )
}

pub fn success_details(target: &ResolvedTarget, local: Option<SocketAddr>) -> String {
    let local = local.map_or_else(|| "unknown".to_string(), |addr| addr.to_string());
    format!("  details: local={}, remote={}", local, target.endpoint())
}

pub fn failure(target: &ResolvedTarget, seq: u64, error: &ConnectError) -> String {
    format!(
        "TCP connect to {} failed: seq={} error={}",
        target.endpoint(),
        seq,
        error
    )
}

pub fn failure_details(target: &ResolvedTarget, elapsed_ms: f64) -> String {
    format!(
        "  details: attempt took {:.2}ms, target {}",
        elapsed_ms,
        target.endpoint()
    )
}

pub const ATTEMPT_ABORTED: &str = "Attempt aborted, operation interrupted";

pub const INTERRUPTED: &str = "Operation interrupted.";

/// Summary block. Counts appear only once something was sent, RTT only once
/// something responded.
pub fn summary(host: &str, snap: &Snapshot) -> Vec<String> {
    let mut lines = vec![format!("--- {} TCP ping statistics ---", host)];

    if snap.sent > 0 {
        lines.push(format!(
            "Sent = {}, Received = {}, Lost = {} ({:.1}% loss)",
            snap.sent,
            snap.responded,
            snap.lost(),
            snap.loss_percent()
        ));

        if snap.responded > 0 {
            lines.push(format!(
                "RTT: min = {:.2}ms, max = {:.2}ms, avg = {:.2}ms",
                snap.min_ms, snap.max_ms, snap.avg_ms
            ));
        }
    }

    lines
}
