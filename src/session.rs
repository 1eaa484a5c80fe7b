//! Wires one run together: prober, executor, loop and coordinator.

use crate::config::ProbeOptions;
use crate::output::Reporter;
use crate::probe::{Executor, TcpProber};
use crate::scheduler::ProbeLoop;
use crate::shutdown::{Coordinator, Shutdown};
use crate::stats::Statistics;
use crate::types::ResolvedTarget;
use std::future::Future;
use std::sync::Arc;
use tracing::info;

/// Probe `target` until the count is exhausted or `interrupt` resolves.
///
/// Prints the banner, every attempt line and the final summary through
/// `reporter`.
pub async fn run<F>(
    target: ResolvedTarget,
    options: &ProbeOptions,
    reporter: Reporter,
    interrupt: F,
) -> Shutdown
where
    F: Future<Output = ()>,
{
    reporter.header(&target);
    info!(
        endpoint = %target,
        count = options.count,
        interval_ms = options.interval.as_millis() as u64,
        timeout_ms = options.timeout.as_millis() as u64,
        "starting tcp ping"
    );

    let host = target.host.clone();
    let stats = Arc::new(Statistics::new());
    let prober = TcpProber::new(target, options.timeout);
    let executor = Executor::new(prober, Arc::clone(&stats), reporter.clone());
    let probe_loop = ProbeLoop::new(executor, options.schedule());

    Coordinator::new(stats, reporter)
        .run(probe_loop, &host, interrupt)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Port;
    use std::net::{IpAddr, Ipv4Addr};
    use std::time::Duration;
    use tokio::net::TcpListener;

    fn loopback(port: u16) -> ResolvedTarget {
        ResolvedTarget::new(
            "localhost",
            IpAddr::V4(Ipv4Addr::LOCALHOST),
            Port::new(port).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_verbose_single_attempt() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let options = ProbeOptions {
            count: 1,
            verbose: true,
            ..ProbeOptions::default()
        };
        let (reporter, lines) = Reporter::capture(false, true);

        let shutdown = run(loopback(port), &options, reporter, std::future::pending()).await;

        assert_eq!(shutdown.snapshot.sent, 1);
        assert_eq!(shutdown.snapshot.responded, 1);

        let lines = lines.lock().unwrap();
        assert_eq!(
            lines[0],
            format!("TCP ping localhost (IPv4 - 127.0.0.1) port {}", port)
        );
        assert!(lines[1].starts_with(&format!("Reply from 127.0.0.1:{}: seq=0 time=", port)));
        assert!(lines[2].starts_with("  details: local=127.0.0.1:"));
        assert!(lines[2].ends_with(&format!("remote=127.0.0.1:{}", port)));
        assert_eq!(lines[4], "--- localhost TCP ping statistics ---");
        assert_eq!(lines[5], "Sent = 1, Received = 1, Lost = 0 (0.0% loss)");
    }

    #[tokio::test]
    async fn test_refused_target_counts_failures() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let options = ProbeOptions {
            count: 3,
            interval: Duration::ZERO,
            timeout: Duration::from_millis(500),
            ..ProbeOptions::default()
        };
        let (reporter, lines) = Reporter::capture(false, false);

        let shutdown = run(loopback(port), &options, reporter, std::future::pending()).await;

        assert!(!shutdown.interrupted);
        assert_eq!(shutdown.snapshot.sent, 3);
        assert_eq!(shutdown.snapshot.responded, 0);
        let lines = lines.lock().unwrap();
        assert_eq!(lines.iter().filter(|l| l.contains("failed: seq=")).count(), 3);
        assert!(!lines.iter().any(|l| l.starts_with("RTT:")));
    }
}
