//! The probe loop.
//!
//! Drives attempts one at a time at a fixed interval until the configured
//! count is reached or the cancellation token fires:
//!
//! ```text
//! Running --attempt--> Waiting --interval--> Running --> ... --> Done
//!    |                    |
//!    +----cancelled-------+-------------------------------------> Done
//! ```

use crate::probe::{Executor, Prober};
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// Attempt count and pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    /// Number of attempts; 0 runs until cancelled.
    pub count: u64,
    /// Pause between the end of one attempt and the start of the next.
    pub interval: Duration,
}

impl Schedule {
    pub fn is_unbounded(&self) -> bool {
        self.count == 0
    }

    fn is_last(&self, seq: u64) -> bool {
        !self.is_unbounded() && seq + 1 >= self.count
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    Waiting,
    Done,
}

/// What the loop did before reaching `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopReport {
    /// Attempts that ran to completion (success or failure).
    pub completed: u64,
    /// Whether the loop stopped because of cancellation.
    pub cancelled: bool,
}

/// Repeats attempts through an [`Executor`].
pub struct ProbeLoop<P> {
    executor: Executor<P>,
    schedule: Schedule,
}

impl<P: Prober> ProbeLoop<P> {
    pub fn new(executor: Executor<P>, schedule: Schedule) -> Self {
        Self { executor, schedule }
    }

    /// Run until the count is exhausted or `cancel` fires.
    ///
    /// Only one attempt is ever outstanding. The wait between attempts is
    /// raced against `cancel` and ends as soon as it fires.
    pub async fn run(self, cancel: CancellationToken) -> LoopReport {
        let mut state = State::Running;
        let mut seq = 0u64;
        let mut completed = 0u64;

        loop {
            trace!(?state, seq, "probe loop");
            state = match state {
                State::Running => {
                    if cancel.is_cancelled() {
                        State::Done
                    } else {
                        match self.executor.attempt(seq, &cancel).await {
                            None => State::Done,
                            Some(_) => {
                                completed += 1;
                                if self.schedule.is_last(seq) {
                                    State::Done
                                } else {
                                    State::Waiting
                                }
                            }
                        }
                    }
                }
                State::Waiting => {
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => State::Done,
                        _ = sleep(self.schedule.interval) => {
                            seq += 1;
                            State::Running
                        }
                    }
                }
                State::Done => break,
            };
        }

        let report = LoopReport {
            completed,
            cancelled: cancel.is_cancelled(),
        };
        debug!(?report, "probe loop finished");
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Reporter;
    use crate::probe::executor::tests::FakeProber;
    use crate::stats::Statistics;
    use std::sync::Arc;
    use std::time::Instant;
    use tokio::time::timeout;

    fn build_loop(
        prober: FakeProber,
        count: u64,
        interval: Duration,
    ) -> (ProbeLoop<FakeProber>, Arc<Statistics>) {
        let stats = Arc::new(Statistics::new());
        let (reporter, _) = Reporter::capture(false, false);
        let executor = Executor::new(prober, Arc::clone(&stats), reporter);
        (ProbeLoop::new(executor, Schedule { count, interval }), stats)
    }

    #[test]
    fn test_schedule_is_last() {
        let bounded = Schedule {
            count: 3,
            interval: Duration::ZERO,
        };
        assert!(!bounded.is_last(0));
        assert!(!bounded.is_last(1));
        assert!(bounded.is_last(2));

        let unbounded = Schedule {
            count: 0,
            interval: Duration::ZERO,
        };
        assert!(unbounded.is_unbounded());
        assert!(!unbounded.is_last(u64::MAX - 1));
    }

    #[tokio::test]
    async fn test_bounded_count_stops_on_its_own() {
        let (probe_loop, stats) = build_loop(FakeProber::failing(), 3, Duration::ZERO);

        let report = timeout(Duration::from_secs(5), probe_loop.run(CancellationToken::new()))
            .await
            .expect("loop should finish without cancellation");

        assert_eq!(
            report,
            LoopReport {
                completed: 3,
                cancelled: false
            }
        );
        let snap = stats.snapshot();
        assert_eq!(snap.sent, 3);
        assert_eq!(snap.responded, 0);
    }

    #[tokio::test]
    async fn test_cancelled_before_start_makes_no_attempt() {
        let (probe_loop, stats) = build_loop(FakeProber::succeeding(), 0, Duration::ZERO);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let report = probe_loop.run(cancel).await;
        assert_eq!(report.completed, 0);
        assert!(report.cancelled);
        assert_eq!(stats.snapshot().sent, 0);
    }

    #[tokio::test]
    async fn test_cancel_mid_wait_ends_promptly() {
        let (probe_loop, stats) = build_loop(FakeProber::succeeding(), 0, Duration::from_secs(30));
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(probe_loop.run(cancel.clone()));

        tokio::time::sleep(Duration::from_millis(50)).await;
        let started = Instant::now();
        cancel.cancel();

        let report = timeout(Duration::from_secs(2), handle)
            .await
            .expect("loop should observe cancellation during the wait")
            .unwrap();

        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(report.completed, 1);
        assert!(report.cancelled);
        assert_eq!(stats.snapshot().sent, 1);
    }

    #[tokio::test]
    async fn test_interrupted_attempt_ends_loop() {
        let prober = FakeProber::succeeding().cancelling_on(2);
        let (probe_loop, stats) = build_loop(prober, 10, Duration::ZERO);

        let report = probe_loop.run(CancellationToken::new()).await;

        assert_eq!(report.completed, 2);
        assert!(report.cancelled);
        let snap = stats.snapshot();
        assert_eq!(snap.sent, 2);
        assert_eq!(snap.responded, 2);
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_the_loop() {
        let prober = FakeProber::failing();
        let (probe_loop, _stats) = build_loop(prober, 5, Duration::from_millis(1));
        let report = probe_loop.run(CancellationToken::new()).await;
        assert_eq!(report.completed, 5);
    }

    #[tokio::test]
    async fn test_sequence_numbers_are_consecutive() {
        let stats = Arc::new(Statistics::new());
        let (reporter, lines) = Reporter::capture(false, false);
        let executor = Executor::new(FakeProber::failing(), Arc::clone(&stats), reporter);
        let schedule = Schedule {
            count: 3,
            interval: Duration::ZERO,
        };

        ProbeLoop::new(executor, schedule)
            .run(CancellationToken::new())
            .await;

        let lines = lines.lock().unwrap();
        for (seq, line) in lines.iter().enumerate() {
            assert!(line.contains(&format!("seq={} ", seq)), "{}", line);
        }
    }
}
