//! Probe module - a single timed TCP connect attempt.
//!
//! [`TcpProber`] does the network work, [`Executor`] turns each attempt into
//! a statistics update and an output line.

pub mod executor;
pub mod tcp;
pub mod traits;

pub use executor::{AttemptResult, Executor, Outcome};
pub use tcp::TcpProber;
pub use traits::{ProbeOutcome, Prober};
