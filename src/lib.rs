//! # tcping - Ping over TCP
//!
//! tcping repeatedly opens TCP connections to a `host:port`, reports each
//! attempt with its round-trip time, and prints loss and latency statistics
//! when it finishes or is interrupted.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use tcping::config::ProbeOptions;
//! use tcping::output::Reporter;
//! use tcping::types::{FamilyPreference, Port};
//!
//! #[tokio::main]
//! async fn main() {
//!     let port = Port::new(443).unwrap();
//!     let target = tcping::resolver::resolve("example.com", port, FamilyPreference::Auto)
//!         .await
//!         .unwrap();
//!
//!     let options = ProbeOptions { count: 4, ..ProbeOptions::default() };
//!     let reporter = Reporter::stdout(false, false);
//!     let shutdown =
//!         tcping::session::run(target, &options, reporter, tcping::shutdown::os_interrupt()).await;
//!
//!     println!("{} of {} answered", shutdown.snapshot.responded, shutdown.snapshot.sent);
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Ports, address families and the resolved target
//! - [`resolver`] - Host to single-address resolution
//! - [`probe`] - One timed, cancellable connect attempt
//! - [`scheduler`] - The interval-paced probe loop
//! - [`shutdown`] - Interrupt handling and final summary
//! - [`stats`] - Thread-safe running statistics
//! - [`output`] - Line formatting and colors
//! - [`config`] - Validated run options
//! - [`cli`] - Argument parsing and validation
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod probe;
pub mod resolver;
pub mod scheduler;
pub mod session;
pub mod shutdown;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use error::{ConnectError, ResolveError, ValidationError};
pub use probe::{Prober, TcpProber};
pub use stats::{Snapshot, Statistics};
pub use types::{Family, FamilyPreference, Port, ResolvedTarget};
