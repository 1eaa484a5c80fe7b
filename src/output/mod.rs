//! Output formatting module.
//!
//! The [`Reporter`] writes per-attempt lines, notices and the final summary,
//! optionally colored, either to stdout or to an in-memory buffer.

pub mod lines;

use crate::error::ConnectError;
use crate::stats::Snapshot;
use crate::types::ResolvedTarget;
use console::{style, Style};
use std::io::{self, Write};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::trace;

/// Captured output lines, shared with whoever created the sink.
pub type Captured = Arc<Mutex<Vec<String>>>;

/// Where reporter lines go.
#[derive(Debug, Clone)]
pub enum Sink {
    Stdout,
    Memory(Captured),
}

/// Formats and emits everything the probe prints.
#[derive(Debug, Clone)]
pub struct Reporter {
    color: bool,
    verbose: bool,
    sink: Sink,
}

impl Reporter {
    /// Reporter that prints to stdout.
    pub fn stdout(color: bool, verbose: bool) -> Self {
        Self {
            color,
            verbose,
            sink: Sink::Stdout,
        }
    }

    /// Reporter that collects lines in memory.
    pub fn capture(color: bool, verbose: bool) -> (Self, Captured) {
        let buffer: Captured = Arc::default();
        let reporter = Self {
            color,
            verbose,
            sink: Sink::Memory(Arc::clone(&buffer)),
        };
        (reporter, buffer)
    }

    /// Banner printed once before the first attempt.
    pub fn header(&self, target: &ResolvedTarget) {
        self.emit(lines::header(target));
    }

    /// A connection was established.
    pub fn success(
        &self,
        target: &ResolvedTarget,
        seq: u64,
        elapsed_ms: f64,
        local: Option<SocketAddr>,
    ) {
        let line = lines::success(target, seq, elapsed_ms);
        self.emit(self.paint(line, Style::new().green()));
        if self.verbose {
            self.emit(lines::success_details(target, local));
        }
    }

    /// A connect attempt failed.
    pub fn failure(
        &self,
        target: &ResolvedTarget,
        seq: u64,
        elapsed_ms: f64,
        error: &ConnectError,
    ) {
        let line = lines::failure(target, seq, error);
        self.emit(self.paint(line, Style::new().red()));
        if self.verbose {
            self.emit(lines::failure_details(target, elapsed_ms));
        }
    }

    /// An in-flight attempt was cut short by cancellation.
    pub fn attempt_aborted(&self) {
        self.emit(String::new());
        self.emit(self.paint(lines::ATTEMPT_ABORTED.to_string(), Style::new().cyan()));
    }

    /// The run was stopped by an interrupt signal.
    pub fn interrupted(&self) {
        self.emit(String::new());
        self.emit(lines::INTERRUPTED.to_string());
    }

    /// Final statistics block.
    pub fn summary(&self, host: &str, snap: &Snapshot) {
        self.emit(String::new());
        for line in lines::summary(host, snap) {
            self.emit(line);
        }
    }

    fn paint(&self, text: String, style: Style) -> String {
        if self.color {
            style.force_styling(true).apply_to(text).to_string()
        } else {
            text
        }
    }

    fn emit(&self, line: String) {
        match &self.sink {
            Sink::Stdout => {
                let stdout = io::stdout();
                let mut out = stdout.lock();
                if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
                    trace!(error = %e, "stdout write failed");
                }
            }
            Sink::Memory(buffer) => buffer
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(line),
        }
    }
}

/// Print a fatal error to stderr.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}
