//! Error types for tcping.
//!
//! Uses `thiserror` for ergonomic error definitions. Validation and resolution
//! errors are fatal and abort the run before any probing;
//! connect errors are per-attempt and only ever folded into statistics.

use std::io;
use thiserror::Error;

use crate::types::Family;

/// Bad flags or arguments. No probing starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("cannot use -4 and -6 at the same time")]
    ConflictingFamilies,

    #[error("interval cannot be negative (got {0})")]
    NegativeInterval(i64),

    #[error("timeout cannot be negative (got {0})")]
    NegativeTimeout(i64),

    #[error("a host argument is required\n\nUsage: tcping [OPTIONS] <HOST> [PORT]\nTry 'tcping --help' for more information")]
    MissingHost,

    #[error("invalid port number: {0}")]
    InvalidPort(String),

    #[error("port {0} is out of valid range (1-65535)")]
    PortOutOfRange(i64),
}

/// Host could not be turned into a single usable address.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("address {address} is not an {family} address")]
    FamilyMismatch { address: String, family: Family },

    #[error("failed to resolve '{host}': {reason}")]
    ResolutionFailed { host: String, reason: String },

    #[error("no {family} address found for '{host}'")]
    NoAddressForFamily { host: String, family: Family },
}

/// Outcome of a failed connect attempt.
#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("connection refused")]
    Refused,

    #[error("i/o timeout")]
    TimedOut,

    #[error("unreachable: {0}")]
    Unreachable(String),

    #[error("{0}")]
    Io(#[from] io::Error),
}

impl ConnectError {
    /// Classify an error returned by the connect call.
    pub fn classify(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionRefused => Self::Refused,
            io::ErrorKind::TimedOut => Self::TimedOut,
            _ => {
                if err.to_string().to_lowercase().contains("unreachable") {
                    Self::Unreachable(err.to_string())
                } else {
                    Self::Io(err)
                }
            }
        }
    }
}

/// Result type alias for resolution.
pub type ResolveResult<T> = Result<T, ResolveError>;
