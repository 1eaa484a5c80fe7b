//! Port type with validation and parsing.
//!
//! The `Port` newtype ensures values are always valid port numbers (1-65535).

use crate::error::ValidationError;
use std::fmt;
use std::str::FromStr;

/// A validated network port number (1-65535).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Port(u16);

impl Port {
    /// Minimum valid port number.
    pub const MIN: u16 = 1;
    /// Maximum valid port number.
    pub const MAX: u16 = 65535;
    /// Port used when neither the positional argument nor `--port` give one.
    pub const DEFAULT: Port = Port(80);

    /// Create a new Port from a u16, returning None if invalid.
    #[inline]
    pub const fn new(port: u16) -> Option<Self> {
        if port >= Self::MIN && port <= Self::MAX {
            Some(Self(port))
        } else {
            None
        }
    }

    /// Validate a wide integer as a port number.
    pub fn from_number(value: i64) -> Result<Self, ValidationError> {
        u16::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or(ValidationError::PortOutOfRange(value))
    }

    /// Get the raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

impl FromStr for Port {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidPort(s.to_string()))?;
        Self::from_number(value)
    }
}
