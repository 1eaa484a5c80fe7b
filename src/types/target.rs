//! Target types: address family, family preference and the resolved target.

use super::Port;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// IP address family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    /// Family of a concrete address.
    pub fn of(ip: &IpAddr) -> Self {
        match ip {
            IpAddr::V4(_) => Self::V4,
            IpAddr::V6(_) => Self::V6,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
        }
    }
}

/// Which family the user asked for.
///
/// A single enum keeps "both v4 and v6" unrepresentable once flags are
/// validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FamilyPreference {
    #[default]
    Auto,
    V4,
    V6,
}

impl FamilyPreference {
    /// The explicitly requested family, if any.
    pub fn required(self) -> Option<Family> {
        match self {
            Self::Auto => None,
            Self::V4 => Some(Family::V4),
            Self::V6 => Some(Family::V6),
        }
    }
}

/// A host resolved to the one address that will be probed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// The original input (hostname or IP string), kept for display.
    pub host: String,
    /// The resolved IP address.
    pub ip: IpAddr,
    /// Destination port.
    pub port: Port,
}

impl ResolvedTarget {
    /// Create a new resolved target.
    pub fn new(host: impl Into<String>, ip: IpAddr, port: Port) -> Self {
        Self {
            host: host.into(),
            ip,
            port,
        }
    }

    /// Address family of the resolved IP.
    pub fn family(&self) -> Family {
        Family::of(&self.ip)
    }

    /// IP literal for `host:port` composition: IPv6 is bracketed, IPv4 bare.
    pub fn address(&self) -> String {
        match self.ip {
            IpAddr::V4(v4) => v4.to_string(),
            IpAddr::V6(v6) => format!("[{}]", v6),
        }
    }

    /// Socket address to connect to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port.as_u16())
    }

    /// `address:port`, used in every output line.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.address(), self.port)
    }
}

impl fmt::Display for ResolvedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host == self.ip.to_string() {
            write!(f, "{}", self.endpoint())
        } else {
            write!(f, "{} ({})", self.host, self.endpoint())
        }
    }
}
