//! Command-line interface definitions for tcping.
//!
//! Uses `clap` derive macros for declarative argument parsing. Everything is
//! validated here, before any resolution or probing starts.

use crate::config::ProbeOptions;
use crate::error::ValidationError;
use crate::types::{FamilyPreference, Port};
use clap::Parser;
use std::time::Duration;

const EXAMPLES: &str = "\
Examples:
  tcping google.com                 Basic usage (default port 80)
  tcping google.com 80              Port as a positional argument
  tcping -p 443 google.com          Port via --port
  tcping -4 -n 5 8.8.8.8 443        IPv4 only, 5 attempts
  tcping -w 2000 example.com 22     2 second timeout
  tcping -c -v example.com 443      Color output and verbose details";

/// Ping a host over TCP: timed connect attempts with loss and latency statistics.
#[derive(Parser, Debug)]
#[command(name = "tcping")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Test TCP connectivity to a host and port", long_about = None)]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    /// Host name or IP address to probe
    #[arg(value_name = "HOST")]
    pub host: Option<String>,

    /// Port to connect to (takes precedence over --port)
    #[arg(value_name = "PORT")]
    pub port: Option<String>,

    /// Force IPv4
    #[arg(short = '4', long = "ipv4")]
    pub ipv4: bool,

    /// Force IPv6
    #[arg(short = '6', long = "ipv6")]
    pub ipv6: bool,

    /// Number of attempts (0 = until interrupted)
    #[arg(short = 'n', long, value_name = "COUNT", default_value_t = 0)]
    pub count: u64,

    /// Port to connect to when no positional port is given [default: 80]
    #[arg(
        short = 'p',
        long = "port",
        value_name = "PORT",
        allow_negative_numbers = true
    )]
    pub port_option: Option<i64>,

    /// Interval between attempts in milliseconds
    #[arg(
        short = 't',
        long,
        value_name = "MS",
        default_value_t = 1000,
        allow_negative_numbers = true
    )]
    pub interval: i64,

    /// Connect timeout in milliseconds
    #[arg(
        short = 'w',
        long,
        value_name = "MS",
        default_value_t = 1000,
        allow_negative_numbers = true
    )]
    pub timeout: i64,

    /// Enable colored output
    #[arg(short = 'c', long)]
    pub color: bool,

    /// Show local/remote endpoint details for each attempt
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// A validated request: what to probe and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub host: String,
    pub port: Port,
    pub options: ProbeOptions,
}

impl Cli {
    /// Validate the parsed arguments.
    ///
    /// Port precedence: positional, then `--port` when positive, then 80.
    pub fn validate(&self) -> Result<Invocation, ValidationError> {
        let family = match (self.ipv4, self.ipv6) {
            (true, true) => return Err(ValidationError::ConflictingFamilies),
            (true, false) => FamilyPreference::V4,
            (false, true) => FamilyPreference::V6,
            (false, false) => FamilyPreference::Auto,
        };

        if self.interval < 0 {
            return Err(ValidationError::NegativeInterval(self.interval));
        }
        if self.timeout < 0 {
            return Err(ValidationError::NegativeTimeout(self.timeout));
        }

        let host = self
            .host
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or(ValidationError::MissingHost)?
            .to_string();

        let port = match (&self.port, self.port_option) {
            (Some(positional), _) => positional.parse()?,
            (None, Some(p)) if p > 0 => Port::from_number(p)?,
            _ => Port::DEFAULT,
        };

        Ok(Invocation {
            host,
            port,
            options: ProbeOptions {
                family,
                count: self.count,
                interval: Duration::from_millis(self.interval as u64),
                timeout: Duration::from_millis(self.timeout as u64),
                color: self.color,
                verbose: self.verbose,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Cli {
        let argv = std::iter::once("tcping").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap()
    }

    fn validate(args: &[&str]) -> Result<Invocation, ValidationError> {
        parse(args).validate()
    }

    #[test]
    fn test_defaults() {
        let inv = validate(&["example.com"]).unwrap();
        assert_eq!(inv.host, "example.com");
        assert_eq!(inv.port, Port::DEFAULT);
        assert_eq!(inv.options, ProbeOptions::default());
    }

    #[test]
    fn test_all_flags() {
        let inv = validate(&[
            "-4", "-n", "5", "-t", "0", "-w", "250", "-c", "-v", "8.8.8.8", "443",
        ])
        .unwrap();
        assert_eq!(inv.port.as_u16(), 443);
        assert_eq!(inv.options.family, FamilyPreference::V4);
        assert_eq!(inv.options.count, 5);
        assert_eq!(inv.options.interval, Duration::ZERO);
        assert_eq!(inv.options.timeout, Duration::from_millis(250));
        assert!(inv.options.color);
        assert!(inv.options.verbose);
    }

    #[test]
    fn test_long_flags() {
        let inv = validate(&["--ipv6", "--count", "2", "--port", "22", "::1"]).unwrap();
        assert_eq!(inv.options.family, FamilyPreference::V6);
        assert_eq!(inv.options.count, 2);
        assert_eq!(inv.port.as_u16(), 22);
    }

    #[test]
    fn test_positional_port_wins_over_option() {
        let inv = validate(&["-p", "443", "example.com", "8080"]).unwrap();
        assert_eq!(inv.port.as_u16(), 8080);
    }

    #[test]
    fn test_non_positive_port_option_falls_back_to_default() {
        let inv = validate(&["-p", "0", "example.com"]).unwrap();
        assert_eq!(inv.port, Port::DEFAULT);
    }

    #[test]
    fn test_conflicting_families() {
        assert_eq!(
            validate(&["-4", "-6", "example.com"]),
            Err(ValidationError::ConflictingFamilies)
        );
    }

    #[test]
    fn test_negative_interval_and_timeout() {
        assert_eq!(
            validate(&["-t", "-5", "example.com"]),
            Err(ValidationError::NegativeInterval(-5))
        );
        assert_eq!(
            validate(&["-w", "-1", "example.com"]),
            Err(ValidationError::NegativeTimeout(-1))
        );
    }

    #[test]
    fn test_missing_host() {
        assert_eq!(validate(&[]), Err(ValidationError::MissingHost));
    }

    #[test]
    fn test_bad_ports() {
        assert_eq!(
            validate(&["example.com", "http"]),
            Err(ValidationError::InvalidPort("http".to_string()))
        );
        assert_eq!(
            validate(&["example.com", "70000"]),
            Err(ValidationError::PortOutOfRange(70000))
        );
        assert_eq!(
            validate(&["-p", "65536", "example.com"]),
            Err(ValidationError::PortOutOfRange(65536))
        );
    }

    #[test]
    fn test_only_flags_enable_color_and_verbose() {
        let inv = validate(&["-w", "50", "example.com"]).unwrap();
        assert_eq!(inv.options.interval, Duration::from_millis(1000));
        assert_eq!(inv.options.timeout, Duration::from_millis(50));
        assert!(!inv.options.color);
        assert!(!inv.options.verbose);
    }

    #[test]
    fn test_negative_count_rejected_by_parser() {
        let err = Cli::try_parse_from(["tcping", "-n", "-1", "example.com"]).unwrap_err();
        assert_ne!(err.kind(), ErrorKind::DisplayHelp);
        assert_ne!(err.kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_config_flag() {
        let err = Cli::try_parse_from(["tcping", "--config", "x.json", "example.com"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_help_and_version_are_display_errors() {
        let help = Cli::try_parse_from(["tcping", "-h"]).unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);

        let version = Cli::try_parse_from(["tcping", "-V"]).unwrap_err();
        assert_eq!(version.kind(), ErrorKind::DisplayVersion);
    }
}
