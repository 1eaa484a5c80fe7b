//! Host resolution.
//!
//! Turns the host argument (an IP literal or a DNS name) plus the requested
//! family into exactly one address to probe.

use crate::error::{ResolveError, ResolveResult};
use crate::types::{Family, FamilyPreference, Port, ResolvedTarget};
use async_trait::async_trait;
use std::net::IpAddr;
use tracing::{debug, warn};
use trust_dns_resolver::config::{LookupIpStrategy, ResolverConfig, ResolverOpts};
use trust_dns_resolver::system_conf::read_system_conf;
use trust_dns_resolver::TokioAsyncResolver;

/// Name lookup backend.
#[async_trait]
pub trait HostLookup: Send + Sync {
    /// All addresses for `host` that `strategy` asks for, in answer order.
    async fn lookup_ip(&self, host: &str, strategy: LookupIpStrategy)
        -> ResolveResult<Vec<IpAddr>>;
}

/// DNS lookup through the system resolver configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLookup;

#[async_trait]
impl HostLookup for SystemLookup {
    async fn lookup_ip(
        &self,
        host: &str,
        strategy: LookupIpStrategy,
    ) -> ResolveResult<Vec<IpAddr>> {
        let resolver = match read_system_conf() {
            Ok((config, mut opts)) => {
                opts.ip_strategy = strategy;
                TokioAsyncResolver::tokio(config, opts)
            }
            Err(e) => {
                warn!(error = %e, "system resolver configuration unavailable, using defaults");
                let mut opts = ResolverOpts::default();
                opts.ip_strategy = strategy;
                TokioAsyncResolver::tokio(ResolverConfig::default(), opts)
            }
        };

        let response = resolver
            .lookup_ip(host)
            .await
            .map_err(|e| ResolveError::ResolutionFailed {
                host: host.to_string(),
                reason: e.to_string(),
            })?;

        Ok(response.iter().collect())
    }
}

/// Record types to query for a preference.
///
/// Auto asks for both families so [`select_address`] can apply its
/// IPv4-first rule to the full answer.
pub fn ip_strategy(preference: FamilyPreference) -> LookupIpStrategy {
    match preference {
        FamilyPreference::Auto => LookupIpStrategy::Ipv4AndIpv6,
        FamilyPreference::V4 => LookupIpStrategy::Ipv4Only,
        FamilyPreference::V6 => LookupIpStrategy::Ipv6Only,
    }
}

/// Resolve `host` to a single target honouring the family preference.
///
/// IP literals are validated against the preference without touching DNS.
/// Names are looked up and a candidate is picked with [`select_address`].
pub async fn resolve(
    host: &str,
    port: Port,
    preference: FamilyPreference,
) -> ResolveResult<ResolvedTarget> {
    resolve_with(&SystemLookup, host, port, preference).await
}

/// [`resolve`] against an arbitrary lookup backend.
pub async fn resolve_with<L: HostLookup + ?Sized>(
    lookup: &L,
    host: &str,
    port: Port,
    preference: FamilyPreference,
) -> ResolveResult<ResolvedTarget> {
    let host = host.trim();

    if let Some(ip) = parse_literal(host) {
        let ip = check_literal(ip, preference)?;
        return Ok(ResolvedTarget::new(host, ip, port));
    }

    let strategy = ip_strategy(preference);
    let candidates = lookup.lookup_ip(host, strategy).await?;
    debug!(host, ?strategy, candidates = ?candidates, "dns lookup complete");

    let ip = select_address(host, &candidates, preference)?;
    Ok(ResolvedTarget::new(host, ip, port))
}

/// Parse an IP literal, accepting a bracketed IPv6 form as well.
fn parse_literal(host: &str) -> Option<IpAddr> {
    let bare = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    bare.parse::<IpAddr>().ok().map(|ip| ip.to_canonical())
}

/// Fail with `FamilyMismatch` if a literal contradicts the requested family.
pub fn check_literal(ip: IpAddr, preference: FamilyPreference) -> ResolveResult<IpAddr> {
    match preference.required() {
        Some(family) if Family::of(&ip) != family => Err(ResolveError::FamilyMismatch {
            address: ip.to_string(),
            family,
        }),
        _ => Ok(ip),
    }
}

/// Pick one address out of a lookup answer.
///
/// With an explicit family the first matching candidate wins. Without one,
/// the first IPv4 candidate is preferred and the first IPv6 candidate is the
/// fallback.
pub fn select_address(
    host: &str,
    candidates: &[IpAddr],
    preference: FamilyPreference,
) -> ResolveResult<IpAddr> {
    if candidates.is_empty() {
        return Err(ResolveError::ResolutionFailed {
            host: host.to_string(),
            reason: "no IP addresses found".to_string(),
        });
    }

    let first_of = |family: Family| {
        candidates
            .iter()
            .map(|ip| ip.to_canonical())
            .find(|ip| Family::of(ip) == family)
    };

    match preference.required() {
        Some(family) => first_of(family).ok_or_else(|| ResolveError::NoAddressForFamily {
            host: host.to_string(),
            family,
        }),
        None => first_of(Family::V4)
            .or_else(|| first_of(Family::V6))
            .ok_or_else(|| ResolveError::ResolutionFailed {
                host: host.to_string(),
                reason: "no usable IP addresses found".to_string(),
            }),
    }
}
