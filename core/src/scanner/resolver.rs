//! Turns a parsed [`TargetSpec`] into a concrete [`HostSet`].
//!
//! Hostname markers are resolved forward through a [`HostnameLookup`]. The first
//! address family seen fixes the family for the whole resolution; segments of the other
//! family are skipped like malformed ones.

use std::net::IpAddr;

use async_trait::async_trait;
use sweepr_common::error::{ParseError, SweepError};
use sweepr_common::network::hosts::HostSet;
use sweepr_common::network::range::AddressRange;
use sweepr_common::network::target::{Segment, TargetKind, TargetSpec};
use tracing::debug;

#[async_trait]
pub trait HostnameLookup: Send + Sync {
    /// The first address `host` resolves to, if any.
    async fn lookup(&self, host: &str) -> Option<IpAddr>;
}

/// Forward lookup through the operating system resolver.
pub struct SystemLookup;

#[async_trait]
impl HostnameLookup for SystemLookup {
    async fn lookup(&self, host: &str) -> Option<IpAddr> {
        match tokio::net::lookup_host((host, 0)).await {
            Ok(mut addrs) => addrs.next().map(|socket_addr| socket_addr.ip()),
            Err(e) => {
                debug!("lookup of {host} failed: {e}");
                None
            }
        }
    }
}

/// Hosts to probe, plus the list segments that were dropped along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    hosts: HostSet,
    skipped: Vec<ParseError>,
}

impl Resolution {
    pub fn hosts(&self) -> &HostSet {
        &self.hosts
    }

    /// Distinct host count, known before any host is walked.
    pub fn count(&self) -> u128 {
        self.hosts.count()
    }

    pub fn skipped(&self) -> &[ParseError] {
        &self.skipped
    }
}

/// Resolves `spec`.
///
/// Fails with [`SweepError::UnresolvableTarget`] when a hostname does not resolve or
/// when nothing usable is left once malformed segments are skipped.
pub async fn resolve(spec: &TargetSpec, lookup: &dyn HostnameLookup) -> Result<Resolution, SweepError> {
    let mut hosts = HostSet::new();
    let mut skipped: Vec<ParseError> = Vec::new();

    match spec.kind() {
        TargetKind::Network(range) => hosts.push(*range),
        TargetKind::Hostname(name) => {
            let addr = lookup
                .lookup(name)
                .await
                .ok_or_else(|| SweepError::UnresolvableTarget(spec.raw().to_string()))?;
            hosts.add_single(addr);
        }
        TargetKind::List {
            segments,
            skipped: malformed,
        } => {
            skipped.extend(malformed.iter().cloned());
            let mut family: Option<bool> = None;

            for segment in segments {
                let (token, range) = match segment {
                    Segment::Range(range) => (range_token(range), *range),
                    Segment::Hostname(name) => {
                        let addr = lookup
                            .lookup(name)
                            .await
                            .ok_or_else(|| SweepError::UnresolvableTarget(name.clone()))?;
                        (name.clone(), AddressRange::single(addr))
                    }
                };

                match family {
                    Some(is_ipv4) if is_ipv4 != range.is_ipv4() => {
                        skipped.push(ParseError::new(token, "mixes IPv4 and IPv6 targets"));
                    }
                    _ => {
                        family = Some(range.is_ipv4());
                        hosts.push(range);
                    }
                }
            }
        }
    }

    if hosts.is_empty() {
        return Err(SweepError::UnresolvableTarget(spec.raw().to_string()));
    }

    Ok(Resolution { hosts, skipped })
}

fn range_token(range: &AddressRange) -> String {
    if range.len() == 1 {
        range.start().to_string()
    } else {
        format!("{}-{}", range.start(), range.end())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
