//! # Target Specification Model
//!
//! Parses the loosely formatted target string an operator types into a tagged
//! [`TargetSpec`]. Nothing here touches the network; hostnames are carried as
//! markers for the resolver to look up.
//!
//! Supported formats:
//! * A single address or network (`192.0.2.1`, `192.0.2.0/24`, `2001:db8::/126`).
//! * A hyphenated range (`192.0.2.1-5`, `10.0.0.1-10.0.1.20`, `2001:db8::1-a`).
//! * A comma-separated list of the above (`192.0.2.1-5,9-14`), where a segment that is
//!   only a tail (`9-14`, `20`) continues from the address of the segment before it.
//! * A hostname (`gateway.example.net`).

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use ipnet::IpNet;

use crate::error::ParseError;
use crate::network::range::{self, AddressRange};

/// One comma-separated piece of a list target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Range(AddressRange),
    /// Pending DNS lookup.
    Hostname(String),
}

/// The shape the target string was recognized as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetKind {
    /// The input held a comma or hyphen. Malformed segments are kept in `skipped`.
    List {
        segments: Vec<Segment>,
        skipped: Vec<ParseError>,
    },
    /// A single address or network.
    Network(AddressRange),
    /// Not an address or network; pending DNS lookup.
    Hostname(String),
}

/// A parsed target string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    raw: String,
    kind: TargetKind,
}

impl TargetSpec {
    /// The string the operator typed, trimmed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> &TargetKind {
        &self.kind
    }
}

impl FromStr for TargetSpec {
    type Err = ParseError;

    /// Parses a target string.
    ///
    /// Each stage returns a tagged result instead of failing over to the next one:
    /// 1. Input with a comma or hyphen is split into [`Segment`]s.
    /// 2. Otherwise it is tried as an address or network (host bits allowed).
    /// 3. Anything else is a hostname.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(ParseError::new(s, "target cannot be empty"));
        }

        let kind = if raw.contains([',', '-']) {
            parse_list(raw)
        } else if let Some(range) = parse_network(raw) {
            TargetKind::Network(range)
        } else {
            TargetKind::Hostname(raw.to_string())
        };

        Ok(Self {
            raw: raw.to_string(),
            kind,
        })
    }
}

/// Splits on commas and parses every segment in order.
fn parse_list(s: &str) -> TargetKind {
    let mut segments: Vec<Segment> = Vec::new();
    let mut skipped: Vec<ParseError> = Vec::new();
    let mut anchor: Option<IpAddr> = None;

    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        match parse_segment(part, anchor) {
            Ok(Segment::Range(range)) => {
                anchor = Some(range.start());
                segments.push(Segment::Range(range));
            }
            Ok(segment) => segments.push(segment),
            Err(e) => skipped.push(e),
        }
    }

    TargetKind::List { segments, skipped }
}

/// Parses one list segment.
///
/// `anchor` is the start address of the previous range segment; bare tails such as
/// `9-14` or `20` are completed from it.
fn parse_segment(part: &str, anchor: Option<IpAddr>) -> Result<Segment, ParseError> {
    if let Some((left, right)) = part.split_once('-') {
        let left = left.trim();
        if left.parse::<IpAddr>().is_ok() {
            return AddressRange::from_hyphenated(left, right).map(Segment::Range);
        }
        if let Some(start) = anchor.and_then(|anchor| complete_tail(left, anchor)) {
            return AddressRange::from_hyphenated(&start.to_string(), right)
                .map(Segment::Range)
                .map_err(|e| ParseError::new(part, e.reason));
        }
        if is_hostname(part) {
            return Ok(Segment::Hostname(part.to_string()));
        }
        return Err(ParseError::new(part, format!("'{left}' is not an IP address")));
    }

    if let Some(range) = parse_network(part) {
        return Ok(Segment::Range(range));
    }
    if let Some(addr) = anchor.and_then(|anchor| complete_tail(part, anchor)) {
        return Ok(Segment::Range(AddressRange::single(addr)));
    }
    if is_hostname(part) {
        return Ok(Segment::Hostname(part.to_string()));
    }

    Err(ParseError::new(part, "not an address, network or hostname"))
}

/// Parses a single address or a network in lenient notation.
fn parse_network(s: &str) -> Option<AddressRange> {
    if let Ok(addr) = s.parse::<IpAddr>() {
        return Some(AddressRange::single(addr));
    }
    s.parse::<IpNet>().ok().map(AddressRange::from_network)
}

/// Completes a bare tail (`9`, `1.20`, `a`) into a full address of the anchor's family.
fn complete_tail(tail: &str, anchor: IpAddr) -> Option<IpAddr> {
    match anchor {
        IpAddr::V4(anchor) => {
            if tail.is_empty() || !tail.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
                return None;
            }
            range::expand_v4_tail(tail, &anchor).ok().map(IpAddr::V4)
        }
        IpAddr::V6(anchor) => {
            if !range::is_hex_group(tail) {
                return None;
            }
            range::expand_v6_tail(tail, &anchor).ok().map(IpAddr::V6)
        }
    }
}

/// Loose RFC 1123 check: dot-separated labels of letters, digits and inner hyphens,
/// with a top label that is not purely numeric.
pub fn is_hostname(s: &str) -> bool {
    let s = s.strip_suffix('.').unwrap_or(s);
    if s.is_empty() || s.len() > 253 {
        return false;
    }
    if s.parse::<Ipv4Addr>().is_ok() || s.parse::<Ipv6Addr>().is_ok() {
        return false;
    }

    let labels: Vec<&str> = s.split('.').collect();
    let valid_labels = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    });

    let top_is_numeric = labels
        .last()
        .is_some_and(|label| label.bytes().all(|b| b.is_ascii_digit()));

    valid_labels && !top_is_numeric
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
