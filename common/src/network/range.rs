//! # Address Range Model
//!
//! A contiguous, inclusive block of addresses within one address family.
//!
//! Ranges come from three places: a single address, the usable hosts of a network
//! (`192.0.2.0/24`) and an explicit hyphenated interval (`192.0.2.1-5`,
//! `2001:db8::1-a`, `10.0.0.1-10.0.1.20`). Expansion summarizes the interval into the
//! minimal set of CIDR blocks and walks each block in ascending order.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use ipnet::{IpAddrRange, IpNet, IpSubnets, Ipv4AddrRange, Ipv4Subnets, Ipv6AddrRange, Ipv6Subnets};

use crate::error::ParseError;

/// An inclusive `[start, end]` interval of addresses. Never crosses address families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressRange {
    start_addr: IpAddr,
    end_addr: IpAddr,
}

impl AddressRange {
    /// Builds a range, rejecting mixed families and `end < start`.
    pub fn new(start_addr: IpAddr, end_addr: IpAddr) -> Result<Self, ParseError> {
        let token = format!("{start_addr}-{end_addr}");
        match (start_addr, end_addr) {
            (IpAddr::V4(_), IpAddr::V4(_)) | (IpAddr::V6(_), IpAddr::V6(_)) => {}
            _ => return Err(ParseError::new(token, "range mixes IPv4 and IPv6")),
        }
        if end_addr < start_addr {
            return Err(ParseError::new(token, "range end is lower than its start"));
        }
        Ok(Self {
            start_addr,
            end_addr,
        })
    }

    pub fn single(addr: IpAddr) -> Self {
        Self {
            start_addr: addr,
            end_addr: addr,
        }
    }

    /// The usable hosts of `net`.
    ///
    /// Networks holding more than two addresses lose their network and broadcast
    /// (all-ones) address. Two-address point-to-point networks keep both, and a host
    /// route yields its one address. Host bits in `net` are ignored.
    pub fn from_network(net: IpNet) -> Self {
        let net = net.trunc();
        let start_addr = net.network();
        let end_addr = net.broadcast();

        if net.max_prefix_len() - net.prefix_len() < 2 {
            return Self {
                start_addr,
                end_addr,
            };
        }

        Self {
            start_addr: offset(start_addr, 1),
            end_addr: offset(end_addr, -1),
        }
    }

    /// Parses the two halves of a hyphenated range.
    ///
    /// `right` may be a full address or a shorthand for the tail of `left`:
    /// * IPv4: a decimal octet (`192.0.2.1-5`) or trailing dotted octets (`10.0.0.1-1.20`).
    /// * IPv6: a hex group replacing the last group (`2001:db8::1-a`).
    pub fn from_hyphenated(left: &str, right: &str) -> Result<Self, ParseError> {
        let (left, right) = (left.trim(), right.trim());
        let token = format!("{left}-{right}");

        let start_addr: IpAddr = left
            .parse()
            .map_err(|_| ParseError::new(&token, format!("'{left}' is not an IP address")))?;

        let end_addr: IpAddr = match start_addr {
            IpAddr::V4(start) => expand_v4_tail(right, &start)
                .map(IpAddr::V4)
                .map_err(|reason| ParseError::new(&token, reason))?,
            IpAddr::V6(start) => expand_v6_tail(right, &start)
                .map(IpAddr::V6)
                .map_err(|reason| ParseError::new(&token, reason))?,
        };

        Self::new(start_addr, end_addr).map_err(|e| ParseError::new(token, e.reason))
    }

    pub fn start(&self) -> IpAddr {
        self.start_addr
    }

    pub fn end(&self) -> IpAddr {
        self.end_addr
    }

    pub fn is_ipv4(&self) -> bool {
        self.start_addr.is_ipv4()
    }

    /// Number of addresses in the range. Saturates for the full IPv6 space.
    pub fn len(&self) -> u128 {
        (to_bits(self.end_addr) - to_bits(self.start_addr)).saturating_add(1)
    }

    /// A range always holds at least one address.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, addr: &IpAddr) -> bool {
        addr.is_ipv4() == self.is_ipv4() && self.start_addr <= *addr && *addr <= self.end_addr
    }

    /// Whether the two ranges share at least one address.
    pub fn overlaps(&self, other: &AddressRange) -> bool {
        self.is_ipv4() == other.is_ipv4()
            && self.start_addr <= other.end_addr
            && other.start_addr <= self.end_addr
    }

    /// The minimal set of CIDR blocks that exactly cover the range, ascending.
    pub fn blocks(&self) -> IpSubnets {
        match (self.start_addr, self.end_addr) {
            (IpAddr::V4(start), IpAddr::V4(end)) => IpSubnets::V4(Ipv4Subnets::new(start, end, 0)),
            (IpAddr::V6(start), IpAddr::V6(end)) => IpSubnets::V6(Ipv6Subnets::new(start, end, 0)),
            _ => unreachable!("constructors reject mixed families"),
        }
    }

    /// Every address in the range, ascending, block by block.
    pub fn iter(&self) -> impl Iterator<Item = IpAddr> + Clone {
        self.blocks().flat_map(block_addresses)
    }
}

fn block_addresses(block: IpNet) -> IpAddrRange {
    match block {
        IpNet::V4(net) => IpAddrRange::V4(Ipv4AddrRange::new(net.network(), net.broadcast())),
        IpNet::V6(net) => IpAddrRange::V6(Ipv6AddrRange::new(net.network(), net.broadcast())),
    }
}

/// Integer form of an address, widened so both families share one scale.
pub(crate) fn to_bits(addr: IpAddr) -> u128 {
    match addr {
        IpAddr::V4(v4) => u128::from(u32::from(v4)),
        IpAddr::V6(v6) => u128::from(v6),
    }
}

fn offset(addr: IpAddr, delta: i8) -> IpAddr {
    match addr {
        IpAddr::V4(v4) => IpAddr::V4(Ipv4Addr::from(u32::from(v4).wrapping_add_signed(delta.into()))),
        IpAddr::V6(v6) => IpAddr::V6(Ipv6Addr::from(u128::from(v6).wrapping_add_signed(delta.into()))),
    }
}

/// Resolves the end of an IPv4 range.
///
/// Accepts a full address, or one to four dotted octets that replace the trailing
/// octets of `start_addr` ("50" -> `a.b.c.50`, "2.66" -> `a.b.2.66`).
pub(crate) fn expand_v4_tail(end_str: &str, start_addr: &Ipv4Addr) -> Result<Ipv4Addr, String> {
    if let Ok(full_addr) = end_str.parse::<Ipv4Addr>() {
        return Ok(full_addr);
    }
    if end_str.parse::<Ipv6Addr>().is_ok() {
        return Err("range mixes IPv4 and IPv6".to_string());
    }
    if end_str.is_empty() {
        return Err("range end cannot be empty".to_string());
    }

    let partial_octets: Vec<u8> = end_str
        .split('.')
        .map(|octet_str| {
            if octet_str.is_empty() || !octet_str.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format!("'{octet_str}' is not a decimal octet"));
            }
            octet_str
                .parse::<u8>()
                .map_err(|_| format!("octet '{octet_str}' is out of range"))
        })
        .collect::<Result<_, _>>()?;

    if partial_octets.len() > 4 {
        return Err(format!("'{end_str}' has too many octets"));
    }

    let mut end_octets = start_addr.octets();
    let start_index = 4 - partial_octets.len();
    end_octets[start_index..].copy_from_slice(&partial_octets);

    Ok(Ipv4Addr::from(end_octets))
}

/// Resolves the end of an IPv6 range: a full address or a hex group that replaces the
/// last group of `start_addr`.
pub(crate) fn expand_v6_tail(end_str: &str, start_addr: &Ipv6Addr) -> Result<Ipv6Addr, String> {
    if let Ok(full_addr) = end_str.parse::<Ipv6Addr>() {
        return Ok(full_addr);
    }
    if end_str.parse::<Ipv4Addr>().is_ok() {
        return Err("range mixes IPv4 and IPv6".to_string());
    }
    if !is_hex_group(end_str) {
        return Err(format!("'{end_str}' is not a hex group"));
    }

    let group = u16::from_str_radix(end_str, 16).map_err(|e| e.to_string())?;
    let mut segments = start_addr.segments();
    segments[7] = group;

    Ok(Ipv6Addr::from(segments))
}

pub(crate) fn is_hex_group(s: &str) -> bool {
    (1..=4).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_hexdigit())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    fn v4(a: u8, b: u8, c: u8, d: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(a, b, c, d))
    }

    fn v6(s: &str) -> IpAddr {
        IpAddr::V6(s.parse().unwrap())
    }

    #[test]
    fn test_expand_v4_tail() {
        let start = Ipv4Addr::new(192, 168, 1, 10);

        assert_eq!(expand_v4_tail("192.168.1.50", &start), Ok(Ipv4Addr::new(192, 168, 1, 50)));
        assert_eq!(expand_v4_tail("50", &start), Ok(Ipv4Addr::new(192, 168, 1, 50)));
        assert_eq!(expand_v4_tail("2.66", &start), Ok(Ipv4Addr::new(192, 168, 2, 66)));
        assert_eq!(expand_v4_tail("10.2.1", &start), Ok(Ipv4Addr::new(192, 10, 2, 1)));

        assert!(expand_v4_tail("2.256", &start).is_err());
        assert!(expand_v4_tail("1.2.3.4.5", &start).is_err());
        assert!(expand_v4_tail("", &start).is_err());
        assert!(expand_v4_tail("+5", &start).is_err());
        assert!(expand_v4_tail("::1", &start).is_err());
    }

    #[test]
    fn test_expand_v6_tail() {
        let start: Ipv6Addr = "2001:db8::1".parse().unwrap();

        assert_eq!(expand_v6_tail("a", &start), Ok("2001:db8::a".parse().unwrap()));
        assert_eq!(expand_v6_tail("ffff", &start), Ok("2001:db8::ffff".parse().unwrap()));
        assert_eq!(expand_v6_tail("2001:db8::20", &start), Ok("2001:db8::20".parse().unwrap()));

        assert!(expand_v6_tail("10000", &start).is_err());
        assert!(expand_v6_tail("g", &start).is_err());
        assert!(expand_v6_tail("10.0.0.1", &start).is_err());
    }

    #[test]
    fn test_last_octet_shorthand() {
        let range = AddressRange::from_hyphenated("192.0.2.1", "5").unwrap();
        let hosts: Vec<IpAddr> = range.iter().collect();

        assert_eq!(
            hosts,
            vec![v4(192, 0, 2, 1), v4(192, 0, 2, 2), v4(192, 0, 2, 3), v4(192, 0, 2, 4), v4(192, 0, 2, 5)]
        );
        assert_eq!(range.len(), 5);
    }

    #[test]
    fn test_shorthand_replaces_rather_than_adds() {
        let range = AddressRange::from_hyphenated("192.0.2.10", "20").unwrap();
        assert_eq!(range.end(), v4(192, 0, 2, 20));
        assert_eq!(range.len(), 11);
    }

    #[test]
    fn test_shorthand_below_start_is_an_error() {
        let err = AddressRange::from_hyphenated("192.0.2.9", "3").unwrap_err();
        assert_eq!(err.token, "192.0.2.9-3");
        assert!(err.reason.contains("lower"));
    }

    #[test]
    fn test_ipv6_hex_shorthand() {
        let range = AddressRange::from_hyphenated("2001:db8::1", "a").unwrap();
        let hosts: Vec<IpAddr> = range.iter().collect();

        assert_eq!(hosts.len(), 10);
        assert_eq!(hosts.first(), Some(&v6("2001:db8::1")));
        assert_eq!(hosts.last(), Some(&v6("2001:db8::a")));
    }

    #[test]
    fn test_full_address_range() {
        let range = AddressRange::from_hyphenated("10.0.0.250", "10.0.1.5").unwrap();
        let hosts: Vec<IpAddr> = range.iter().collect();

        assert_eq!(hosts.len(), 12);
        assert!(hosts.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(hosts[5], v4(10, 0, 0, 255));
        assert_eq!(hosts[6], v4(10, 0, 1, 0));
    }

    #[test]
    fn test_invalid_start_names_token() {
        let err = AddressRange::from_hyphenated("10.0.0.256", "1.1.1.1").unwrap_err();
        assert_eq!(err.token, "10.0.0.256-1.1.1.1");
    }

    #[test]
    fn test_mixed_family_is_rejected() {
        assert!(AddressRange::from_hyphenated("10.0.0.1", "2001:db8::1").is_err());
        assert!(AddressRange::new(v4(10, 0, 0, 1), v6("::1")).is_err());
    }

    #[test]
    fn test_blocks_are_minimal() {
        let range = AddressRange::from_hyphenated("192.0.2.1", "14").unwrap();
        let blocks: Vec<String> = range.blocks().map(|net| net.to_string()).collect();

        assert_eq!(
            blocks,
            vec!["192.0.2.1/32", "192.0.2.2/31", "192.0.2.4/30", "192.0.2.8/30", "192.0.2.12/31", "192.0.2.14/32"]
        );
        assert_eq!(range.iter().count(), 14);
    }

    #[test]
    fn test_network_excludes_network_and_broadcast() {
        let range = AddressRange::from_network("192.168.1.100/24".parse().unwrap());

        assert_eq!(range.start(), v4(192, 168, 1, 1));
        assert_eq!(range.end(), v4(192, 168, 1, 254));
        assert_eq!(range.len(), 254);
    }

    #[test]
    fn test_network_prefix_lengths() {
        for prefix in 0u8..=30 {
            let net: IpNet = format!("10.0.0.0/{prefix}").parse().unwrap();
            let range = AddressRange::from_network(net);
            assert_eq!(range.len(), (1u128 << (32 - prefix)) - 2, "prefix /{prefix}");
        }
    }

    #[test]
    fn test_small_networks() {
        let p2p = AddressRange::from_network("10.0.0.0/31".parse().unwrap());
        assert_eq!(p2p.len(), 2);

        let host = AddressRange::from_network("172.16.0.1/32".parse().unwrap());
        assert_eq!(host, AddressRange::single(v4(172, 16, 0, 1)));
    }

    #[test]
    fn test_ipv6_network_hosts() {
        let range = AddressRange::from_network("2001:db8::/126".parse().unwrap());
        let hosts: Vec<IpAddr> = range.iter().collect();
        assert_eq!(hosts, vec![v6("2001:db8::1"), v6("2001:db8::2")]);
    }

    #[test]
    fn test_contains_and_overlaps() {
        let a = AddressRange::from_hyphenated("10.0.0.1", "10").unwrap();
        let b = AddressRange::from_hyphenated("10.0.0.10", "20").unwrap();
        let c = AddressRange::single(v6("::a"));

        assert!(a.contains(&v4(10, 0, 0, 10)));
        assert!(!a.contains(&v4(10, 0, 0, 11)));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_full_ipv6_space_saturates() {
        let range = AddressRange::new(v6("::"), v6("ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff")).unwrap();
        assert_eq!(range.len(), u128::MAX);
    }
}
