//! The ordered, deduplicated host sequence a sweep walks.

use std::net::IpAddr;

use crate::network::range::{AddressRange, to_bits};

/// Ordered ranges resolved from a target, expanded lazily.
///
/// An address that appears in more than one range is yielded once, at its first
/// position. [`HostSet::count`] matches what [`HostSet::iter`] yields without walking it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostSet {
    ranges: Vec<AddressRange>,
}

impl HostSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, range: AddressRange) {
        self.ranges.push(range);
    }

    pub fn add_single(&mut self, addr: IpAddr) {
        self.push(AddressRange::single(addr));
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Number of distinct addresses across all ranges, from the union of their intervals.
    pub fn count(&self) -> u128 {
        let mut intervals: Vec<(bool, u128, u128)> = self
            .ranges
            .iter()
            .map(|r| (r.is_ipv4(), to_bits(r.start()), to_bits(r.end())))
            .collect();
        intervals.sort_unstable();

        let mut total: u128 = 0;
        let mut current: Option<(bool, u128, u128)> = None;

        for (v4, start, end) in intervals {
            current = match current {
                Some((cur_v4, cur_start, cur_end))
                    if cur_v4 == v4 && start <= cur_end.saturating_add(1) =>
                {
                    Some((cur_v4, cur_start, cur_end.max(end)))
                }
                Some(done) => {
                    total = total.saturating_add(span(done));
                    Some((v4, start, end))
                }
                None => Some((v4, start, end)),
            };
        }
        if let Some(last) = current {
            total = total.saturating_add(span(last));
        }
        total
    }

    /// Walks every host in range order, skipping addresses an earlier range already
    /// produced. Each call starts over from the first range.
    pub fn iter(&self) -> impl Iterator<Item = IpAddr> + '_ {
        self.ranges.iter().enumerate().flat_map(move |(idx, range)| {
            let earlier: Vec<&AddressRange> = self.ranges[..idx]
                .iter()
                .filter(|prev| prev.overlaps(range))
                .collect();
            range
                .iter()
                .filter(move |addr| !earlier.iter().any(|prev| prev.contains(addr)))
        })
    }
}

fn span((_, start, end): (bool, u128, u128)) -> u128 {
    (end - start).saturating_add(1)
}

impl FromIterator<AddressRange> for HostSet {
    fn from_iter<T: IntoIterator<Item = AddressRange>>(iter: T) -> Self {
        Self {
            ranges: iter.into_iter().collect(),
        }
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
