//! Probe outcomes, running counters and the events a sweep emits.

use std::net::IpAddr;
use std::time::Duration;

/// What a single echo attempt learned about a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reachability {
    Alive { rtt: Duration },
    /// No reply before the timeout. A normal outcome, not an error.
    Unreachable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResult {
    pub host: IpAddr,
    pub reachability: Reachability,
}

impl ProbeResult {
    pub fn new(host: IpAddr, reachability: Reachability) -> Self {
        Self { host, reachability }
    }

    pub fn is_alive(&self) -> bool {
        matches!(self.reachability, Reachability::Alive { .. })
    }

    /// Round-trip time in milliseconds, present only for live hosts.
    pub fn round_trip_ms(&self) -> Option<f64> {
        match self.reachability {
            Reachability::Alive { rtt } => Some(rtt.as_nanos() as f64 / 1_000_000.0),
            Reachability::Unreachable => None,
        }
    }
}

/// Running counters for one sweep. Only ever increase within a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeStats {
    /// Expected host count from resolution.
    pub targets: u128,
    pub transmitted: u64,
    pub alive: u64,
    pub unreachable: u64,
}

impl ProbeStats {
    pub fn new(targets: u128) -> Self {
        Self {
            targets,
            ..Self::default()
        }
    }

    pub fn record(&mut self, result: &ProbeResult) {
        self.transmitted += 1;
        if result.is_alive() {
            self.alive += 1;
        } else {
            self.unreachable += 1;
        }
    }
}

/// Structured events streamed to a reporter while a sweep runs.
#[derive(Debug, Clone, PartialEq)]
pub enum PingEvent {
    Started { target: String, count: u128 },
    Host(ProbeResult),
    Completed { target: String, stats: ProbeStats },
    Interrupted { target: String, stats: ProbeStats },
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
