//! # Sweep Orchestration
//!
//! Drives a resolved host set through a [`ProbeClient`], one host at a time, in
//! resolution order.
//!
//! ```text
//! Idle ──(count > 254)──> Confirming ──(declined)──> Failed
//!   │                          │
//!   └────────────┬─────────────┘
//!                v
//!             Running ──(hosts exhausted)──> Completed
//!                ├─────(stop requested)────> Interrupted
//!                └─────(transport fault)───> Failed
//! ```
//!
//! Every probe outcome is streamed to the [`Reporter`] as soon as it is known. The stop
//! signal is checked between probes, never during one.

use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use sweepr_common::error::SweepError;
use sweepr_common::network::hosts::HostSet;
use sweepr_common::probe::{PingEvent, ProbeResult, ProbeStats};
use tracing::debug;

use crate::scanner::ProbeClient;

/// Host counts above this need operator approval before anything is sent.
pub const CONFIRMATION_THRESHOLD: u128 = 254;

/// Consumes the events of a sweep.
pub trait Reporter: Send {
    fn report(&mut self, event: &PingEvent);
}

/// Asks the operator to approve a large sweep.
pub trait ConfirmationGate: Send {
    /// Returns `true` to go ahead with probing `count` hosts.
    fn confirm(&mut self, count: u128) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepState {
    Idle,
    Confirming,
    Running,
    Completed,
    Interrupted,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepOutcome {
    Completed(ProbeStats),
    Interrupted(ProbeStats),
}

impl SweepOutcome {
    pub fn stats(&self) -> &ProbeStats {
        match self {
            SweepOutcome::Completed(stats) | SweepOutcome::Interrupted(stats) => stats,
        }
    }
}

/// Cooperative cancellation shared between a sweep and whoever wants it stopped.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    inner: Arc<StopFlags>,
}

#[derive(Debug, Default)]
struct StopFlags {
    armed: AtomicBool,
    requested: AtomicBool,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks a running sweep to stop after its in-flight probe.
    ///
    /// Returns `false` when no sweep has started probing yet, in which case nobody will
    /// observe the request and the caller has to stop on its own.
    pub fn request(&self) -> bool {
        self.inner.requested.store(true, Ordering::SeqCst);
        self.inner.armed.load(Ordering::SeqCst)
    }

    pub fn is_requested(&self) -> bool {
        self.inner.requested.load(Ordering::SeqCst)
    }

    fn arm(&self) {
        self.inner.armed.store(true, Ordering::SeqCst);
    }
}

pub struct Sweep {
    prober: Box<dyn ProbeClient>,
    reporter: Box<dyn Reporter>,
    gate: Box<dyn ConfirmationGate>,
    stop: StopSignal,
    timeout: Duration,
    state: SweepState,
}

impl Sweep {
    pub fn new(
        prober: Box<dyn ProbeClient>,
        reporter: Box<dyn Reporter>,
        gate: Box<dyn ConfirmationGate>,
        stop: StopSignal,
        timeout: Duration,
    ) -> Self {
        Self {
            prober,
            reporter,
            gate,
            stop,
            timeout,
            state: SweepState::Idle,
        }
    }

    pub fn state(&self) -> SweepState {
        self.state
    }

    /// Probes every host in `hosts`, in order, reporting as it goes.
    ///
    /// `target` is the operator's original string, used in the events. Declining the
    /// confirmation yields [`SweepError::Aborted`] with nothing sent; a transport fault
    /// yields [`SweepError::Transport`] and stops the run.
    pub async fn run(&mut self, target: &str, hosts: &HostSet) -> Result<SweepOutcome, SweepError> {
        self.state = SweepState::Idle;
        let count: u128 = hosts.count();
        let mut stats = ProbeStats::new(count);

        if count > CONFIRMATION_THRESHOLD {
            self.state = SweepState::Confirming;
            if !self.gate.confirm(count) {
                self.state = SweepState::Failed;
                return Err(SweepError::Aborted);
            }
        }

        self.state = SweepState::Running;
        self.stop.arm();
        self.reporter.report(&PingEvent::Started {
            target: target.to_string(),
            count,
        });

        for host in hosts.iter() {
            if self.stop.is_requested() {
                return Ok(self.interrupt(target, stats));
            }

            let result: ProbeResult = match self.probe(host).await {
                Ok(result) => result,
                Err(e) => {
                    self.state = SweepState::Failed;
                    return Err(e);
                }
            };
            stats.record(&result);
            self.reporter.report(&PingEvent::Host(result));
        }

        if self.stop.is_requested() {
            return Ok(self.interrupt(target, stats));
        }

        self.state = SweepState::Completed;
        self.reporter.report(&PingEvent::Completed {
            target: target.to_string(),
            stats,
        });
        Ok(SweepOutcome::Completed(stats))
    }

    fn interrupt(&mut self, target: &str, stats: ProbeStats) -> SweepOutcome {
        debug!("stop requested after {} probes", stats.transmitted);
        self.state = SweepState::Interrupted;
        self.reporter.report(&PingEvent::Interrupted {
            target: target.to_string(),
            stats,
        });
        SweepOutcome::Interrupted(stats)
    }

    async fn probe(&self, host: IpAddr) -> Result<ProbeResult, SweepError> {
        let reachability = self.prober.probe(host, self.timeout).await?;
        Ok(ProbeResult::new(host, reachability))
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
