//! Scripted stand-ins for the pieces of a sweep that touch the outside world.

use std::collections::{HashMap, HashSet};
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use sweepr_common::probe::{PingEvent, Reachability};
use sweepr_core::scanner::resolver::HostnameLookup;
use sweepr_core::scanner::{ProbeClient, ProbeError};
use sweepr_core::sweep::{ConfirmationGate, Reporter, StopSignal};

/// Answers for the hosts in `alive`, stays silent for everything else.
#[derive(Clone, Default)]
pub struct ScriptedProber {
    pub alive: HashSet<IpAddr>,
    pub probed: Arc<Mutex<Vec<IpAddr>>>,
    /// Requests a stop while handling the n-th probe (1-based).
    pub stop_on: Option<(usize, StopSignal)>,
}

impl ScriptedProber {
    pub fn answering(alive: &[&str]) -> Self {
        Self {
            alive: alive.iter().map(|ip| ip.parse().unwrap()).collect(),
            ..Self::default()
        }
    }

    pub fn probed(&self) -> Vec<IpAddr> {
        self.probed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProbeClient for ScriptedProber {
    async fn probe(&self, addr: IpAddr, _timeout: Duration) -> Result<Reachability, ProbeError> {
        let calls = {
            let mut probed = self.probed.lock().unwrap();
            probed.push(addr);
            probed.len()
        };

        if let Some((n, stop)) = &self.stop_on {
            if calls == *n {
                stop.request();
            }
        }

        if self.alive.contains(&addr) {
            Ok(Reachability::Alive { rtt: Duration::from_millis(3) })
        } else {
            Ok(Reachability::Unreachable)
        }
    }
}

#[derive(Clone, Default)]
pub struct RecordingReporter {
    pub events: Arc<Mutex<Vec<PingEvent>>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<PingEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, event: &PingEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

#[derive(Clone)]
pub struct CountingGate {
    pub answer: bool,
    pub asked: Arc<AtomicUsize>,
}

impl CountingGate {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

impl ConfirmationGate for CountingGate {
    fn confirm(&mut self, _count: u128) -> bool {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

pub struct StaticLookup(pub HashMap<&'static str, IpAddr>);

impl StaticLookup {
    pub fn example() -> Self {
        StaticLookup(HashMap::from([
            ("router.example.net", "192.0.2.254".parse().unwrap()),
            ("v6.example.net", "2001:db8::fe".parse().unwrap()),
        ]))
    }
}

#[async_trait]
impl HostnameLookup for StaticLookup {
    async fn lookup(&self, host: &str) -> Option<IpAddr> {
        self.0.get(host).copied()
    }
}
