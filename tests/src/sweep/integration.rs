#![cfg(test)]
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use std::time::Duration;

use sweepr_common::error::SweepError;
use sweepr_common::network::target::TargetSpec;
use sweepr_common::probe::{PingEvent, ProbeStats};
use sweepr_core::scanner::icmp::IcmpProber;
use sweepr_core::scanner::resolver::{self, Resolution};
use sweepr_core::sweep::{StopSignal, Sweep, SweepOutcome, SweepState};

use crate::support::{CountingGate, RecordingReporter, ScriptedProber, StaticLookup};

const TIMEOUT: Duration = Duration::from_millis(500);

struct Harness {
    prober: ScriptedProber,
    reporter: RecordingReporter,
    gate: CountingGate,
    stop: StopSignal,
}

impl Harness {
    fn new(prober: ScriptedProber, approve: bool) -> Self {
        Self {
            prober,
            reporter: RecordingReporter::default(),
            gate: CountingGate::new(approve),
            stop: StopSignal::new(),
        }
    }

    async fn run(&self, target: &str) -> (Sweep, Result<SweepOutcome, SweepError>) {
        let spec = TargetSpec::from_str(target).unwrap();
        let resolution: Resolution = resolver::resolve(&spec, &StaticLookup::example()).await.unwrap();

        let mut sweep = Sweep::new(
            Box::new(self.prober.clone()),
            Box::new(self.reporter.clone()),
            Box::new(self.gate.clone()),
            self.stop.clone(),
            TIMEOUT,
        );
        let outcome = sweep.run(spec.raw(), resolution.hosts()).await;
        (sweep, outcome)
    }
}

fn ips(list: &[&str]) -> Vec<IpAddr> {
    list.iter().map(|ip| ip.parse().unwrap()).collect()
}

#[tokio::test]
async fn sweep_short_range() {
    let harness = Harness::new(ScriptedProber::answering(&["192.0.2.2", "192.0.2.4"]), false);

    let (sweep, outcome) = harness.run("192.0.2.1-5").await;

    let stats = *outcome.unwrap().stats();
    assert_eq!(stats.targets, 5);
    assert_eq!(stats.transmitted, 5);
    assert_eq!(stats.alive, 2);
    assert_eq!(stats.unreachable, 3);
    assert_eq!(sweep.state(), SweepState::Completed);
    assert_eq!(
        harness.prober.probed(),
        ips(&["192.0.2.1", "192.0.2.2", "192.0.2.3", "192.0.2.4", "192.0.2.5"])
    );
}

#[tokio::test]
async fn sweep_list_keeps_segment_order() {
    let harness = Harness::new(ScriptedProber::default(), false);

    let (_, outcome) = harness.run("192.0.2.1-5,9-14").await;

    assert_eq!(outcome.unwrap().stats().transmitted, 11);
    let probed: Vec<String> = harness.prober.probed().iter().map(|ip| ip.to_string()).collect();
    assert_eq!(probed.first().map(String::as_str), Some("192.0.2.1"));
    assert_eq!(probed[4], "192.0.2.5");
    assert_eq!(probed[5], "192.0.2.9");
    assert_eq!(probed.last().map(String::as_str), Some("192.0.2.14"));
}

#[tokio::test]
async fn sweep_ipv6_range() {
    let harness = Harness::new(ScriptedProber::answering(&["2001:db8::a"]), false);

    let (_, outcome) = harness.run("2001:db8::1-a").await;

    let stats = *outcome.unwrap().stats();
    assert_eq!(stats.transmitted, 10);
    assert_eq!(stats.alive, 1);
    assert_eq!(harness.prober.probed().last(), Some(&"2001:db8::a".parse().unwrap()));
}

#[tokio::test]
async fn sweep_hostname_probes_its_address() {
    let harness = Harness::new(ScriptedProber::answering(&["192.0.2.254"]), false);

    let (_, outcome) = harness.run("router.example.net").await;

    assert_eq!(outcome.unwrap().stats().alive, 1);
    assert_eq!(harness.prober.probed(), ips(&["192.0.2.254"]));

    let events = harness.reporter.events();
    assert!(matches!(&events[0], PingEvent::Started { target, count: 1 } if target == "router.example.net"));
}

#[tokio::test]
async fn unknown_hostname_is_unresolvable() {
    let spec = TargetSpec::from_str("nowhere.invalid").unwrap();
    let err = resolver::resolve(&spec, &StaticLookup::example()).await.unwrap_err();

    assert!(matches!(err, SweepError::UnresolvableTarget(ref s) if s == "nowhere.invalid"));
}

#[tokio::test]
async fn full_slash_24_does_not_ask() {
    let harness = Harness::new(ScriptedProber::default(), false);

    let (_, outcome) = harness.run("192.0.2.0/24").await;

    assert_eq!(outcome.unwrap().stats().transmitted, 254);
    assert_eq!(harness.gate.asked(), 0);
}

#[tokio::test]
async fn large_sweep_declined_sends_nothing() {
    let harness = Harness::new(ScriptedProber::default(), false);

    let (sweep, outcome) = harness.run("198.51.100.0/23").await;

    assert!(matches!(outcome, Err(SweepError::Aborted)));
    assert_eq!(harness.gate.asked(), 1);
    assert!(harness.prober.probed().is_empty());
    assert!(harness.reporter.events().is_empty());
    assert_eq!(sweep.state(), SweepState::Failed);
}

#[tokio::test]
async fn large_sweep_approved_runs_once_asked() {
    let harness = Harness::new(ScriptedProber::default(), true);

    let (_, outcome) = harness.run("198.51.100.0/23").await;

    assert_eq!(outcome.unwrap().stats().transmitted, 510);
    assert_eq!(harness.gate.asked(), 1);
}

#[tokio::test]
async fn interrupt_stops_after_in_flight_probe() {
    let stop = StopSignal::new();
    let prober = ScriptedProber {
        stop_on: Some((3, stop.clone())),
        ..ScriptedProber::answering(&["192.0.2.1"])
    };
    let mut harness = Harness::new(prober, false);
    harness.stop = stop;

    let (sweep, outcome) = harness.run("192.0.2.1-10").await;

    let Ok(SweepOutcome::Interrupted(stats)) = &outcome else {
        panic!("expected an interrupted sweep, got {outcome:?}");
    };
    assert_eq!(stats.transmitted, 3);
    assert_eq!(stats.alive + stats.unreachable, 3);
    assert_eq!(sweep.state(), SweepState::Interrupted);

    let events = harness.reporter.events();
    assert_eq!(events.len(), 5);
    assert_eq!(
        events.last(),
        Some(&PingEvent::Interrupted {
            target: "192.0.2.1-10".to_string(),
            stats: ProbeStats { targets: 10, transmitted: 3, alive: 1, unreachable: 2 },
        })
    );
}

/// Needs root.
#[tokio::test]
#[ignore]
async fn loopback_range_over_icmp() {
    let spec = TargetSpec::from_str("127.0.0.1-3").unwrap();
    let resolution = resolver::resolve(&spec, &StaticLookup::example()).await.unwrap();
    let reporter = RecordingReporter::default();

    let mut sweep = Sweep::new(
        Box::new(IcmpProber::new()),
        Box::new(reporter.clone()),
        Box::new(CountingGate::new(false)),
        StopSignal::new(),
        Duration::from_secs(1),
    );
    let outcome = sweep.run(spec.raw(), resolution.hosts()).await.unwrap();

    assert_eq!(outcome.stats().transmitted, 3);
    assert!(outcome.stats().alive >= 1, "127.0.0.1 did not answer");
    assert!(reporter.events().iter().any(|e| matches!(
        e,
        PingEvent::Host(result) if result.host == IpAddr::V4(Ipv4Addr::LOCALHOST) && result.is_alive()
    )));
}
