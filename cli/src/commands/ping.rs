use std::process::ExitCode;

use anyhow::Context;
use sweepr_common::config::Config;
use sweepr_common::error::SweepError;
use sweepr_common::network::target::TargetSpec;
use sweepr_common::{success, warn};
use sweepr_core::scanner::icmp::IcmpProber;
use sweepr_core::scanner::resolver::{self, Resolution, SystemLookup};
use sweepr_core::sweep::{StopSignal, Sweep, SweepOutcome};
use sweepr_core::system;
use tracing::debug;

use crate::terminal::colors::Theme;
use crate::terminal::format::format_count;
use crate::terminal::print;
use crate::terminal::prompt::TerminalGate;
use crate::terminal::reporter::TerminalReporter;

/// Exit status when the operator declines a large sweep.
const EXIT_ABORTED: u8 = 3;
/// Exit status after an interrupt, as a shell reports SIGINT.
const EXIT_INTERRUPTED: u8 = 130;

pub async fn ping(target: TargetSpec, cfg: &Config, theme: Theme) -> anyhow::Result<ExitCode> {
    system::ensure_privileged().context("ICMP sweeps need raw sockets, run sweepr as root")?;

    let resolution: Resolution = resolver::resolve(&target, &SystemLookup).await?;
    for skipped in resolution.skipped() {
        warn!("Skipping {skipped}");
    }
    debug!("{} resolves to {} hosts", target.raw(), resolution.count());

    let stop = StopSignal::new();
    listen_for_interrupt(stop.clone());

    print::header(&theme, "sweeping", cfg.quiet);
    let mut sweep = Sweep::new(
        Box::new(IcmpProber::new()),
        Box::new(TerminalReporter::new(theme.clone(), cfg.quiet)),
        Box::new(TerminalGate::new(theme, cfg.assume_yes)),
        stop,
        cfg.timeout,
    );

    match sweep.run(target.raw(), resolution.hosts()).await {
        Ok(SweepOutcome::Completed(stats)) => {
            success!("{} of {} hosts answered", format_count(stats.alive.into()), format_count(stats.targets));
            Ok(ExitCode::SUCCESS)
        }
        Ok(SweepOutcome::Interrupted(stats)) => {
            warn!("Interrupted after {} of {} hosts", format_count(stats.transmitted.into()), format_count(stats.targets));
            Ok(ExitCode::from(EXIT_INTERRUPTED))
        }
        Err(SweepError::Aborted) => {
            warn!("Aborted, no echo requests were sent");
            Ok(ExitCode::from(EXIT_ABORTED))
        }
        Err(e) => Err(e).with_context(|| format!("sweep of {} failed", target.raw())),
    }
}

/// The first Ctrl-C stops a running sweep after its in-flight probe. Before probing
/// starts, or on a second Ctrl-C, the process exits right away.
fn listen_for_interrupt(stop: StopSignal) {
    tokio::spawn(async move {
        loop {
            if let Err(e) = tokio::signal::ctrl_c().await {
                debug!("cannot listen for Ctrl-C: {e}");
                return;
            }
            if stop.is_requested() || !stop.request() {
                std::process::exit(EXIT_INTERRUPTED.into());
            }
            warn!("Stopping after the current probe, press Ctrl-C again to quit now");
        }
    });
}
