use sweepr_common::probe::{PingEvent, ProbeResult, ProbeStats, Reachability};
use sweepr_core::sweep::Reporter;

use crate::terminal::colors::Theme;
use crate::terminal::format::format_rtt;
use crate::terminal::print;

/// Renders sweep events as operator-facing lines.
///
/// `-q` drops the start line, `-qq` also drops per-host lines. The closing summary
/// is always printed.
pub struct TerminalReporter {
    theme: Theme,
    quiet: u8,
}

impl TerminalReporter {
    pub fn new(theme: Theme, quiet: u8) -> Self {
        Self { theme, quiet }
    }

    fn lines(&self, event: &PingEvent) -> Vec<String> {
        let t: &Theme = &self.theme;

        match event {
            PingEvent::Started { target, .. } => {
                if self.quiet > 0 {
                    return Vec::new();
                }
                vec![
                    format!(
                        "{}{}{}",
                        t.info.paint("Starting ping to "),
                        t.label.paint(target),
                        t.info.paint("...")
                    ),
                    String::new(),
                ]
            }
            PingEvent::Host(result) => {
                if self.quiet > 1 {
                    return Vec::new();
                }
                vec![self.host_line(result)]
            }
            PingEvent::Completed { target, .. } => vec![
                String::new(),
                format!("{}{}", t.info.paint("Completed ping to "), t.label.paint(target)),
                String::new(),
            ],
            PingEvent::Interrupted { target, .. } => vec![
                String::new(),
                format!("{}{}", t.warning.paint("Stopping ping to "), t.label.paint(target)),
                String::new(),
            ],
        }
    }

    fn host_line(&self, result: &ProbeResult) -> String {
        let t: &Theme = &self.theme;
        let host: String = result.host.to_string();

        match result.reachability {
            Reachability::Alive { .. } => {
                let rtt: String = result.round_trip_ms().map(format_rtt).unwrap_or_default();
                format!(
                    "  {}{}{}{}{}",
                    t.success.paint("Response from "),
                    t.success_label.paint(&host),
                    t.success.paint(" received in "),
                    t.success_label.paint(&rtt),
                    t.success.paint(" ms")
                )
            }
            Reachability::Unreachable => format!(
                "  {}{}",
                t.fail_label.paint(&host),
                t.fail.paint(" is unreachable")
            ),
        }
    }
}

impl Reporter for TerminalReporter {
    fn report(&mut self, event: &PingEvent) {
        for line in self.lines(event) {
            print::print(&line);
        }

        let stats: Option<&ProbeStats> = match event {
            PingEvent::Completed { stats, .. } | PingEvent::Interrupted { stats, .. } => Some(stats),
            _ => None,
        };
        if let Some(stats) = stats {
            print::summary(&self.theme, stats);
            crate::mprint!();
            print::fat_separator(&self.theme);
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
