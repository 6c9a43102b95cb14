pub mod ping;

use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use sweepr_common::network::target::TargetSpec;

const TARGET_HELP: &str = "\
<TARGET> can be an IPv4 or IPv6 host, subnet or range, a comma-separated list of those, or a hostname.

Examples:
  sweepr ping 192.0.2.1
  sweepr ping 192.0.2.0/24
  sweepr ping 192.0.2.1-5
  sweepr ping 192.0.2.1-5,9-14
  sweepr ping 2001:db8::1
  sweepr ping 2001:db8::/126
  sweepr ping 2001:db8::1-a
  sweepr ping gateway.example.net";

#[derive(Parser)]
#[command(name = "sweepr", version)]
#[command(about = "Reach every host in a target with an ICMP echo.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// -q hides the banner and status lines, -qq also hides per-host lines
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ping every host in <TARGET>
    #[command(alias = "p", after_long_help = TARGET_HELP)]
    Ping {
        /// Host, subnet, range, comma-separated list or hostname
        target: TargetSpec,

        /// Seconds to wait for each echo reply
        #[arg(long, value_name = "SECONDS", default_value = "0.5", value_parser = parse_timeout)]
        timeout: Duration,

        /// Approve sweeps of more than 254 hosts without asking
        #[arg(short, long)]
        yes: bool,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Accepts whole or fractional seconds ("1", "0.25").
fn parse_timeout(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !secs.is_finite() || secs <= 0.0 {
        return Err(format!("'{s}' must be a positive number of seconds"));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| e.to_string())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
