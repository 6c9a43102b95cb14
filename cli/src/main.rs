mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, Commands, ping};
use sweepr_common::config::Config;
use terminal::colors::Theme;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let commands = CommandLine::parse_args();

    if commands.no_color {
        colored::control::set_override(false);
    }
    logging::init_logging(commands.quiet)?;

    let theme: Theme = if commands.no_color {
        Theme::plain()
    } else {
        Theme::default()
    };

    match commands.command {
        Commands::Ping {
            target,
            timeout,
            yes,
        } => {
            let cfg = Config {
                timeout,
                assume_yes: yes,
                quiet: commands.quiet,
                no_banner: commands.no_banner,
            };
            print::banner(&theme, cfg.no_banner, cfg.quiet);
            print::header(&theme, "getting ready to sweep", cfg.quiet);
            ping::ping(target, &cfg, theme).await
        }
    }
}
