use console::Term;
use sweepr_common::{info, warn};
use sweepr_core::sweep::ConfirmationGate;

use crate::terminal::colors::Theme;
use crate::terminal::format::format_count;

/// Asks on the controlling terminal before a large sweep starts.
pub struct TerminalGate {
    theme: Theme,
    assume_yes: bool,
}

impl TerminalGate {
    pub fn new(theme: Theme, assume_yes: bool) -> Self {
        Self { theme, assume_yes }
    }

    fn question(&self, count: u128) -> String {
        format!(
            "\n{}{}{}\n{} [y/N]: ",
            self.theme.warning.paint("You are trying to reach "),
            self.theme.warning_label.paint(&format_count(count)),
            self.theme.warning.paint(" targets, which seems like a lot."),
            self.theme.info.paint("Are you sure you want to continue?"),
        )
    }
}

impl ConfirmationGate for TerminalGate {
    fn confirm(&mut self, count: u128) -> bool {
        if self.assume_yes {
            info!("Sweeping {} targets without asking (--yes)", format_count(count));
            return true;
        }

        let term = Term::stdout();
        if !term.is_term() {
            warn!("Not asking on a non-interactive terminal, pass --yes to sweep {} targets", format_count(count));
            return false;
        }

        if let Err(e) = term.write_str(&self.question(count)) {
            warn!("Could not ask for confirmation: {e}");
            return false;
        }
        match term.read_line() {
            Ok(answer) => is_yes(&answer),
            Err(e) => {
                warn!("Could not read the answer: {e}");
                false
            }
        }
    }
}

/// Anything but an explicit yes declines.
fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
