use colored::*;
use sweepr_common::probe::ProbeStats;
use tracing::info;
use unicode_width::UnicodeWidthStr;

use crate::terminal::colors::{Style, Theme};
use crate::terminal::format::format_count;

pub const TOTAL_WIDTH: usize = 64;
/// Events on this target are written verbatim, without a level symbol.
pub const PRINT_TARGET: &str = "sweepr::print";

#[macro_export]
macro_rules! mprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

pub fn print(msg: &str) {
    info!(target: "sweepr::print", raw_msg = msg);
}

pub fn banner(theme: &Theme, no_banner: bool, q_level: u8) {
    if no_banner || q_level > 0 {
        return;
    }

    let text_content: String = format!("⟦ SWEEPR v{} ⟧", env!("CARGO_PKG_VERSION"));
    let text_width: usize = UnicodeWidthStr::width(text_content.as_str());
    let text: ColoredString = theme.accent.paint(&text_content);
    let sep: ColoredString = theme
        .separator
        .paint(&"═".repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2));

    print(&format!("{}{}{}", sep, text, sep));
}

pub fn header(theme: &Theme, msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }

    let formatted: String = format!("⟦ {} ⟧", msg.to_uppercase());
    let msg_len: usize = UnicodeWidthStr::width(formatted.as_str());

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    print(&format!(
        "{}{}{}",
        theme.separator.paint(&"─".repeat(left)),
        theme.accent.paint(&formatted),
        theme.separator.paint(&"─".repeat(right))
    ));
}

pub fn fat_separator(theme: &Theme) {
    print(&theme.separator.paint(&"═".repeat(TOTAL_WIDTH)).to_string());
}

/// Prints the end-of-run counters as a boxed table.
pub fn summary(theme: &Theme, stats: &ProbeStats) {
    let value = Style::PLAIN.bold();
    let columns: [(&str, String, Style); 4] = [
        ("Targets", format_count(stats.targets), value),
        ("Transmitted", format_count(stats.transmitted.into()), value),
        (
            "Alive",
            format_count(stats.alive.into()),
            Style {
                color: theme.success.color,
                ..value
            },
        ),
        (
            "Unreachable",
            format_count(stats.unreachable.into()),
            Style {
                color: theme.error.color,
                ..value
            },
        ),
    ];

    for line in summary_lines(theme, &columns) {
        print(&line);
    }
}

fn summary_lines(theme: &Theme, columns: &[(&str, String, Style)]) -> Vec<String> {
    let widths: Vec<usize> = columns
        .iter()
        .map(|(head, cell, _)| UnicodeWidthStr::width(*head).max(UnicodeWidthStr::width(cell.as_str())))
        .collect();

    let rule = |left: &str, mid: &str, right: &str| -> String {
        let inner: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        theme
            .separator
            .paint(&format!("{left}{}{right}", inner.join(mid)))
            .to_string()
    };
    let row = |cells: Vec<String>| -> String {
        let bar: String = theme.separator.paint("│").to_string();
        let mut line: String = bar.clone();
        for cell in cells {
            line.push_str(&format!(" {cell} {bar}"));
        }
        line
    };

    let heads: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|((head, _, _), w)| theme.label.paint(&pad(head, *w)).to_string())
        .collect();
    let values: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|((_, cell, style), w)| style.paint(&pad(cell, *w)).to_string())
        .collect();

    vec![
        rule("┌", "┬", "┐"),
        row(heads),
        rule("├", "┼", "┤"),
        row(values),
        rule("└", "┴", "┘"),
    ]
}

fn pad(text: &str, width: usize) -> String {
    let fill: usize = width.saturating_sub(UnicodeWidthStr::width(text));
    format!("{text}{}", " ".repeat(fill))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lines_align() {
        let theme = Theme::plain();
        let columns = [
            ("Targets", "1,000".to_string(), Style::PLAIN),
            ("Transmitted", "7".to_string(), Style::PLAIN),
        ];

        let lines = summary_lines(&theme, &columns);

        assert_eq!(
            lines,
            vec![
                "┌─────────┬─────────────┐",
                "│ Targets │ Transmitted │",
                "├─────────┼─────────────┤",
                "│ 1,000   │ 7           │",
                "└─────────┴─────────────┘",
            ]
        );
    }

    #[test]
    fn test_wide_value_widens_column() {
        let theme = Theme::plain();
        let columns = [("Alive", "123,456,789".to_string(), Style::PLAIN)];

        let lines = summary_lines(&theme, &columns);

        assert_eq!(lines[1], "│ Alive       │");
        assert_eq!(lines[3], "│ 123,456,789 │");
    }
}
