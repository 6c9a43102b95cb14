use colored::{Color, ColoredString, Colorize};

/// How one kind of text is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub color: Option<Color>,
    pub bold: bool,
    pub underline: bool,
}

impl Style {
    pub const PLAIN: Style = Style {
        color: None,
        bold: false,
        underline: false,
    };

    pub const fn fg(color: Color) -> Self {
        Style {
            color: Some(color),
            bold: false,
            underline: false,
        }
    }

    pub const fn bold(self) -> Self {
        Style { bold: true, ..self }
    }

    pub const fn underline(self) -> Self {
        Style {
            underline: true,
            ..self
        }
    }

    pub fn paint(&self, text: &str) -> ColoredString {
        let mut out: ColoredString = text.normal();
        if let Some(color) = self.color {
            out = out.color(color);
        }
        if self.bold {
            out = out.bold();
        }
        if self.underline {
            out = out.underline();
        }
        out
    }
}

/// Palette for everything the operator sees.
///
/// Passed to whatever renders output instead of living in globals, so `--no-color`
/// is a matter of handing out [`Theme::plain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub info: Style,
    pub label: Style,
    pub success: Style,
    pub success_label: Style,
    pub fail: Style,
    pub fail_label: Style,
    pub warning: Style,
    pub warning_label: Style,
    pub error: Style,
    pub separator: Style,
    pub accent: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            info: Style::fg(Color::White),
            label: Style::fg(Color::Magenta).bold(),
            success: Style::fg(Color::Green),
            success_label: Style::fg(Color::Green).bold().underline(),
            fail: Style::fg(Color::Yellow),
            fail_label: Style::fg(Color::Yellow).bold().underline(),
            warning: Style::fg(Color::Yellow),
            warning_label: Style::fg(Color::Red).bold(),
            error: Style::fg(Color::Red).bold(),
            separator: Style::fg(Color::BrightBlack),
            accent: Style::fg(Color::BrightGreen).bold(),
        }
    }
}

impl Theme {
    pub fn plain() -> Self {
        Self {
            info: Style::PLAIN,
            label: Style::PLAIN,
            success: Style::PLAIN,
            success_label: Style::PLAIN,
            fail: Style::PLAIN,
            fail_label: Style::PLAIN,
            warning: Style::PLAIN,
            warning_label: Style::PLAIN,
            error: Style::PLAIN,
            separator: Style::PLAIN,
            accent: Style::PLAIN,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_theme_paints_nothing() {
        let theme = Theme::plain();
        assert_eq!(theme.success_label.paint("192.0.2.1").to_string(), "192.0.2.1");
        assert_eq!(theme.error.paint("boom").to_string(), "boom");
    }

    #[test]
    fn style_builders_stack() {
        let style = Style::fg(Color::Green).bold().underline();
        assert_eq!(style.color, Some(Color::Green));
        assert!(style.bold && style.underline);
    }
}
