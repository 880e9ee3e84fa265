//! Prompt themes.

use owo_colors::OwoColorize;

use nextq_core::application::ports::Theme;

/// ANSI-coloured prompt styling.
///
/// Same layout as the plain theme: only colour and weight differ, so
/// piping the output through a colour stripper yields identical text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorTheme;

impl Theme for ColorTheme {
    fn question(&self, message: &str, hint: Option<&str>) -> String {
        match hint {
            Some(hint) => format!("{} {} {} ", "?".green(), message.bold(), hint.dimmed()),
            None => format!("{} {} ", "?".green(), message.bold()),
        }
    }

    fn option(&self, label: &str, highlighted: bool) -> String {
        if highlighted {
            format!("{} {}", ">".cyan(), label.cyan())
        } else {
            format!("  {label}")
        }
    }

    fn numbered_option(&self, number: usize, label: &str, is_default: bool) -> String {
        if is_default {
            format!("  {}) {} {}", number.cyan(), label, "(default)".dimmed())
        } else {
            format!("  {}) {}", number.cyan(), label)
        }
    }

    fn answered(&self, message: &str, value: &str) -> String {
        format!("{} {} > {}", "?".green(), message.bold(), value.cyan())
    }

    fn error(&self, message: &str) -> String {
        format!("  {}", message.red())
    }
}

/// Pick the theme for the given colour setting.
pub fn theme_for(color: bool) -> Box<dyn Theme> {
    if color {
        Box::new(ColorTheme)
    } else {
        Box::new(nextq_core::application::ports::PlainTheme)
    }
}
