//! Amber cliclack theme for the package finder

use cliclack::ThemeState;
use console::{style, Emoji, Style};

const CHECKBOX_PICKED: Emoji = Emoji("◉", "[x]");
const CHECKBOX_CURSOR: Emoji = Emoji("◯", "[>]");
const CHECKBOX_IDLE: Emoji = Emoji("◯", "[ ]");
const SPINNER: Emoji = Emoji("⣾⣽⣻⢿⡿⣟⣯⣷", "-\\|/");

/// Amber theme matching Homebrew's branding
#[derive(Debug, Clone, Default)]
pub struct BrewseTheme;

impl cliclack::Theme for BrewseTheme {
    fn bar_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => Style::new().yellow(),
            ThemeState::Error(_) => Style::new().red(),
            ThemeState::Cancel => Style::new().dim(),
            ThemeState::Submit => Style::new().yellow().dim(),
        }
    }

    fn state_symbol_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Error(_) => Style::new().red(),
            ThemeState::Cancel => Style::new().dim(),
            _ => Style::new().yellow(),
        }
    }

    /// Picked packages stay visible while the list is filtered
    fn checkbox_symbol(&self, state: &ThemeState, selected: bool, active: bool) -> String {
        match state {
            ThemeState::Active | ThemeState::Error(_) => match (selected, active) {
                (true, _) => style(CHECKBOX_PICKED).yellow().bold().to_string(),
                (false, true) => style(CHECKBOX_CURSOR).yellow().to_string(),
                (false, false) => style(CHECKBOX_IDLE).dim().to_string(),
            },
            _ => String::new(),
        }
    }

    fn checkbox_style(&self, state: &ThemeState, selected: bool, active: bool) -> Style {
        match state {
            ThemeState::Cancel if selected => Style::new().dim().strikethrough(),
            ThemeState::Submit if selected => Style::new().yellow(),
            _ if selected => Style::new().bold(),
            _ if !active => Style::new().dim(),
            _ => Style::new(),
        }
    }

    fn spinner_chars(&self) -> String {
        SPINNER.to_string()
    }
}

/// Install the theme for all subsequent prompts
pub fn init_theme() {
    cliclack::set_theme(BrewseTheme);
}
