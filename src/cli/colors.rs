//! Color handling for report output.
//!
//! Findings are coloured by severity when the terminal supports it. The
//! decision respects `NO_COLOR`, `FORCE_COLOR`, `TERM=dumb`, whether stdout
//! is a TTY, and the `--color` flag.

use std::io::IsTerminal;

use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};

use crate::lint::Severity;

/// Level of color support detected for the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSupport {
    /// No color support (NO_COLOR set, TERM=dumb, piped output)
    None,
    /// Basic 16-color support
    Basic,
    /// Extended 256-color support
    Extended,
    /// True color (24-bit) support
    TrueColor,
}

impl ColorSupport {
    /// Detect color support from environment and terminal capabilities
    #[must_use]
    pub fn detect() -> Self {
        // https://no-color.org/
        if std::env::var_os("NO_COLOR").is_some() {
            return Self::None;
        }

        if std::env::var_os("FORCE_COLOR").is_some() {
            return Self::detect_level();
        }

        if !std::io::stdout().is_terminal() {
            return Self::None;
        }

        if std::env::var("TERM").is_ok_and(|term| term == "dumb") {
            return Self::None;
        }

        Self::detect_level()
    }

    /// Resolve a `--color` choice against the environment.
    #[must_use]
    pub fn for_choice(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::detect(),
            ColorChoice::Always => Self::detect_level(),
            ColorChoice::Never => Self::None,
        }
    }

    fn detect_level() -> Self {
        if std::env::var("COLORTERM").is_ok_and(|ct| ct == "truecolor" || ct == "24bit") {
            return Self::TrueColor;
        }
        if std::env::var("TERM").is_ok_and(|term| term.contains("256color")) {
            return Self::Extended;
        }
        Self::Basic
    }

    /// Check if any color is supported
    #[must_use]
    pub const fn has_color(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Make the `colored` crate agree with this decision.
    ///
    /// `colored` runs its own TTY detection, which would strip styles under
    /// `--color always` with piped output.
    pub fn apply_global(self) {
        colored::control::set_override(self.has_color());
    }
}

impl Default for ColorSupport {
    fn default() -> Self {
        Self::detect()
    }
}

/// The `--color` flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

/// Style for a severity label: errors red and bold, warnings yellow.
#[must_use]
pub fn severity_style(severity: Severity, text: &str) -> ColoredString {
    match severity {
        Severity::Error => text.red().bold(),
        Severity::Warning => text.yellow(),
    }
}

/// Apply a style function conditionally based on color support
pub fn styled<S, F>(text: S, style_fn: F, support: ColorSupport) -> String
where
    S: AsRef<str>,
    F: FnOnce(&str) -> ColoredString,
{
    if support.has_color() {
        style_fn(text.as_ref()).to_string()
    } else {
        text.as_ref().to_string()
    }
}
