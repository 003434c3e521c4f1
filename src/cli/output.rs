use std::fmt;
use std::sync::RwLock;

use colored::Colorize;
use once_cell::sync::Lazy;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
}

#[derive(Clone, Copy, Debug)]
pub struct OutputPreferences {
    pub color_enabled: bool,
}

impl Default for OutputPreferences {
    fn default() -> Self {
        Self {
            color_enabled: true,
        }
    }
}

static PREFERENCES: Lazy<RwLock<OutputPreferences>> =
    Lazy::new(|| RwLock::new(OutputPreferences::default()));

pub fn set_preferences(prefs: OutputPreferences) {
    if let Ok(mut guard) = PREFERENCES.write() {
        *guard = prefs;
    }
    if prefs.color_enabled {
        colored::control::unset_override();
    } else {
        colored::control::set_override(false);
    }
}

pub fn current_preferences() -> OutputPreferences {
    PREFERENCES
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn label(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Info => "INFO:",
        MessageKind::Success => "OK:",
        MessageKind::Warning => "WARNING:",
        MessageKind::Error => "ERROR:",
        MessageKind::Hint => "HINT:",
        MessageKind::Section => "",
    }
}

pub(crate) fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    let formatted = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        _ => format!("{} {}", label(kind), text),
    };

    match kind {
        MessageKind::Success => formatted.bright_green().to_string(),
        MessageKind::Warning => formatted.bright_yellow().to_string(),
        MessageKind::Error => formatted.bright_red().to_string(),
        MessageKind::Hint => formatted.dimmed().to_string(),
        MessageKind::Section => formatted.bold().to_string(),
        MessageKind::Info => formatted,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message);
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn hint(message: impl fmt::Display) {
    print(MessageKind::Hint, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Green for gains, red for losses.
pub fn signed(text: &str, positive: bool) -> String {
    if positive {
        text.green().to_string()
    } else {
        text.red().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_styles_carry_labels() {
        colored::control::set_override(false);
        assert_eq!(apply_style(MessageKind::Error, "boom"), "ERROR: boom");
        assert_eq!(apply_style(MessageKind::Section, " Fleet "), "=== Fleet ===");
        assert_eq!(signed("-5.00 zł", false), "-5.00 zł");
    }
}
