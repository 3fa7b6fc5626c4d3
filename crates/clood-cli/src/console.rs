//! Coloured terminal notifications.

use colored::Colorize;

use clood::{Level, Notifier};

/// Prints session notifications to stderr, one line each.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: Level, message: &str) {
        let tag = match level {
            Level::Success => "✓".green().bold(),
            Level::Info => "•".cyan().bold(),
            Level::Warning => "!".yellow().bold(),
            Level::Error => "✗".red().bold(),
        };
        eprintln!("{} {}", tag, message);
    }
}
