//! User-facing notifications.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::{error, info, warn};

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Warning,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Success => "success",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
        };
        f.write_str(s)
    }
}

/// Sink for transient messages about completed actions.
pub trait Notifier: Send + Sync {
    fn notify(&self, level: Level, message: &str);
}

/// Forwards notifications to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, level: Level, message: &str) {
        match level {
            Level::Success | Level::Info => info!(%level, "{}", message),
            Level::Warning => warn!("{}", message),
            Level::Error => error!("{}", message),
        }
    }
}

/// Keeps notifications in memory. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemoryNotifier {
    messages: Arc<Mutex<Vec<(Level, String)>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received so far.
    pub fn messages(&self) -> Vec<(Level, String)> {
        match self.messages.lock() {
            Ok(messages) => messages.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// The most recent notification.
    pub fn last(&self) -> Option<(Level, String)> {
        self.messages().pop()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, level: Level, message: &str) {
        let mut messages = match self.messages.lock() {
            Ok(messages) => messages,
            Err(poisoned) => poisoned.into_inner(),
        };
        messages.push((level, message.to_string()));
    }
}
