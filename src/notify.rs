use colored::Colorize;
use log::{error, info, warn};
use serde::Serialize;
use std::fmt;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A non-blocking, user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn new(level: NotificationLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, title, message)
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, title, message)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.title)
        } else {
            write!(f, "{}: {}", self.title, self.message)
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Prints notifications to the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let line = notification.to_string();
        match notification.level {
            NotificationLevel::Info => println!("ℹ️  {}", line.cyan()),
            NotificationLevel::Success => println!("✅ {}", line.green()),
            NotificationLevel::Warning => println!("⚠️  {}", line.yellow()),
            NotificationLevel::Error => println!("❌ {}", line.red()),
        }
    }
}

/// Forwards notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Info | NotificationLevel::Success => info!("{}", notification),
            NotificationLevel::Warning => warn!("{}", notification),
            NotificationLevel::Error => error!("{}", notification),
        }
    }
}

/// Keeps notifications so they can be returned to a caller.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    collected: Mutex<Vec<Notification>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Notification> {
        match self.collected.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn snapshot(&self) -> Vec<Notification> {
        match self.collected.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, notification: Notification) {
        match self.collected.lock() {
            Ok(mut guard) => guard.push(notification),
            Err(poisoned) => poisoned.into_inner().push(notification),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_omits_empty_message() {
        assert_eq!(Notification::success("Found 3 recipes", "").to_string(), "Found 3 recipes");
        assert_eq!(
            Notification::error("Search failed", "timeout").to_string(),
            "Search failed: timeout"
        );
    }

    #[test]
    fn test_collecting_notifier_drains() {
        let notifier = CollectingNotifier::new();
        notifier.notify(Notification::info("one", ""));
        notifier.notify(Notification::warning("two", "careful"));

        assert_eq!(notifier.snapshot().len(), 2);
        let taken = notifier.take();
        assert_eq!(taken[1].level, NotificationLevel::Warning);
        assert!(notifier.snapshot().is_empty());
    }
}
