//! Outcome notifications.
//!
//! Core operations report user-facing outcomes as a fire-and-forget
//! `(message, severity)` signal. The rendering layer decides how (or
//! whether) to show them; nothing here waits for acknowledgment.

use tracing::{error, info, warn};

/// How prominently a message should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Neutral status update.
    Info,
    /// Something succeeded.
    Success,
    /// Something is off but the operation went through.
    Warning,
    /// The operation failed.
    Error,
}

/// Sink for user-facing outcome messages.
pub trait Notifier: Send + Sync {
    /// Delivers one message. Must not block or fail.
    fn notify(&self, message: &str, severity: Severity);
}

/// Default notifier: routes messages to the tracing log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info | Severity::Success => info!(target: "habmate::notify", "{message}"),
            Severity::Warning => warn!(target: "habmate::notify", "{message}"),
            Severity::Error => error!(target: "habmate::notify", "{message}"),
        }
    }
}
