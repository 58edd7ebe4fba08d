//! Alert delivery.
//!
//! The run hands one composed message to a [`Notifier`]. Two transports exist:
//! - [`TwilioNotifier`]: SMS through the Twilio REST API
//! - [`ConsoleNotifier`]: prints the message to stdout (dry runs)

mod console;
mod twilio;

pub use console::ConsoleNotifier;
pub use twilio::{TwilioConfig, TwilioNotifier};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    /// The request never got an HTTP answer.
    #[error("notification transport failed: {0}")]
    Transport(#[from] curl::Error),
    /// The gateway answered with a non-2xx status.
    #[error("notification rejected with HTTP {status}: {body}")]
    Rejected { status: u32, body: String },
}

/// Single-method delivery capability injected into the run.
pub trait Notifier {
    fn send(&self, message: &str) -> Result<(), NotifyError>;
}

/// Missing or unusable notifier settings. Raised at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required setting {0} (set the environment variable)")]
    Missing(&'static str),
    #[error("setting {0} still holds a template placeholder")]
    Placeholder(&'static str),
}

/// Build the alert text for the changed URLs.
pub fn compose_message(changed: &[String], error_count: usize) -> String {
    let mut msg = String::from("🔔 Page Watch Alert!\n\nNew or updated content detected at:\n\n");
    let lines: Vec<String> = changed.iter().map(|url| format!("• {}", url)).collect();
    msg.push_str(&lines.join("\n"));
    if error_count > 0 {
        msg.push_str(&format!(
            "\n\n⚠️ {} error(s) occurred during check.",
            error_count
        ));
    }
    msg
}
