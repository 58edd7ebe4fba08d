use super::{NotifyError, Notifier};

/// Prints the alert instead of sending it. Always succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

const RULE: &str = "==================================================";

impl Notifier for ConsoleNotifier {
    fn send(&self, message: &str) -> Result<(), NotifyError> {
        println!("\n{}", RULE);
        println!("MOCK ALERT (not actually sent):");
        println!("{}", RULE);
        println!("{}", message);
        println!("{}\n", RULE);
        tracing::info!(chars = message.chars().count(), "alert printed to console");
        Ok(())
    }
}
