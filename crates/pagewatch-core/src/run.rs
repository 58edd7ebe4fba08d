//! One check-and-notify pass: load state, detect, alert, save.

use anyhow::Result;

use crate::detector::{self, ResourceResult};
use crate::fetch::Fetcher;
use crate::notify::{compose_message, Notifier};
use crate::state::StateStore;

/// What a run did, for the CLI summary.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub results: Vec<ResourceResult>,
    pub changed: Vec<String>,
    pub errors: Vec<(String, String)>,
    /// True if an alert was handed to the notifier and it reported success.
    pub notified: bool,
    /// True if the state file was unparsable and the run started from empty.
    pub state_reset: bool,
}

impl RunSummary {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

pub fn run_check(
    resources: &[String],
    store: &StateStore,
    fetcher: &dyn Fetcher,
    notifier: &dyn Notifier,
) -> Result<RunSummary> {
    run_check_with(resources, store, fetcher, notifier, |_| {})
}

/// Like [`run_check`], with a per-resource progress callback.
///
/// The state file is written even if every fetch failed. Notification
/// failures are logged and do not fail the run.
pub fn run_check_with<F>(
    resources: &[String],
    store: &StateStore,
    fetcher: &dyn Fetcher,
    notifier: &dyn Notifier,
    on_result: F,
) -> Result<RunSummary>
where
    F: FnMut(&ResourceResult),
{
    let loaded = store.load_checked()?;
    let previous = loaded.state;
    tracing::info!(resources = resources.len(), known = previous.len(), "starting check");

    let report = detector::check_with(resources, previous, fetcher, on_result);

    let mut notified = false;
    if !report.changed.is_empty() {
        tracing::info!(changed = report.changed.len(), "changes detected");
        let message = compose_message(&report.changed, report.errors.len());
        match notifier.send(&message) {
            Ok(()) => notified = true,
            Err(e) => tracing::error!("failed to send notification: {}", e),
        }
    } else {
        tracing::info!("no changes detected");
    }

    for (url, msg) in &report.errors {
        tracing::warn!(url = %url, "error during check: {}", msg);
    }

    store.save(&report.state)?;
    tracing::info!(path = %store.path().display(), "state saved");

    Ok(RunSummary {
        results: report.results,
        changed: report.changed,
        errors: report.errors,
        notified,
        state_reset: loaded.reset,
    })
}
