//! Change detection: fetch each URL, hash the body, compare with the stored hash.

use std::collections::HashSet;

use crate::checksum::sha256_hex;
use crate::fetch::{FetchError, Fetcher};
use crate::state::StateMap;

/// Classification of one resource in one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Fetched; hash matches the stored one.
    Unchanged,
    /// Fetched; no stored hash existed.
    New,
    /// Fetched; hash differs from the stored one.
    Changed,
    /// Fetch failed; stored hash left as it was.
    Error(FetchError),
}

impl CheckOutcome {
    pub fn is_change(&self) -> bool {
        matches!(self, CheckOutcome::New | CheckOutcome::Changed)
    }
}

#[derive(Debug, Clone)]
pub struct ResourceResult {
    pub url: String,
    pub outcome: CheckOutcome,
}

/// Everything one pass over the resource list produced.
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    /// Per-resource outcomes, in list order.
    pub results: Vec<ResourceResult>,
    /// New or changed URLs, in list order, each listed once.
    pub changed: Vec<String>,
    /// Failed URLs with their error message, in list order.
    pub errors: Vec<(String, String)>,
    /// Mapping to persist at the end of the run.
    pub state: StateMap,
}

/// Classify a freshly computed hash against the previous one.
pub fn classify(previous: Option<&str>, current: &str) -> CheckOutcome {
    match previous {
        None => CheckOutcome::New,
        Some(prev) if prev != current => CheckOutcome::Changed,
        Some(_) => CheckOutcome::Unchanged,
    }
}

/// Check every resource sequentially, in order.
///
/// `on_result` is called after each resource so callers can report progress.
/// Failed fetches never touch the resource's entry in the returned state.
pub fn check_with<F>(
    resources: &[String],
    previous: StateMap,
    fetcher: &dyn Fetcher,
    mut on_result: F,
) -> CheckReport
where
    F: FnMut(&ResourceResult),
{
    let mut report = CheckReport {
        state: previous,
        ..CheckReport::default()
    };
    let mut seen_changed: HashSet<String> = HashSet::new();

    for url in resources {
        let outcome = match fetcher.fetch(url) {
            Ok(body) => {
                let hash = sha256_hex(&body);
                let outcome = classify(report.state.get(url).map(String::as_str), &hash);
                if outcome.is_change() {
                    report.state.insert(url.clone(), hash);
                    if seen_changed.insert(url.clone()) {
                        report.changed.push(url.clone());
                    }
                }
                outcome
            }
            Err(e) => {
                tracing::warn!(url = %url, "fetch failed: {}", e);
                report.errors.push((url.clone(), e.to_string()));
                CheckOutcome::Error(e)
            }
        };
        tracing::debug!(url = %url, ?outcome, "checked");

        let result = ResourceResult {
            url: url.clone(),
            outcome,
        };
        on_result(&result);
        report.results.push(result);
    }

    report
}

/// [`check_with`] without a progress callback.
pub fn check(resources: &[String], previous: StateMap, fetcher: &dyn Fetcher) -> CheckReport {
    check_with(resources, previous, fetcher, |_| {})
}
