//! `pagewatch check` – one check-and-notify pass over the configured URLs.

use anyhow::{Context, Result};
use pagewatch_core::config::WatchConfig;
use pagewatch_core::detector::{CheckOutcome, ResourceResult};
use pagewatch_core::fetch::CurlFetcher;
use pagewatch_core::notify::{ConsoleNotifier, Notifier, TwilioConfig, TwilioNotifier};
use pagewatch_core::run::{self, RunSummary};
use pagewatch_core::state::StateStore;

const RULE: &str = "==================================================";

fn print_result(r: &ResourceResult) {
    match &r.outcome {
        CheckOutcome::New => println!("  NEW      {}", r.url),
        CheckOutcome::Changed => println!("  CHANGED  {}", r.url),
        CheckOutcome::Unchanged => println!("  ok       {}", r.url),
        CheckOutcome::Error(e) => println!("  ERROR    {}  ({})", r.url, e),
    }
}

fn print_summary(summary: &RunSummary, store: &StateStore) {
    println!();
    if summary.state_reset {
        println!(
            "Warning: {} was corrupted; started fresh.",
            store.path().display()
        );
    }
    println!("{}", RULE);
    if summary.changed.is_empty() {
        println!("No changes detected");
    } else {
        println!("{} URL(s) changed or newly detected", summary.changed.len());
        if !summary.notified {
            println!("(alert could not be delivered; see log)");
        }
    }
    println!("{}", RULE);

    if summary.has_errors() {
        println!();
        println!("Errors encountered:");
        for (url, msg) in &summary.errors {
            println!("  • {}: {}", url, msg);
        }
    }
    println!();
    println!("State saved to {}", store.path().display());
}

/// Build the notifier up front so bad credentials fail before any fetch.
fn build_notifier(mock: bool) -> Result<Box<dyn Notifier + Send>> {
    if mock {
        return Ok(Box::new(ConsoleNotifier));
    }
    let twilio = TwilioConfig::from_env()
        .context("SMS notifier not configured (use --mock to print alerts instead)")?;
    tracing::debug!("notifier config: {:?}", twilio);
    Ok(Box::new(TwilioNotifier::new(twilio)))
}

/// Runs the check on a blocking thread; resources are still processed one at a time.
/// Per-URL errors are reported but do not change the exit status.
pub async fn run_check(cfg: &WatchConfig, store: StateStore, mock: bool) -> Result<()> {
    let notifier = build_notifier(mock)?;
    let fetcher = CurlFetcher::new(cfg.timeout());
    let urls = cfg.urls.clone();

    println!("Checking {} URL(s) for changes...", urls.len());
    println!();

    let (summary, store) = tokio::task::spawn_blocking(move || {
        let summary = run::run_check_with(&urls, &store, &fetcher, &*notifier, print_result);
        (summary, store)
    })
    .await
    .context("check task join")?;
    let summary = summary?;

    print_summary(&summary, &store);
    Ok(())
}
