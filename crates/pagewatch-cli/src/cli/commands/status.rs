//! `pagewatch status` – show the stored hash per configured URL.

use anyhow::Result;
use pagewatch_core::config::WatchConfig;
use pagewatch_core::state::StateStore;

pub fn run_status(cfg: &WatchConfig, store: &StateStore) -> Result<()> {
    let state = store.load()?;
    println!("State file: {}", store.path().display());
    println!("{:<16} {}", "HASH", "URL");
    for url in &cfg.urls {
        let hash = state
            .get(url)
            .map(|h| h.chars().take(16).collect::<String>())
            .unwrap_or_else(|| "never observed".to_string());
        println!("{:<16} {}", hash, url);
    }
    let stale = state.keys().filter(|k| !cfg.urls.contains(k)).count();
    if stale > 0 {
        let noun = if stale == 1 { "entry" } else { "entries" };
        println!("({} stored {} for URLs no longer configured)", stale, noun);
    }
    Ok(())
}
