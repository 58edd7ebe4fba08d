//! `pagewatch urls` – list the configured URLs.

use pagewatch_core::config::WatchConfig;

pub fn run_urls(cfg: &WatchConfig) {
    for (i, url) in cfg.urls.iter().enumerate() {
        println!("{:>3}  {}", i + 1, url);
    }
}
