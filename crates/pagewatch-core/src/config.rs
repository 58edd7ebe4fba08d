use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// URLs watched when the config file does not list its own.
pub const DEFAULT_URLS: &[&str] = &[
    "https://example.com/image1.jpg",
    "https://example.com/image2.jpg",
    "https://example.com/folder/photo.png",
];

/// Per-request timeout applied to every fetch.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_urls() -> Vec<String> {
    DEFAULT_URLS.iter().map(|u| u.to_string()).collect()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Global configuration loaded from `~/.config/pagewatch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Ordered list of URLs to check on every run.
    #[serde(default = "default_urls")]
    pub urls: Vec<String>,
    /// Total timeout for a single fetch, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Optional override for the state file (None = XDG state dir).
    #[serde(default)]
    pub state_path: Option<PathBuf>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            urls: default_urls(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            state_path: None,
        }
    }
}

impl WatchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Rejects entries that are not absolute http(s) URLs, so a typo fails at
    /// startup instead of showing up as a fetch error on every run.
    pub fn validate(&self) -> Result<()> {
        for raw in &self.urls {
            let parsed = url::Url::parse(raw)
                .map_err(|e| anyhow::anyhow!("invalid url in config: {}: {}", raw, e))?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                anyhow::bail!("unsupported url scheme in config: {}", raw);
            }
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pagewatch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<WatchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = WatchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

/// Read and validate an existing config file. Errors name the file.
pub fn load_from_path(path: &Path) -> Result<WatchConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: WatchConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = WatchConfig::default();
        assert_eq!(cfg.urls.len(), DEFAULT_URLS.len());
        assert_eq!(cfg.timeout_secs, 30);
        assert_eq!(cfg.timeout(), Duration::from_secs(30));
        assert!(cfg.state_path.is_none());
        cfg.validate().unwrap();
    }

    #[test]
    fn config_toml_empty_uses_defaults() {
        let cfg: WatchConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.urls, default_urls());
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            urls = ["https://a.example/x.png", "http://b.example/"]
            timeout_secs = 5
            state_path = "/tmp/pagewatch/state.json"
        "#;
        let cfg: WatchConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.urls, vec!["https://a.example/x.png", "http://b.example/"]);
        assert_eq!(cfg.timeout(), Duration::from_secs(5));
        assert_eq!(
            cfg.state_path.as_deref(),
            Some(Path::new("/tmp/pagewatch/state.json"))
        );
        cfg.validate().unwrap();
    }

    #[test]
    fn zero_timeout_is_clamped() {
        let cfg: WatchConfig = toml::from_str("timeout_secs = 0").unwrap();
        assert_eq!(cfg.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn validate_rejects_bad_urls() {
        let cfg = WatchConfig {
            urls: vec!["not a url".to_string()],
            ..WatchConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = WatchConfig {
            urls: vec!["ftp://example.com/file".to_string()],
            ..WatchConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("unsupported url scheme"));
    }

    #[test]
    fn load_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "urls = [\"https://a.example/\"]\n").unwrap();
        let cfg = load_from_path(&path).unwrap();
        assert_eq!(cfg.urls, vec!["https://a.example/"]);
    }

    #[test]
    fn load_from_path_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeout_secs = \"soon\"").unwrap();
        let err = load_from_path(&path).unwrap_err();
        assert_eq!(err.to_string(), format!("parse config: {}", path.display()));

        let missing = dir.path().join("absent.toml");
        let err = load_from_path(&missing).unwrap_err();
        assert_eq!(err.to_string(), format!("read config: {}", missing.display()));
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = WatchConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: WatchConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.urls, cfg.urls);
        assert_eq!(parsed.timeout_secs, cfg.timeout_secs);
    }
}
