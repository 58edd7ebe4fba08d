//! Persisted URL → content hash mapping (JSON under the XDG state dir).
//!
//! Loaded once per run and written back whole at the end. A missing file is
//! an empty mapping; a file that does not parse is discarded with a warning.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Last-known content hash per URL. Absence means "never observed".
pub type StateMap = BTreeMap<String, String>;

/// Result of [`StateStore::load_checked`].
#[derive(Debug, Clone, Default)]
pub struct LoadedState {
    pub state: StateMap,
    /// True if the file existed but could not be parsed and was discarded.
    pub reset: bool,
}

/// File-backed state store.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default path for the state file: `~/.local/state/pagewatch/state.json`.
    pub fn default_path() -> Result<PathBuf> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("pagewatch")?;
        Ok(xdg_dirs.get_state_file("state.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the mapping. Missing or unparsable files yield an empty mapping;
    /// other read failures are returned so the caller does not overwrite a
    /// file it could not read.
    pub fn load(&self) -> Result<StateMap> {
        Ok(self.load_checked()?.state)
    }

    /// Like [`load`](Self::load), but also reports whether an unparsable
    /// file was discarded.
    pub fn load_checked(&self) -> Result<LoadedState> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no state file yet");
                return Ok(LoadedState::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("read state: {}", self.path.display()))
            }
        };
        match serde_json::from_slice::<StateMap>(&bytes) {
            Ok(state) => {
                tracing::debug!(entries = state.len(), "loaded state");
                Ok(LoadedState {
                    state,
                    reset: false,
                })
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "state file is corrupted ({}); starting fresh",
                    e
                );
                Ok(LoadedState {
                    state: StateMap::new(),
                    reset: true,
                })
            }
        }
    }

    /// Replace the state file with `state` (creates parent dir if needed).
    /// Writes a temp file next to the target and renames it into place.
    pub fn save(&self, state: &StateMap) -> Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create dir: {}", parent.display()))?;
        let json = serde_json::to_string_pretty(state).context("serialize state")?;

        let mut tmp = tempfile::NamedTempFile::new_in(parent)
            .with_context(|| format!("create temp file in {}", parent.display()))?;
        tmp.write_all(json.as_bytes()).context("write state temp file")?;
        tmp.write_all(b"\n").context("write state temp file")?;
        tmp.as_file().sync_all().context("sync state temp file")?;
        tmp.persist(&self.path)
            .map_err(|e| e.error)
            .with_context(|| format!("write state: {}", self.path.display()))?;
        tracing::debug!(entries = state.len(), path = %self.path.display(), "saved state");
        Ok(())
    }
}
