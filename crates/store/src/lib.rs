//! Best-score storage backed by a small JSON file.
//!
//! The file holds a JSON object; the best score lives under a fixed key
//! (`"space2048Best"` by default) and any other keys are left untouched on
//! write:
//!
//! ```text
//! {
//!   "space2048Best": 20480
//! }
//! ```
//!
//! Reading never fails. A missing file, bad JSON, a missing key or a value that
//! is not a non-negative integer all load as 0.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use space_2048_core::BestScoreStore;
use space_2048_types::BEST_SCORE_KEY;

pub use space_2048_core as core;
pub use space_2048_types as types;

/// JSON file store for the best score
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    key: String,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_key(path, BEST_SCORE_KEY)
    }

    pub fn with_key(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the JSON object in the file, or `None` if there is no usable one.
    fn read_entries(&self) -> Option<Map<String, Value>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no best score file yet");
                return None;
            }
            Err(err) => {
                warn!(path = %self.path.display(), "cannot read best score file: {err}");
                return None;
            }
        };

        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(entries)) => Some(entries),
            Ok(other) => {
                warn!(path = %self.path.display(), "best score file is not an object: {other}");
                None
            }
            Err(err) => {
                warn!(path = %self.path.display(), "best score file is not valid JSON: {err}");
                None
            }
        }
    }
}

/// Interpret a stored value as a best score.
///
/// Accepts a non-negative integer that fits in `u32`, either as a JSON number
/// or as a decimal string.
pub fn parse_best_score(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

impl BestScoreStore for FileStore {
    fn load(&self) -> u32 {
        let Some(entries) = self.read_entries() else {
            return 0;
        };
        let Some(value) = entries.get(&self.key) else {
            return 0;
        };
        match parse_best_score(value) {
            Some(best) => best,
            None => {
                warn!(key = %self.key, "ignoring unparsable best score {value}");
                0
            }
        }
    }

    fn save(&mut self, best: u32) -> Result<()> {
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(self.key.clone(), Value::from(best));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }

        let body = serde_json::to_string_pretty(&Value::Object(entries))
            .context("serialize best score file")?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, body).with_context(|| format!("write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replace {}", self.path.display()))?;

        debug!(path = %self.path.display(), best, "best score saved");
        Ok(())
    }
}
