//! Runtime configuration from `SPACE2048_*` environment variables.

use std::env;
use std::path::PathBuf;

use crate::types::{is_tile_value, DEFAULT_SWIPE_MIN_DISTANCE, WIN_TILE};

const BEST_FILE_NAME: &str = ".space2048.json";

/// Settings for the terminal game
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub best_path: PathBuf,
    pub swipe_min_distance: f32,
    /// Log file; logging is off when unset.
    pub log_path: Option<PathBuf>,
    pub log_filter: String,
    pub target: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            best_path: PathBuf::from(BEST_FILE_NAME),
            swipe_min_distance: DEFAULT_SWIPE_MIN_DISTANCE,
            log_path: None,
            log_filter: "info".to_string(),
            target: WIN_TILE,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Unset, blank or unparsable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = var("SPACE2048_SEED").and_then(|s| s.parse().ok());

        let best_path = var("SPACE2048_BEST_PATH")
            .map(PathBuf::from)
            .or_else(|| var("HOME").map(|home| PathBuf::from(home).join(BEST_FILE_NAME)))
            .unwrap_or_else(|| PathBuf::from(BEST_FILE_NAME));

        let swipe_min_distance = var("SPACE2048_SWIPE_MIN")
            .and_then(|s| s.parse::<f32>().ok())
            .filter(|d| d.is_finite() && *d >= 0.0)
            .unwrap_or(DEFAULT_SWIPE_MIN_DISTANCE);

        let log_path = var("SPACE2048_LOG_PATH").map(PathBuf::from);
        let log_filter = var("SPACE2048_LOG").unwrap_or_else(|| "info".to_string());

        let target = var("SPACE2048_TARGET")
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|&t| t >= 4 && is_tile_value(t))
            .unwrap_or(WIN_TILE);

        Self {
            seed,
            best_path,
            swipe_min_distance,
            log_path,
            log_filter,
            target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let cfg = config(&[]);
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.best_path, PathBuf::from(".space2048.json"));
    }

    #[test]
    fn best_file_lives_in_home() {
        let cfg = config(&[("HOME", "/home/pilot")]);
        assert_eq!(cfg.best_path, PathBuf::from("/home/pilot/.space2048.json"));

        let cfg = config(&[("HOME", "/home/pilot"), ("SPACE2048_BEST_PATH", "/tmp/best.json")]);
        assert_eq!(cfg.best_path, PathBuf::from("/tmp/best.json"));
    }

    #[test]
    fn parses_all_values() {
        let cfg = config(&[
            ("SPACE2048_SEED", "42"),
            ("SPACE2048_SWIPE_MIN", "30.5"),
            ("SPACE2048_LOG_PATH", " /tmp/space.log "),
            ("SPACE2048_LOG", "debug"),
            ("SPACE2048_TARGET", "512"),
        ]);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.swipe_min_distance, 30.5);
        assert_eq!(cfg.log_path, Some(PathBuf::from("/tmp/space.log")));
        assert_eq!(cfg.log_filter, "debug");
        assert_eq!(cfg.target, 512);
    }

    #[test]
    fn invalid_values_fall_back() {
        let cfg = config(&[
            ("SPACE2048_SEED", "abc"),
            ("SPACE2048_SWIPE_MIN", "-3"),
            ("SPACE2048_LOG_PATH", "   "),
            ("SPACE2048_TARGET", "1000"),
        ]);
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.swipe_min_distance, 50.0);
        assert_eq!(cfg.log_path, None);
        assert_eq!(cfg.target, 2048);

        assert_eq!(config(&[("SPACE2048_TARGET", "2")]).target, 2048);
        assert_eq!(config(&[("SPACE2048_SWIPE_MIN", "NaN")]).swipe_min_distance, 50.0);
    }
}
