use std::{path::Path, time::Duration};

use blockfall_engine::PieceSeed;
use serde::Deserialize;

use crate::util;

/// Settings read from the optional `--config` JSON file.
///
/// Every field may be omitted. Command-line flags take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayConfig {
    /// Fixed piece seed; a random one is drawn when unset.
    pub seed: Option<PieceSeed>,
    /// Enable mouse gestures.
    pub mouse: bool,
    /// Minimum drag distance of a swipe, in board cells.
    pub swipe_threshold: u16,
    /// Maximum press duration of a tap, in milliseconds.
    pub tap_threshold_ms: u64,
    /// Draw dots on empty board cells.
    pub show_grid_dots: bool,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            seed: None,
            mouse: true,
            swipe_threshold: 2,
            tap_threshold_ms: 200,
            show_grid_dots: true,
        }
    }
}

impl PlayConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        util::read_json_file("config", path)
    }

    pub fn tap_threshold(&self) -> Duration {
        Duration::from_millis(self.tap_threshold_ms)
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, process};

    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: PlayConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PlayConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config: PlayConfig = serde_json::from_str(
            r#"{ "seed": "000102030405060708090a0b0c0d0e0f", "mouse": false }"#,
        )
        .unwrap();
        assert_eq!(
            config.seed,
            Some("000102030405060708090a0b0c0d0e0f".parse().unwrap())
        );
        assert!(!config.mouse);
        assert_eq!(config.swipe_threshold, 2);
        assert_eq!(config.tap_threshold(), Duration::from_millis(200));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = serde_json::from_str::<PlayConfig>(r#"{ "ghost_piece": true }"#).unwrap_err();
        assert!(err.to_string().contains("ghost_piece"));
    }

    #[test]
    fn test_invalid_seed_is_rejected() {
        let err = serde_json::from_str::<PlayConfig>(r#"{ "seed": "abc" }"#).unwrap_err();
        assert!(err.to_string().contains("invalid hex"));
    }

    #[test]
    fn test_load_reports_path() {
        let dir = std::env::temp_dir().join(format!("blockfall-config-{}", process::id()));
        fs::create_dir_all(&dir).unwrap();

        let good = dir.join("good.json");
        fs::write(&good, r#"{ "show_grid_dots": false }"#).unwrap();
        assert!(!PlayConfig::load(&good).unwrap().show_grid_dots);

        let missing = dir.join("missing.json");
        let err = PlayConfig::load(&missing).unwrap_err();
        assert!(format!("{err}").contains("missing.json"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
