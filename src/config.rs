use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const FPS_RANGE: (u32, u32) = (10, 60);
pub const BAR_COUNT_RANGE: (u32, u32) = (16, 128);
pub const SPECTROGRAM_COLUMNS_RANGE: (u32, u32) = (50, 1000);
pub const FLUX_POINTS_RANGE: (u32, u32) = (100, 5000);

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub visualizer: VisualizerSettings,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct VisualizerSettings {
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_bar_count")]
    pub bar_count: u32,
    #[serde(default = "default_spectrogram_columns", alias = "max_cols")]
    pub spectrogram_columns: u32,
    #[serde(default = "default_flux_points", alias = "flux_history")]
    pub flux_points: u32,
}

impl Default for VisualizerSettings {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            bar_count: default_bar_count(),
            spectrogram_columns: default_spectrogram_columns(),
            flux_points: default_flux_points(),
        }
    }
}

impl VisualizerSettings {
    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check("fps", self.fps, FPS_RANGE)?;
        check("bar_count", self.bar_count, BAR_COUNT_RANGE)?;
        check(
            "spectrogram_columns",
            self.spectrogram_columns,
            SPECTROGRAM_COLUMNS_RANGE,
        )?;
        check("flux_points", self.flux_points, FLUX_POINTS_RANGE)?;
        Ok(())
    }

    /// Milliseconds between analysis ticks.
    pub fn tick_interval_ms(&self) -> u64 {
        1000 / self.fps.max(1) as u64
    }
}

fn check(field: &'static str, value: u32, (min, max): (u32, u32)) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

fn default_fps() -> u32 { 30 }
fn default_bar_count() -> u32 { 64 }
fn default_spectrogram_columns() -> u32 { 200 }
fn default_flux_points() -> u32 { 2000 }

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.visualizer.validate()?;
    Ok(config)
}

/// First existing config file: `./quarkscope.toml`, then the per-user locations.
pub fn discover_config() -> Option<PathBuf> {
    let local = PathBuf::from("quarkscope.toml");
    if local.exists() {
        return Some(local);
    }
    if let Some(home) = dirs::home_dir() {
        let xdg = home.join(".config").join("quarkscope").join("config.toml");
        if xdg.exists() {
            return Some(xdg);
        }
    }
    if let Some(config_dir) = dirs::config_dir() {
        let platform = config_dir.join("quarkscope").join("config.toml");
        if platform.exists() {
            return Some(platform);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_player_defaults() {
        let s = VisualizerSettings::default();
        assert_eq!(s.fps, 30);
        assert_eq!(s.bar_count, 64);
        assert_eq!(s.spectrogram_columns, 200);
        assert_eq!(s.flux_points, 2000);
        assert!(s.validate().is_ok());
        assert_eq!(s.tick_interval_ms(), 33);
    }

    #[test]
    fn parses_partial_file_with_aliases() {
        let config: Config = toml::from_str(
            r#"
            [visualizer]
            bar_count = 32
            max_cols = 400
            flux_history = 1000
            "#,
        )
        .unwrap();
        assert_eq!(config.visualizer.fps, 30);
        assert_eq!(config.visualizer.bar_count, 32);
        assert_eq!(config.visualizer.spectrogram_columns, 400);
        assert_eq!(config.visualizer.flux_points, 1000);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.visualizer, VisualizerSettings::default());
    }

    #[test]
    fn rejects_out_of_range_values() {
        let s = VisualizerSettings {
            bar_count: 8,
            ..Default::default()
        };
        match s.validate() {
            Err(ConfigError::OutOfRange { field, value, .. }) => {
                assert_eq!(field, "bar_count");
                assert_eq!(value, 8);
            }
            other => panic!("unexpected: {:?}", other),
        }

        let s = VisualizerSettings {
            fps: 61,
            ..Default::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn load_config_reports_read_and_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("none.toml");
        assert!(matches!(load_config(&missing), Err(ConfigError::Read { .. })));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[visualizer\nfps = ").unwrap();
        assert!(matches!(load_config(&bad), Err(ConfigError::Parse { .. })));

        let good = dir.path().join("good.toml");
        std::fs::write(&good, "[visualizer]\nfps = 60\n").unwrap();
        assert_eq!(load_config(&good).unwrap().visualizer.fps, 60);
    }
}
