//! Gallery configuration and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/desk-widgets/config.toml` (default
//! `~/.config/desk-widgets/config.toml`).  Bad values are logged and the
//! default kept; a broken file never stops the gallery from starting.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::drag::{Orientation, PaneSizes};
use crate::core::tap::DEFAULT_WINDOW;

pub const MIN_DOUBLE_TAP_MS: u64 = 100;
pub const MAX_DOUBLE_TAP_MS: u64 = 2000;

/// A single setting that could not be applied.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("line {line}: expected `key = value`")]
    Malformed { line: usize },
    #[error("unknown setting `{0}`")]
    UnknownKey(String),
    #[error("`{key}`: `{value}` is not a number")]
    InvalidNumber { key: &'static str, value: String },
    #[error("`{key}`: expected true or false, got `{value}`")]
    InvalidBool { key: &'static str, value: String },
    #[error("`orientation`: expected vertical or horizontal, got `{0}`")]
    InvalidOrientation(String),
}

// ───────────────────────────────────────── config ────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryConfig {
    /// Double-click / double-tap window in milliseconds.
    pub double_tap_ms: u64,
    /// Split direction of the main panes.
    pub orientation: Orientation,
    /// Initial pane sizes in cells; `None` entries flex.
    pub pane_sizes: PaneSizes,
    /// Alternate row shading in list views.
    pub zebra: bool,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            double_tap_ms: DEFAULT_WINDOW.as_millis() as u64,
            orientation: Orientation::default(),
            pane_sizes: PaneSizes::new(vec![Some(crate::ui::panes::DEFAULT_FIRST_PANE)]),
            zebra: true,
        }
    }
}

impl GalleryConfig {
    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents),
            Err(err) => {
                tracing::debug!(path = %path.display(), %err, "no config file, using defaults");
                Self::default()
            }
        }
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        tracing::info!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Parse a config file.  Every bad line is logged and skipped.
    pub fn parse(s: &str) -> Self {
        let mut config = Self::default();
        for (number, line) in s.lines().enumerate() {
            if let Err(err) = config.apply_line(number + 1, line) {
                tracing::warn!("config: {err}");
            }
        }
        config
    }

    fn apply_line(&mut self, number: usize, line: &str) -> Result<(), ConfigError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
            return Ok(());
        }
        let (key, value) = line
            .split_once('=')
            .ok_or(ConfigError::Malformed { line: number })?;
        let value = value.trim().trim_matches('"');

        match key.trim() {
            "double_tap_ms" => {
                let ms = value
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidNumber {
                        key: "double_tap_ms",
                        value: value.to_string(),
                    })?;
                self.double_tap_ms = ms.clamp(MIN_DOUBLE_TAP_MS, MAX_DOUBLE_TAP_MS);
            }
            "orientation" => {
                self.orientation = Orientation::parse(value)
                    .ok_or_else(|| ConfigError::InvalidOrientation(value.to_string()))?;
            }
            "pane_sizes" => self.pane_sizes = parse_sizes(value)?,
            "zebra" => {
                self.zebra = match value {
                    "true" => true,
                    "false" => false,
                    _ => {
                        return Err(ConfigError::InvalidBool {
                            key: "zebra",
                            value: value.to_string(),
                        })
                    }
                };
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    pub fn serialise(&self) -> String {
        let sizes: Vec<String> = self
            .pane_sizes
            .as_slice()
            .iter()
            .map(|s| s.map_or_else(|| "auto".to_string(), |n| n.to_string()))
            .collect();
        [
            "# desk-widgets configuration".to_string(),
            String::new(),
            format!("double_tap_ms = {}", self.double_tap_ms),
            format!("orientation = {}", self.orientation.label()),
            "# Pane sizes in cells, comma separated; `auto` flexes".to_string(),
            format!("pane_sizes = {}", sizes.join(", ")),
            format!("zebra = {}", self.zebra),
            String::new(),
        ]
        .join("\n")
    }
}

/// `30, auto, 12` → `[Some(30), None, Some(12)]`.
fn parse_sizes(value: &str) -> Result<PaneSizes, ConfigError> {
    let sizes = value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| match part {
            "auto" | "-" => Ok(None),
            n => n.parse::<u16>().map(Some).map_err(|_| ConfigError::InvalidNumber {
                key: "pane_sizes",
                value: n.to_string(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(PaneSizes::new(sizes))
}

/// Return the config file path (`$XDG_CONFIG_HOME/desk-widgets/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("desk-widgets").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = GalleryConfig::parse("");
        assert_eq!(config, GalleryConfig::default());
        assert_eq!(config.double_tap_ms, 300);
        assert_eq!(config.pane_sizes.get(0), Some(30));
    }

    #[test]
    fn serialised_config_parses_back() {
        let config = GalleryConfig {
            double_tap_ms: 450,
            orientation: Orientation::Horizontal,
            pane_sizes: PaneSizes::new(vec![Some(12), None, Some(40)]),
            zebra: false,
        };
        assert_eq!(GalleryConfig::parse(&config.serialise()), config);
    }

    #[test]
    fn double_tap_window_is_clamped() {
        assert_eq!(GalleryConfig::parse("double_tap_ms = 5").double_tap_ms, 100);
        assert_eq!(GalleryConfig::parse("double_tap_ms = 90000").double_tap_ms, 2000);
    }

    #[test]
    fn bad_values_keep_defaults_and_later_lines_still_apply() {
        let config = GalleryConfig::parse(
            "orientation = diagonal\nzebra = maybe\npane_sizes = 1, x\nnonsense\nzebra = false\n",
        );
        assert_eq!(config.orientation, Orientation::Vertical);
        assert_eq!(config.pane_sizes.get(0), Some(30));
        assert!(!config.zebra);
    }

    #[test]
    fn errors_name_the_offending_value() {
        let mut config = GalleryConfig::default();
        assert_eq!(
            config.apply_line(3, "double_tap_ms = soon"),
            Err(ConfigError::InvalidNumber {
                key: "double_tap_ms",
                value: "soon".into()
            })
        );
        assert_eq!(
            config.apply_line(4, "no equals sign"),
            Err(ConfigError::Malformed { line: 4 })
        );
        assert_eq!(
            config.apply_line(5, "colour = red").unwrap_err().to_string(),
            "unknown setting `colour`"
        );
        assert_eq!(config.apply_line(6, "# comment"), Ok(()));
    }
}
