//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::BlackoutResult;

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default covering-window settings.
    pub overlay: OverlayDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default parameters for the covering windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayDefaults {
    /// Fill colour, a name (`"black"`) or hex code (`"#202020"`).
    pub color: String,

    /// Whether any key press closes the windows.
    pub exit_on_key: bool,

    /// Whether to hide the mouse cursor while the windows are shown.
    pub hide_cursor: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "blackout=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path. Logs go to stderr when unset.
    pub file: Option<PathBuf>,
}

impl Default for OverlayDefaults {
    fn default() -> Self {
        Self {
            color: "black".to_string(),
            exit_on_key: true,
            hide_cursor: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from `path`, falling back to defaults when the file is
    /// missing or malformed.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> BlackoutResult<()> {
        self.save_to(&config_file_path())
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> BlackoutResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Standard config file location.
///
/// `%APPDATA%\blackout\config.json` on Windows, the XDG config directory
/// elsewhere.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("APPDATA")
        .or_else(|_| std::env::var("XDG_CONFIG_HOME"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("blackout").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BlackoutError;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("blackout-config-{}-{}", std::process::id(), name))
            .join("config.json")
    }

    #[test]
    fn defaults_cover_black_screen_with_key_exit() {
        let config = AppConfig::default();
        assert_eq!(config.overlay.color, "black");
        assert!(config.overlay.exit_on_key);
        assert!(config.overlay.hide_cursor);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = scratch_path("missing");
        assert_eq!(AppConfig::load_from(&path), AppConfig::default());
    }

    #[test]
    fn partial_file_fills_remaining_fields_from_defaults() {
        let path = scratch_path("partial");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r##"{ "overlay": { "color": "#101010" } }"##).unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.overlay.color, "#101010");
        assert!(config.overlay.exit_on_key);
        assert_eq!(config.logging, LoggingConfig::default());

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let path = scratch_path("malformed");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        assert_eq!(AppConfig::load_from(&path), AppConfig::default());

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn save_then_load_preserves_overrides() {
        let path = scratch_path("saved");
        let mut config = AppConfig::default();
        config.overlay.exit_on_key = false;
        config.logging.level = "debug".to_string();

        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path), config);

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn save_into_a_file_path_reports_io_error() {
        let blocker = scratch_path("blocker");
        std::fs::create_dir_all(blocker.parent().unwrap()).unwrap();
        std::fs::write(&blocker, "{}").unwrap();

        let err = AppConfig::default()
            .save_to(&blocker.join("config.json"))
            .unwrap_err();
        assert!(matches!(err, BlackoutError::Io(_)));

        std::fs::remove_dir_all(blocker.parent().unwrap()).ok();
    }
}
