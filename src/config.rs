use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Application configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeConfig,
    pub panel: PanelConfig,
    pub font: FontConfig,
    pub content: ContentConfig,
    pub logging: LoggingConfig,
}

/// Theme configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ThemeConfig {
    /// "dark" or "light"
    pub mode: String,
}

/// Panel layout configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PanelConfig {
    /// Width of the history pane (in pixels)
    pub history_width: f32,
}

/// Font and text rendering configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct FontConfig {
    /// Size of the main interface font (in points)
    pub font_size: f32,
    /// Size of icons (in points)
    pub icon_size: f32,
}

/// Where destination content is read from
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ContentConfig {
    /// Root directory holding scenes/, decks/ and slides/
    pub root: PathBuf,
    /// Reload the current destination when files under `root` change
    pub watch: bool,
    /// Target opened at startup, e.g. "deck:1:physics"
    pub start: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is not set
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            mode: "dark".to_string(),
        }
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        PanelConfig {
            history_width: 260.0,
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        FontConfig {
            font_size: 13.0,
            icon_size: 16.0,
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        ContentConfig {
            root: PathBuf::from("content"),
            watch: true,
            start: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "warn,stagenav=info".to_string(),
            json: false,
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "stagenav")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from file, or return defaults if it is missing or invalid
    pub fn load() -> Self {
        Self::try_load().unwrap_or_else(|e| {
            warn!(error = %e, "Using default configuration");
            Config::default()
        })
    }

    /// Like [`Config::load`], but reports an unreadable or invalid file.
    /// A missing file is not an error.
    pub fn try_load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Create a default config file if it doesn't exist
    pub fn create_default() -> Result<(), ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;
        if !path.exists() {
            Config::default().save_to(&path)?;
        }
        Ok(())
    }

    pub fn is_dark(&self) -> bool {
        !self.theme.mode.eq_ignore_ascii_case("light")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme.mode, "dark");
        assert!(config.is_dark());
        assert_eq!(config.panel.history_width, 260.0);
        assert_eq!(config.content.root, PathBuf::from("content"));
        assert!(config.content.watch);
        assert_eq!(config.logging.level, "warn,stagenav=info");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
[theme]
mode = "light"

[content]
start = "deck:1:physics"
"#,
        )
        .expect("Failed to parse");
        assert!(!config.is_dark());
        assert_eq!(config.content.start.as_deref(), Some("deck:1:physics"));
        assert!(config.content.watch);
        assert_eq!(config.font.font_size, 13.0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.theme.mode = "light".into();
        config.save_to(&path).expect("Failed to save");

        let loaded = Config::load_from(&path).expect("Failed to load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "theme = 5").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::Parse(_))));
    }
}
