use crate::theme::{Theme, DEFAULT_SELECTED_MARKER, DEFAULT_TODAY_COLOR};
use crossterm::style::Color;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) log_level: String,
    /// No logging is done when unset
    pub(crate) log_file: Option<PathBuf>,
    #[serde(deserialize_with = "deserialize_color")]
    pub(crate) today_color: Color,
    pub(crate) selected_marker: String,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            log_level: String::from("info"),
            log_file: None,
            today_color: DEFAULT_TODAY_COLOR,
            selected_marker: String::from(DEFAULT_SELECTED_MARKER),
        }
    }
}

impl Config {
    /// Reads the configuration file from the XDG config directory, falling
    /// back to the defaults if there is no such file
    pub(crate) fn read() -> Result<Config, ConfigError> {
        match default_path() {
            Some(path) if path.exists() => Config::load(&path),
            _ => Ok(Config::default()),
        }
    }

    pub(crate) fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Config::from_toml(&content)
    }

    fn from_toml(content: &str) -> Result<Config, ConfigError> {
        let config = toml::from_str::<Config>(content)?;
        if config.selected_marker.chars().count() != 2 {
            return Err(ConfigError::Marker(config.selected_marker));
        }
        Ok(config)
    }

    pub(crate) fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }

    pub(crate) fn theme(&self) -> Theme {
        Theme {
            today_color: self.today_color,
            selected_marker: self.selected_marker.clone(),
        }
    }
}

fn default_path() -> Option<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix(env!("CARGO_PKG_NAME"));
    let config_home = xdg_dirs.get_config_home()?;
    Some(config_home.join("config.toml"))
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Color::try_from(s.as_str())
        .map_err(|()| serde::de::Error::custom(format!("invalid color: {s:?}")))
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse configuration")]
    Parse(#[from] toml::de::Error),
    #[error("selected_marker must be exactly two characters, got {0:?}")]
    Marker(String),
}
