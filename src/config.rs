use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::session::Direction;

pub const LOCALES: &[&str] = &["en", "uk"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default)]
    pub default_direction: Direction,
    #[serde(default = "default_show_hints")]
    pub show_hints: bool,
    /// Overrides where lessons.json and words.json live.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_locale() -> String {
    "en".to_string()
}
fn default_show_hints() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            locale: default_locale(),
            default_direction: Direction::default(),
            show_hints: default_show_hints(),
            data_dir: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordtrainer")
    }

    fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Store directory: the configured override, else the platform data dir.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("wordtrainer")
        })
    }

    /// Reset values left stale by hand edits or removed themes.
    pub fn normalize(&mut self, available_themes: &[String]) {
        if !available_themes.iter().any(|t| t == &self.theme) {
            self.theme = default_theme();
        }
        if !LOCALES.contains(&self.locale.as_str()) {
            self.locale = default_locale();
        }
        if self.log_level.trim().is_empty() {
            self.log_level = default_log_level();
        }
    }
}
