use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::Config;

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub accent: String,
    pub accent_dim: String,
    pub border: String,
    pub border_focused: String,
    pub header_bg: String,
    pub header_fg: String,
    pub bar_filled: String,
    pub bar_empty: String,
    pub prompt: String,
    pub hint: String,
    pub learned: String,
    pub selection_bg: String,
    pub selection_fg: String,
    pub error: String,
    pub warning: String,
    pub success: String,
}

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        let user_theme_path = Config::config_dir()
            .join("themes")
            .join(format!("{name}.toml"));
        if let Ok(content) = fs::read_to_string(&user_theme_path) {
            match toml::from_str::<Theme>(&content) {
                Ok(theme) => return Some(theme),
                Err(e) => warn!(path = %user_theme_path.display(), error = %e, "ignoring broken user theme"),
            }
        }

        let filename = format!("{name}.toml");
        let file = ThemeAssets::get(&filename)?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
    }

    /// Bundled theme names, sorted.
    pub fn available_themes() -> Vec<String> {
        let mut names: Vec<String> = ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect();
        names.sort();
        names
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("terminal-default").unwrap_or_else(|| Self {
            name: "terminal-default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "reset".to_string(),
            fg: "reset".to_string(),
            accent: "#5f87d7".to_string(),
            accent_dim: "#585858".to_string(),
            border: "#585858".to_string(),
            border_focused: "#5f87d7".to_string(),
            header_bg: "#303030".to_string(),
            header_fg: "#d0d0d0".to_string(),
            bar_filled: "#5f87d7".to_string(),
            bar_empty: "#303030".to_string(),
            prompt: "#d7af5f".to_string(),
            hint: "#8a8a8a".to_string(),
            learned: "#87af87".to_string(),
            selection_bg: "#5f87d7".to_string(),
            selection_fg: "#000000".to_string(),
            error: "#d75f5f".to_string(),
            warning: "#d7af5f".to_string(),
            success: "#87af87".to_string(),
        }
    }
}

impl ThemeColors {
    /// `#rrggbb`, or `reset` for the terminal's own color.
    pub fn parse_color(value: &str) -> Color {
        if value.eq_ignore_ascii_case("reset") {
            return Color::Reset;
        }
        let hex = value.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::Reset
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn accent_dim(&self) -> Color { Self::parse_color(&self.accent_dim) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn border_focused(&self) -> Color { Self::parse_color(&self.border_focused) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn bar_filled(&self) -> Color { Self::parse_color(&self.bar_filled) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(&self.bar_empty) }
    pub fn prompt(&self) -> Color { Self::parse_color(&self.prompt) }
    pub fn hint(&self) -> Color { Self::parse_color(&self.hint) }
    pub fn learned(&self) -> Color { Self::parse_color(&self.learned) }
    pub fn selection_bg(&self) -> Color { Self::parse_color(&self.selection_bg) }
    pub fn selection_fg(&self) -> Color { Self::parse_color(&self.selection_fg) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_themes_parse() {
        let names = Theme::available_themes();
        assert!(names.contains(&"terminal-default".to_string()));
        for name in names {
            let file = ThemeAssets::get(&format!("{name}.toml")).unwrap();
            let content = std::str::from_utf8(file.data.as_ref()).unwrap();
            let theme: Theme = toml::from_str(content).unwrap();
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(ThemeColors::parse_color("#ff0080"), Color::Rgb(255, 0, 128));
        assert_eq!(ThemeColors::parse_color("reset"), Color::Reset);
        assert_eq!(ThemeColors::parse_color("#zzz"), Color::Reset);
    }
}
