use std::path::{Path, PathBuf};

use crossterm::event::KeyCode;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub keybinds: KeybindsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub poll_interval_ms: u64,
    pub top_n: usize,
    pub memory_mode: String,
    pub reference_policy: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            poll_interval_ms: 2000,
            top_n: 20,
            memory_mode: "proportional".to_string(),
            reference_policy: "advancing".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeybindsConfig {
    pub quit: String,
    pub pause: String,
    pub cycle_sort: String,
    pub refresh: String,
}

impl Default for KeybindsConfig {
    fn default() -> Self {
        KeybindsConfig {
            quit: "q".to_string(),
            pause: "Space".to_string(),
            cycle_sort: "s".to_string(),
            refresh: "r".to_string(),
        }
    }
}

pub fn parse_key(s: &str) -> Option<KeyCode> {
    match s {
        "Enter" => Some(KeyCode::Enter),
        "Escape" | "Esc" => Some(KeyCode::Esc),
        "Space" => Some(KeyCode::Char(' ')),
        "Tab" => Some(KeyCode::Tab),
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c)),
                _ => None,
            }
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("leaktop").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.general.poll_interval_ms, 2000);
        assert_eq!(config.general.top_n, 20);
        assert_eq!(config.general.memory_mode, "proportional");
        assert_eq!(config.general.reference_policy, "advancing");
        assert_eq!(config.keybinds.quit, "q");
        assert_eq!(config.keybinds.pause, "Space");
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
[general]
poll_interval_ms = 500
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.poll_interval_ms, 500);
        // Other fields should be defaults
        assert_eq!(config.general.top_n, 20);
        assert_eq!(config.general.memory_mode, "proportional");
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
[general]
poll_interval_ms = 1000
top_n = 5
memory_mode = "resident"
reference_policy = "fixed"

[keybinds]
quit = "x"
cycle_sort = "o"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.poll_interval_ms, 1000);
        assert_eq!(config.general.top_n, 5);
        assert_eq!(config.general.memory_mode, "resident");
        assert_eq!(config.general.reference_policy, "fixed");
        assert_eq!(config.keybinds.quit, "x");
        assert_eq!(config.keybinds.cycle_sort, "o");
        assert_eq!(config.keybinds.refresh, "r");
    }

    #[test]
    fn missing_file_returns_default() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.toml"));
        assert_eq!(config.general.poll_interval_ms, 2000);
    }

    #[test]
    fn invalid_toml_returns_default() {
        let temp = std::env::temp_dir().join("leaktop_test_invalid.toml");
        std::fs::write(&temp, "this is not valid toml {{{{").unwrap();
        let config = load_config_from_path(&temp);
        assert_eq!(config.general.poll_interval_ms, 2000);
        let _ = std::fs::remove_file(&temp);
    }

    #[test]
    fn parse_key_variants() {
        assert_eq!(parse_key("q"), Some(KeyCode::Char('q')));
        assert_eq!(parse_key("Space"), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key("Enter"), Some(KeyCode::Enter));
        assert_eq!(parse_key("Esc"), Some(KeyCode::Esc));
        assert_eq!(parse_key("toolong"), None);
    }
}
