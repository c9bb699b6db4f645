use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::game::{GameState, Player, DEFAULT_QUIET_MOVE_LIMIT};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub rules: RulesConfig,
    pub ui: UiConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Player who makes the first move
    pub first_player: Player,
    /// Plies without a capture or man move before a draw; 0 disables
    pub quiet_move_limit: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            first_player: Player::Green,
            quiet_move_limit: DEFAULT_QUIET_MOVE_LIMIT,
        }
    }
}

impl RulesConfig {
    /// Fresh game set up according to these rules.
    pub fn new_game(&self) -> GameState {
        let limit = (self.quiet_move_limit > 0).then_some(self.quiet_move_limit);
        GameState::new(self.first_player).with_quiet_move_limit(limit)
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Highlight legal destinations of the selected piece
    pub show_hints: bool,
    /// Input poll interval
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_hints: true,
            tick_rate_ms: 100,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive, e.g. "info" or "checkers=debug"
    pub level: String,
    /// Log file; logging stays off when unset since the terminal belongs to the UI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            eprintln!("Warning: config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ui.tick_rate_ms == 0 {
            return Err(ConfigError::Validation(
                "ui.tick_rate_ms must be > 0".into(),
            ));
        }
        if self.log.level.trim().is_empty() {
            return Err(ConfigError::Validation(
                "log.level must not be empty".into(),
            ));
        }
        if self.log.file.as_deref().is_some_and(|p| p.as_os_str().is_empty()) {
            return Err(ConfigError::Validation(
                "log.file must not be an empty path".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.rules.first_player, Player::Green);
        assert!(config.ui.show_hints);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[rules]
first_player = "orange"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.rules.first_player, Player::Orange);
        // Other fields should be defaults
        assert_eq!(config.rules.quiet_move_limit, DEFAULT_QUIET_MOVE_LIMIT);
        assert_eq!(config.ui.tick_rate_ms, 100);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let default = AppConfig::default();
        assert_eq!(config.rules.first_player, default.rules.first_player);
        assert_eq!(config.log.level, default.log.level);
        assert_eq!(config.log.file, None);
    }

    #[test]
    fn test_unknown_player_rejected() {
        let toml_str = r#"
[rules]
first_player = "blue"
"#;
        assert!(toml::from_str::<AppConfig>(toml_str).is_err());
    }

    #[test]
    fn test_validation_rejects_zero_tick_rate() {
        let mut config = AppConfig::default();
        config.ui.tick_rate_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_log_level() {
        let mut config = AppConfig::default();
        config.log.level = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rules_build_game() {
        let rules = RulesConfig {
            first_player: Player::Orange,
            quiet_move_limit: 0,
        };
        let state = rules.new_game();
        assert_eq!(state.current_player(), Player::Orange);
        assert!(!state.is_terminal());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_checkers.toml")).unwrap();
        assert_eq!(config.ui.tick_rate_ms, 100);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkers.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[ui]
show_hints = false

[log]
file = "checkers.log"
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert!(!config.ui.show_hints);
        assert_eq!(config.log.file, Some(PathBuf::from("checkers.log")));
        // Others are defaults
        assert_eq!(config.rules.first_player, Player::Green);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkers.toml");
        std::fs::write(&path, "[ui]\ntick_rate_ms = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }
}
