use std::path::{Path, PathBuf};

use crate::animation::{Physics, DEFAULT_GRAVITY, DEFAULT_SPAWN_Y};
use crate::error::ConfigError;
use crate::game::Player;
use crate::layout::{Layout, DEFAULT_CELL_SIZE};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub oracle: OracleConfig,
    pub players: PlayersConfig,
    pub animation: AnimationConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OracleBackend {
    Http,
    Process,
}

/// Where the automated player's moves come from.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub backend: OracleBackend,
    /// Solver endpoint for the `http` backend.
    pub url: String,
    /// Solver executable for the `process` backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<PathBuf>,
    /// Search depth passed along with every request.
    pub depth: u32,
    /// HTTP request timeout. Unset means wait indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Ask again this long after a failed request. Unset leaves the
    /// automated turn stalled until reset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_secs: Option<f32>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        OracleConfig {
            backend: OracleBackend::Http,
            url: "http://localhost:3000/run".to_string(),
            program: None,
            depth: 10,
            timeout_secs: None,
            retry_after_secs: None,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    /// Whether the oracle plays `automated_color` when the game starts.
    pub automated: bool,
    pub automated_color: Player,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        PlayersConfig {
            automated: false,
            automated_color: Player::Yellow,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Downward acceleration of a falling piece, in pixels/s².
    pub gravity: f32,
    /// Height pieces are spawned at, in pixels (negative is above the board).
    pub spawn_y: f32,
    /// Side of one board cell, in pixels.
    pub cell_size: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            gravity: DEFAULT_GRAVITY,
            spawn_y: DEFAULT_SPAWN_Y,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

impl AnimationConfig {
    pub fn physics(&self) -> Physics {
        Physics {
            gravity: self.gravity,
            spawn_y: self.spawn_y,
        }
    }

    pub fn layout(&self) -> Layout {
        Layout::new(self.cell_size)
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Target frame interval in milliseconds.
    pub frame_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig { frame_ms: 16 }
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
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.oracle.depth == 0 {
            return Err(ConfigError::Validation("oracle.depth must be > 0".into()));
        }
        match self.oracle.backend {
            OracleBackend::Http => {
                let url = self.oracle.url.as_str();
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ConfigError::Validation(
                        "oracle.url must be an http:// or https:// URL".into(),
                    ));
                }
            }
            OracleBackend::Process => {
                if self.oracle.program.is_none() {
                    return Err(ConfigError::Validation(
                        "oracle.program is required for the process backend".into(),
                    ));
                }
            }
        }
        if self.oracle.timeout_secs == Some(0) {
            return Err(ConfigError::Validation(
                "oracle.timeout_secs must be > 0".into(),
            ));
        }
        if let Some(retry) = self.oracle.retry_after_secs {
            if !retry.is_finite() || retry < 0.0 {
                return Err(ConfigError::Validation(
                    "oracle.retry_after_secs must be >= 0".into(),
                ));
            }
        }

        if !self.animation.gravity.is_finite() || self.animation.gravity <= 0.0 {
            return Err(ConfigError::Validation(
                "animation.gravity must be > 0".into(),
            ));
        }
        if !self.animation.spawn_y.is_finite() {
            return Err(ConfigError::Validation(
                "animation.spawn_y must be finite".into(),
            ));
        }
        if !self.animation.cell_size.is_finite() || self.animation.cell_size <= 0.0 {
            return Err(ConfigError::Validation(
                "animation.cell_size must be > 0".into(),
            ));
        }

        if self.ui.frame_ms == 0 || self.ui.frame_ms > 1000 {
            return Err(ConfigError::Validation(
                "ui.frame_ms must be in [1, 1000]".into(),
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
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[oracle]
depth = 4
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.oracle.depth, 4);
        assert_eq!(config.oracle.url, "http://localhost:3000/run");
        assert_eq!(config.players.automated_color, Player::Yellow);
        assert!((config.animation.gravity - DEFAULT_GRAVITY).abs() < 1e-6);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let default = AppConfig::default();
        assert_eq!(config.oracle.depth, default.oracle.depth);
        assert_eq!(config.ui.frame_ms, default.ui.frame_ms);
        assert!(!config.players.automated);
    }

    #[test]
    fn test_players_section_parses_color() {
        let toml_str = r#"
[players]
automated = true
automated_color = "red"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert!(config.players.automated);
        assert_eq!(config.players.automated_color, Player::Red);
    }

    #[test]
    fn test_unknown_color_is_a_parse_error() {
        let toml_str = r#"
[players]
automated_color = "green"
"#;
        assert!(toml::from_str::<AppConfig>(toml_str).is_err());
    }

    #[test]
    fn test_validation_rejects_zero_depth() {
        let mut config = AppConfig::default();
        config.oracle.depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_non_http_url() {
        let mut config = AppConfig::default();
        config.oracle.url = "localhost:3000/run".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_requires_program_for_process_backend() {
        let mut config = AppConfig::default();
        config.oracle.backend = OracleBackend::Process;
        assert!(config.validate().is_err());

        config.oracle.program = Some(PathBuf::from("./solver"));
        config.validate().expect("process backend with a program is valid");
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut config = AppConfig::default();
        config.oracle.timeout_secs = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_negative_retry() {
        let mut config = AppConfig::default();
        config.oracle.retry_after_secs = Some(-1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_non_positive_gravity() {
        let mut config = AppConfig::default();
        config.animation.gravity = 0.0;
        assert!(config.validate().is_err());
        config.animation.gravity = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_cell_size() {
        let mut config = AppConfig::default();
        config.animation.cell_size = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_frame_interval() {
        let mut config = AppConfig::default();
        config.ui.frame_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.oracle.depth, 10);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[oracle]
url = "http://127.0.0.1:8080/solve"
retry_after_secs = 2.5

[ui]
frame_ms = 33
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.oracle.url, "http://127.0.0.1:8080/solve");
        assert_eq!(config.oracle.retry_after_secs, Some(2.5));
        assert_eq!(config.ui.frame_ms, 33);
        // Others are defaults
        assert_eq!(config.oracle.depth, 10);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[oracle]\ndepth = 0\n").unwrap();

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
