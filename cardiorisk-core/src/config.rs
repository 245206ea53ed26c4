//! Configuration system for Cardiorisk.
//!
//! Uses `figment` for layered configuration: defaults -> config file -> environment.
//! Configuration is loaded from `~/.config/cardiorisk/config.toml` and/or
//! `cardiorisk.toml` in the working directory, or from an explicit file.

use cardiorisk_ml::ValidationMode;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::gateway::GatewayConfig;

/// Name of the workspace-level configuration file.
pub const WORKSPACE_CONFIG_FILE: &str = "cardiorisk.toml";

/// Top-level configuration for the Cardiorisk service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardioConfig {
    #[serde(default)]
    pub server: GatewayConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the classifier artifact lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Path to the JSON model artifact.
    #[serde(default = "default_model_path")]
    pub path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
        }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from("models/heart_model.json")
}

/// Request validation ahead of the encoder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub mode: ValidationMode,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default stderr filter when no `-v` flag is given.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Write JSON logs to a daily rolling file.
    #[serde(default = "default_true")]
    pub json_file: bool,
    /// Directory for the JSON log files (platform data dir if unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_file: true,
            log_dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl CardioConfig {
    /// Return human-readable warnings for suspicious settings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.server.port == 0 {
            warnings.push("server.port is 0; the OS will pick a random port".to_string());
        }
        if self.server.host.trim().is_empty() {
            warnings.push("server.host is empty".to_string());
        }
        if self.model.path.as_os_str().is_empty() {
            warnings.push("model.path is empty; the service cannot load a classifier".to_string());
        }
        if self.server.allow_degraded_start {
            warnings.push(
                "server.allow_degraded_start is set; predictions return 503 if the model fails to load"
                    .to_string(),
            );
        }
        warnings
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
    }
}

/// User-level config file path, if the platform has a config directory.
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "cardiorisk", "cardiorisk")
        .map(|d| d.config_dir().join("config.toml"))
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with `CARDIORISK_`, `__` separates sections)
/// 2. Explicit config file, or `<workspace>/cardiorisk.toml`
/// 3. User config (`~/.config/cardiorisk/config.toml`)
/// 4. Built-in defaults
pub fn load_config(
    workspace: Option<&Path>,
    explicit: Option<&Path>,
) -> Result<CardioConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(CardioConfig::default()));

    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            figment = figment.merge(Toml::file(path));
        }
        None => {
            if let Some(ws) = workspace {
                let ws_config = ws.join(WORKSPACE_CONFIG_FILE);
                if ws_config.exists() {
                    figment = figment.merge(Toml::file(&ws_config));
                }
            }
        }
    }

    // Environment variables (CARDIORISK_SERVER__PORT, CARDIORISK_MODEL__PATH, etc.)
    figment = figment.merge(Env::prefixed("CARDIORISK_").split("__"));

    figment.extract().map_err(|e| ConfigError::ParseError {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        let config = CardioConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert!(config.server.include_confidence);
        assert!(!config.server.allow_degraded_start);
        assert_eq!(config.model.path, PathBuf::from("models/heart_model.json"));
        assert_eq!(config.validation.mode, ValidationMode::Lenient);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_warnings() {
        let mut config = CardioConfig::default();
        config.server.port = 0;
        config.model.path = PathBuf::new();
        let warnings = config.validate();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("port"));
        assert!(warnings[1].contains("model.path"));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = CardioConfig::default();
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("[server]"));
        let parsed: CardioConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.server.port, config.server.port);
        assert_eq!(parsed.validation.mode, ValidationMode::Lenient);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: CardioConfig = toml::from_str("[validation]\nmode = \"strict\"\n").unwrap();
        assert_eq!(parsed.validation.mode, ValidationMode::Strict);
        assert_eq!(parsed.server.port, 8000);
    }

    #[test]
    fn test_load_workspace_file_and_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                WORKSPACE_CONFIG_FILE,
                r#"
                [server]
                port = 9100

                [model]
                path = "artifacts/forest.json"
                "#,
            )?;
            jail.set_env("CARDIORISK_VALIDATION__MODE", "strict");

            let config = load_config(Some(jail.directory()), None).map_err(|e| e.to_string())?;
            assert_eq!(config.server.port, 9100);
            assert_eq!(config.server.host, "127.0.0.1");
            assert_eq!(config.model.path, PathBuf::from("artifacts/forest.json"));
            assert_eq!(config.validation.mode, ValidationMode::Strict);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "[server]\nport = 9200\n")?;
            jail.set_env("CARDIORISK_SERVER__PORT", "9300");

            let path = jail.directory().join("custom.toml");
            let config = load_config(None, Some(&path)).map_err(|e| e.to_string())?;
            assert_eq!(config.server.port, 9300);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_missing_file() {
        let err = load_config(None, Some(Path::new("/nonexistent/cardiorisk.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }
}
