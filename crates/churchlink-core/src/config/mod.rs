//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! an optional TOML file layered under `CHURCHLINK__*` environment
//! variables. Every section has defaults, so an empty file is valid.

pub mod api;
pub mod editor;
pub mod logging;
pub mod translator;

use serde::{Deserialize, Serialize};

use self::api::ApiConfig;
use self::editor::EditorConfig;
use self::logging::LoggingConfig;
use self::translator::TranslatorConfig;

use crate::error::AppError;
use crate::types::LocaleCode;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// REST backend settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Translator settings.
    #[serde(default)]
    pub translator: TranslatorConfig,
    /// Editor session settings.
    #[serde(default)]
    pub editor: EditorConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file (optional) and the environment.
    ///
    /// Environment variables use the `CHURCHLINK` prefix and `__` as the
    /// section separator, e.g. `CHURCHLINK__API__BASE_URL`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("CHURCHLINK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text without consulting the environment.
    pub fn from_toml(contents: &str) -> Result<Self, AppError> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from_str(contents, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that deserialize fine but cannot work at runtime.
    pub fn validate(&self) -> Result<(), AppError> {
        let base = self.api.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(AppError::configuration(format!(
                "api.base_url must be an http(s) URL, got '{base}'"
            )));
        }
        if self.api.timeout_seconds == 0 {
            return Err(AppError::configuration(
                "api.timeout_seconds must be greater than zero",
            ));
        }
        if self.editor.max_undo_steps == 0 {
            return Err(AppError::configuration(
                "editor.max_undo_steps must be greater than zero",
            ));
        }
        self.source_locale()?;
        Ok(())
    }

    /// The configured translation source locale.
    pub fn source_locale(&self) -> Result<LocaleCode, AppError> {
        self.translator.source_locale.parse().map_err(|e: AppError| {
            AppError::configuration(format!("translator.source_locale: {}", e.message))
        })
    }
}
