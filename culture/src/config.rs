use serde::Deserialize;
use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::models::Culture;
use crate::services::{ResolutionConfig, ResolutionMode};

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub globalization: GlobalizationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GlobalizationConfig {
    /// Culture used when a request carries none (e.g. "en-us"); empty means unset
    #[serde(deserialize_with = "deserialize_optional_culture")]
    pub default_culture: Option<Culture>,
    /// Leave the default culture out of URLs (accepts true/false or "true"/"false")
    #[serde(deserialize_with = "deserialize_flag")]
    pub exclude_default_from_url: bool,
    /// Fail on missing arguments and stores instead of resolving to no culture
    #[serde(deserialize_with = "deserialize_flag")]
    pub strict: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Config {
    /// Load configuration with environment variable override support
    ///
    /// Loading order:
    /// 1. Load from the given path, or from config.toml if found
    /// 2. Load `.env` if present, then override with environment variables (prefixed with APP_)
    /// 3. Validate the final configuration
    pub fn load(path: Option<&str>) -> Result<Self, anyhow::Error> {
        // 1. Load from config file
        let mut config = match path.map(str::to_string).or_else(Self::find_config_file) {
            Some(config_path) => Self::from_toml(&config_path)?,
            None => {
                tracing::debug!("Configuration file not found, using defaults");
                Config::default()
            },
        };

        // 2. Override with environment variables
        dotenvy::dotenv().ok();
        config.apply_overrides(|key| std::env::var(key).ok())?;

        // 3. Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Apply overrides from a variable lookup
    ///
    /// Supported variables:
    /// - APP_DEFAULT_CULTURE: Default culture (e.g., "en-us"; empty clears it)
    /// - APP_EXCLUDE_DEFAULT_CULTURE_FROM_URL: "true" (any case) enables the exclusion policy
    /// - APP_STRICT_CULTURE: "true" (any case) enables strict mode
    /// - APP_LOG_LEVEL: Logging level (e.g., "info,url_culture=debug")
    /// - APP_LOG_FILE: Log file path (empty disables file logging)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(culture) = lookup("APP_DEFAULT_CULTURE") {
            self.globalization.default_culture = parse_optional_culture(&culture)
                .with_context(|| format!("Invalid APP_DEFAULT_CULTURE '{}'", culture))?;
            tracing::info!(
                "Override globalization.default_culture from env: {:?}",
                self.globalization.default_culture.as_ref().map(Culture::as_str)
            );
        }

        if let Some(exclude) = lookup("APP_EXCLUDE_DEFAULT_CULTURE_FROM_URL") {
            self.globalization.exclude_default_from_url = parse_flag(&exclude);
            tracing::info!(
                "Override globalization.exclude_default_from_url from env: {}",
                self.globalization.exclude_default_from_url
            );
        }

        if let Some(strict) = lookup("APP_STRICT_CULTURE") {
            self.globalization.strict = parse_flag(&strict);
            tracing::info!("Override globalization.strict from env: {}", self.globalization.strict);
        }

        if let Some(level) = lookup("APP_LOG_LEVEL") {
            self.logging.level = level;
            tracing::info!("Override logging.level from env: {}", self.logging.level);
        }

        if let Some(file) = lookup("APP_LOG_FILE") {
            self.logging.file = if file.trim().is_empty() { None } else { Some(file) };
            tracing::info!("Override logging.file from env: {:?}", self.logging.file);
        }

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let globalization = &self.globalization;
        if globalization.exclude_default_from_url && globalization.default_culture.is_none() {
            if globalization.strict {
                anyhow::bail!(
                    "globalization.default_culture is required when exclude_default_from_url is enabled"
                );
            }
            tracing::warn!(
                "exclude_default_from_url is enabled but no default culture is set; unprefixed URLs resolve to no culture"
            );
        }

        if self.logging.level.trim().is_empty() {
            anyhow::bail!("logging.level cannot be empty");
        }

        Ok(())
    }

    /// Per-call resolution inputs derived from the globalization section
    pub fn resolution(&self) -> ResolutionConfig {
        let globalization = &self.globalization;
        ResolutionConfig {
            default_culture: globalization.default_culture.clone(),
            exclude_default_from_url: globalization.exclude_default_from_url,
            mode: if globalization.strict { ResolutionMode::Strict } else { ResolutionMode::Lenient },
        }
    }

    fn find_config_file() -> Option<String> {
        let possible_paths =
            ["conf/config.toml", "config.toml", "./conf/config.toml", "./config.toml"];

        for path in &possible_paths {
            if Path::new(path).exists() {
                return Some(path.to_string());
            }
        }
        None
    }

    fn from_toml(path: &str) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path))?;
        Ok(config)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info,url_culture=debug".to_string(), file: None }
    }
}

// =========================
// Helpers for parsing values
// =========================

fn parse_optional_culture(input: &str) -> Result<Option<Culture>, crate::utils::CultureError> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    Culture::parse(input).map(Some)
}

/// Only a case-insensitive "true" enables a flag
fn parse_flag(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("true")
}

fn deserialize_optional_culture<'de, D>(deserializer: D) -> Result<Option<Culture>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        Some(raw) => parse_optional_culture(&raw).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

// Accept a TOML boolean or a string such as "True"
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct Visitor;
    impl<'de> serde::de::Visitor<'de> for Visitor {
        type Value = bool;
        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a boolean or a string like \"true\"")
        }
        fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E> {
            Ok(v)
        }
        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(parse_flag(v))
        }
        fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(parse_flag(&v))
        }
    }
    deserializer.deserialize_any(Visitor)
}
