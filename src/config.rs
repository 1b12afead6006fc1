//! Run configuration and the settings file it is usually loaded from.
//!
//! The pipeline itself only ever sees a [`Configuration`] (what to fetch) plus
//! explicit provider parameters. [`Settings`] is the on-disk TOML shape the binary
//! reads those from:
//!
//! ```toml
//! log_level = "info"
//!
//! [report]
//! location = "Lublin"
//! lookback_days = 7
//! output_dir = "reports"
//! hour = 13
//!
//! [provider]
//! api_key = "abc123"
//! base_url = "http://api.apixu.com"
//! language = "pl"
//! timeout_secs = 30
//! ```

use crate::weather_api::client::{DEFAULT_BASE_URL, DEFAULT_LANGUAGE, DEFAULT_TIMEOUT};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const CONFIG_DIR_NAME: &str = "weather-report";
const CONFIG_FILE_NAME: &str = "config.toml";
const MAX_TIMEOUT_SECS: u64 = 300;
const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Location must not be empty")]
    EmptyLocation,

    #[error("Lookback of {0} days reaches before the earliest representable date")]
    LookbackOutOfRange(u32),

    #[error("Hour must be between 0 and 23, got {0}")]
    HourOutOfRange(u8),

    #[error("Request timeout must be between 1 and 300 seconds, got {0}")]
    InvalidTimeout(u64),

    #[error("No API key configured; set provider.api_key or pass --api-key")]
    MissingApiKey,

    #[error("Provider base URL must start with http:// or https://, got '{0}'")]
    InvalidBaseUrl(String),

    #[error("Invalid log level '{0}'; expected one of error, warn, info, debug, trace")]
    InvalidLogLevel(String),

    #[error("Failed to read settings file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse settings file '{0}'")]
    Parse(PathBuf, #[source] toml::de::Error),
}

/// What a single run fetches: a location and how many days back from today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub location: String,
    pub lookback_days: u32,
}

impl Configuration {
    pub fn new(location: impl Into<String>, lookback_days: u32) -> Self {
        Self {
            location: location.into(),
            lookback_days,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.location.trim().is_empty() {
            return Err(ConfigurationError::EmptyLocation);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log_level: String,
    pub report: ReportSettings,
    pub provider: ProviderSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub location: String,
    pub lookback_days: u32,
    /// Directory the report file is written to.
    pub output_dir: PathBuf,
    /// Hour of day sent with every history request.
    pub hour: u8,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub language: String,
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            report: ReportSettings::default(),
            provider: ProviderSettings::default(),
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            location: "Żyrzyn".to_string(),
            lookback_days: 29,
            output_dir: PathBuf::from("."),
            hour: 13,
        }
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Settings {
    /// `$XDG_CONFIG_HOME/weather-report/config.toml` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads settings from `path`, or from [`Settings::default_path`] when `path` is
    /// `None`. A missing default file yields the built-in defaults; a missing
    /// explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigurationError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(default) if default.is_file() => Self::from_file(&default),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigurationError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigurationError::Read(path.to_path_buf(), e))?;
        toml::from_str(&contents).map_err(|e| ConfigurationError::Parse(path.to_path_buf(), e))
    }

    pub fn configuration(&self) -> Configuration {
        Configuration::new(self.report.location.trim(), self.report.lookback_days)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.provider.timeout_secs)
    }

    /// The configured API key, if one is set and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.provider
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.configuration().validate()?;

        if self.report.hour > 23 {
            return Err(ConfigurationError::HourOutOfRange(self.report.hour));
        }
        if self.provider.timeout_secs == 0 || self.provider.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigurationError::InvalidTimeout(self.provider.timeout_secs));
        }
        if self.api_key().is_none() {
            return Err(ConfigurationError::MissingApiKey);
        }
        let base_url = &self.provider.base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigurationError::InvalidBaseUrl(base_url.clone()));
        }
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigurationError::InvalidLogLevel(self.log_level.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.provider.api_key = Some("abc123".to_string());
        settings
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.report.location, "Żyrzyn");
        assert_eq!(settings.report.lookback_days, 29);
        assert_eq!(settings.report.hour, 13);
        assert_eq!(settings.provider.base_url, "http://api.apixu.com");
        assert_eq!(settings.provider.language, "pl");
        assert_eq!(settings.timeout(), Duration::from_secs(30));
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [report]
            location = "Lublin"

            [provider]
            api_key = "abc123"
            "#,
        )
        .unwrap();

        assert_eq!(settings.report.location, "Lublin");
        assert_eq!(settings.report.lookback_days, 29);
        assert_eq!(settings.api_key(), Some("abc123"));
        assert_eq!(settings.provider.language, "pl");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "log_level = \"debug\"\n[report]\nlocation = \"Lublin\"\nlookback_days = 2\n[provider]\napi_key = \"k\"\ntimeout_secs = 5"
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.configuration(), Configuration::new("Lublin", 2));
        assert_eq!(settings.timeout(), Duration::from_secs(5));
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigurationError::Read(..)));
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[report]\nlookback_days = \"many\"").unwrap();
        let err = Settings::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigurationError::Parse(..)));
    }

    #[test]
    fn test_validation_failures() {
        let mut settings = valid_settings();
        settings.report.location = "   ".to_string();
        assert!(matches!(
            settings.validate(),
            Err(ConfigurationError::EmptyLocation)
        ));

        let mut settings = valid_settings();
        settings.report.hour = 24;
        assert!(matches!(
            settings.validate(),
            Err(ConfigurationError::HourOutOfRange(24))
        ));

        let mut settings = valid_settings();
        settings.provider.timeout_secs = 0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigurationError::InvalidTimeout(0))
        ));

        let mut settings = valid_settings();
        settings.provider.api_key = Some(" ".to_string());
        assert!(matches!(
            settings.validate(),
            Err(ConfigurationError::MissingApiKey)
        ));

        let mut settings = valid_settings();
        settings.provider.base_url = "api.apixu.com".to_string();
        assert!(matches!(
            settings.validate(),
            Err(ConfigurationError::InvalidBaseUrl(_))
        ));

        let mut settings = valid_settings();
        settings.log_level = "loud".to_string();
        assert!(matches!(
            settings.validate(),
            Err(ConfigurationError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_configuration_trims_location() {
        let mut settings = valid_settings();
        settings.report.location = "  Lublin ".to_string();
        assert_eq!(settings.configuration().location, "Lublin");
    }
}
