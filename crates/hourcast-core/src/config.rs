use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;

const APP_DIR: &str = "hourcast";
const CONFIG_FILE: &str = "config.toml";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Forecast service settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Tracked cities
    #[serde(default)]
    pub cities: CitiesConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Open-Meteo geocoding search endpoint
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    /// Open-Meteo forecast endpoint
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    /// The viewer's own UTC offset in hours
    #[serde(default = "default_reference_offset_hours")]
    pub reference_offset_hours: i64,

    /// Per-request timeout; unset means requests are never cut off
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_reference_offset_hours() -> i64 {
    5
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
            reference_offset_hours: default_reference_offset_hours(),
            request_timeout_secs: None,
        }
    }
}

impl WeatherConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitiesConfig {
    /// Cities listed at startup
    #[serde(default = "default_seed")]
    pub seed: Vec<String>,

    /// City whose forecast is shown at startup
    #[serde(default = "default_initial")]
    pub initial: String,
}

fn default_seed() -> Vec<String> {
    vec!["Austin".to_string(), "Dallas".to_string(), "Houston".to_string()]
}

fn default_initial() -> String {
    "Austin".to_string()
}

impl Default for CitiesConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            initial: default_initial(),
        }
    }
}

impl Config {
    /// Load configuration from the user config directory, creating a default file if missing
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, creating a default file there if missing
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Wrote default configuration to {}", path.display());
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Warnings are logged; errors fail the load.
    pub fn load_validated() -> Result<(Self, ValidationResult), ConfigError> {
        let config = Self::load()?;
        let validation = config.checked()?;
        Ok((config, validation))
    }

    /// Validate, turning errors into `ConfigError::Invalid` and logging warnings
    pub fn checked(&self) -> Result<ValidationResult, ConfigError> {
        let validation = self.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok(validation)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        validate_url(&self.weather.geocoding_url, "weather.geocoding_url", &mut result);
        validate_url(&self.weather.forecast_url, "weather.forecast_url", &mut result);

        if !(-12..=14).contains(&self.weather.reference_offset_hours) {
            result.add_error(
                "weather.reference_offset_hours",
                format!(
                    "UTC offset must be between -12 and 14, got {}",
                    self.weather.reference_offset_hours
                ),
            );
        }

        if self.weather.request_timeout_secs == Some(0) {
            result.add_error("weather.request_timeout_secs", "Timeout must be greater than 0");
        }

        if self.cities.seed.iter().all(|c| c.trim().is_empty()) {
            result.add_warning("cities.seed", "No cities configured");
        }

        let mut seen = HashSet::new();
        for city in &self.cities.seed {
            if !seen.insert(city.trim().to_lowercase()) {
                result.add_warning("cities.seed", format!("Duplicate city: {}", city));
            }
        }

        if self.cities.initial.trim().is_empty() {
            result.add_error("cities.initial", "Initial city must not be blank");
        } else if !seen.contains(&self.cities.initial.trim().to_lowercase()) {
            result.add_warning(
                "cities.initial",
                format!("Initial city {} is not in the seed list", self.cities.initial),
            );
        }

        result
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join(APP_DIR).join(CONFIG_FILE))
    }
}

/// Validate a URL field
fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
    match Url::parse(url_str) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                result.add_error(
                    field_name,
                    format!("URL must use http or https scheme, got: {}", url.scheme()),
                );
            }

            if url.host().is_none() {
                result.add_error(field_name, "URL must have a host");
            }
        }
        Err(e) => {
            result.add_error(field_name, format!("Invalid URL: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.weather.geocoding_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "weather.geocoding_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.weather.forecast_url = "ftp://localhost:8080".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_reference_offset_out_of_range() {
        let mut config = Config::default();
        config.weather.reference_offset_hours = 15;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(matches!(config.checked(), Err(ConfigError::Invalid(msg)) if msg.contains("reference_offset_hours")));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.weather.request_timeout_secs = Some(0);
        assert!(!config.validate().is_valid());

        config.weather.request_timeout_secs = Some(10);
        assert_eq!(config.weather.request_timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_duplicate_seed_is_warning() {
        let mut config = Config::default();
        config.cities.seed.push("austin".to_string());
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "cities.seed"));
    }

    #[test]
    fn test_initial_not_in_seed_is_warning() {
        let mut config = Config::default();
        config.cities.initial = "Tulsa".to_string();
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "cities.initial"));
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.weather.reference_offset_hours = -3;
        config.weather.request_timeout_secs = Some(20);
        config.cities.seed = vec!["Tulsa".to_string()];
        config.cities.initial = "Tulsa".to_string();
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[weather]\nreference_offset_hours = 7\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.weather.reference_offset_hours, 7);
        assert_eq!(config.weather.forecast_url, default_forecast_url());
        assert_eq!(config.cities, CitiesConfig::default());
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "weather = [").unwrap();

        assert!(matches!(Config::load_from(&path), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
