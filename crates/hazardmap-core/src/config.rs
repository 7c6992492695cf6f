use crate::error::{HazardError, Result};
use crate::models::{Limit, StatusFilter};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

pub const DEFAULT_API_BASE_URL: &str = "https://eonet.gsfc.nasa.gov/api/v3";
pub const DEFAULT_TILE_URL: &str = "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png";
pub const DEFAULT_DEBOUNCE_MS: u64 = 220;
pub const DEFAULT_FLASH_MS: u64 = 550;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for the hazard map client
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub api_base_url: ConfigValue<String>,
    pub status: ConfigValue<StatusFilter>,
    pub limit: ConfigValue<Limit>,
    pub debounce_ms: ConfigValue<u64>,
    pub flash_ms: ConfigValue<u64>,
    pub timeout_secs: ConfigValue<u64>,
    pub tile_url: ConfigValue<String>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            api_base_url: ConfigValue::new(DEFAULT_API_BASE_URL.to_string(), ConfigSource::Default),
            status: ConfigValue::new(StatusFilter::Open, ConfigSource::Default),
            limit: ConfigValue::new(Limit::default(), ConfigSource::Default),
            debounce_ms: ConfigValue::new(DEFAULT_DEBOUNCE_MS, ConfigSource::Default),
            flash_ms: ConfigValue::new(DEFAULT_FLASH_MS, ConfigSource::Default),
            timeout_secs: ConfigValue::new(DEFAULT_TIMEOUT_SECS, ConfigSource::Default),
            tile_url: ConfigValue::new(DEFAULT_TILE_URL.to_string(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| HazardError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(url) = file_config.api_base_url {
            self.api_base_url.update(url, ConfigSource::File);
        }

        if let Some(status) = file_config.status {
            self.status.update(status, ConfigSource::File);
        }

        if let Some(limit) = file_config.limit {
            self.limit.update(Limit::new(limit)?, ConfigSource::File);
        }

        if let Some(debounce_ms) = file_config.debounce_ms {
            self.debounce_ms.update(debounce_ms, ConfigSource::File);
        }

        if let Some(flash_ms) = file_config.flash_ms {
            self.flash_ms.update(flash_ms, ConfigSource::File);
        }

        if let Some(timeout_secs) = file_config.timeout_secs {
            self.timeout_secs.update(timeout_secs, ConfigSource::File);
        }

        if let Some(tile_url) = file_config.tile_url {
            self.tile_url.update(tile_url, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // HAZARDMAP_API_URL
        if let Ok(url) = env::var("HAZARDMAP_API_URL") {
            self.api_base_url.update(url, ConfigSource::Environment);
        }

        // HAZARDMAP_STATUS
        if let Ok(status_str) = env::var("HAZARDMAP_STATUS") {
            match status_str.parse::<StatusFilter>() {
                Ok(status) => self.status.update(status, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid HAZARDMAP_STATUS value '{}': expected open, closed, or all",
                    status_str
                ),
            }
        }

        // HAZARDMAP_LIMIT
        if let Ok(limit_str) = env::var("HAZARDMAP_LIMIT") {
            match limit_str.parse::<Limit>() {
                Ok(limit) => self.limit.update(limit, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid HAZARDMAP_LIMIT value '{}': expected one of {:?}",
                    limit_str,
                    Limit::CHOICES
                ),
            }
        }

        update_millis_from_env(&mut self.debounce_ms, "HAZARDMAP_DEBOUNCE_MS");
        update_millis_from_env(&mut self.flash_ms, "HAZARDMAP_FLASH_MS");
        update_millis_from_env(&mut self.timeout_secs, "HAZARDMAP_TIMEOUT_SECS");

        // HAZARDMAP_TILE_URL
        if let Ok(tile_url) = env::var("HAZARDMAP_TILE_URL") {
            self.tile_url.update(tile_url, ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(url) = overrides.api_base_url {
            self.api_base_url.update(url, ConfigSource::Cli);
        }

        if let Some(status) = overrides.status {
            self.status.update(status, ConfigSource::Cli);
        }

        if let Some(limit) = overrides.limit {
            self.limit.update(limit, ConfigSource::Cli);
        }

        if let Some(debounce_ms) = overrides.debounce_ms {
            self.debounce_ms.update(debounce_ms, ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "api_base_url".to_string(),
            (self.api_base_url.value.clone(), self.api_base_url.source),
        );
        map.insert("status".to_string(), (self.status.value.to_string(), self.status.source));
        map.insert("limit".to_string(), (self.limit.value.to_string(), self.limit.source));
        map.insert(
            "debounce_ms".to_string(),
            (self.debounce_ms.value.to_string(), self.debounce_ms.source),
        );
        map.insert("flash_ms".to_string(), (self.flash_ms.value.to_string(), self.flash_ms.source));
        map.insert(
            "timeout_secs".to_string(),
            (self.timeout_secs.value.to_string(), self.timeout_secs.source),
        );
        map.insert("tile_url".to_string(), (self.tile_url.value.clone(), self.tile_url.source));

        map
    }
}

fn update_millis_from_env(target: &mut ConfigValue<u64>, var: &str) {
    if let Ok(raw) = env::var(var) {
        match raw.trim().parse::<u64>() {
            Ok(value) => target.update(value, ConfigSource::Environment),
            Err(_) => tracing::warn!("Invalid {} value '{}': expected a non-negative integer", var, raw),
        }
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    api_base_url: Option<String>,
    status: Option<StatusFilter>,
    limit: Option<u32>,
    debounce_ms: Option<u64>,
    flash_ms: Option<u64>,
    timeout_secs: Option<u64>,
    tile_url: Option<String>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub api_base_url: Option<String>,
    pub status: Option<StatusFilter>,
    pub limit: Option<Limit>,
    pub debounce_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.api_base_url.value, DEFAULT_API_BASE_URL);
        assert_eq!(config.status.value, StatusFilter::Open);
        assert_eq!(config.limit.value.get(), 50);
        assert_eq!(config.debounce_ms.value, 220);
        assert_eq!(config.flash_ms.value, 550);
        assert_eq!(config.debounce_ms.source, ConfigSource::Default);
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);

        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);

        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
api_base_url = "http://localhost:9000/api"
status = "closed"
limit = 100
debounce_ms = 50
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.api_base_url.value, "http://localhost:9000/api");
        assert_eq!(config.api_base_url.source, ConfigSource::File);
        assert_eq!(config.status.value, StatusFilter::Closed);
        assert_eq!(config.limit.value.get(), 100);
        assert_eq!(config.debounce_ms.value, 50);
        // untouched keys stay default
        assert_eq!(config.flash_ms.source, ConfigSource::Default);
    }

    #[test]
    fn test_load_from_file_rejects_bad_limit() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "limit = 42").unwrap();

        let result = LayeredConfig::with_defaults().load_from_file(file.path());
        assert!(matches!(result, Err(HazardError::ConfigInvalid { ref key, .. }) if key == "limit"));
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = LayeredConfig::with_defaults().load_from_file("/nonexistent/hazardmap.toml");
        assert!(matches!(result, Err(HazardError::Io(ref e)) if e.kind() == std::io::ErrorKind::NotFound));
    }

    #[test]
    #[serial]
    fn test_load_from_env() {
        env::set_var("HAZARDMAP_STATUS", "all");
        env::set_var("HAZARDMAP_LIMIT", "25");
        env::set_var("HAZARDMAP_DEBOUNCE_MS", "not-a-number");

        let config = LayeredConfig::with_defaults().load_from_env();

        env::remove_var("HAZARDMAP_STATUS");
        env::remove_var("HAZARDMAP_LIMIT");
        env::remove_var("HAZARDMAP_DEBOUNCE_MS");

        assert_eq!(config.status.value, StatusFilter::All);
        assert_eq!(config.status.source, ConfigSource::Environment);
        assert_eq!(config.limit.value.get(), 25);
        // invalid value ignored
        assert_eq!(config.debounce_ms.value, DEFAULT_DEBOUNCE_MS);
        assert_eq!(config.debounce_ms.source, ConfigSource::Default);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        config.update_from_cli(CliConfigOverrides {
            api_base_url: Some("http://127.0.0.1:8080".to_string()),
            limit: Some(Limit::new(25).unwrap()),
            ..Default::default()
        });

        assert_eq!(config.api_base_url.value, "http://127.0.0.1:8080");
        assert_eq!(config.api_base_url.source, ConfigSource::Cli);
        assert_eq!(config.limit.value.get(), 25);
        assert_eq!(config.status.source, ConfigSource::Default);
    }

    #[test]
    fn test_inspection_map() {
        let config = LayeredConfig::with_defaults();
        let map = config.to_inspection_map();

        assert_eq!(map.len(), 7);
        let (limit, source) = &map["limit"];
        assert_eq!(limit, "50");
        assert_eq!(*source, ConfigSource::Default);
        assert_eq!(map["status"].0, "open");
    }
}
