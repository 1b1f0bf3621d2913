//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the weather API key.
pub const ENV_WEATHER_API_KEY: &str = "WEATHER_API_KEY";
/// Environment variable overriding the resolver URL used by the gateway.
pub const ENV_RESOLVER_URL: &str = "CEP_WEATHER_RESOLVER_URL";
/// Environment variable overriding the collector endpoint.
pub const ENV_OTLP_ENDPOINT: &str = "CEP_WEATHER_OTLP_ENDPOINT";
/// Environment variable overriding the gateway processing delay.
pub const ENV_PROCESSING_DELAY_MS: &str = "CEP_WEATHER_PROCESSING_DELAY_MS";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { key: &'static str, value: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { key, value } => {
                write!(f, "Invalid value '{}' for {}", value, key)
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse a TOML file into a configuration without validating it.
pub fn read_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let config = read_config(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Build the runtime configuration: file (or defaults), then process
/// environment overrides, then validation.
pub fn load(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => ServiceConfig::default(),
    };
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply overrides using `lookup` as the variable source.
pub fn apply_env_overrides<F>(config: &mut ServiceConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup(ENV_WEATHER_API_KEY) {
        config.weather.api_key = key;
    }
    if let Some(url) = lookup(ENV_RESOLVER_URL) {
        config.gateway.resolver_url = url;
    }
    if let Some(endpoint) = lookup(ENV_OTLP_ENDPOINT) {
        config.telemetry.endpoint = endpoint;
    }
    if let Some(delay) = lookup(ENV_PROCESSING_DELAY_MS) {
        config.gateway.processing_delay_ms = delay.trim().parse().map_err(|_| ConfigError::Env {
            key: ENV_PROCESSING_DELAY_MS,
            value: delay.clone(),
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides_apply() {
        let mut config = ServiceConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[
                (ENV_WEATHER_API_KEY, "secret"),
                (ENV_RESOLVER_URL, "http://127.0.0.1:9000/service-B"),
                (ENV_PROCESSING_DELAY_MS, "0"),
            ]),
        )
        .unwrap();

        assert_eq!(config.weather.api_key, "secret");
        assert_eq!(config.gateway.resolver_url, "http://127.0.0.1:9000/service-B");
        assert_eq!(config.gateway.processing_delay_ms, 0);
    }

    #[test]
    fn test_bad_delay_override_is_rejected() {
        let mut config = ServiceConfig::default();
        let err = apply_env_overrides(&mut config, env(&[(ENV_PROCESSING_DELAY_MS, "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_PROCESSING_DELAY_MS));
    }

    #[test]
    fn test_load_config_from_file() {
        let path = std::env::temp_dir().join(format!("cep-weather-{}.toml", std::process::id()));
        fs::write(
            &path,
            "[gateway]\nprocessing_delay_ms = 250\n\n[weather]\napi_key = \"abc\"\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.gateway.processing_delay_ms, 250);
        assert_eq!(config.weather.api_key, "abc");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/cep-weather.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
