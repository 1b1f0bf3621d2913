//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for both services.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration shared by the gateway and resolver binaries.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Gateway (front service) settings.
    pub gateway: GatewayConfig,

    /// Resolver (postal code → temperature) settings.
    pub resolver: ResolverConfig,

    /// Geocoding API settings.
    pub geocoding: GeocodingConfig,

    /// Weather API settings.
    pub weather: WeatherConfig,

    /// HTTP server limits common to both services.
    pub http: HttpConfig,

    /// Span export settings.
    pub telemetry: TelemetryConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,
}

/// Gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Bind address (e.g., "0.0.0.0:8010").
    pub bind_address: String,

    /// Full URL of the resolver endpoint.
    pub resolver_url: String,

    /// Fixed delay applied before each request is processed, in milliseconds.
    /// Zero disables it.
    pub processing_delay_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8010".to_string(),
            resolver_url: "http://service-b:8091/service-B".to_string(),
            processing_delay_ms: 2000,
        }
    }
}

/// What the resolver does when the geocoding result carries no city name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmptyCityPolicy {
    /// Query the weather API with an empty location anyway.
    #[default]
    Forward,
    /// Fail the request with a location lookup error.
    Reject,
}

/// Resolver configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Bind address (e.g., "0.0.0.0:8091").
    pub bind_address: String,

    /// Handling of an absent or empty city name.
    pub empty_city_policy: EmptyCityPolicy,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8091".to_string(),
            empty_city_policy: EmptyCityPolicy::Forward,
        }
    }
}

/// Geocoding API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeocodingConfig {
    /// Base URL; the postal code and `json` are appended as path segments.
    pub base_url: String,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://viacep.com.br/ws".to_string(),
        }
    }
}

/// Weather API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Base URL; `current.json` is appended.
    pub base_url: String,

    /// API key sent as the `key` query parameter.
    pub api_key: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "http://api.weatherapi.com/v1".to_string(),
            // Supplied through the config file or WEATHER_API_KEY.
            api_key: String::new(),
        }
    }
}

/// HTTP server limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            max_body_size: 64 * 1024,
        }
    }
}

/// Span exporter protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExporterKind {
    /// OTLP over gRPC (tonic).
    #[default]
    OtlpGrpc,
    /// OTLP over HTTP with protobuf payloads.
    OtlpHttp,
}

/// Distributed tracing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Export spans to a collector. Trace context is propagated either way.
    pub enabled: bool,

    /// Service name reported to the collector. Defaults to the role name.
    pub service_name: Option<String>,

    /// Exporter protocol.
    pub exporter: ExporterKind,

    /// Collector endpoint.
    pub endpoint: String,

    /// Export timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            service_name: None,
            exporter: ExporterKind::OtlpGrpc,
            endpoint: "http://localhost:4317".to_string(),
            timeout_ms: 10_000,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_published_ports() {
        let config = ServiceConfig::default();
        assert_eq!(config.gateway.bind_address, "0.0.0.0:8010");
        assert_eq!(config.resolver.bind_address, "0.0.0.0:8091");
        assert_eq!(config.gateway.processing_delay_ms, 2000);
        assert_eq!(config.resolver.empty_city_policy, EmptyCityPolicy::Forward);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [gateway]
            processing_delay_ms = 0

            [resolver]
            empty_city_policy = "reject"

            [telemetry]
            exporter = "otlp_http"
            "#,
        )
        .unwrap();

        assert_eq!(config.gateway.processing_delay_ms, 0);
        assert_eq!(config.gateway.bind_address, "0.0.0.0:8010");
        assert_eq!(config.resolver.empty_city_policy, EmptyCityPolicy::Reject);
        assert_eq!(config.telemetry.exporter, ExporterKind::OtlpHttp);
        assert_eq!(config.weather.base_url, "http://api.weatherapi.com/v1");
    }
}
