//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or built-in defaults
//!     → loader.rs (parse & deserialize, environment overrides)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → handed to the service state at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Secrets (weather API key) can come from the environment

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::{
    EmptyCityPolicy, ExporterKind, GatewayConfig, GeocodingConfig, HttpConfig, LogFormat,
    ObservabilityConfig, ResolverConfig, ServiceConfig, TelemetryConfig, WeatherConfig,
};
