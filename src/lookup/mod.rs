//! Outbound lookups against the external APIs.
//!
//! # Data Flow
//! ```text
//! resolver handler
//!     → geocoding.rs (postal code → LocationRecord)
//!     → weather_api.rs (city name → current Celsius)
//! ```
//!
//! # Design Decisions
//! - One shared reqwest client per service, no explicit timeouts
//! - Base URLs and the API key come from configuration
//! - No retries and no caching; the first failure is returned as is

pub mod geocoding;
pub mod types;
pub mod weather_api;

pub use geocoding::GeocodingClient;
pub use types::{LookupError, LookupResult};
pub use weather_api::WeatherClient;
