//! Postal code → current temperature, over a two-service HTTP chain.
//!
//! ```text
//! Client → gateway (/service-A) → resolver (/service-B) → geocoding API
//!                                                        → weather API
//! ```
//!
//! Trace context rides the `traceparent` header on every hop and spans are
//! exported over OTLP.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod lookup;
pub mod observability;
pub mod weather;

pub use config::ServiceConfig;
pub use http::{HttpServer, ServiceRole};
pub use lifecycle::Shutdown;
pub use observability::Telemetry;
