//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and clients produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!     → telemetry.rs (spans bridged to OpenTelemetry)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//!     → OTLP collector (batched spans)
//! ```
//!
//! # Design Decisions
//! - Request ID and trace context flow through both services
//! - Trace context travels in `traceparent`, never in the payload

pub mod logging;
pub mod metrics;
pub mod propagation;
pub mod telemetry;

pub use telemetry::{Telemetry, TelemetryError};
