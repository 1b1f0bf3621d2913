//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Client
//!     → server.rs (Axum setup, request ID, access spans)
//!     → gateway.rs  (POST /service-A: validate, forward with trace context)
//!         → resolver.rs (POST /service-B: geocoding, weather, conversion)
//!     ← error.rs (plain-text error responses)
//! ```

pub mod error;
pub mod gateway;
pub mod request;
pub mod resolver;
pub mod server;

pub use error::ServiceError;
pub use request::{request_id, UuidRequestId, X_REQUEST_ID};
pub use server::{HttpServer, ServiceRole, StartupError};
