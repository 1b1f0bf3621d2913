//! Process and request lifecycle.
//!
//! # Data Flow
//! ```text
//! Process (shutdown.rs):
//!     Ctrl+C → broadcast → HTTP server drains → tracer provider flushed
//!
//! Request (request.rs):
//!     Received → Validated → AwaitingDownstream → DownstreamComplete → Responded
//!         └──────────────┴───────────────┴──────────────────┴→ Failed
//! ```
//!
//! # Design Decisions
//! - The first error is terminal; there are no retries from Failed
//! - Transitions are checked so a handler cannot skip a phase

pub mod request;
pub mod shutdown;

pub use request::{InvalidTransition, RequestLifecycle, RequestPhase};
pub use shutdown::Shutdown;
