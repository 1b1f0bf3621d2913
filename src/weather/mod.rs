//! Postal code and temperature domain types.
//!
//! # Data Flow
//! ```text
//! request body
//!     → postal_code.rs (decode + validate the CEP)
//!     → [geocoding + weather lookups]
//!     → conversion.rs (Celsius → Fahrenheit / Kelvin, rounding)
//!     → types.rs (response payload)
//! ```

pub mod conversion;
pub mod postal_code;
pub mod types;

pub use conversion::{round_to_two, TemperatureResult};
pub use postal_code::{InvalidPostalCode, PostalCode, POSTAL_CODE_LEN};
pub use types::{ForwardedRequest, LocationRecord, PostalCodeRequest};
