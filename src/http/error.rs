//! Request error taxonomy and its HTTP mapping.
//!
//! Every variant is terminal for the request. Bodies are plain text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::lifecycle::InvalidTransition;
use crate::lookup::LookupError;
use crate::weather::InvalidPostalCode;

/// Errors surfaced to callers of either service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Postal code failed validation.
    #[error("invalid cep")]
    InvalidInput,

    /// Request body is not the expected JSON.
    #[error("invalid request body: {0}")]
    Decode(String),

    /// Geocoding call failed or returned no usable city.
    #[error("error getting location")]
    LocationLookup(#[source] LookupError),

    /// Weather call failed.
    #[error("error getting weather: {0}")]
    WeatherLookup(#[source] LookupError),

    /// The resolver could not be reached or answered with a failure.
    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Status code returned to the caller.
    ///
    /// Weather lookup failures map to 400 while location lookup failures map
    /// to 500; both services have always answered this way.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidInput | ServiceError::Decode(_) => StatusCode::BAD_REQUEST,
            ServiceError::WeatherLookup(_) => StatusCode::BAD_REQUEST,
            ServiceError::LocationLookup(_)
            | ServiceError::Upstream(_)
            | ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<InvalidPostalCode> for ServiceError {
    fn from(_: InvalidPostalCode) -> Self {
        ServiceError::InvalidInput
    }
}

impl From<InvalidTransition> for ServiceError {
    fn from(err: InvalidTransition) -> Self {
        ServiceError::Internal(err.to_string())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ServiceError::InvalidInput.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ServiceError::Decode("eof".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::LocationLookup(LookupError::Status { status: 502 }).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServiceError::WeatherLookup(LookupError::Status { status: 401 }).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::Upstream("connection refused".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(ServiceError::InvalidInput.to_string(), "invalid cep");
        assert_eq!(
            ServiceError::LocationLookup(LookupError::Status { status: 400 }).to_string(),
            "error getting location"
        );
        assert_eq!(
            ServiceError::WeatherLookup(LookupError::Status { status: 401 }).to_string(),
            "error getting weather: API returned status 401"
        );
    }

    #[test]
    fn test_invalid_postal_code_converts() {
        let err: ServiceError = InvalidPostalCode.into();
        assert!(matches!(err, ServiceError::InvalidInput));
    }

    #[tokio::test]
    async fn test_response_is_plain_text() {
        let response = ServiceError::InvalidInput.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"invalid cep");
    }
}
