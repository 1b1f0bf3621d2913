//! Geocoding client: postal code → address.
//!
//! # Responsibilities
//! - Build `{base_url}/{cep}/json` requests
//! - Decode the address payload
//! - Report transport, status and decode failures distinctly

use url::Url;

use crate::lookup::types::{LookupError, LookupResult};
use crate::weather::{LocationRecord, PostalCode};

/// Client for the postal code lookup API.
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    http: reqwest::Client,
    base_url: Url,
}

impl GeocodingClient {
    /// Create a client rooted at `base_url`.
    pub fn new(http: reqwest::Client, base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
        })
    }

    /// URL queried for `cep`.
    pub fn endpoint(&self, cep: &PostalCode) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(cep.as_str()).push("json");
        }
        url
    }

    /// Resolve `cep` to an address.
    #[tracing::instrument(name = "lookup_location", skip(self, cep), fields(cep = %cep))]
    pub async fn lookup(&self, cep: &PostalCode) -> LookupResult<LocationRecord> {
        let response = self.http.get(self.endpoint(cep)).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Geocoding API returned an error status");
            return Err(LookupError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let record: LocationRecord = serde_json::from_slice(&body)?;

        tracing::debug!(city = record.city(), "Location resolved");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> GeocodingClient {
        GeocodingClient::new(reqwest::Client::new(), base).unwrap()
    }

    #[test]
    fn test_endpoint_appends_path_segments() {
        let cep = PostalCode::parse("01310100").unwrap();

        let url = client("https://viacep.com.br/ws").endpoint(&cep);
        assert_eq!(url.as_str(), "https://viacep.com.br/ws/01310100/json");

        let url = client("https://viacep.com.br/ws/").endpoint(&cep);
        assert_eq!(url.as_str(), "https://viacep.com.br/ws/01310100/json");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(GeocodingClient::new(reqwest::Client::new(), "not a url").is_err());
    }
}
