//! Weather client: city name → current temperature in Celsius.

use serde::Deserialize;
use url::Url;

use crate::lookup::types::{LookupError, LookupResult};

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temp_c: f64,
}

/// Client for the current-weather API.
#[derive(Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl WeatherClient {
    /// Create a client rooted at `base_url`, authenticating with `api_key`.
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, url::ParseError> {
        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
            api_key: api_key.into(),
        })
    }

    /// URL queried for `city`. The city is form-encoded as the `q` parameter.
    pub fn endpoint(&self, city: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("current.json");
        }
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("q", city)
            .append_pair("aqi", "no");
        url
    }

    /// Fetch the current temperature for `city`, in Celsius.
    #[tracing::instrument(name = "lookup_weather", skip(self))]
    pub async fn current_celsius(&self, city: &str) -> LookupResult<f64> {
        let response = self.http.get(self.endpoint(city)).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Weather API returned an error status");
            return Err(LookupError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let weather: CurrentWeatherResponse = serde_json::from_slice(&body)?;

        tracing::debug!(celsius = weather.current.temp_c, "Current temperature fetched");
        Ok(weather.current.temp_c)
    }
}

impl std::fmt::Debug for WeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> WeatherClient {
        WeatherClient::new(reqwest::Client::new(), "http://api.weatherapi.com/v1", "k3y").unwrap()
    }

    #[test]
    fn test_endpoint_encodes_city() {
        let url = client().endpoint("São Paulo");
        assert_eq!(
            url.as_str(),
            "http://api.weatherapi.com/v1/current.json?key=k3y&q=S%C3%A3o+Paulo&aqi=no"
        );
    }

    #[test]
    fn test_endpoint_with_empty_city() {
        let url = client().endpoint("");
        assert_eq!(url.query(), Some("key=k3y&q=&aqi=no"));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let rendered = format!("{:?}", client());
        assert!(!rendered.contains("k3y"));
    }

    #[test]
    fn test_response_requires_current_temperature() {
        let ok: CurrentWeatherResponse =
            serde_json::from_str(r#"{"location":{"name":"Sao Paulo"},"current":{"temp_c":22.4,"temp_f":72.3}}"#)
                .unwrap();
        assert_eq!(ok.current.temp_c, 22.4);

        let err = serde_json::from_str::<CurrentWeatherResponse>(
            r#"{"error":{"code":1006,"message":"No matching location found."}}"#,
        );
        assert!(err.is_err());
    }
}
