//! Resolver handler: postal code → city → current temperature.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use tracing::{Instrument, Span};

use crate::config::EmptyCityPolicy;
use crate::http::error::ServiceError;
use crate::http::request::request_id;
use crate::lifecycle::{RequestLifecycle, RequestPhase};
use crate::lookup::{GeocodingClient, LookupError, LookupResult, WeatherClient};
use crate::observability::metrics;
use crate::weather::{ForwardedRequest, PostalCode, TemperatureResult};

/// Service name used in spans and metrics.
pub const SERVICE: &str = "service-b";

/// Route served by the resolver.
pub const ROUTE: &str = "/service-B";

/// State injected into the resolver handler.
#[derive(Debug, Clone)]
pub struct ResolverState {
    pub geocoding: GeocodingClient,
    pub weather: WeatherClient,
    pub empty_city_policy: EmptyCityPolicy,
}

/// `POST /service-B`
pub async fn handle(
    State(state): State<ResolverState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request_id = request_id(&headers);
    let span = tracing::info_span!(
        "resolver_request",
        request_id = %request_id,
        cep = tracing::field::Empty,
        city = tracing::field::Empty,
    );

    let mut lifecycle = RequestLifecycle::new(SERVICE, request_id);
    let result = resolve(&state, &body, &mut lifecycle)
        .instrument(span.clone())
        .await;

    span.in_scope(|| lifecycle.finish(result))
}

async fn resolve(
    state: &ResolverState,
    body: &[u8],
    lifecycle: &mut RequestLifecycle,
) -> Result<TemperatureResult, ServiceError> {
    let raw = serde_json::from_slice::<ForwardedRequest>(body)
        .map_err(|e| ServiceError::Decode(e.to_string()))?
        .into_cep();
    let cep = PostalCode::parse(&raw)?;
    Span::current().record("cep", cep.as_str());
    lifecycle.advance(RequestPhase::Validated)?;

    lifecycle.advance(RequestPhase::AwaitingDownstream)?;
    let location = observe("geocoding", state.geocoding.lookup(&cep).await)
        .map_err(ServiceError::LocationLookup)?;

    let city = location.city();
    if city.is_empty() {
        match state.empty_city_policy {
            EmptyCityPolicy::Reject => {
                return Err(ServiceError::LocationLookup(LookupError::MissingCity(
                    cep.to_string(),
                )));
            }
            EmptyCityPolicy::Forward => {
                tracing::warn!(cep = %cep, "Geocoding returned no city, querying weather anyway");
            }
        }
    }
    Span::current().record("city", city);

    let celsius = observe("weather", state.weather.current_celsius(city).await)
        .map_err(ServiceError::WeatherLookup)?;
    lifecycle.advance(RequestPhase::DownstreamComplete)?;

    Ok(TemperatureResult::from_celsius(celsius))
}

fn observe<T>(kind: &'static str, result: LookupResult<T>) -> LookupResult<T> {
    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    metrics::record_lookup(kind, outcome);
    result
}
