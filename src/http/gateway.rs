//! Gateway handler: validate the postal code and forward it to the resolver.
//!
//! # Responsibilities
//! - Apply the configured processing delay
//! - Decode and validate the postal code before any outbound call
//! - Inject trace context and the request ID into the resolver call
//! - Relay the resolver's temperatures unchanged

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::Response;
use tracing::{Instrument, Span};
use url::Url;

use crate::config::GatewayConfig;
use crate::http::error::ServiceError;
use crate::http::request::{request_id, X_REQUEST_ID};
use crate::lifecycle::{RequestLifecycle, RequestPhase};
use crate::observability::Telemetry;
use crate::weather::{PostalCode, PostalCodeRequest, TemperatureResult};

/// Service name used in spans and metrics.
pub const SERVICE: &str = "service-a";

/// Route served by the gateway.
pub const ROUTE: &str = "/service-A";

/// State injected into the gateway handler.
#[derive(Debug, Clone)]
pub struct GatewayState {
    client: reqwest::Client,
    resolver_url: Url,
    processing_delay: Duration,
    telemetry: Arc<Telemetry>,
}

impl GatewayState {
    pub fn new(
        config: &GatewayConfig,
        client: reqwest::Client,
        telemetry: Arc<Telemetry>,
    ) -> Result<Self, url::ParseError> {
        Ok(Self {
            client,
            resolver_url: Url::parse(&config.resolver_url)?,
            processing_delay: Duration::from_millis(config.processing_delay_ms),
            telemetry,
        })
    }
}

/// `POST /service-A`
pub async fn handle(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request_id = request_id(&headers);
    let span = tracing::info_span!(
        "gateway_request",
        request_id = %request_id,
        cep = tracing::field::Empty,
    );

    let mut lifecycle = RequestLifecycle::new(SERVICE, request_id.clone());
    let result = forward(&state, &request_id, &body, &mut lifecycle)
        .instrument(span.clone())
        .await;

    span.in_scope(|| lifecycle.finish(result))
}

async fn forward(
    state: &GatewayState,
    request_id: &str,
    body: &[u8],
    lifecycle: &mut RequestLifecycle,
) -> Result<TemperatureResult, ServiceError> {
    if !state.processing_delay.is_zero() {
        tokio::time::sleep(state.processing_delay).await;
    }

    let request: PostalCodeRequest =
        serde_json::from_slice(body).map_err(|e| ServiceError::Decode(e.to_string()))?;
    let cep = PostalCode::parse(&request.cep)?;
    Span::current().record("cep", cep.as_str());
    lifecycle.advance(RequestPhase::Validated)?;

    let mut headers = HeaderMap::new();
    state.telemetry.inject_span(&Span::current(), &mut headers);
    if let Ok(value) = HeaderValue::from_str(request_id) {
        headers.insert(X_REQUEST_ID, value);
    }

    lifecycle.advance(RequestPhase::AwaitingDownstream)?;
    tracing::debug!(resolver = %state.resolver_url, "Forwarding to resolver");

    let response = state
        .client
        .post(state.resolver_url.clone())
        .headers(headers)
        .json(&PostalCodeRequest {
            cep: cep.to_string(),
        })
        .send()
        .await
        .map_err(|e| ServiceError::Upstream(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ServiceError::Upstream(format!(
            "resolver returned {}: {}",
            status.as_u16(),
            message.trim()
        )));
    }

    let temperature: TemperatureResult = response
        .json()
        .await
        .map_err(|e| ServiceError::Upstream(e.to_string()))?;
    lifecycle.advance(RequestPhase::DownstreamComplete)?;

    Ok(temperature)
}
