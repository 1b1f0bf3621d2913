//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router for the gateway or the resolver
//! - Wire up middleware (request ID, tracing, body limit)
//! - Build the shared outbound HTTP client
//! - Bind server to listener and drain on shutdown

use std::sync::Arc;

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::Request;
use axum::routing::{get, post};
use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::field::Empty;
use tracing::Span;

use crate::config::ServiceConfig;
use crate::http::gateway::{self, GatewayState};
use crate::http::request::{request_id, UuidRequestId, X_REQUEST_ID};
use crate::http::resolver::{self, ResolverState};
use crate::lookup::{GeocodingClient, WeatherClient};
use crate::observability::propagation::trace_id_from_headers;
use crate::observability::Telemetry;

/// Which of the two services a process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceRole {
    Gateway,
    Resolver,
}

impl ServiceRole {
    /// Name reported in spans, metrics and to the collector.
    pub fn service_name(self) -> &'static str {
        match self {
            ServiceRole::Gateway => gateway::SERVICE,
            ServiceRole::Resolver => resolver::SERVICE,
        }
    }

    /// Configured listen address for this role.
    pub fn bind_address(self, config: &ServiceConfig) -> &str {
        match self {
            ServiceRole::Gateway => &config.gateway.bind_address,
            ServiceRole::Resolver => &config.resolver.bind_address,
        }
    }
}

/// Errors raised while assembling a server.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid URL in configuration: {0}")]
    Url(#[from] url::ParseError),
}

/// HTTP server for one of the two services.
pub struct HttpServer {
    router: Router,
    role: ServiceRole,
}

impl HttpServer {
    /// Build the server for `role`.
    pub fn new(
        role: ServiceRole,
        config: &ServiceConfig,
        telemetry: Arc<Telemetry>,
    ) -> Result<Self, StartupError> {
        match role {
            ServiceRole::Gateway => Self::gateway(config, telemetry),
            ServiceRole::Resolver => Self::resolver(config, telemetry),
        }
    }

    /// Build the gateway server.
    pub fn gateway(config: &ServiceConfig, telemetry: Arc<Telemetry>) -> Result<Self, StartupError> {
        let state = GatewayState::new(&config.gateway, build_client()?, telemetry.clone())?;

        let routes = Router::new()
            .route(gateway::ROUTE, post(gateway::handle))
            .with_state(state);

        Ok(Self {
            router: Self::build_router(config, routes, telemetry),
            role: ServiceRole::Gateway,
        })
    }

    /// Build the resolver server.
    pub fn resolver(config: &ServiceConfig, telemetry: Arc<Telemetry>) -> Result<Self, StartupError> {
        let client = build_client()?;
        if config.weather.api_key.is_empty() {
            tracing::warn!("Weather API key is empty, weather lookups will be rejected");
        }

        let state = ResolverState {
            geocoding: GeocodingClient::new(client.clone(), &config.geocoding.base_url)?,
            weather: WeatherClient::new(
                client,
                &config.weather.base_url,
                config.weather.api_key.clone(),
            )?,
            empty_city_policy: config.resolver.empty_city_policy,
        };

        let routes = Router::new()
            .route(resolver::ROUTE, post(resolver::handle))
            .with_state(state);

        Ok(Self {
            router: Self::build_router(config, routes, telemetry),
            role: ServiceRole::Resolver,
        })
    }

    /// Add the shared routes and middleware layers.
    ///
    /// The access span is the root of each request inside this process, so
    /// it is the one parented on the inbound `traceparent`.
    fn build_router(config: &ServiceConfig, routes: Router, telemetry: Arc<Telemetry>) -> Router {
        routes
            .route("/health", get(health))
            .layer(DefaultBodyLimit::max(config.http.max_body_size))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(move |req: &Request<Body>| access_span(&telemetry, req)),
            )
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
    }

    pub fn role(&self) -> ServiceRole {
        self.role
    }

    /// The assembled router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            service = self.role.service_name(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!(service = self.role.service_name(), "HTTP server stopped");
        Ok(())
    }
}

/// Per-request access span, continuing the caller's trace when it sent one.
fn access_span(telemetry: &Telemetry, req: &Request<Body>) -> Span {
    let span = tracing::info_span!(
        "http_request",
        method = %req.method(),
        uri = %req.uri().path(),
        request_id = %request_id(req.headers()),
        parent.trace_id = Empty,
    );

    if telemetry.set_parent_from_headers(&span, req.headers()) {
        if let Some(trace_id) = trace_id_from_headers(req.headers()) {
            span.record("parent.trace_id", trace_id.as_str());
        }
    }
    span
}

fn build_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(concat!("cep-weather/", env!("CARGO_PKG_VERSION")))
        .build()
}

async fn health() -> &'static str {
    "ok"
}
