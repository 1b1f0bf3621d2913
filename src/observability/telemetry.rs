//! Distributed tracing support.
//!
//! # Responsibilities
//! - Build the OTLP span exporter and tracer provider at startup
//! - Extract trace context from incoming requests
//! - Propagate trace context to downstream requests
//! - Bridge `tracing` spans to OpenTelemetry spans
//!
//! # Design Decisions
//! - One `Telemetry` handle per process, passed to handlers through state;
//!   nothing is registered as a global propagator or provider
//! - W3C Trace Context headers
//! - With export disabled, spans still get ids so context keeps flowing

use std::time::Duration;

use axum::http::HeaderMap;
use opentelemetry::propagation::TextMapPropagator;
use opentelemetry::trace::{TraceContextExt, TracerProvider as _};
use opentelemetry::Context;
use opentelemetry_otlp::{Protocol, SpanExporter, WithExportConfig};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::{SdkTracerProvider, Tracer};
use opentelemetry_sdk::Resource;
use thiserror::Error;
use tracing::Span;
use tracing_opentelemetry::{OpenTelemetryLayer, OpenTelemetrySpanExt};
use tracing_subscriber::registry::LookupSpan;

use crate::config::{ExporterKind, TelemetryConfig};
use crate::observability::propagation::{HeaderExtractor, HeaderInjector};

/// Errors raised while setting up span export.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to build span exporter: {0}")]
    Exporter(#[from] opentelemetry_otlp::ExporterBuildError),
}

/// Tracing handle: tracer provider plus trace context propagator.
#[derive(Clone)]
pub struct Telemetry {
    provider: SdkTracerProvider,
    propagator: TraceContextPropagator,
    service_name: String,
    exporting: bool,
}

impl Telemetry {
    /// Build the provider described by `config`. `default_service` names the
    /// service when the config does not.
    pub fn init(config: &TelemetryConfig, default_service: &str) -> Result<Self, TelemetryError> {
        let service_name = config
            .service_name
            .clone()
            .unwrap_or_else(|| default_service.to_string());

        let resource = Resource::builder()
            .with_service_name(service_name.clone())
            .build();

        let mut builder = SdkTracerProvider::builder().with_resource(resource);
        if config.enabled {
            builder = builder.with_batch_exporter(build_exporter(config)?);
        }

        Ok(Self {
            provider: builder.build(),
            propagator: TraceContextPropagator::new(),
            service_name,
            exporting: config.enabled,
        })
    }

    /// Wrap an existing provider.
    pub fn with_provider(provider: SdkTracerProvider, service_name: impl Into<String>) -> Self {
        Self {
            provider,
            propagator: TraceContextPropagator::new(),
            service_name: service_name.into(),
            exporting: true,
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Whether spans leave the process.
    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    pub fn provider(&self) -> &SdkTracerProvider {
        &self.provider
    }

    /// Subscriber layer turning `tracing` spans into OpenTelemetry spans.
    pub fn layer<S>(&self) -> OpenTelemetryLayer<S, Tracer>
    where
        S: tracing::Subscriber + for<'span> LookupSpan<'span>,
    {
        OpenTelemetryLayer::new(self.provider.tracer(self.service_name.clone()))
    }

    /// Write the context of `span` into outbound `headers`.
    pub fn inject_span(&self, span: &Span, headers: &mut HeaderMap) {
        let cx = span.context();
        self.propagator
            .inject_context(&cx, &mut HeaderInjector(headers));
    }

    /// Read a remote context from inbound `headers`.
    pub fn extract(&self, headers: &HeaderMap) -> Context {
        self.propagator.extract(&HeaderExtractor(headers))
    }

    /// Parent `span` on the context carried by `headers`. Returns false when
    /// the headers carry no valid context, leaving `span` untouched.
    ///
    /// Must be called before `span` is first entered.
    pub fn set_parent_from_headers(&self, span: &Span, headers: &HeaderMap) -> bool {
        let parent = self.extract(headers);
        if !parent.span().span_context().is_valid() {
            return false;
        }
        let _ = span.set_parent(parent);
        true
    }

    /// Flush pending spans and stop the exporter.
    pub fn shutdown(&self) {
        if let Err(e) = self.provider.shutdown() {
            tracing::warn!(error = %e, "Tracer provider shutdown failed");
        }
    }
}

impl std::fmt::Debug for Telemetry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Telemetry")
            .field("service_name", &self.service_name)
            .field("exporting", &self.exporting)
            .finish()
    }
}

fn build_exporter(config: &TelemetryConfig) -> Result<SpanExporter, TelemetryError> {
    let timeout = Duration::from_millis(config.timeout_ms);
    let exporter = match config.exporter {
        ExporterKind::OtlpHttp => SpanExporter::builder()
            .with_http()
            .with_protocol(Protocol::HttpBinary)
            .with_endpoint(config.endpoint.clone())
            .with_timeout(timeout)
            .build()?,
        ExporterKind::OtlpGrpc => SpanExporter::builder()
            .with_tonic()
            .with_endpoint(config.endpoint.clone())
            .with_timeout(timeout)
            .build()?,
    };

    tracing::debug!(endpoint = %config.endpoint, kind = ?config.exporter, "Span exporter built");
    Ok(exporter)
}
