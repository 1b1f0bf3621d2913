//! Per-request state machine.
//!
//! # States
//! - Received: request accepted by the handler
//! - Validated: postal code decoded and checked
//! - AwaitingDownstream: outbound call(s) in flight
//! - DownstreamComplete: every outbound call answered
//! - Responded: success response produced (terminal)
//! - Failed: first error hit (terminal)

use std::time::Instant;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::http::error::ServiceError;
use crate::observability::metrics;

/// Phase of a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Received,
    Validated,
    AwaitingDownstream,
    DownstreamComplete,
    Responded,
    Failed,
}

impl RequestPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, RequestPhase::Responded | RequestPhase::Failed)
    }

    /// Whether `self → next` is a legal transition.
    pub fn can_advance_to(self, next: RequestPhase) -> bool {
        use RequestPhase::*;
        match (self, next) {
            (from, Failed) => !from.is_terminal(),
            (Received, Validated)
            | (Validated, AwaitingDownstream)
            | (AwaitingDownstream, DownstreamComplete)
            | (DownstreamComplete, Responded) => true,
            _ => false,
        }
    }
}

/// Rejected phase transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("illegal request phase transition {from:?} -> {to:?}")]
pub struct InvalidTransition {
    pub from: RequestPhase,
    pub to: RequestPhase,
}

/// Tracks one request from receipt to response and records its outcome.
#[derive(Debug)]
pub struct RequestLifecycle {
    service: &'static str,
    request_id: String,
    phase: RequestPhase,
    started: Instant,
}

impl RequestLifecycle {
    pub fn new(service: &'static str, request_id: impl Into<String>) -> Self {
        Self {
            service,
            request_id: request_id.into(),
            phase: RequestPhase::Received,
            started: Instant::now(),
        }
    }

    pub fn phase(&self) -> RequestPhase {
        self.phase
    }

    /// Move to `next`, refusing illegal transitions.
    pub fn advance(&mut self, next: RequestPhase) -> Result<(), InvalidTransition> {
        if !self.phase.can_advance_to(next) {
            return Err(InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        tracing::trace!(
            request_id = %self.request_id,
            from = ?self.phase,
            to = ?next,
            "Request phase changed"
        );
        self.phase = next;
        Ok(())
    }

    /// Turn the handler outcome into the HTTP response and record it.
    pub fn finish<T: Serialize>(mut self, result: Result<T, ServiceError>) -> Response {
        let result = result.and_then(|body| {
            self.advance(RequestPhase::Responded)?;
            Ok(body)
        });

        let response = match result {
            Ok(body) => (StatusCode::OK, Json(body)).into_response(),
            Err(err) => {
                self.fail(&err);
                err.into_response()
            }
        };

        metrics::record_request(self.service, response.status().as_u16(), self.started);
        response
    }

    fn fail(&mut self, err: &ServiceError) {
        let status = err.status_code();
        if status.is_server_error() {
            tracing::error!(
                request_id = %self.request_id,
                phase = ?self.phase,
                status = status.as_u16(),
                error = %err,
                "Request failed"
            );
        } else {
            tracing::warn!(
                request_id = %self.request_id,
                phase = ?self.phase,
                status = status.as_u16(),
                error = %err,
                "Request rejected"
            );
        }
        self.phase = RequestPhase::Failed;
    }
}
