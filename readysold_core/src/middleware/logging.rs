//! Request logging middleware configuration

use crate::config::LoggingConfig;
use http::{Request, Response};
use std::time::Duration;
use tower_http::classify::{ServerErrorsAsFailures, ServerErrorsFailureClass, SharedClassifier};
use tower_http::trace::{DefaultOnBodyChunk, DefaultOnEos, MakeSpan, OnFailure, OnRequest, OnResponse, TraceLayer};
use tracing::{info_span, Span};

pub type HttpTraceLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    RequestSpan,
    LogRequestStart,
    LogResponse,
    DefaultOnBodyChunk,
    DefaultOnEos,
    LogFailure,
>;

#[derive(Debug, Clone, Copy)]
pub struct RequestSpan {
    log_headers: bool,
}

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        if self.log_headers {
            info_span!(
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
                headers = ?request.headers(),
            )
        } else {
            info_span!(
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
                origin = ?request.headers().get("origin"),
            )
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LogRequestStart;

impl<B> OnRequest<B> for LogRequestStart {
    fn on_request(&mut self, request: &Request<B>, _span: &Span) {
        tracing::debug!(
            "started processing request {} {}",
            request.method(),
            request.uri().path()
        );
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LogResponse;

impl<B> OnResponse<B> for LogResponse {
    fn on_response(self, response: &Response<B>, latency: Duration, _span: &Span) {
        let status = response.status();
        let latency_ms = latency.as_millis();

        if status.is_success() {
            tracing::info!(status = status.as_u16(), latency_ms = latency_ms, "request completed successfully");
        } else if status.is_client_error() {
            tracing::warn!(status = status.as_u16(), latency_ms = latency_ms, "client error response");
        } else {
            tracing::error!(status = status.as_u16(), latency_ms = latency_ms, "server error response");
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LogFailure;

impl OnFailure<ServerErrorsFailureClass> for LogFailure {
    fn on_failure(&mut self, error: ServerErrorsFailureClass, latency: Duration, _span: &Span) {
        tracing::error!(latency_ms = latency.as_millis(), error = %error, "request failed");
    }
}

pub fn logging_layer(config: &LoggingConfig) -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(RequestSpan {
            log_headers: config.log_headers,
        })
        .on_request(LogRequestStart)
        .on_response(LogResponse)
        .on_failure(LogFailure)
}
