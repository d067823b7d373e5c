//! CORS headers stamped onto every response

use crate::config::CorsConfig;
use http::{header, HeaderValue};
use tower::ServiceBuilder;
use tower::layer::util::{Identity, Stack};
use tower_http::set_header::SetResponseHeaderLayer;

pub type CorsLayer = ServiceBuilder<
    Stack<
        SetResponseHeaderLayer<HeaderValue>,
        Stack<SetResponseHeaderLayer<HeaderValue>, Stack<SetResponseHeaderLayer<HeaderValue>, Identity>>,
    >,
>;

fn header_value(value: &str, fallback: &'static str) -> HeaderValue {
    HeaderValue::from_str(value).unwrap_or_else(|_| {
        tracing::warn!("Invalid CORS header value '{}', using '{}'", value, fallback);
        HeaderValue::from_static(fallback)
    })
}

/// Unlike `tower_http::cors`, the headers are set on every response whether or not the
/// request carried an `Origin`, and on error responses too.
pub fn cors_layer_from_config(config: &CorsConfig) -> CorsLayer {
    ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            header_value(&config.allow_origin, "*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            header_value(&config.allow_methods, "POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            header_value(&config.allow_headers, "Content-Type"),
        ))
}
