//! Route table

use super::{email, health, tools};
use crate::{models::ApiResponse, AppState};
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(health::handle_health))
        .route(
            "/api/send-email",
            post(email::handle_send_email)
                .options(email::handle_preflight)
                .fallback(email::handle_method_not_allowed),
        )
        .route(
            "/api/validate",
            post(tools::handle_validate)
                .options(email::handle_preflight)
                .fallback(email::handle_method_not_allowed),
        )
        .route(
            "/api/fees",
            get(tools::handle_fees)
                .options(email::handle_preflight)
                .fallback(email::handle_method_not_allowed),
        )
}

async fn handle_root(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::success(serde_json::json!({
        "app": state.app_name,
        "version": state.version,
        "endpoints": {
            "health": "/health",
            "send_email": "/api/send-email",
            "validate": "/api/validate",
            "fees": "/api/fees?price={amount}"
        }
    })))
}
