//! HTTP wiring: routes, shared state, and the outcome-to-status mapping.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::dispatch::{self, Outcome};
use crate::matrix::MessageSender;

/// Header carrying the hex HMAC signature of the body.
const SIGNATURE_HEADER: &str = "x-plane-signature";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sender: Arc<dyn MessageSender>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/status", get(status_endpoint))
        .route("/webhook", post(webhook_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .into_inner(),
        )
        .with_state(state)
}

async fn webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    let outcome =
        dispatch::handle_webhook(&state.config, state.sender.as_ref(), &body, signature).await;

    match outcome {
        Outcome::Unauthorized => (
            StatusCode::FORBIDDEN,
            Json(json!({"status": "unauthorized"})),
        ),
        Outcome::BadPayload => (StatusCode::BAD_REQUEST, Json(json!({"status": "bad json"}))),
        Outcome::NoMessage | Outcome::Delivered => (StatusCode::OK, Json(json!({"status": "ok"}))),
        Outcome::DeliveryFailed(reason) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "status": "failed to send message",
                "error_message": reason,
            })),
        ),
    }
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "plane-notify",
        "timestamp": chrono::Utc::now()
    }))
}

async fn status_endpoint(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "plane-notify",
        "timestamp": chrono::Utc::now(),
        "filters": {
            "send_notification_with_no_assignees":
                state.config.send_notification_with_no_assignees,
            "send_notification_when_actor_is_sole_assignee":
                state.config.send_notification_when_actor_is_sole_assignee,
            "issue_updated_notification_fields":
                &state.config.issue_updated_notification_fields,
        }
    }))
}
