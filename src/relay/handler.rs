//! HTTP routes for the relay endpoint

use super::{Mailer, RelayError, RelayRequest};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, Method},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared state for relay handlers
#[derive(Clone)]
pub struct RelayState {
    mailer: Arc<dyn Mailer>,
}

impl RelayState {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }
}

#[derive(Debug, Serialize)]
struct SendResponse {
    success: bool,
    message: &'static str,
}

/// Build the relay router with the endpoint mounted at `route`
pub fn router(state: RelayState, route: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(route, post(send_mail).fallback(method_not_allowed))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

async fn send_mail(
    State(state): State<RelayState>,
    body: Bytes,
) -> Result<Json<SendResponse>, RelayError> {
    let request = RelayRequest::from_body(&body);
    let message = request.validate().inspect_err(|e| {
        tracing::info!("Rejected contact request: {e}");
    })?;

    let email = message.compose(chrono::Local::now());
    state.mailer.deliver(&email).await.map_err(|e| {
        tracing::error!("Error sending contact email from {}: {e}", message.email);
        RelayError::Delivery(e)
    })?;

    tracing::info!(
        "Contact email sent for {} ({})",
        message.email,
        message.inquiry_type
    );
    Ok(Json(SendResponse {
        success: true,
        message: "Email sent successfully",
    }))
}

async fn method_not_allowed() -> RelayError {
    RelayError::MethodNotAllowed
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
