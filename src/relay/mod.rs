//! Mail relay endpoint
//!
//! Accepts contact submissions as JSON over HTTP, revalidates them and
//! forwards them as a plain-text email.

mod handler;
mod mailer;
mod message;

pub use handler::{router, RelayState};
pub use mailer::{LettreMailer, Mailer, MailerError};
pub use message::RelayRequest;

#[cfg(test)]
pub use mailer::MockMailer;

use crate::config::ServerConfig;
use anyhow::Result;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;

/// Failures reported to relay clients
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Field '{0}' is required")]
    MissingField(&'static str),

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Failed to send email")]
    Delivery(#[source] MailerError),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::MissingField(_) | Self::InvalidEmail => StatusCode::BAD_REQUEST,
            Self::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Run the relay server until Ctrl+C
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let mailer = LettreMailer::from_config(config)?;
    let state = RelayState::new(Arc::new(mailer));
    let app = router(state, &config.route).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(
        "Mail relay listening on {} at {} ({:?} delivery to {})",
        listener.local_addr()?,
        config.route,
        config.mail_transport,
        config.mail_to
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Mail relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
    }
}
