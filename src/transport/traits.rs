//! Trait abstraction for mail senders to enable mocking in tests

use crate::state::SubmissionPayload;
use async_trait::async_trait;
use thiserror::Error;

/// Reasons a single delivery attempt can fail
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-2xx response from the endpoint
    #[error("request failed")]
    RequestFailed(reqwest::StatusCode),

    #[error("invalid response body: {0}")]
    InvalidResponse(#[source] reqwest::Error),

    #[error("relay rejected the message ({status}): {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("relay script is missing {0}")]
    NotConfigured(&'static str),
}

/// Capability to deliver one contact submission
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailSender: Send + Sync {
    /// Deliver the payload once. No retries.
    async fn send(&self, payload: &SubmissionPayload) -> Result<(), TransportError>;
}
