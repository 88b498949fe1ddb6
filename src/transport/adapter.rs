//! Strategy selection and outcome normalization

use super::{HttpPostSender, MailSender, RelayScriptSender};
use crate::config::{ContactConfig, TransportKind};
use crate::state::{SubmissionOutcome, SubmissionPayload};
use anyhow::Result;
use std::sync::Arc;

/// Sends payloads through exactly one configured strategy
#[derive(Clone)]
pub struct TransportAdapter {
    sender: Arc<dyn MailSender>,
    kind: TransportKind,
}

impl TransportAdapter {
    pub fn new(sender: Arc<dyn MailSender>, kind: TransportKind) -> Self {
        Self { sender, kind }
    }

    /// Build the adapter for the strategy chosen in configuration
    pub fn from_config(config: &ContactConfig) -> Result<Self> {
        let sender: Arc<dyn MailSender> = match config.transport {
            TransportKind::RelayScript => {
                Arc::new(RelayScriptSender::new(config.relay_script.clone())?)
            }
            TransportKind::HttpPost => Arc::new(HttpPostSender::new(&config.endpoint_url)?),
        };
        tracing::info!("Using {:?} transport", config.transport);
        Ok(Self::new(sender, config.transport))
    }

    pub fn kind(&self) -> TransportKind {
        self.kind
    }

    /// Make a single delivery attempt and normalize the result
    pub async fn send(&self, payload: &SubmissionPayload) -> SubmissionOutcome {
        match self.sender.send(payload).await {
            Ok(()) => SubmissionOutcome::Success,
            Err(e) => SubmissionOutcome::Failure(e.to_string()),
        }
    }
}
