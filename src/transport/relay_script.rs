//! Third-party mail relay (EmailJS REST API)

use super::{MailSender, TransportError};
use crate::config::RelayScriptConfig;
use crate::state::SubmissionPayload;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

const SEND_PATH: &str = "/api/v1.0/email/send";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct TemplateParams<'a> {
    from_name: &'a str,
    from_email: &'a str,
    phone: &'a str,
    inquiry_type: &'a str,
    message: &'a str,
    to_email: &'a str,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

/// Delivers through a hosted relay service using a stored template
pub struct RelayScriptSender {
    client: reqwest::Client,
    config: RelayScriptConfig,
}

impl RelayScriptSender {
    /// Fails when service, template or key are missing
    pub fn new(config: RelayScriptConfig) -> Result<Self, TransportError> {
        if config.service_id.is_empty() {
            return Err(TransportError::NotConfigured("a service id"));
        }
        if config.template_id.is_empty() {
            return Err(TransportError::NotConfigured("a template id"));
        }
        if config.public_key.is_empty() {
            return Err(TransportError::NotConfigured("a public key"));
        }
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, config })
    }

    fn send_url(&self) -> String {
        format!("{}{SEND_PATH}", self.config.api_url.trim_end_matches('/'))
    }

    fn request<'a>(&'a self, payload: &'a SubmissionPayload) -> SendRequest<'a> {
        SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: TemplateParams {
                from_name: &payload.name,
                from_email: &payload.email,
                phone: &payload.phone,
                inquiry_type: &payload.inquiry_type,
                message: &payload.message,
                to_email: &self.config.to_email,
            },
        }
    }
}

#[async_trait]
impl MailSender for RelayScriptSender {
    async fn send(&self, payload: &SubmissionPayload) -> Result<(), TransportError> {
        let response = self
            .client
            .post(self.send_url())
            .json(&self.request(payload))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(TransportError::Rejected { status, body })
    }
}
