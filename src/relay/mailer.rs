//! Outbound mail delivery for the relay endpoint

use super::message::OutgoingEmail;
use crate::config::{MailTransportKind, ServerConfig};
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    AsyncSendmailTransport, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("error building message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("smtp delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("sendmail delivery failed: {0}")]
    Sendmail(#[from] lettre::transport::sendmail::Error),

    #[error("smtp transport selected without an smtp url")]
    MissingSmtpUrl,
}

/// Capability to hand a composed email to a mail system
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Attempt delivery once
    async fn deliver(&self, email: &OutgoingEmail) -> Result<(), MailerError>;
}

enum Transport {
    Sendmail(AsyncSendmailTransport<Tokio1Executor>),
    Smtp(AsyncSmtpTransport<Tokio1Executor>),
}

/// Mailer backed by lettre, using sendmail or SMTP
pub struct LettreMailer {
    transport: Transport,
    to: Mailbox,
    from: Option<Mailbox>,
}

impl LettreMailer {
    pub fn from_config(config: &ServerConfig) -> Result<Self, MailerError> {
        let transport = match config.mail_transport {
            MailTransportKind::Sendmail => {
                Transport::Sendmail(AsyncSendmailTransport::<Tokio1Executor>::new())
            }
            MailTransportKind::Smtp => {
                let url = config.smtp_url.as_deref().ok_or(MailerError::MissingSmtpUrl)?;
                Transport::Smtp(AsyncSmtpTransport::<Tokio1Executor>::from_url(url)?.build())
            }
        };
        let from = match &config.mail_from {
            Some(from) => Some(from.parse::<Mailbox>()?),
            None => None,
        };

        Ok(Self {
            transport,
            to: config.mail_to.parse::<Mailbox>()?,
            from,
        })
    }

    fn build_message(&self, email: &OutgoingEmail) -> Result<Message, MailerError> {
        build_message(email, &self.to, self.from.as_ref())
    }
}

/// Build the lettre message. The sender's address becomes Reply-To and, unless
/// a fixed From address is configured, From as well.
fn build_message(
    email: &OutgoingEmail,
    to: &Mailbox,
    from: Option<&Mailbox>,
) -> Result<Message, MailerError> {
    let sender: Mailbox = email.reply_to.parse()?;
    let from = from.cloned().unwrap_or_else(|| sender.clone());
    Ok(Message::builder()
        .from(from)
        .reply_to(sender)
        .to(to.clone())
        .subject(email.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(email.body.clone())?)
}

#[async_trait]
impl Mailer for LettreMailer {
    async fn deliver(&self, email: &OutgoingEmail) -> Result<(), MailerError> {
        let message = self.build_message(email)?;
        match &self.transport {
            Transport::Sendmail(transport) => {
                transport.send(message).await?;
            }
            Transport::Smtp(transport) => {
                transport.send(message).await?;
            }
        }
        Ok(())
    }
}
