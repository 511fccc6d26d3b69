//! SMTP delivery of email verification codes.

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;

use signet_shared::config::SmtpConfig;

use crate::InfrastructureError;

/// SMTP mailer for verification codes.
///
/// The transport carries the configured send timeout, keeping the dispatch
/// flow boundedly blocking when the relay is slow.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, InfrastructureError> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| {
                InfrastructureError::Config(format!("failed to create SMTP transport: {e}"))
            })?
            .port(config.port)
            .credentials(credentials)
            .timeout(Some(Duration::from_secs(config.timeout_seconds)))
            .build();

        let from: Mailbox = config
            .from_address
            .parse()
            .map_err(|e| InfrastructureError::Config(format!("invalid from address: {e}")))?;

        Ok(Self { transport, from })
    }

    /// Send a verification code to `email`
    pub async fn send_code(&self, email: &str, code: &str) -> Result<(), InfrastructureError> {
        let to: Mailbox = email
            .parse()
            .map_err(|e| InfrastructureError::Mail(format!("invalid recipient address: {e}")))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject("Your verification code")
            .body(format!(
                "Your verification code is {code}. It expires in a few minutes."
            ))
            .map_err(|e| InfrastructureError::Mail(format!("failed to build message: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| InfrastructureError::Mail(format!("smtp send failed: {e}")))?;
        Ok(())
    }
}
