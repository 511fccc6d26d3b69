//! Outbound verification-code delivery.
//!
//! [`CodeNotifier`] is the concrete [`NotificationGateway`]: it routes SMS
//! codes to the configured [`SmsSender`] and email codes to the SMTP mailer.
//! Any delivery failure is logged in full and surfaced to the core as a
//! gateway error, which aborts the dispatch flow before the code is stored.

mod sms;
mod smtp;

pub use sms::{ConsoleSmsSender, SmsSender};
pub use smtp::SmtpMailer;

use async_trait::async_trait;
use tracing::error;

use signet_core::services::verification::{Channel, NotificationGateway};
use signet_core::{DomainError, DomainResult};

/// Channel-routing notification gateway
pub struct CodeNotifier<S: SmsSender> {
    sms: S,
    mailer: SmtpMailer,
}

impl<S: SmsSender> CodeNotifier<S> {
    pub fn new(sms: S, mailer: SmtpMailer) -> Self {
        Self { sms, mailer }
    }
}

#[async_trait]
impl<S: SmsSender> NotificationGateway for CodeNotifier<S> {
    async fn deliver(&self, channel: Channel, identifier: &str, code: &str) -> DomainResult<()> {
        let result = match channel {
            Channel::Sms => self.sms.send_code(identifier, code).await,
            Channel::Email => self.mailer.send_code(identifier, code).await,
        };

        result.map_err(|e| {
            error!(channel = ?channel, "verification code delivery failed: {e}");
            DomainError::Gateway {
                message: match channel {
                    Channel::Sms => "sms delivery failed".to_string(),
                    Channel::Email => "email delivery failed".to_string(),
                },
            }
        })
    }
}
