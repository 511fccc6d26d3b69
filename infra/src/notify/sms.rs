//! SMS delivery.
//!
//! The console sender logs codes instead of dispatching them; it backs
//! development and the test suite. A carrier-backed sender implements the
//! same trait.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

use crate::InfrastructureError;

/// Sender abstraction for the SMS leg of code delivery
#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send_code(&self, telephone: &str, code: &str) -> Result<(), InfrastructureError>;
}

/// Development SMS sender that writes codes to the log
#[derive(Default)]
pub struct ConsoleSmsSender {
    sent: AtomicU64,
}

impl ConsoleSmsSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages sent so far
    pub fn sent_count(&self) -> u64 {
        self.sent.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SmsSender for ConsoleSmsSender {
    async fn send_code(&self, telephone: &str, code: &str) -> Result<(), InfrastructureError> {
        let count = self.sent.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            target: "sms",
            telephone = %mask_telephone(telephone),
            message_number = count,
            "console sms: your verification code is {code}"
        );
        Ok(())
    }
}

fn mask_telephone(telephone: &str) -> String {
    let chars: Vec<char> = telephone.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("***{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_console_sender_counts_messages() {
        let sender = ConsoleSmsSender::new();
        sender.send_code("13800000000", "482913").await.unwrap();
        sender.send_code("13800000000", "019284").await.unwrap();
        assert_eq!(sender.sent_count(), 2);
    }

    #[test]
    fn test_mask_keeps_only_the_tail() {
        assert_eq!(mask_telephone("13800000000"), "***0000");
        assert_eq!(mask_telephone("138"), "***138");
    }
}
