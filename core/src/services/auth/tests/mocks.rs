//! Test doubles for the authentication flows

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::errors::{DomainError, DomainResult};
use crate::services::verification::{Channel, NotificationGateway};

/// Gateway double that records deliveries and can simulate outages
pub struct RecordingGateway {
    pub delivered: Mutex<Vec<(Channel, String, String)>>,
    fail: AtomicBool,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self {
            delivered: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// The code most recently delivered to `identifier`
    pub fn last_code_for(&self, identifier: &str) -> Option<String> {
        self.delivered
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(_, id, _)| id == identifier)
            .map(|(_, _, code)| code.clone())
    }
}

#[async_trait]
impl NotificationGateway for RecordingGateway {
    async fn deliver(&self, channel: Channel, identifier: &str, code: &str) -> DomainResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::Gateway {
                message: "simulated delivery outage".to_string(),
            });
        }
        self.delivered.lock().unwrap().push((
            channel,
            identifier.to_string(),
            code.to_string(),
        ));
        Ok(())
    }
}
