//! Traits for the code store and the outbound notification gateway

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::DomainResult;

/// Out-of-band delivery channel for verification codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Sms,
    Email,
}

/// Ephemeral store mapping a channel identifier to its current code.
///
/// One entry per identifier; `set` overwrites and the last writer wins.
/// Entries expire after the store's configured time-to-live. Implementations
/// must be safe under concurrent access from multiple requests.
#[async_trait]
pub trait CodeStore: Send + Sync {
    /// Store or overwrite the code for `identifier` with the configured TTL
    async fn set(&self, identifier: &str, code: &str) -> DomainResult<()>;

    /// Read the current code without consuming it
    async fn get(&self, identifier: &str) -> DomainResult<Option<String>>;

    /// Drop the entry for `identifier`, if any
    async fn remove(&self, identifier: &str) -> DomainResult<()>;
}

/// Outbound delivery collaborator for verification codes.
///
/// Any error is fatal to the dispatch flow: the orchestrator stores a code
/// only after delivery reports success.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn deliver(&self, channel: Channel, identifier: &str, code: &str) -> DomainResult<()>;
}
