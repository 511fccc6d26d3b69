//! Verification-code plumbing: delivery channels, the ephemeral code store,
//! and code generation.

mod generator;
mod memory;
mod traits;

pub use generator::{code_for, CODE_LENGTH};
pub use memory::MemoryCodeStore;
pub use traits::{Channel, CodeStore, NotificationGateway};
