//! Repository traits and in-memory implementations.

pub mod user;

pub use user::{MemoryUserRepository, UserRepository};
