//! Redis-backed caching: connection client and the verification-code store.

mod code_store;
mod redis_client;

pub use code_store::RedisCodeStore;
pub use redis_client::RedisClient;
