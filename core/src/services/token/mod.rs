//! Stateless session-token codec

mod service;

pub use service::TokenService;
