//! Core services: token codec, verification-code plumbing, and the
//! authentication flows.

pub mod auth;
pub mod token;
pub mod verification;
