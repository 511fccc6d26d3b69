//! # Signet Core
//!
//! Core authentication domain for the Signet identity service. This crate
//! contains the domain entities, error taxonomy, repository and collaborator
//! traits, the token codec, the login drivers, and the orchestration logic
//! behind login, registration, and credential recovery. It performs no I/O of
//! its own; storage and delivery are injected through the traits in
//! [`repositories`] and [`services::verification`].

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

pub use errors::{DomainError, DomainResult, TokenError};
