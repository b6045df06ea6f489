//! # Press Core
//!
//! The domain layer of the Press content site.
//! This crate contains the content model, the derived-field rules and the
//! query/command services, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, DomainResult, RepoError};
