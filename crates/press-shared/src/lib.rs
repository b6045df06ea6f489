//! # Press Shared
//!
//! Wire types of the admin API, independent of the domain crate so that API
//! clients can depend on them alone.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
