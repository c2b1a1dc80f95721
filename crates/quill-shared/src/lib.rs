//! # Quill Shared
//!
//! Request/response types of the Quill HTTP API, kept free of domain
//! dependencies so clients can reuse them.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
