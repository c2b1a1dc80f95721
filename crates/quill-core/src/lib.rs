//! # Quill Core
//!
//! The domain layer of the Quill blog backend.
//! This crate contains the entities, the post access policy and the account/post
//! services. It has zero infrastructure dependencies; storage and hashing are
//! reached through the traits in [`ports`].

pub mod domain;
pub mod error;
pub mod policy;
pub mod ports;
pub mod services;

pub use error::DomainError;
pub use services::{AccountService, PostService};
