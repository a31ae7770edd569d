//! # Blog Core
//!
//! The domain layer of the blog backend.
//! Business rules and the repository ports live here; storage lives in `blog-infra`.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
pub use service::PostsService;
