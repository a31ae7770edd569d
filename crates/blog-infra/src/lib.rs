//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL storage via SeaORM

pub mod database;
pub mod memory;

pub use database::{DatabaseConfig, DatabaseConnections};
pub use memory::InMemoryPostRepository;

#[cfg(feature = "postgres")]
pub use database::PostgresPostRepository;
