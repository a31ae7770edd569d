//! Application services - orchestrate repository calls for the HTTP layer.

mod posts;

pub use posts::PostsService;
