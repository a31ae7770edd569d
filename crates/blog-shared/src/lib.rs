//! # Blog Shared
//!
//! Wire types shared between the HTTP layer and its clients.
//! Nothing in here touches storage; these are the JSON shapes of the API.

pub mod dto;
pub mod response;

pub use dto::{PostListItem, PostResponse, PostSaveRequest, PostUpdateRequest};
pub use response::ErrorResponse;
