//! Data Transfer Objects - request/response types for the posts API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSaveRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
}

impl PostSaveRequest {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author: Some(author.into()),
        }
    }
}

/// Body of `PUT /api/v1/posts/{id}`. Only title and content are editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostUpdateRequest {
    pub title: String,
    pub content: String,
}

impl PostUpdateRequest {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Full view of a single post, returned by `GET /api/v1/posts/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub create_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
}

/// Summary row of `GET /api/v1/posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListItem {
    pub id: i64,
    pub title: String,
    pub author: Option<String>,
    pub modified_date: DateTime<Utc>,
}
