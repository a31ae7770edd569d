use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Surrogate key of a post, assigned by storage.
pub type PostId = i64;

/// Longest title the `posts.title` column accepts.
pub const TITLE_MAX_LEN: usize = 500;

/// Longest author the `posts.author` column accepts.
pub const AUTHOR_MAX_LEN: usize = 255;

/// Post entity - a stored blog post.
///
/// `create_date` and `modified_date` are owned by the persistence layer:
/// they are assigned when a row is written and never taken from a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub create_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
}

impl Post {
    /// Replace the editable fields. Nothing is persisted until the
    /// repository writes the post back.
    pub fn apply(&mut self, changes: PostChanges) {
        self.title = changes.title;
        self.content = changes.content;
    }
}

/// A post that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: Option<String>,
}

impl NewPost {
    pub fn new(title: impl Into<String>, content: impl Into<String>, author: Option<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author,
        }
    }
}

/// Edit to an existing post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostChanges {
    pub title: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_touches_only_title_and_content() {
        let now = Utc::now();
        let mut post = Post {
            id: 3,
            title: "title".to_string(),
            content: "content".to_string(),
            author: Some("j".to_string()),
            create_date: now,
            modified_date: now,
        };

        post.apply(PostChanges {
            title: "title2".to_string(),
            content: "content2".to_string(),
        });

        assert_eq!(post.id, 3);
        assert_eq!(post.title, "title2");
        assert_eq!(post.content, "content2");
        assert_eq!(post.author.as_deref(), Some("j"));
        assert_eq!(post.create_date, now);
        assert_eq!(post.modified_date, now);
    }
}
