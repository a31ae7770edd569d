use std::sync::Arc;

use blog_shared::dto::{PostListItem, PostResponse, PostSaveRequest, PostUpdateRequest};

use crate::domain::{AUTHOR_MAX_LEN, NewPost, Post, PostChanges, PostId, TITLE_MAX_LEN};
use crate::error::DomainError;
use crate::ports::PostRepository;

/// Posts use cases. Translates between API DTOs and domain values and
/// delegates persistence to a [`PostRepository`].
#[derive(Clone)]
pub struct PostsService {
    repo: Arc<dyn PostRepository>,
}

impl PostsService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Store a new post and return its id.
    pub async fn save(&self, req: PostSaveRequest) -> Result<PostId, DomainError> {
        check_len("title", &req.title, TITLE_MAX_LEN)?;
        if let Some(author) = &req.author {
            check_len("author", author, AUTHOR_MAX_LEN)?;
        }

        let post = self
            .repo
            .save(NewPost::new(req.title, req.content, req.author))
            .await?;

        tracing::info!(post_id = post.id, "Post created");
        Ok(post.id)
    }

    /// Change title and content of an existing post.
    pub async fn update(&self, id: PostId, req: PostUpdateRequest) -> Result<PostId, DomainError> {
        check_len("title", &req.title, TITLE_MAX_LEN)?;

        let changes = PostChanges {
            title: req.title,
            content: req.content,
        };

        let post = self
            .repo
            .update(id, changes)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "Post",
                id,
            })?;

        tracing::info!(post_id = post.id, "Post updated");
        Ok(post.id)
    }

    pub async fn find_by_id(&self, id: PostId) -> Result<PostResponse, DomainError> {
        let post = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "Post",
                id,
            })?;

        Ok(to_response(post))
    }

    /// Summaries of every post, newest first.
    pub async fn find_all_desc(&self) -> Result<Vec<PostListItem>, DomainError> {
        let posts = self.repo.find_all_desc().await?;

        Ok(posts
            .into_iter()
            .map(|post| PostListItem {
                id: post.id,
                title: post.title,
                author: post.author,
                modified_date: post.modified_date,
            })
            .collect())
    }
}

/// Reject values the bounded `posts` columns would refuse.
fn check_len(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    let len = value.chars().count();
    if len > max {
        return Err(DomainError::Validation(format!(
            "{field} must be at most {max} characters, got {len}"
        )));
    }
    Ok(())
}

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        author: post.author,
        create_date: post.create_date,
        modified_date: post.modified_date,
    }
}
