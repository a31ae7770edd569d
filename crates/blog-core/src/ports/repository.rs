use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostChanges, PostId};
use crate::error::RepoError;

/// Generic read and cleanup operations shared by every stored entity.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID. Absence is `Ok(None)`, not an error.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// All entities, ordered by ID ascending.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Remove every entity. Returns the number of rows removed.
    async fn delete_all(&self) -> Result<u64, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, PostId> {
    /// Insert a new post. The returned post carries the generated id and
    /// the timestamps assigned by storage.
    async fn save(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Load the post, apply `changes` and write it back, all inside one
    /// transaction. `Ok(None)` when no post has this id.
    async fn update(&self, id: PostId, changes: PostChanges) -> Result<Option<Post>, RepoError>;

    /// All posts, newest id first.
    async fn find_all_desc(&self) -> Result<Vec<Post>, RepoError>;
}
