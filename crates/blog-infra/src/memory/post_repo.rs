//! In-memory post repository.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use blog_core::domain::{NewPost, Post, PostChanges, PostId};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};

struct Store {
    next_id: PostId,
    posts: BTreeMap<PostId, Post>,
}

/// Post repository over a `BTreeMap` behind an async RwLock.
///
/// Ids start at 1 and are never reused, even after `delete_all`.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                next_id: 1,
                posts: BTreeMap::new(),
            }),
        }
    }

    /// Timestamp for a write that must land strictly after `previous`.
    fn stamp_after(previous: DateTime<Utc>) -> DateTime<Utc> {
        Utc::now().max(previous + Duration::microseconds(1))
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, PostId> for InMemoryPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.posts.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.posts.values().cloned().collect())
    }

    async fn delete_all(&self) -> Result<u64, RepoError> {
        let mut store = self.store.write().await;
        let removed = store.posts.len() as u64;
        store.posts.clear();
        Ok(removed)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn save(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        let id = store.next_id;
        store.next_id += 1;

        let now = Utc::now();
        let stored = Post {
            id,
            title: post.title,
            content: post.content,
            author: post.author,
            create_date: now,
            modified_date: now,
        };
        store.posts.insert(id, stored.clone());

        tracing::debug!(post_id = id, "Inserted post (in-memory)");
        Ok(stored)
    }

    async fn update(&self, id: PostId, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        // The write lock is the transaction: load, mutate, write back.
        let mut store = self.store.write().await;

        let Some(mut post) = store.posts.get(&id).cloned() else {
            return Ok(None);
        };
        post.apply(changes);
        post.modified_date = Self::stamp_after(post.modified_date);
        store.posts.insert(id, post.clone());

        Ok(Some(post))
    }

    async fn find_all_desc(&self) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.posts.values().rev().cloned().collect())
    }
}
