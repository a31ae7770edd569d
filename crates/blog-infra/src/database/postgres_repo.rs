//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, QueryOrder, Set, TransactionTrait};

use blog_core::domain::{NewPost, Post, PostChanges, PostId};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, repo_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn save(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(new_post)
            .insert(&self.db)
            .await
            .map_err(repo_err)?;

        tracing::debug!(post_id = model.id, "Inserted post");
        Ok(model.into())
    }

    async fn update(&self, id: PostId, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        let txn = self.db.begin().await.map_err(repo_err)?;

        // Dropping `txn` without commit rolls it back.
        let Some(model) = PostEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(repo_err)?
        else {
            tracing::debug!(post_id = id, "Update target missing");
            return Ok(None);
        };

        let mut active = model.into_active_model();
        active.title = Set(changes.title);
        active.content = Set(changes.content);
        let updated = active.update(&txn).await.map_err(repo_err)?;

        txn.commit().await.map_err(repo_err)?;

        tracing::debug!(post_id = id, "Updated post");
        Ok(Some(updated.into()))
    }

    async fn find_all_desc(&self) -> Result<Vec<Post>, RepoError> {
        let models = PostEntity::find()
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
