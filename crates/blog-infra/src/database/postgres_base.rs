use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{
    DbConn, DbErr, EntityTrait, Iterable, PrimaryKeyToColumn, PrimaryKeyTrait, QueryOrder,
};

use blog_core::error::RepoError;
use blog_core::ports::BaseRepository;

/// Generic SeaORM repository: lookups and bulk cleanup for any entity `E`.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

/// Map a SeaORM error onto the repository taxonomy.
pub(crate) fn repo_err(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        DbErr::RecordNotFound(_) => RepoError::NotFound,
        _ => {
            let msg = err.to_string();
            if msg.contains("duplicate") || msg.contains("unique") || msg.contains("violates") {
                RepoError::Constraint(msg)
            } else {
                RepoError::Query(msg)
            }
        }
    }
}

#[async_trait]
impl<E, T, ID> BaseRepository<T, ID> for PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: Sync + Send,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
    ID: Send + Sync + Into<sea_orm::Value> + Clone + Copy + 'static,
    T: From<E::Model> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id).one(&self.db).await.map_err(repo_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<T>, RepoError> {
        let mut select = E::find();
        for key in E::PrimaryKey::iter() {
            select = select.order_by_asc(key.into_column());
        }

        let models = select.all(&self.db).await.map_err(repo_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn delete_all(&self) -> Result<u64, RepoError> {
        let result = E::delete_many().exec(&self.db).await.map_err(repo_err)?;

        tracing::debug!(rows = result.rows_affected, "Deleted all rows");
        Ok(result.rows_affected)
    }
}
