//! Post entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, NotSet, Set};

use blog_core::domain::{NewPost, Post};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub author: Option<String>,
    pub create_date: DateTimeWithTimeZone,
    pub modified_date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// Timestamps are stamped here and nowhere else: every insert sets both
/// columns to the same instant, every update refreshes `modified_date`.
#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now: DateTimeWithTimeZone = chrono::Utc::now().into();
        if insert {
            self.create_date = Set(now);
        }
        self.modified_date = Set(now);
        Ok(self)
    }
}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            author: model.author,
            create_date: model.create_date.into(),
            modified_date: model.modified_date.into(),
        }
    }
}

/// Insert form of a new post. The id comes from the sequence and the
/// timestamps from `before_save`.
impl From<NewPost> for ActiveModel {
    fn from(post: NewPost) -> Self {
        Self {
            id: NotSet,
            title: Set(post.title),
            content: Set(post.content),
            author: Set(post.author),
            create_date: NotSet,
            modified_date: NotSet,
        }
    }
}
