//! PostgreSQL post store.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbConn, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use blog_core::domain::{BlogPost, NewPost, PostPatch};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};

use super::entity::post::{self, Entity as PostEntity};

/// Post store over a SeaORM connection pool.
pub struct PostgresPostRepository {
    pub(crate) db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn query_error(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        other => {
            let err_str = other.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint("Post already exists".to_string())
            } else {
                RepoError::Query(err_str)
            }
        }
    }
}

#[async_trait]
impl BaseRepository<BlogPost, Uuid> for PostgresPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        let result = PostEntity::find()
            .order_by_asc(post::Column::CreatedAt)
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        if result.rows_affected == 0 {
            tracing::debug!(post_id = %id, "Delete matched no post");
        }

        Ok(())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: NewPost) -> Result<BlogPost, RepoError> {
        let active_model: post::ActiveModel = BlogPost::from_new(post).into();
        let model = active_model.insert(&self.db).await.map_err(query_error)?;

        Ok(model.into())
    }

    async fn insert_many(&self, posts: Vec<NewPost>) -> Result<Vec<BlogPost>, RepoError> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let models = posts
            .into_iter()
            .map(|p| post::ActiveModel::from(BlogPost::from_new(p)));

        // Stored rows, so `created` carries the column's precision.
        let rows = PostEntity::insert_many(models)
            .exec_with_returning_many(&self.db)
            .await
            .map_err(query_error)?;

        tracing::debug!(count = rows.len(), "Inserted posts");
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_one(&self) -> Result<Option<BlogPost>, RepoError> {
        let result = PostEntity::find()
            .order_by_asc(post::Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn count(&self) -> Result<u64, RepoError> {
        PostEntity::find()
            .count(&self.db)
            .await
            .map_err(query_error)
    }

    async fn update_by_id(&self, id: Uuid, patch: PostPatch) -> Result<(), RepoError> {
        // UPDATE needs at least one SET clause; an empty patch only checks existence.
        if patch.is_empty() {
            return match self.find_by_id(id).await? {
                Some(_) => Ok(()),
                None => Err(RepoError::NotFound),
            };
        }

        let mut update = PostEntity::update_many().filter(post::Column::Id.eq(id));
        if let Some(author) = patch.author {
            update = update
                .col_expr(post::Column::AuthorFirstName, Expr::value(author.first_name))
                .col_expr(post::Column::AuthorLastName, Expr::value(author.last_name));
        }
        if let Some(title) = patch.title {
            update = update.col_expr(post::Column::Title, Expr::value(title));
        }
        if let Some(content) = patch.content {
            update = update.col_expr(post::Column::Content, Expr::value(content));
        }

        let result = update.exec(&self.db).await.map_err(query_error)?;
        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn drop_all(&self) -> Result<(), RepoError> {
        let result = PostEntity::delete_many()
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        tracing::info!(removed = result.rows_affected, "Dropped all posts");
        Ok(())
    }

    async fn close(&self) -> Result<(), RepoError> {
        if let DatabaseConnection::SqlxPostgresPoolConnection(_) = &self.db {
            self.db.get_postgres_connection_pool().close().await;
            tracing::info!("Post database connection closed");
        }
        Ok(())
    }
}
