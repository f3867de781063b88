use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BlogPost, NewPost, PostPatch};
use crate::error::RepoError;

/// Generic repository trait defining the lookups every store offers.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Fetch every entity in a stable order.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Delete an entity by its ID. Deleting a missing entity is not an error.
    async fn delete_by_id(&self, id: ID) -> Result<(), RepoError>;
}

/// Document store for blog posts.
///
/// Every operation touches at most one document, except the seeding and
/// teardown helpers (`insert_many`, `drop_all`).
#[async_trait]
pub trait PostRepository: BaseRepository<BlogPost, Uuid> {
    /// Persist a new post. The store assigns `id` and defaults `created`.
    async fn create(&self, post: NewPost) -> Result<BlogPost, RepoError>;

    /// Bulk insert, used to seed fixtures.
    async fn insert_many(&self, posts: Vec<NewPost>) -> Result<Vec<BlogPost>, RepoError>;

    /// Any single post, or `None` when the store is empty.
    async fn find_one(&self) -> Result<Option<BlogPost>, RepoError>;

    /// Number of stored posts.
    async fn count(&self) -> Result<u64, RepoError>;

    /// Apply `patch` to the post with `id`.
    /// Returns `RepoError::NotFound` when no such post exists.
    async fn update_by_id(&self, id: Uuid, patch: PostPatch) -> Result<(), RepoError>;

    /// Remove every post.
    async fn drop_all(&self) -> Result<(), RepoError>;

    /// Release the underlying connection.
    async fn close(&self) -> Result<(), RepoError> {
        Ok(())
    }
}
