//! In-memory post store - used when no database is configured and in tests.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{BlogPost, NewPost, PostPatch};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};

/// Post store backed by a `Vec` behind an async RwLock.
///
/// Writes take the lock for the duration of a single document change, which
/// gives the same per-document atomicity a real document store provides.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<BlogPost>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<BlogPost, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        let mut posts = self.posts.read().await.clone();
        posts.sort_by(|a, b| a.created.cmp(&b.created).then(a.id.cmp(&b.id)));
        Ok(posts)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);

        if posts.len() == before {
            tracing::debug!(post_id = %id, "Delete matched no post");
        }

        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: NewPost) -> Result<BlogPost, RepoError> {
        let post = BlogPost::from_new(post);
        self.posts.write().await.push(post.clone());
        Ok(post)
    }

    async fn insert_many(&self, posts: Vec<NewPost>) -> Result<Vec<BlogPost>, RepoError> {
        let created: Vec<BlogPost> = posts.into_iter().map(BlogPost::from_new).collect();
        self.posts.write().await.extend(created.iter().cloned());
        Ok(created)
    }

    async fn find_one(&self) -> Result<Option<BlogPost>, RepoError> {
        Ok(self.posts.read().await.first().cloned())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.posts.read().await.len() as u64)
    }

    async fn update_by_id(&self, id: Uuid, patch: PostPatch) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;

        patch.apply(post);
        Ok(())
    }

    async fn drop_all(&self) -> Result<(), RepoError> {
        self.posts.write().await.clear();
        Ok(())
    }
}
