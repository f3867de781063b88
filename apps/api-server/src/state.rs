//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::PostRepository;
use blog_infra::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use anyhow::Context;
#[cfg(feature = "postgres")]
use blog_infra::PostgresPostRepository;
#[cfg(feature = "postgres")]
use migration::{Migrator, MigratorTrait};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
}

impl AppState {
    /// Wrap an already opened store.
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// State over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryPostRepository::new()))
    }

    /// Open the store named by `db_config`, or an in-memory one when absent.
    pub async fn connect(
        db_config: Option<&DatabaseConfig>,
        run_migrations: bool,
    ) -> anyhow::Result<Self> {
        match db_config {
            Some(config) => Self::connect_database(config, run_migrations).await,
            None => {
                tracing::warn!("DATABASE_URL not set. Running with in-memory post store.");
                Ok(Self::in_memory())
            }
        }
    }

    #[cfg(feature = "postgres")]
    async fn connect_database(config: &DatabaseConfig, run_migrations: bool) -> anyhow::Result<Self> {
        let conn = blog_infra::database::connect(config)
            .await
            .context("failed to connect to post database")?;

        if run_migrations {
            Migrator::up(&conn, None)
                .await
                .context("failed to apply post schema migrations")?;
            tracing::info!("Post schema up to date");
        }

        tracing::info!("Application state initialized (postgres)");
        Ok(Self::new(Arc::new(PostgresPostRepository::new(conn))))
    }

    #[cfg(not(feature = "postgres"))]
    async fn connect_database(_config: &DatabaseConfig, _run_migrations: bool) -> anyhow::Result<Self> {
        tracing::warn!("DATABASE_URL ignored: built without postgres feature. Using in-memory post store.");
        Ok(Self::in_memory())
    }
}
