//! Server lifecycle: bind, serve, and shut down with the store.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::rt::task::JoinHandle;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use blog_core::ports::PostRepository;

use crate::config::AppConfig;
use crate::handlers;
use crate::observability::RequestIdMiddleware;
use crate::state::AppState;

/// A listening server and the store it owns.
pub struct RunningServer {
    addr: SocketAddr,
    handle: ServerHandle,
    task: JoinHandle<std::io::Result<()>>,
    posts: Arc<dyn PostRepository>,
}

/// Open the store, bind the listener and start serving in the background.
///
/// Must be called from within an actix runtime (`#[actix_web::main]` or
/// `#[actix_web::test]`).
pub async fn run_server(config: AppConfig) -> anyhow::Result<RunningServer> {
    let state = AppState::connect(config.database.as_ref(), config.run_migrations).await?;
    let posts = state.posts.clone();

    match serve(config, state) {
        Ok(server) => Ok(server),
        Err(e) => {
            close_store(&posts).await?;
            Err(e)
        }
    }
}

/// Like [`run_server`] but over an existing state.
pub fn serve(config: AppConfig, state: AppState) -> anyhow::Result<RunningServer> {
    let posts = state.posts.clone();

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .shutdown_timeout(config.shutdown_timeout);
    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    let server = server
        .bind((config.host.as_str(), config.port))
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;
    let addr = server
        .addrs()
        .first()
        .copied()
        .context("listener has no local address")?;

    let server = server.run();
    let handle = server.handle();
    let task = actix_web::rt::spawn(server);

    tracing::info!(%addr, "Blog API listening");

    Ok(RunningServer {
        addr,
        handle,
        task,
        posts,
    })
}

impl RunningServer {
    /// Address the listener is bound to.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL for clients, e.g. `http://127.0.0.1:41234`.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// The store shared by every request.
    pub fn posts(&self) -> Arc<dyn PostRepository> {
        self.posts.clone()
    }

    /// Wait until the server stops on its own (e.g. on SIGINT), then close the store.
    pub async fn wait(self) -> anyhow::Result<()> {
        let Self { task, posts, .. } = self;
        task.await.context("server task panicked")??;
        close_store(&posts).await
    }

    /// Stop accepting connections, drain in-flight requests and close the store.
    pub async fn close(self) -> anyhow::Result<()> {
        let Self {
            addr,
            handle,
            task,
            posts,
        } = self;

        handle.stop(true).await;
        task.await.context("server task panicked")??;
        tracing::info!(%addr, "Blog API stopped");

        close_store(&posts).await
    }
}

async fn close_store(posts: &Arc<dyn PostRepository>) -> anyhow::Result<()> {
    posts.close().await.context("failed to close post store")
}
