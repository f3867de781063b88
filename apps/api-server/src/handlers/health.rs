//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use blog_core::ports::PostRepository;

use crate::middleware::error::AppResult;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub posts: u64,
    pub timestamp: String,
}

/// Health check endpoint - reports status and confirms the store answers.
///
/// GET /health
pub async fn health_check(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.count().await?;

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        posts,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}
