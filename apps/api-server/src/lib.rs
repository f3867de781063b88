//! # Blog API Server
//!
//! Actix-web front end for the blog post store: routes, error mapping,
//! request correlation and the start/stop lifecycle.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod server;
pub mod state;
pub mod telemetry;

pub use config::AppConfig;
pub use server::{RunningServer, run_server};
pub use state::AppState;
