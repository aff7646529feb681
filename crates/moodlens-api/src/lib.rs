//! Axum HTTP API server.
//!
//! This crate provides:
//! - The `/predict` endpoint over the inference pipeline
//! - Liveness/readiness probes
//! - CORS, security headers and request logging
//! - Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
