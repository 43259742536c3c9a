use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::relative_time::RelativeTimeFormatter;

mod health;
mod relative_time;

pub use health::health;
pub use relative_time::*;

#[derive(Clone)]
pub struct AppState {
    /// Display defaults for requests that carry no locale or timezone hints
    pub formatter: RelativeTimeFormatter,
    pub max_batch: usize,
}

impl AppState {
    pub fn from_config(config: &crate::config::Config) -> Result<Self, crate::error::AppError> {
        Ok(Self {
            formatter: config.formatter()?,
            max_batch: config.server.max_batch,
        })
    }
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoint (no state)
        .route("/health", get(health::health))
        .route(
            "/relative-time",
            get(relative_time::get_relative_time).post(relative_time::post_relative_time),
        )
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
