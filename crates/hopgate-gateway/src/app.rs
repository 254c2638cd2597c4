use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{health_handler, redirect_handler};
use crate::state::AppState;

/// Path of the liveness probe. Slugs never contain `/`, so it cannot shadow
/// a mapping.
pub const HEALTH_PATH: &str = "/_/health";

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route(HEALTH_PATH, get(health_handler))
            .fallback(redirect_handler)
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
