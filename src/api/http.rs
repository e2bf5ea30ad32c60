//! HTTP server setup with Axum

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use super::rest::{dashboard, data, track};
use crate::store::EventLog;

/// Shared per-process state handed to every handler.
///
/// The log itself is stateless between calls; everything durable lives in
/// the JSONL file it points at.
pub struct AppState {
    pub log: EventLog,
}

impl AppState {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }
}

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration - allow all origins so the tracking snippet can
    // post from any page embedding a form
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Static dashboard
        .route("/", get(dashboard::serve_dashboard))
        // Health check
        .route("/health", get(health_check))
        // Tracking API
        .route("/api/track", post(track::track_event))
        .route("/api/data", get(data::get_data))
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::EventLogConfig;
    use axum::body::Body;
    use axum::http::Request;
    use tempfile::TempDir;
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_health_check() {
        let temp_dir = TempDir::new().unwrap();
        let log = EventLog::with_config(EventLogConfig::new(temp_dir.path()));
        let app = create_router(Arc::new(AppState::new(log)));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_dashboard_is_served_at_root() {
        let temp_dir = TempDir::new().unwrap();
        let log = EventLog::with_config(EventLogConfig::new(temp_dir.path()));
        let app = create_router(Arc::new(AppState::new(log)));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
    }
}
