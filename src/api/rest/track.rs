//! Ingest endpoint - accepts one tracking event per request

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

use super::Message;
use crate::api::http::AppState;
use crate::types::TrackingEvent;

/// POST /api/track - parse the raw body as one event and append it.
///
/// The body is treated as raw text regardless of content type, then parsed
/// as JSON. An unparseable payload is rejected with 400 and nothing reaches
/// the log. On success the record is stamped with a server timestamp before
/// the append.
pub async fn track_event(
    State(state): State<Arc<AppState>>,
    body: String,
) -> impl IntoResponse {
    let mut event = match TrackingEvent::from_json_line(&body) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(error = %e, "rejected malformed tracking payload");
            return (StatusCode::BAD_REQUEST, Json(Message::new("Bad Request")));
        }
    };

    event.stamp_received(Utc::now());
    tracing::debug!(
        kind = event.event.as_deref().unwrap_or("unknown"),
        form = event.form_id.as_deref().unwrap_or(""),
        "received event"
    );

    match state.log.append(&event) {
        Ok(()) => (StatusCode::OK, Json(Message::new("Event received"))),
        Err(e) => {
            tracing::error!(error = %e, "failed to append event");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(Message::new("Internal Server Error")),
            )
        }
    }
}
