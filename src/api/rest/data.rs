//! Report endpoint - recomputes aggregates from the full log

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::Message;
use crate::analytics;
use crate::api::http::AppState;

/// Query parameters for the report endpoint
#[derive(Debug, Deserialize)]
pub struct DataParams {
    /// Restrict the metrics to one form. The selector list in the response
    /// stays unfiltered either way.
    #[serde(rename = "formId")]
    pub form_id: Option<String>,
}

/// GET /api/data - full aggregate report, recomputed per request.
///
/// A store that has never been written yields the all-zero report, not an
/// error; only unexpected I/O failures surface as 500.
pub async fn get_data(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DataParams>,
) -> Response {
    let events = match state.log.load_events() {
        Ok(events) => events,
        Err(e) => {
            tracing::error!(error = %e, "failed to read event log");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(Message::new("Internal Server Error")),
            )
                .into_response();
        }
    };

    // An empty formId means "all forms", same as omitting the parameter
    let filter = params.form_id.as_deref().filter(|f| !f.is_empty());
    let report = analytics::compute_report(&events, filter);

    Json(report).into_response()
}
