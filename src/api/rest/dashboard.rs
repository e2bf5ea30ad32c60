//! Static dashboard document

use axum::response::Html;

/// Dashboard markup, compiled into the binary so the server ships as a
/// single artifact.
const DASHBOARD_HTML: &str = include_str!("../../../assets/dashboard.html");

/// GET / - serve the dashboard page.
///
/// The page polls `/api/data` every 30 seconds and refetches when the form
/// selector changes; the server side is just this one static document.
pub async fn serve_dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}
