//! The visit recorder endpoint: persists one row and renders the
//! acknowledgment page.

use axum::Router;
use axum::extract::State;
use axum::response::Html;
use axum::routing::any;
use chrono::{DateTime, Utc};

use crate::api::client_addr::ClientAddr;
use crate::app_state::AppState;
use crate::error::VisitError;

/// `GET /` (any method) — Record the caller's address and acknowledge.
///
/// The sequence is fixed: ensure schema → insert row → render. The
/// displayed time is computed here, independently of the
/// store-assigned `visit_time`; the two may differ by the execution
/// latency between insert and render.
///
/// # Errors
///
/// Returns [`VisitError::Connection`] when the store is unreachable
/// (the diagnostic becomes the entire response body) and
/// [`VisitError::Insertion`] when the row could not be written.
#[utoipa::path(
    get,
    path = "/",
    tag = "Visits",
    summary = "Record a visit",
    description = "Persists the caller's IP address into the visits table and returns a three-line HTML acknowledgment.",
    responses(
        (status = 200, description = "Visit recorded", body = String, content_type = "text/html"),
        (status = 500, description = "Store unreachable or insert failed"),
    )
)]
pub async fn record_visit(
    State(state): State<AppState>,
    ClientAddr(addr): ClientAddr,
) -> Result<Html<String>, VisitError> {
    let ip_address = addr.to_string();
    state.visit_service.record_visit(&ip_address).await?;

    Ok(Html(acknowledgment_page(&ip_address, Utc::now())))
}

/// Renders the three-line acknowledgment fragment.
///
/// The display instant is a parameter so the rendered time stays a
/// separate value from the store-assigned `visit_time`.
fn acknowledgment_page(ip_address: &str, now: DateTime<Utc>) -> String {
    format!(
        "Connected successfully<br>\nYour IP Address: {ip_address}<br>\nCurrent Time: {}<br>\n",
        now.format("%Y-%m-%d %H:%M:%S")
    )
}

/// The recorder route, mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new().route("/", any(record_visit))
}
