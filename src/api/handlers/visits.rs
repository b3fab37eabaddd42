//! Read-only visit listing handlers: recent records and total count.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{RecentVisitsParams, VisitCountResponse, VisitDto};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, VisitError};

/// `GET /visits/recent` — List the most recent visit records.
///
/// # Errors
///
/// Returns a [`VisitError::Query`] on database failure.
#[utoipa::path(
    get,
    path = "/api/v1/visits/recent",
    tag = "Visits",
    summary = "List recent visits",
    description = "Returns the most recent visit records, newest first. Records are immutable; this surface is read-only.",
    params(RecentVisitsParams),
    responses(
        (status = 200, description = "Recent visit records", body = Vec<VisitDto>),
        (status = 500, description = "Database failure", body = ErrorResponse),
    )
)]
pub async fn recent_visits(
    State(state): State<AppState>,
    Query(params): Query<RecentVisitsParams>,
) -> Result<impl IntoResponse, VisitError> {
    let params = params.clamped();
    let records = state.visit_service.recent_visits(params.limit).await?;

    let data: Vec<VisitDto> = records.into_iter().map(VisitDto::from).collect();
    Ok(Json(data))
}

/// `GET /visits/count` — Total number of recorded visits.
///
/// # Errors
///
/// Returns a [`VisitError::Query`] on database failure.
#[utoipa::path(
    get,
    path = "/api/v1/visits/count",
    tag = "Visits",
    summary = "Count visits",
    description = "Returns the total number of rows in the visits table.",
    responses(
        (status = 200, description = "Visit count", body = VisitCountResponse),
        (status = 500, description = "Database failure", body = ErrorResponse),
    )
)]
pub async fn visit_count(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, VisitError> {
    let count = state.visit_service.count_visits().await?;
    Ok(Json(VisitCountResponse { count }))
}

/// Visit read routes, mounted under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/visits/recent", get(recent_visits))
        .route("/visits/count", get(visit_count))
}
