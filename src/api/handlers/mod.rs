//! REST endpoint handlers organized by resource.

pub mod system;
pub mod visit;
pub mod visits;

use axum::Router;

use crate::app_state::AppState;

/// Composes the read-only resource routes mounted under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new().merge(visits::routes())
}
