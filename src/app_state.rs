//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::VisitService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Visit service for all recording and read operations.
    pub visit_service: Arc<VisitService>,
}
