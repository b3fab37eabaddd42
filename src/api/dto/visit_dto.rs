//! DTO types for the visit read endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::persistence::models::VisitRecord;

/// Query parameters for the recent-visits listing.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct RecentVisitsParams {
    /// Number of records to return (max 100). Defaults to 20.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    20
}

impl RecentVisitsParams {
    /// Clamps `limit` into the allowed `1..=100` range.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            limit: self.limit.clamp(1, 100),
        }
    }
}

/// One visit record as serialized in list responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VisitDto {
    /// Store-assigned row id.
    pub id: i64,
    /// Visitor address exactly as recorded.
    pub ip_address: String,
    /// Store-assigned creation timestamp.
    pub visit_time: DateTime<Utc>,
}

impl From<VisitRecord> for VisitDto {
    fn from(record: VisitRecord) -> Self {
        Self {
            id: record.id,
            ip_address: record.ip_address,
            visit_time: record.visit_time,
        }
    }
}

/// Response body for the visit count endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VisitCountResponse {
    /// Total number of recorded visits.
    pub count: i64,
}
