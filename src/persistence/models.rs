//! Database models for visit records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored row from the `visits` table.
///
/// Rows are immutable once written: the service exposes no update or
/// delete path for them.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct VisitRecord {
    /// Store-assigned surrogate key, strictly increasing in insertion
    /// order.
    pub id: i64,
    /// Textual form of the visitor's network address, IPv4 or IPv6,
    /// stored exactly as extracted (at most 45 characters).
    pub ip_address: String,
    /// Store-assigned row creation timestamp.
    pub visit_time: DateTime<Utc>,
}
