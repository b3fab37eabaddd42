//! Visit service: orchestrates the per-request recording sequence.

use crate::error::VisitError;
use crate::persistence::VisitRepository;
use crate::persistence::models::VisitRecord;
use crate::persistence::postgres::VisitStore;

/// Orchestration layer for visit recording.
///
/// Stateless coordinator over a [`VisitRepository`]. Recording a visit
/// follows a fixed sequence: ensure schema → insert row. The schema
/// step is idempotent and its non-fatal failures are logged rather
/// than propagated, since the table usually already exists; an insert
/// failure is always propagated so a lost row never reports success.
#[derive(Debug, Clone)]
pub struct VisitService<S = VisitStore> {
    store: S,
}

impl<S: VisitRepository> VisitService<S> {
    /// Creates a new `VisitService`.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Records one visit for the given peer address and returns the
    /// store-assigned row id.
    ///
    /// # Errors
    ///
    /// Returns [`VisitError::Connection`] when the store is
    /// unreachable and [`VisitError::Insertion`] when the insert
    /// statement fails. Schema-ensure failures other than connection
    /// loss are logged at `warn` and do not abort the request.
    pub async fn record_visit(&self, ip_address: &str) -> Result<i64, VisitError> {
        match self.store.ensure_schema().await {
            Ok(()) => {}
            // Connection loss is fatal before anything else runs.
            Err(err @ VisitError::Connection(_)) => return Err(err),
            Err(err) => {
                tracing::warn!(error = %err, "schema ensure failed; continuing");
            }
        }

        let id = self.store.insert_visit(ip_address).await.map_err(|err| {
            if matches!(err, VisitError::Insertion(_)) {
                tracing::error!(error = %err, ip_address, "visit insert failed");
            }
            err
        })?;

        tracing::info!(id, ip_address, "visit recorded");
        Ok(id)
    }

    /// Returns the `limit` most recent visit records, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`VisitError::Query`] on database failure.
    pub async fn recent_visits(&self, limit: i64) -> Result<Vec<VisitRecord>, VisitError> {
        self.store.recent_visits(limit).await
    }

    /// Returns the total number of recorded visits.
    ///
    /// # Errors
    ///
    /// Returns a [`VisitError::Query`] on database failure.
    pub async fn count_visits(&self) -> Result<i64, VisitError> {
        self.store.count_visits().await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;

    /// In-memory repository double with switchable failure modes.
    #[derive(Debug, Default)]
    struct MemoryStore {
        rows: Mutex<Vec<String>>,
        schema_error: Option<fn() -> VisitError>,
        insert_error: Option<fn() -> VisitError>,
    }

    impl VisitRepository for MemoryStore {
        async fn ensure_schema(&self) -> Result<(), VisitError> {
            match self.schema_error {
                Some(make) => Err(make()),
                None => Ok(()),
            }
        }

        async fn insert_visit(&self, ip_address: &str) -> Result<i64, VisitError> {
            if let Some(make) = self.insert_error {
                return Err(make());
            }
            let mut rows = self.rows.lock().unwrap();
            rows.push(ip_address.to_string());
            Ok(rows.len() as i64)
        }

        async fn recent_visits(&self, limit: i64) -> Result<Vec<VisitRecord>, VisitError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .enumerate()
                .rev()
                .take(limit.max(0) as usize)
                .map(|(idx, ip)| VisitRecord {
                    id: idx as i64 + 1,
                    ip_address: ip.clone(),
                    visit_time: Utc::now(),
                })
                .collect())
        }

        async fn count_visits(&self) -> Result<i64, VisitError> {
            Ok(self.rows.lock().unwrap().len() as i64)
        }
    }

    #[tokio::test]
    async fn each_request_inserts_exactly_one_row() {
        let service = VisitService::new(MemoryStore::default());

        for expected_id in 1..=5i64 {
            let id = service.record_visit("203.0.113.7").await.unwrap();
            assert_eq!(id, expected_id);
        }

        assert_eq!(service.count_visits().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn address_is_stored_exactly_as_extracted() {
        let service = VisitService::new(MemoryStore::default());
        service.record_visit("203.0.113.7").await.unwrap();

        let recent = service.recent_visits(10).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent.first().unwrap().ip_address, "203.0.113.7");
    }

    #[tokio::test]
    async fn schema_failure_is_logged_and_recording_continues() {
        let store = MemoryStore {
            schema_error: Some(|| VisitError::Schema("permission denied".to_string())),
            ..MemoryStore::default()
        };
        let service = VisitService::new(store);

        let id = service.record_visit("198.51.100.2").await.unwrap();
        assert_eq!(id, 1);
        assert_eq!(service.count_visits().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn connection_loss_during_schema_aborts_before_insert() {
        let store = MemoryStore {
            schema_error: Some(|| VisitError::Connection("store unreachable".to_string())),
            ..MemoryStore::default()
        };
        let service = VisitService::new(store);

        let err = service.record_visit("198.51.100.2").await.unwrap_err();
        assert!(matches!(err, VisitError::Connection(_)));
        assert_eq!(service.count_visits().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn insert_failure_is_propagated_not_swallowed() {
        let store = MemoryStore {
            insert_error: Some(|| VisitError::Insertion("value too long".to_string())),
            ..MemoryStore::default()
        };
        let service = VisitService::new(store);

        let err = service.record_visit("198.51.100.2").await.unwrap_err();
        assert!(matches!(err, VisitError::Insertion(_)));
    }
}
