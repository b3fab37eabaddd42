//! Persistence layer: PostgreSQL visit log.
//!
//! Provides the [`VisitRepository`] trait for durable storage of visit
//! records. The concrete implementation uses `sqlx::PgPool` for async
//! PostgreSQL access; every statement is parameterized.

pub mod models;
pub mod postgres;

use models::VisitRecord;

use crate::error::VisitError;

/// Storage operations required by the visit service.
///
/// Implemented by [`postgres::VisitStore`]; tests substitute an
/// in-memory double.
pub trait VisitRepository: Send + Sync {
    /// Issues the idempotent `CREATE TABLE IF NOT EXISTS` statement for
    /// the `visits` table.
    ///
    /// # Errors
    ///
    /// Returns [`VisitError::Connection`] when the store is unreachable
    /// and [`VisitError::Schema`] on any other failure.
    fn ensure_schema(&self) -> impl Future<Output = Result<(), VisitError>> + Send;

    /// Inserts one visit row with the given address and returns the
    /// store-assigned `id`.
    ///
    /// # Errors
    ///
    /// Returns [`VisitError::Connection`] when the store is unreachable
    /// and [`VisitError::Insertion`] on any other failure.
    fn insert_visit(&self, ip_address: &str) -> impl Future<Output = Result<i64, VisitError>> + Send;

    /// Loads the `limit` most recent visit records, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`VisitError::Query`] on database failure.
    fn recent_visits(
        &self,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<VisitRecord>, VisitError>> + Send;

    /// Counts all visit records.
    ///
    /// # Errors
    ///
    /// Returns a [`VisitError::Query`] on database failure.
    fn count_visits(&self) -> impl Future<Output = Result<i64, VisitError>> + Send;
}
