//! PostgreSQL implementation of the persistence layer.

use sqlx::PgPool;

use super::VisitRepository;
use super::models::VisitRecord;
use crate::error::VisitError;

/// DDL for the `visits` table. `IF NOT EXISTS` makes the statement a
/// no-op when the table is already present, so it is safe to issue on
/// every request.
const CREATE_VISITS_TABLE: &str = "CREATE TABLE IF NOT EXISTS visits (\
    id BIGSERIAL PRIMARY KEY, \
    ip_address VARCHAR(45) NOT NULL, \
    visit_time TIMESTAMPTZ NOT NULL DEFAULT now()\
)";

/// PostgreSQL auth-failure SQLSTATEs: invalid_authorization_specification
/// and invalid_password.
const AUTH_SQLSTATES: [&str; 2] = ["28000", "28P01"];

/// PostgreSQL-backed visit store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct VisitStore {
    pool: PgPool,
}

impl VisitStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl VisitRepository for VisitStore {
    async fn ensure_schema(&self) -> Result<(), VisitError> {
        sqlx::query(CREATE_VISITS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(classify_schema_error)?;
        Ok(())
    }

    /// The statement is parameterized; the address text is never
    /// interpolated into the SQL string.
    async fn insert_visit(&self, ip_address: &str) -> Result<i64, VisitError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO visits (ip_address) VALUES ($1) RETURNING id",
        )
        .bind(ip_address)
        .fetch_one(&self.pool)
        .await
        .map_err(classify_insert_error)?;

        Ok(id)
    }

    async fn recent_visits(&self, limit: i64) -> Result<Vec<VisitRecord>, VisitError> {
        sqlx::query_as::<_, VisitRecord>(
            "SELECT id, ip_address, visit_time FROM visits ORDER BY id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| VisitError::Query(e.to_string()))
    }

    async fn count_visits(&self) -> Result<i64, VisitError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM visits")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| VisitError::Query(e.to_string()))
    }
}

/// Whether the error belongs to connection establishment rather than
/// statement execution: pool exhaustion, socket loss, TLS or protocol
/// handshake failures, and rejected credentials (SQLSTATE 28000/28P01).
fn is_connect_failure(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_) => true,
        sqlx::Error::Database(db) => {
            matches!(db.code().as_deref(), Some(code) if AUTH_SQLSTATES.contains(&code))
        }
        _ => false,
    }
}

/// Maps a schema-statement failure: connect-phase failures keep the
/// fatal connection classification, everything else is a schema error.
fn classify_schema_error(e: sqlx::Error) -> VisitError {
    if is_connect_failure(&e) {
        VisitError::Connection(e.to_string())
    } else {
        VisitError::Schema(e.to_string())
    }
}

/// Maps an insert failure: connect-phase failures keep the fatal
/// connection classification, everything else is an insertion error.
fn classify_insert_error(e: sqlx::Error) -> VisitError {
    if is_connect_failure(&e) {
        VisitError::Connection(e.to_string())
    } else {
        VisitError::Insertion(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_table_statement_is_idempotent() {
        assert!(CREATE_VISITS_TABLE.starts_with("CREATE TABLE IF NOT EXISTS visits"));
    }

    #[test]
    fn create_table_statement_bounds_address_length() {
        assert!(CREATE_VISITS_TABLE.contains("VARCHAR(45) NOT NULL"));
        assert!(CREATE_VISITS_TABLE.contains("DEFAULT now()"));
    }

    #[test]
    fn pool_failures_are_fatal_connection_errors() {
        let err = classify_schema_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, VisitError::Connection(_)));

        let err = classify_insert_error(sqlx::Error::PoolClosed);
        assert!(matches!(err, VisitError::Connection(_)));
    }

    #[test]
    fn handshake_failures_are_fatal_connection_errors() {
        // Rejected credentials surface as protocol or TLS errors during
        // connection establishment; both must keep the fatal contract.
        let err = classify_schema_error(sqlx::Error::Protocol("invalid password".to_string()));
        assert!(
            matches!(err, VisitError::Connection(_)),
            "connect-phase failure classified as non-fatal: {err:?}"
        );

        let err = classify_insert_error(sqlx::Error::Tls("handshake refused".into()));
        assert!(matches!(err, VisitError::Connection(_)));
    }

    #[test]
    fn statement_failures_keep_their_own_classification() {
        let err = classify_schema_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, VisitError::Schema(_)));

        let err = classify_insert_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, VisitError::Insertion(_)));
    }
}
