//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (restaurant-core port) ← NotFound / EmailTaken / Backend   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CoreError → tonic::Status                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use restaurant_core::store::{EntityKind, StoreError};
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - `fetch_optional` returns no row
    /// - UPDATE/DELETE affected zero rows
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Registering an owner email that already exists
    /// - ID collision (practically impossible with UUID v4)
    #[error("Duplicate {field}")]
    UniqueViolation { field: String },

    /// CHECK constraint violation.
    ///
    /// ## When This Occurs
    /// - A statement would leave `stock < 0` or `price_cents < 0`
    /// - Ban flag and reason written inconsistently
    #[error("Check constraint failed: {0}")]
    CheckViolation(String),

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite constraint messages:
                // "UNIQUE constraint failed: <table>.<column>"
                // "CHECK constraint failed: <expr>"
                if let Some(field) = msg.strip_prefix("UNIQUE constraint failed: ") {
                    DbError::UniqueViolation {
                        field: field.to_string(),
                    }
                } else if msg.contains("CHECK constraint failed") {
                    DbError::CheckViolation(msg.to_string())
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Translate into the store port's vocabulary.
///
/// The `entity` string set by repositories decides which not-found variant
/// the domain sees.
impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } if entity == "Restaurant" => {
                StoreError::not_found(EntityKind::Restaurant, id)
            }
            DbError::NotFound { entity, id } if entity == "Product" => {
                StoreError::not_found(EntityKind::Product, id)
            }
            other => StoreError::Backend(other.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_entity_kind() {
        let err: StoreError = DbError::not_found("Product", "p-1").into();
        assert!(matches!(
            err,
            StoreError::NotFound { entity: EntityKind::Product, ref id } if id == "p-1"
        ));

        let err: StoreError = DbError::not_found("Restaurant", "r-1").into();
        assert!(matches!(
            err,
            StoreError::NotFound { entity: EntityKind::Restaurant, .. }
        ));
    }

    #[test]
    fn test_other_errors_are_opaque_to_the_store_port() {
        let err: StoreError = DbError::PoolExhausted.into();
        assert!(matches!(err, StoreError::Backend(msg) if msg == "Connection pool exhausted"));
    }
}
