//! Database error types

use core_kernel::PortError;
use thiserror::Error;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Entity not found in database
    #[error("{entity} with id '{id}' not found")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Foreign key constraint violation
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// A stored value could not be mapped back to a domain type
    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    /// Migration error
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Generic SQL error
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Creates a not found error for a specific entity type and identifier
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// Creates a corrupt-row error for a column holding an unexpected value
    pub fn corrupt(column: &str, value: impl std::fmt::Display) -> Self {
        DatabaseError::CorruptRow(format!("unexpected value '{value}' in column '{column}'"))
    }
}

impl From<DatabaseError> for PortError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { entity, id } => PortError::not_found(entity, id),
            DatabaseError::DuplicateEntry(message)
            | DatabaseError::ForeignKeyViolation(message) => PortError::conflict(message),
            DatabaseError::ConnectionFailed(message) => PortError::connection(message),
            DatabaseError::SqlError(source) => match &source {
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                    PortError::connection(source.to_string())
                }
                _ => PortError::internal(format!("database error: {source}")),
            },
            other => PortError::internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let error = DatabaseError::not_found("Payment", "PAY-123");
        assert!(error.to_string().contains("Payment"));
        assert!(error.to_string().contains("PAY-123"));
    }

    #[test]
    fn test_connection_errors_map_to_transient_port_errors() {
        let port: PortError = DatabaseError::ConnectionFailed("refused".into()).into();
        assert!(port.is_transient());

        let port: PortError = DatabaseError::DuplicateEntry("cnpj".into()).into();
        assert!(!port.is_transient());
    }
}
