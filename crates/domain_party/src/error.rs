//! Party domain errors

use thiserror::Error;

/// Errors that can occur in the party domain
#[derive(Debug, Error)]
pub enum PartyError {
    /// Client not found
    #[error("Client not found: {0}")]
    ClientNotFound(String),

    /// Supplier not found
    #[error("Supplier not found: {0}")]
    SupplierNotFound(String),

    /// CNPJ is malformed or fails check-digit verification
    #[error("Invalid CNPJ: {0}")]
    InvalidCnpj(String),

    /// Retention percentage is outside [0, 100]
    #[error("Invalid retention percentage: {0}")]
    InvalidRetentionPercent(String),

    /// Field-level validation failure
    #[error("Validation error: {0}")]
    Validation(String),
}
