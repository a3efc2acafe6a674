//! Payment domain errors

use core_kernel::{ClientId, PaymentId, PortError, SupplierId};
use thiserror::Error;

/// Errors that can occur in the payment domain
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Payment not found
    #[error("Payment not found: {0}")]
    PaymentNotFound(PaymentId),

    /// Referenced client does not exist
    #[error("Client not found: {0}")]
    ClientNotFound(ClientId),

    /// Referenced supplier does not exist
    #[error("Supplier not found: {0}")]
    SupplierNotFound(SupplierId),

    /// Operation not permitted for the payment's current status
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Settlement failed; the queue's retry policy applies
    #[error("Processing failed: {0}")]
    ProcessingFailure(String),

    /// Underlying store/queue/gateway failure
    #[error(transparent)]
    Port(#[from] PortError),
}

impl PaymentError {
    pub fn invalid_state(message: impl Into<String>) -> Self {
        PaymentError::InvalidState(message.into())
    }

    /// Returns true if a failed processing attempt may be retried
    ///
    /// Only settlement failures are retriable; a missing payment or an
    /// invalid state is permanent from the queue's point of view.
    pub fn is_retriable(&self) -> bool {
        match self {
            PaymentError::ProcessingFailure(_) => true,
            PaymentError::Port(e) => e.is_transient(),
            _ => false,
        }
    }

    /// Returns true if this is a missing-entity error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PaymentError::PaymentNotFound(_)
                | PaymentError::ClientNotFound(_)
                | PaymentError::SupplierNotFound(_)
        )
    }
}
