//! Port infrastructure
//!
//! The system follows a ports-and-adapters layout: each domain crate defines
//! the trait it needs from its collaborators (payment store, party lookup,
//! task queue, settlement gateway), and infrastructure crates provide the
//! implementations. This module holds the unified error type those traits
//! share and the marker trait that keeps implementations thread-safe.
//!
//! ```rust,ignore
//! // In domain_payment/src/ports.rs
//! #[async_trait]
//! pub trait PaymentStore: DomainPort {
//!     async fn fetch(&self, id: PaymentId) -> Result<Option<Payment>, PortError>;
//! }
//!
//! // Application services receive ports by trait object
//! pub struct PaymentService {
//!     store: Arc<dyn PaymentStore>,
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Error type for port operations
///
/// All port implementations map their failures onto these variants so the
/// domain layer handles database, queue, and external-system errors uniformly.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// A validation error occurred
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The operation conflicts with existing data
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The operation timed out
    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout { operation: String, duration_ms: u64 },

    /// Authentication or authorization failed
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates a transient failure that may
    /// succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PortError::Connection { .. } | PortError::Timeout { .. }
        )
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker trait for all domain ports
///
/// All port traits extend this marker so implementations are thread-safe and
/// usable behind `Arc<dyn …>` in async contexts.
pub trait DomainPort: Send + Sync + 'static {}
