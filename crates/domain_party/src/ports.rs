//! Party domain ports
//!
//! The payment domain depends on party data through these traits: existence
//! (and, for clients, the retention percentage) is all it needs. Adapters in
//! `infra_db` provide the PostgreSQL implementations; `test_utils` provides
//! in-memory ones.

use async_trait::async_trait;

use core_kernel::{ClientId, DomainPort, PortError, SupplierId};

use crate::client::Client;
use crate::supplier::Supplier;

/// Lookup contract for clients
#[async_trait]
pub trait ClientPort: DomainPort {
    /// Finds a client by id; `Ok(None)` when no such client exists
    async fn find_client(&self, id: ClientId) -> Result<Option<Client>, PortError>;
}

/// Lookup contract for suppliers
#[async_trait]
pub trait SupplierPort: DomainPort {
    /// Finds a supplier by id; `Ok(None)` when no such supplier exists
    async fn find_supplier(&self, id: SupplierId) -> Result<Option<Supplier>, PortError>;
}
