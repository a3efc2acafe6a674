//! PostgreSQL party directory adapters

use async_trait::async_trait;
use sqlx::PgPool;

use core_kernel::{ClientId, DomainPort, PortError, SupplierId};
use domain_party::{Client, ClientPort, Supplier, SupplierPort};

use crate::repositories::PartyRepository;

/// PostgreSQL-backed implementation of the client lookup port
#[derive(Debug, Clone)]
pub struct PostgresClientDirectory {
    repository: PartyRepository,
}

impl PostgresClientDirectory {
    /// Creates a new adapter over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PartyRepository::new(pool),
        }
    }
}

impl DomainPort for PostgresClientDirectory {}

#[async_trait]
impl ClientPort for PostgresClientDirectory {
    async fn find_client(&self, id: ClientId) -> Result<Option<Client>, PortError> {
        let row = self.repository.fetch_client(*id.as_uuid()).await?;
        Ok(row.map(Client::from))
    }
}

/// PostgreSQL-backed implementation of the supplier lookup port
#[derive(Debug, Clone)]
pub struct PostgresSupplierDirectory {
    repository: PartyRepository,
}

impl PostgresSupplierDirectory {
    /// Creates a new adapter over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PartyRepository::new(pool),
        }
    }
}

impl DomainPort for PostgresSupplierDirectory {}

#[async_trait]
impl SupplierPort for PostgresSupplierDirectory {
    async fn find_supplier(&self, id: SupplierId) -> Result<Option<Supplier>, PortError> {
        let row = self.repository.fetch_supplier(*id.as_uuid()).await?;
        Ok(row.map(Supplier::from))
    }
}
