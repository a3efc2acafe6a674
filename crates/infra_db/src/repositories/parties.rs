//! Party repository implementation
//!
//! Read access for clients and suppliers. The payment lifecycle only ever
//! looks parties up by id, so the repository stays read-only; rows are
//! written by the administrative surface outside this system.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{ClientId, SupplierId};
use domain_party::{BankDetails, Client, Supplier};

use crate::error::DatabaseError;

/// Database row for the `clients` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClientRow {
    pub id: Uuid,
    pub name: String,
    pub cnpj: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub tax_regime: Option<String>,
    pub retention_percent: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Client {
            id: ClientId::from(row.id),
            name: row.name,
            cnpj: row.cnpj,
            email: row.email,
            phone: row.phone,
            address: row.address,
            city: row.city,
            state: row.state,
            postal_code: row.postal_code,
            tax_regime: row.tax_regime,
            retention_percent: row.retention_percent,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Database row for the `suppliers` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SupplierRow {
    pub id: Uuid,
    pub name: String,
    pub cnpj: String,
    pub email: String,
    pub phone: Option<String>,
    pub category: Option<String>,
    pub bank: Option<String>,
    pub branch: Option<String>,
    pub account: Option<String>,
    pub pix_key: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SupplierRow> for Supplier {
    fn from(row: SupplierRow) -> Self {
        Supplier {
            id: SupplierId::from(row.id),
            name: row.name,
            cnpj: row.cnpj,
            email: row.email,
            phone: row.phone,
            category: row.category,
            bank_details: BankDetails {
                bank: row.bank,
                branch: row.branch,
                account: row.account,
                pix_key: row.pix_key,
            },
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for the `clients` and `suppliers` tables
#[derive(Debug, Clone)]
pub struct PartyRepository {
    pool: PgPool,
}

impl PartyRepository {
    /// Creates a new repository over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches one client row by id
    pub async fn fetch_client(&self, id: Uuid) -> Result<Option<ClientRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ClientRow>(
            "SELECT id, name, cnpj, email, phone, address, city, state, postal_code, \
                    tax_regime, retention_percent, is_active, created_at, updated_at \
             FROM clients WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Fetches one supplier row by id
    pub async fn fetch_supplier(&self, id: Uuid) -> Result<Option<SupplierRow>, DatabaseError> {
        let row = sqlx::query_as::<_, SupplierRow>(
            "SELECT id, name, cnpj, email, phone, category, bank, branch, account, \
                    pix_key, is_active, created_at, updated_at \
             FROM suppliers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
