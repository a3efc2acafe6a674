//! Infrastructure Database Layer
//!
//! PostgreSQL-backed implementations of the domain ports, built on SQLx.
//!
//! # Architecture
//!
//! The crate is split in two layers:
//!
//! - `repositories`: raw data access, SQL and row types only
//! - `adapters`: port implementations that translate between domain models
//!   and repository rows, and between [`DatabaseError`] and `PortError`
//!
//! Status changes use conditional `UPDATE ... WHERE status = $expected`
//! statements; the affected row count tells the adapter whether the
//! transition applied or lost a race.

pub mod adapters;
pub mod error;
pub mod pool;
pub mod repositories;

pub use adapters::{PostgresClientDirectory, PostgresPaymentStore, PostgresSupplierDirectory};
pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, run_migrations, DatabaseConfig, DatabasePool};
