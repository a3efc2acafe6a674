//! Party Domain - Clients and Suppliers
//!
//! This crate holds the two party types invoice payments refer to:
//!
//! - **Clients**: the party a payment may be billed against. A client carries
//!   a withholding-tax (retention) percentage derived from its tax regime,
//!   which the payment domain uses to compute the withheld amount.
//! - **Suppliers**: the party a payment is disbursed to, including the bank
//!   details a settlement would use.
//!
//! Both are identified externally by a CNPJ (Brazilian corporate tax id),
//! validated here with the standard check-digit scheme.

pub mod client;
pub mod error;
pub mod ports;
pub mod supplier;
pub mod validation;

pub use client::Client;
pub use error::PartyError;
pub use ports::{ClientPort, SupplierPort};
pub use supplier::{BankDetails, Supplier};
pub use validation::{normalize_cnpj, validate_cnpj, validate_retention_percent};
