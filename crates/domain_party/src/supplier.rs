//! Supplier entity
//!
//! A supplier is the party a payment is disbursed to. The payment domain
//! only checks that a referenced supplier exists; the bank details are
//! carried for the settlement step.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::SupplierId;

use crate::error::PartyError;
use crate::validation::validate_cnpj;

/// Disbursement details for a supplier
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BankDetails {
    /// Bank code (e.g. "001")
    pub bank: Option<String>,
    /// Branch number
    pub branch: Option<String>,
    /// Account number
    pub account: Option<String>,
    /// PIX key, when the supplier accepts instant transfers
    pub pix_key: Option<String>,
}

impl BankDetails {
    /// Returns true if at least one disbursement route is present
    pub fn has_route(&self) -> bool {
        self.pix_key.is_some() || (self.bank.is_some() && self.account.is_some())
    }
}

/// A supplier of the business
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Supplier {
    /// Unique identifier
    pub id: SupplierId,
    /// Legal or trade name
    pub name: String,
    /// Corporate tax id, normalized to digits only, unique across suppliers
    pub cnpj: String,
    /// Contact email
    #[validate(email)]
    pub email: String,
    /// Contact phone
    pub phone: Option<String>,
    /// Supplier category (e.g. "SERVICES", "MATERIALS")
    pub category: Option<String>,
    /// Where settlements are sent
    pub bank_details: BankDetails,
    /// Whether the supplier can be referenced by new payments
    pub is_active: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Supplier {
    /// Creates a new supplier with a validated, normalized CNPJ
    pub fn new(
        name: impl Into<String>,
        cnpj: &str,
        email: impl Into<String>,
    ) -> Result<Self, PartyError> {
        let cnpj = validate_cnpj(cnpj)?;
        let now = Utc::now();

        Ok(Self {
            id: SupplierId::new_v7(),
            name: name.into(),
            cnpj,
            email: email.into(),
            phone: None,
            category: None,
            bank_details: BankDetails::default(),
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Sets the supplier category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the bank details
    pub fn with_bank_details(mut self, details: BankDetails) -> Self {
        self.bank_details = details;
        self
    }

    /// Deactivates the supplier
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_supplier_normalizes_cnpj() {
        let supplier = Supplier::new(
            "Fornecedor ABC Ltda",
            "11.222.333/0001-81",
            "financeiro@abc.com.br",
        )
        .unwrap();

        assert_eq!(supplier.cnpj, "11222333000181");
        assert!(supplier.is_active);
        assert!(!supplier.bank_details.has_route());
    }

    #[test]
    fn test_bank_details_route_detection() {
        let pix_only = BankDetails {
            pix_key: Some("11222333000181".to_string()),
            ..Default::default()
        };
        assert!(pix_only.has_route());

        let account_without_bank = BankDetails {
            account: Some("12345-6".to_string()),
            ..Default::default()
        };
        assert!(!account_without_bank.has_route());

        let full = BankDetails {
            bank: Some("001".to_string()),
            branch: Some("1234".to_string()),
            account: Some("12345-6".to_string()),
            pix_key: None,
        };
        assert!(full.has_route());
    }
}
