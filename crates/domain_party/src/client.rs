//! Client entity
//!
//! A client is the party a payment can be billed against. Its
//! `retention_percent`, derived from the tax regime it declares, is the sole
//! input the payment domain takes from here when computing withholding.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::ClientId;

use crate::error::PartyError;
use crate::validation::{validate_cnpj, validate_retention_percent};

/// A client of the business
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Client {
    /// Unique identifier
    pub id: ClientId,
    /// Legal or trade name
    pub name: String,
    /// Corporate tax id, normalized to digits only, unique across clients
    pub cnpj: String,
    /// Contact email
    #[validate(email)]
    pub email: String,
    /// Contact phone
    pub phone: Option<String>,
    /// Street address
    pub address: Option<String>,
    /// City
    pub city: Option<String>,
    /// State (two-letter code)
    pub state: Option<String>,
    /// Postal code
    pub postal_code: Option<String>,
    /// Tax regime label (e.g. "SIMPLES", "LUCRO REAL")
    pub tax_regime: Option<String>,
    /// Withholding percentage in [0, 100] applied to payments billed to
    /// this client
    pub retention_percent: Decimal,
    /// Whether the client can be referenced by new payments
    pub is_active: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Creates a new client
    ///
    /// The CNPJ is validated and stored in normalized (digits-only) form;
    /// the retention percentage must lie in [0, 100].
    pub fn new(
        name: impl Into<String>,
        cnpj: &str,
        email: impl Into<String>,
        retention_percent: Decimal,
    ) -> Result<Self, PartyError> {
        let cnpj = validate_cnpj(cnpj)?;
        let retention_percent = validate_retention_percent(retention_percent)?;
        let now = Utc::now();

        Ok(Self {
            id: ClientId::new_v7(),
            name: name.into(),
            cnpj,
            email: email.into(),
            phone: None,
            address: None,
            city: None,
            state: None,
            postal_code: None,
            tax_regime: None,
            retention_percent,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Sets the tax regime label
    pub fn with_tax_regime(mut self, regime: impl Into<String>) -> Self {
        self.tax_regime = Some(regime.into());
        self
    }

    /// Sets the contact phone
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Changes the retention percentage, validating the range
    pub fn set_retention_percent(&mut self, percent: Decimal) -> Result<(), PartyError> {
        self.retention_percent = validate_retention_percent(percent)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Deactivates the client
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_client_normalizes_cnpj() {
        let client = Client::new(
            "Empresa XYZ Ltda",
            "11.222.333/0001-81",
            "contato@xyz.com.br",
            dec!(4.65),
        )
        .unwrap();

        assert_eq!(client.cnpj, "11222333000181");
        assert_eq!(client.retention_percent, dec!(4.65));
        assert!(client.is_active);
    }

    #[test]
    fn test_new_client_rejects_bad_cnpj() {
        assert!(Client::new("X", "123", "x@x.com", dec!(0)).is_err());
    }

    #[test]
    fn test_new_client_rejects_out_of_range_retention() {
        assert!(Client::new("X", "11.222.333/0001-81", "x@x.com", dec!(101)).is_err());
    }

    #[test]
    fn test_set_retention_percent_validates() {
        let mut client =
            Client::new("X", "11.222.333/0001-81", "x@x.com", dec!(0)).unwrap();
        assert!(client.set_retention_percent(dec!(11)).is_ok());
        assert_eq!(client.retention_percent, dec!(11));
        assert!(client.set_retention_percent(dec!(-1)).is_err());
    }
}
