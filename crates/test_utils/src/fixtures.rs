//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for common entities. Fixtures are consistent and
//! predictable; use the builders for randomized or customized data.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::Money;
use domain_party::{BankDetails, Client, Supplier};

/// Fixture for CNPJ test data
pub struct CnpjFixtures;

impl CnpjFixtures {
    /// A formatted CNPJ with valid check digits
    pub fn valid_formatted() -> &'static str {
        "11.222.333/0001-81"
    }

    /// The same CNPJ in normalized digits-only form
    pub fn valid_digits() -> &'static str {
        "11222333000181"
    }

    /// A CNPJ whose check digits do not match
    pub fn bad_check_digits() -> &'static str {
        "11.222.333/0001-82"
    }

    /// A repeated-digit CNPJ, rejected even though the digits check out
    pub fn repeated_digits() -> &'static str {
        "00000000000000"
    }
}

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A standard invoice total
    pub fn invoice_total() -> Money {
        Money::new(dec!(1000.00))
    }

    /// Ten percent of the standard invoice total
    pub fn invoice_retention() -> Money {
        Money::new(dec!(100.00))
    }

    /// The standard total net of retention
    pub fn invoice_net() -> Money {
        Money::new(dec!(900.00))
    }

    /// An amount with a half-cent fraction, for rounding tests
    pub fn half_cent() -> Money {
        Money::new(dec!(0.125))
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard invoice issue date
    pub fn issue_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 30).unwrap()
    }

    /// Standard due date, one month after issue
    pub fn due_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 30).unwrap()
    }

    /// A date one day after the standard due date
    pub fn day_after_due() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }
}

/// Fixture for party entities
pub struct PartyFixtures;

impl PartyFixtures {
    /// A client with a ten-percent retention percentage
    pub fn client() -> Client {
        Self::client_with_retention(dec!(10))
    }

    /// A client with the given retention percentage
    pub fn client_with_retention(percent: Decimal) -> Client {
        Client::new(
            "Empresa XYZ Ltda",
            CnpjFixtures::valid_formatted(),
            "financeiro@empresaxyz.com.br",
            percent,
        )
        .unwrap()
    }

    /// A supplier with bank details filled in
    pub fn supplier() -> Supplier {
        Supplier::new(
            "Fornecedor ABC SA",
            CnpjFixtures::valid_formatted(),
            "contato@fornecedorabc.com.br",
        )
        .unwrap()
        .with_bank_details(BankDetails {
            bank: Some("001".to_string()),
            branch: Some("1234".to_string()),
            account: Some("56789-0".to_string()),
            pix_key: None,
        })
    }
}
