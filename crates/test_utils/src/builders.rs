//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults. Tests
//! specify only the fields they care about; everything else comes from the
//! fixtures or from randomized fake data.

use chrono::{NaiveDate, Utc};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{ClientId, Money, PaymentId, SupplierId};
use domain_party::{Client, Supplier};
use domain_payment::{Payment, PaymentDraft, PaymentStatus};

use crate::fixtures::{CnpjFixtures, MoneyFixtures, TemporalFixtures};

/// Builder for payment records in an arbitrary lifecycle state
///
/// The lifecycle service only ever creates `Pending` payments; this builder
/// exists so tests can place a record directly into any state without
/// replaying the transitions that would normally get it there.
pub struct TestPaymentBuilder {
    id: PaymentId,
    supplier_id: SupplierId,
    client_id: Option<ClientId>,
    invoice_number: String,
    issue_date: NaiveDate,
    due_date: NaiveDate,
    total_value: Money,
    retention_value: Money,
    status: PaymentStatus,
    notes: Option<String>,
}

impl Default for TestPaymentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPaymentBuilder {
    /// Creates a builder for a pending payment with fixture values
    pub fn new() -> Self {
        Self {
            id: PaymentId::new_v7(),
            supplier_id: SupplierId::new(),
            client_id: None,
            invoice_number: format!("NF-{:06}", (1..999_999).fake::<u32>()),
            issue_date: TemporalFixtures::issue_date(),
            due_date: TemporalFixtures::due_date(),
            total_value: MoneyFixtures::invoice_total(),
            retention_value: Money::zero(),
            status: PaymentStatus::Pending,
            notes: None,
        }
    }

    /// Sets the supplier
    pub fn with_supplier(mut self, supplier_id: SupplierId) -> Self {
        self.supplier_id = supplier_id;
        self
    }

    /// Sets the client reference
    pub fn with_client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Sets the due date
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = due_date;
        self
    }

    /// Sets the gross value
    pub fn with_total_value(mut self, total_value: Money) -> Self {
        self.total_value = total_value;
        self
    }

    /// Sets the withheld value
    pub fn with_retention_value(mut self, retention_value: Money) -> Self {
        self.retention_value = retention_value;
        self
    }

    /// Sets the lifecycle status
    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Builds the payment record
    pub fn build(self) -> Payment {
        let now = Utc::now();
        Payment {
            id: self.id,
            supplier_id: self.supplier_id,
            client_id: self.client_id,
            invoice_number: self.invoice_number,
            issue_date: self.issue_date,
            due_date: self.due_date,
            total_value: self.total_value,
            retention_value: self.retention_value,
            net_value: self.total_value - self.retention_value,
            status: self.status,
            paid_date: None,
            notes: self.notes,
            processed_by: Some("tester@example.com".to_string()),
            receipt_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Builder for payment drafts
pub struct TestDraftBuilder {
    draft: PaymentDraft,
}

impl TestDraftBuilder {
    /// Creates a draft builder pointed at the given supplier
    pub fn for_supplier(supplier_id: SupplierId) -> Self {
        Self {
            draft: PaymentDraft::new(
                supplier_id,
                format!("NF-{:06}", (1..999_999).fake::<u32>()),
                TemporalFixtures::issue_date(),
                TemporalFixtures::due_date(),
                MoneyFixtures::invoice_total(),
            ),
        }
    }

    /// Attaches a client reference
    pub fn with_client(mut self, client_id: ClientId) -> Self {
        self.draft = self.draft.with_client(client_id);
        self
    }

    /// Sets the due date
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.draft.due_date = due_date;
        self
    }

    /// Sets explicit retention and net values
    pub fn with_values(mut self, retention: Money, net: Money) -> Self {
        self.draft = self.draft.with_values(retention, net);
        self
    }

    /// Builds the draft
    pub fn build(self) -> PaymentDraft {
        self.draft
    }
}

/// Builder for client records
pub struct TestClientBuilder {
    name: String,
    email: String,
    retention_percent: Decimal,
    is_active: bool,
}

impl Default for TestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClientBuilder {
    /// Creates a builder with randomized name and email
    pub fn new() -> Self {
        Self {
            name: CompanyName().fake(),
            email: SafeEmail().fake(),
            retention_percent: dec!(10),
            is_active: true,
        }
    }

    /// Sets the retention percentage
    pub fn with_retention_percent(mut self, percent: Decimal) -> Self {
        self.retention_percent = percent;
        self
    }

    /// Marks the client inactive
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Builds the client
    pub fn build(self) -> Client {
        let mut client = Client::new(
            self.name,
            CnpjFixtures::valid_formatted(),
            self.email,
            self.retention_percent,
        )
        .unwrap();
        if !self.is_active {
            client.deactivate();
        }
        client
    }
}

/// Builder for supplier records
pub struct TestSupplierBuilder {
    name: String,
    email: String,
    category: Option<String>,
}

impl Default for TestSupplierBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSupplierBuilder {
    /// Creates a builder with randomized name and email
    pub fn new() -> Self {
        Self {
            name: CompanyName().fake(),
            email: SafeEmail().fake(),
            category: None,
        }
    }

    /// Sets the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Builds the supplier
    pub fn build(self) -> Supplier {
        let supplier =
            Supplier::new(self.name, CnpjFixtures::valid_formatted(), self.email).unwrap();
        match self.category {
            Some(category) => supplier.with_category(category),
            None => supplier,
        }
    }
}
