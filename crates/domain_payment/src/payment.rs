//! Payment record and status machine
//!
//! A `Payment` represents one invoice payment owed to a supplier, optionally
//! billed against a client whose tax regime determines the withheld amount.
//! Payments are never physically deleted; cancellation is a status
//! transition.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{ClientId, Money, PaymentId, SupplierId};

/// Payment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Awaiting processing; the only updatable state
    Pending,
    /// A worker picked the payment up and settlement is in flight
    Processing,
    /// Settled successfully (terminal)
    Paid,
    /// Cancelled by a user (terminal)
    Cancelled,
}

impl PaymentStatus {
    /// Returns the canonical string form stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Processing => "PROCESSING",
            Self::Paid => "PAID",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Parses a status from its canonical string form
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Some(Self::Pending),
            "PROCESSING" => Some(Self::Processing),
            "PAID" => Some(Self::Paid),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Returns true if no further transitions are permitted
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid | Self::Cancelled)
    }

    /// Returns true if the payment's fields may still be updated
    pub fn can_update(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns true if the payment may be cancelled
    pub fn can_cancel(&self) -> bool {
        matches!(self, Self::Pending | Self::Processing)
    }

    /// Returns true if `from -> to` is a legal transition
    ///
    /// Legal transitions:
    /// - `Pending -> Processing` (processor claims the payment)
    /// - `Processing -> Paid` (settlement succeeded)
    /// - `Processing -> Pending` (settlement failed, rolled back)
    /// - `Pending -> Cancelled`, `Processing -> Cancelled`
    pub fn transition_allowed(from: PaymentStatus, to: PaymentStatus) -> bool {
        use PaymentStatus::*;
        matches!(
            (from, to),
            (Pending, Processing)
                | (Processing, Paid)
                | (Processing, Pending)
                | (Pending, Cancelled)
                | (Processing, Cancelled)
        )
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One invoice payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,
    /// Supplier the payment is disbursed to (required)
    pub supplier_id: SupplierId,
    /// Client the payment is billed against (optional)
    pub client_id: Option<ClientId>,
    /// Invoice note number; free text, not unique
    pub invoice_number: String,
    /// Invoice issue date
    pub issue_date: NaiveDate,
    /// Due date
    pub due_date: NaiveDate,
    /// Gross invoice value
    pub total_value: Money,
    /// Withheld tax; zero when no client is attached
    pub retention_value: Money,
    /// Net disbursement; total minus retention
    pub net_value: Money,
    /// Lifecycle status; always `Pending` at creation
    pub status: PaymentStatus,
    /// Date the payment was settled
    pub paid_date: Option<NaiveDate>,
    /// Free-text notes; also carries error and overdue annotations
    pub notes: Option<String>,
    /// Identity of the user who created the payment
    pub processed_by: Option<String>,
    /// Settlement receipt reference
    pub receipt_url: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    /// Returns true if the payment is pending and past due at `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == PaymentStatus::Pending && self.due_date < today
    }

    /// Invariant check: net value equals total minus retention
    pub fn values_consistent(&self) -> bool {
        self.net_value == self.total_value - self.retention_value
    }
}

/// Input for creating a payment
///
/// Monetary derivation depends on the client reference: when a client is
/// attached the lifecycle service recomputes retention and net value from the
/// client's retention percentage, overriding whatever the draft supplied.
/// Without a client the draft's own values are taken as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentDraft {
    /// Supplier to disburse to (must exist)
    pub supplier_id: SupplierId,
    /// Client to bill against (must exist when present)
    pub client_id: Option<ClientId>,
    /// Invoice note number
    pub invoice_number: String,
    /// Invoice issue date
    pub issue_date: NaiveDate,
    /// Due date
    pub due_date: NaiveDate,
    /// Gross invoice value
    pub total_value: Money,
    /// Withheld tax, used only when no client is attached
    #[serde(default)]
    pub retention_value: Money,
    /// Net value, used only when no client is attached; defaults to
    /// total minus retention
    pub net_value: Option<Money>,
    /// Free-text notes
    pub notes: Option<String>,
}

impl PaymentDraft {
    /// Creates a draft with the required fields
    pub fn new(
        supplier_id: SupplierId,
        invoice_number: impl Into<String>,
        issue_date: NaiveDate,
        due_date: NaiveDate,
        total_value: Money,
    ) -> Self {
        Self {
            supplier_id,
            client_id: None,
            invoice_number: invoice_number.into(),
            issue_date,
            due_date,
            total_value,
            retention_value: Money::zero(),
            net_value: None,
            notes: None,
        }
    }

    /// Attaches a client reference
    pub fn with_client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Supplies explicit retention and net values (no-client drafts only)
    pub fn with_values(mut self, retention: Money, net: Money) -> Self {
        self.retention_value = retention;
        self.net_value = Some(net);
        self
    }

    /// Sets the notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
