//! Partial update of a pending payment
//!
//! Updates are expressed as an explicit patch struct with one `Option` per
//! updatable field; only fields that are present are applied. Retention is
//! deliberately not recomputed on update, even when the total value changes;
//! the values stand exactly as patched.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::Money;

use crate::payment::Payment;

/// A partial update to a pending payment
///
/// Status, identity, and audit fields are not patchable; status moves only
/// through lifecycle transitions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentPatch {
    /// New invoice note number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    /// New issue date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<NaiveDate>,
    /// New due date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// New gross value; retention is not recomputed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_value: Option<Money>,
    /// New retention value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_value: Option<Money>,
    /// New net value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_value: Option<Money>,
    /// New notes text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// New receipt reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
}

impl PaymentPatch {
    /// Returns true if the patch carries no changes
    pub fn is_empty(&self) -> bool {
        self.invoice_number.is_none()
            && self.issue_date.is_none()
            && self.due_date.is_none()
            && self.total_value.is_none()
            && self.retention_value.is_none()
            && self.net_value.is_none()
            && self.notes.is_none()
            && self.receipt_url.is_none()
    }

    /// Applies the present fields to `payment`, bumping `updated_at`
    pub fn apply(&self, payment: &mut Payment) {
        if let Some(invoice_number) = &self.invoice_number {
            payment.invoice_number = invoice_number.clone();
        }
        if let Some(issue_date) = self.issue_date {
            payment.issue_date = issue_date;
        }
        if let Some(due_date) = self.due_date {
            payment.due_date = due_date;
        }
        if let Some(total_value) = self.total_value {
            payment.total_value = total_value;
        }
        if let Some(retention_value) = self.retention_value {
            payment.retention_value = retention_value;
        }
        if let Some(net_value) = self.net_value {
            payment.net_value = net_value;
        }
        if let Some(notes) = &self.notes {
            payment.notes = Some(notes.clone());
        }
        if let Some(receipt_url) = &self.receipt_url {
            payment.receipt_url = Some(receipt_url.clone());
        }
        payment.updated_at = Utc::now();
    }

    /// Builder: sets the notes field
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Builder: sets the due date
    pub fn due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Builder: sets the total value
    pub fn total_value(mut self, total_value: Money) -> Self {
        self.total_value = Some(total_value);
        self
    }
}
