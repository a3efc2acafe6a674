//! PostgreSQL payment store adapter
//!
//! Implements `PaymentStore` over the `PaymentRepository`. Conditional
//! transitions map the affected row count onto [`TransitionOutcome`]: zero
//! rows means the status moved underneath us, and the adapter reads the
//! current status back to report what it found.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::debug;

use core_kernel::{DomainPort, PaymentId, PortError};
use domain_payment::{
    Payment, PaymentQuery, PaymentStatus, PaymentStore, TransitionOutcome,
};

use crate::error::DatabaseError;
use crate::repositories::PaymentRepository;

/// PostgreSQL-backed implementation of the payment store port
#[derive(Debug, Clone)]
pub struct PostgresPaymentStore {
    repository: PaymentRepository,
}

impl PostgresPaymentStore {
    /// Creates a new adapter over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PaymentRepository::new(pool),
        }
    }

    /// Resolves the outcome of a conditional update that touched no rows
    ///
    /// Reads the current status back: a known status yields `StaleStatus`,
    /// a missing row yields `NotFound`, and an unknown status string
    /// surfaces as an internal error.
    async fn stale_outcome(&self, id: PaymentId) -> Result<TransitionOutcome, PortError> {
        let status = self
            .repository
            .current_status(*id.as_uuid())
            .await
            .map_err(PortError::from)?
            .ok_or_else(|| PortError::not_found("Payment", id))?;

        let status = PaymentStatus::parse(&status)
            .ok_or_else(|| PortError::from(DatabaseError::corrupt("status", &status)))?;

        Ok(TransitionOutcome::StaleStatus(status))
    }
}

impl DomainPort for PostgresPaymentStore {}

#[async_trait]
impl PaymentStore for PostgresPaymentStore {
    async fn insert(&self, payment: &Payment) -> Result<(), PortError> {
        self.repository.insert(payment).await?;
        debug!(payment_id = %payment.id, "payment row inserted");
        Ok(())
    }

    async fn fetch(&self, id: PaymentId) -> Result<Option<Payment>, PortError> {
        let row = self.repository.fetch(*id.as_uuid()).await?;
        row.map(|r| r.into_domain().map_err(PortError::from))
            .transpose()
    }

    async fn update(&self, payment: &Payment) -> Result<(), PortError> {
        let affected = self.repository.update(payment).await?;
        if affected == 0 {
            return Err(PortError::not_found("Payment", payment.id));
        }
        Ok(())
    }

    async fn transition(
        &self,
        id: PaymentId,
        expected: PaymentStatus,
        next: PaymentStatus,
    ) -> Result<TransitionOutcome, PortError> {
        let affected = self
            .repository
            .update_status_if(*id.as_uuid(), expected, next)
            .await?;

        if affected == 1 {
            debug!(payment_id = %id, from = %expected, to = %next, "status transition applied");
            return Ok(TransitionOutcome::Applied);
        }
        self.stale_outcome(id).await
    }

    async fn mark_paid(
        &self,
        id: PaymentId,
        expected: PaymentStatus,
        paid_date: NaiveDate,
        receipt_url: Option<String>,
    ) -> Result<TransitionOutcome, PortError> {
        let affected = self
            .repository
            .mark_paid_if(*id.as_uuid(), expected, paid_date, receipt_url.as_deref())
            .await?;

        if affected == 1 {
            debug!(payment_id = %id, %paid_date, "payment settled");
            return Ok(TransitionOutcome::Applied);
        }
        self.stale_outcome(id).await
    }

    async fn rollback_to_pending(
        &self,
        id: PaymentId,
        error_note: &str,
    ) -> Result<TransitionOutcome, PortError> {
        let affected = self
            .repository
            .rollback_if_processing(*id.as_uuid(), error_note)
            .await?;

        if affected == 1 {
            debug!(payment_id = %id, "payment rolled back to pending");
            return Ok(TransitionOutcome::Applied);
        }
        self.stale_outcome(id).await
    }

    async fn annotate(&self, id: PaymentId, note: &str) -> Result<(), PortError> {
        let affected = self.repository.set_notes(*id.as_uuid(), note).await?;
        if affected == 0 {
            return Err(PortError::not_found("Payment", id));
        }
        Ok(())
    }

    async fn list(&self, query: &PaymentQuery) -> Result<Vec<Payment>, PortError> {
        let rows = self.repository.list(query).await?;
        rows.into_iter()
            .map(|r| r.into_domain().map_err(PortError::from))
            .collect()
    }

    async fn find_overdue(&self, today: NaiveDate) -> Result<Vec<Payment>, PortError> {
        let rows = self.repository.find_overdue(today).await?;
        rows.into_iter()
            .map(|r| r.into_domain().map_err(PortError::from))
            .collect()
    }
}
