//! Payment repository implementation

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use core_kernel::{ClientId, Money, PaymentId, SupplierId};
use domain_payment::{Payment, PaymentQuery, PaymentStatus};

use crate::error::DatabaseError;

/// Database row for the `payments` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PaymentRow {
    pub id: Uuid,
    pub supplier_id: Uuid,
    pub client_id: Option<Uuid>,
    pub invoice_number: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub total_value: Decimal,
    pub retention_value: Decimal,
    pub net_value: Decimal,
    pub status: String,
    pub paid_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub processed_by: Option<String>,
    pub receipt_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PaymentRow {
    /// Maps the row back to the domain model
    ///
    /// # Errors
    ///
    /// `CorruptRow` when the stored status string is not a known status.
    pub fn into_domain(self) -> Result<Payment, DatabaseError> {
        let status = PaymentStatus::parse(&self.status)
            .ok_or_else(|| DatabaseError::corrupt("status", &self.status))?;

        Ok(Payment {
            id: PaymentId::from(self.id),
            supplier_id: SupplierId::from(self.supplier_id),
            client_id: self.client_id.map(ClientId::from),
            invoice_number: self.invoice_number,
            issue_date: self.issue_date,
            due_date: self.due_date,
            total_value: Money::from(self.total_value),
            retention_value: Money::from(self.retention_value),
            net_value: Money::from(self.net_value),
            status,
            paid_date: self.paid_date,
            notes: self.notes,
            processed_by: self.processed_by,
            receipt_url: self.receipt_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str = "id, supplier_id, client_id, invoice_number, issue_date, \
     due_date, total_value, retention_value, net_value, status, paid_date, notes, \
     processed_by, receipt_url, created_at, updated_at";

/// Repository for the `payments` table
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    /// Creates a new repository over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new payment row
    pub async fn insert(&self, payment: &Payment) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                id, supplier_id, client_id, invoice_number, issue_date, due_date,
                total_value, retention_value, net_value, status, paid_date, notes,
                processed_by, receipt_url, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.supplier_id.as_uuid())
        .bind(payment.client_id.map(|id| *id.as_uuid()))
        .bind(&payment.invoice_number)
        .bind(payment.issue_date)
        .bind(payment.due_date)
        .bind(payment.total_value.amount())
        .bind(payment.retention_value.amount())
        .bind(payment.net_value.amount())
        .bind(payment.status.as_str())
        .bind(payment.paid_date)
        .bind(&payment.notes)
        .bind(&payment.processed_by)
        .bind(&payment.receipt_url)
        .bind(payment.created_at)
        .bind(payment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_constraint_error)?;

        Ok(())
    }

    /// Fetches one payment row by id
    pub async fn fetch(&self, id: Uuid) -> Result<Option<PaymentRow>, DatabaseError> {
        let row = sqlx::query_as::<_, PaymentRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM payments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Overwrites the mutable fields of a payment row
    pub async fn update(&self, payment: &Payment) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE payments
            SET invoice_number = $2, issue_date = $3, due_date = $4,
                total_value = $5, retention_value = $6, net_value = $7,
                notes = $8, receipt_url = $9, updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(&payment.invoice_number)
        .bind(payment.issue_date)
        .bind(payment.due_date)
        .bind(payment.total_value.amount())
        .bind(payment.retention_value.amount())
        .bind(payment.net_value.amount())
        .bind(&payment.notes)
        .bind(&payment.receipt_url)
        .bind(payment.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Moves a payment from `expected` to `next`, returning the affected
    /// row count (zero when the status had already moved)
    pub async fn update_status_if(
        &self,
        id: Uuid,
        expected: PaymentStatus,
        next: PaymentStatus,
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            "UPDATE payments SET status = $3, updated_at = now() \
             WHERE id = $1 AND status = $2",
        )
        .bind(id)
        .bind(expected.as_str())
        .bind(next.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Settles a payment: moves it from `expected` to PAID and records the
    /// settlement date and receipt reference in the same statement
    pub async fn mark_paid_if(
        &self,
        id: Uuid,
        expected: PaymentStatus,
        paid_date: NaiveDate,
        receipt_url: Option<&str>,
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            "UPDATE payments \
             SET status = $3, paid_date = $4, receipt_url = $5, updated_at = now() \
             WHERE id = $1 AND status = $2",
        )
        .bind(id)
        .bind(expected.as_str())
        .bind(PaymentStatus::Paid.as_str())
        .bind(paid_date)
        .bind(receipt_url)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Rolls a processing payment back to pending, recording the failure
    /// note; a no-op when the payment is not processing
    pub async fn rollback_if_processing(
        &self,
        id: Uuid,
        error_note: &str,
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            "UPDATE payments SET status = $3, notes = $4, updated_at = now() \
             WHERE id = $1 AND status = $2",
        )
        .bind(id)
        .bind(PaymentStatus::Processing.as_str())
        .bind(PaymentStatus::Pending.as_str())
        .bind(error_note)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Replaces the notes of a payment
    pub async fn set_notes(&self, id: Uuid, note: &str) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            "UPDATE payments SET notes = $2, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(note)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Returns the current status string of a payment
    pub async fn current_status(&self, id: Uuid) -> Result<Option<String>, DatabaseError> {
        let status: Option<(String,)> =
            sqlx::query_as("SELECT status FROM payments WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(status.map(|(s,)| s))
    }

    /// Lists payment rows matching the query filters
    pub async fn list(&self, query: &PaymentQuery) -> Result<Vec<PaymentRow>, DatabaseError> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {SELECT_COLUMNS} FROM payments WHERE 1 = 1"));

        if let Some(status) = query.status {
            builder.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(due_date) = query.due_date {
            builder.push(" AND due_date = ").push_bind(due_date);
        }
        if let Some(due_from) = query.due_from {
            builder.push(" AND due_date >= ").push_bind(due_from);
        }
        if let Some(due_until) = query.due_until {
            builder.push(" AND due_date < ").push_bind(due_until);
        }
        if let Some(supplier_id) = query.supplier_id {
            builder
                .push(" AND supplier_id = ")
                .push_bind(*supplier_id.as_uuid());
        }
        if let Some(client_id) = query.client_id {
            builder
                .push(" AND client_id = ")
                .push_bind(*client_id.as_uuid());
        }

        builder.push(" ORDER BY created_at");

        if let Some(limit) = query.limit {
            builder.push(" LIMIT ").push_bind(i64::from(limit));
        }
        if let Some(offset) = query.offset {
            builder.push(" OFFSET ").push_bind(i64::from(offset));
        }

        let rows = builder
            .build_query_as::<PaymentRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Lists pending payments strictly past their due date
    pub async fn find_overdue(&self, today: NaiveDate) -> Result<Vec<PaymentRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, PaymentRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM payments \
             WHERE status = $1 AND due_date < $2 ORDER BY due_date"
        ))
        .bind(PaymentStatus::Pending.as_str())
        .bind(today)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

/// Maps unique and foreign-key violations onto the dedicated variants
fn map_constraint_error(err: sqlx::Error) -> DatabaseError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return DatabaseError::DuplicateEntry(db_err.message().to_string());
        }
        if db_err.is_foreign_key_violation() {
            return DatabaseError::ForeignKeyViolation(db_err.message().to_string());
        }
    }
    DatabaseError::SqlError(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row() -> PaymentRow {
        PaymentRow {
            id: Uuid::new_v4(),
            supplier_id: Uuid::new_v4(),
            client_id: None,
            invoice_number: "NF-000001".to_string(),
            issue_date: NaiveDate::from_ymd_opt(2024, 3, 30).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
            total_value: dec!(1000.00),
            retention_value: dec!(100.00),
            net_value: dec!(900.00),
            status: "PENDING".to_string(),
            paid_date: None,
            notes: None,
            processed_by: Some("admin@example.com".to_string()),
            receipt_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_maps_to_domain() {
        let payment = row().into_domain().unwrap();
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert_eq!(payment.total_value, Money::from(dec!(1000.00)));
        assert!(payment.values_consistent());
    }

    #[test]
    fn test_unknown_status_string_is_a_corrupt_row() {
        let mut bad = row();
        bad.status = "SETTLED".to_string();
        assert!(matches!(
            bad.into_domain(),
            Err(DatabaseError::CorruptRow(_))
        ));
    }
}
