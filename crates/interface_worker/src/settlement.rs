//! Settlement gateway implementation
//!
//! Settlement here means recording the disbursement and producing a receipt
//! reference; the actual bank transfer happens out of band. The gateway
//! fabricates a receipt and logs what it would disburse.

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use core_kernel::{DomainPort, PortError};
use domain_payment::{Payment, SettlementGateway, SettlementReceipt};

/// Gateway that records settlements locally
#[derive(Debug, Clone, Default)]
pub struct RecordingSettlementGateway;

impl RecordingSettlementGateway {
    pub fn new() -> Self {
        Self
    }
}

impl DomainPort for RecordingSettlementGateway {}

#[async_trait]
impl SettlementGateway for RecordingSettlementGateway {
    async fn settle(&self, payment: &Payment) -> Result<SettlementReceipt, PortError> {
        let reference = format!("RCPT-{}", Uuid::new_v4());
        info!(
            payment_id = %payment.id,
            supplier_id = %payment.supplier_id,
            net_value = %payment.net_value,
            %reference,
            "settlement recorded"
        );
        Ok(SettlementReceipt {
            reference,
            settled_at: Utc::now(),
        })
    }
}
