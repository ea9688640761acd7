//! Mock payment gateway for tests and wiring without live credentials.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::ports::{
    Deposit, DepositRequest, DepositStatus, GatewayError, PaymentGateway, PixStatus,
};

/// In-memory `PaymentGateway` returning preset results and counting calls.
pub struct MockPaymentGateway {
    deposit_result: Result<Deposit, GatewayError>,
    status_result: Result<DepositStatus, GatewayError>,
    deposit_calls: AtomicUsize,
    status_calls: AtomicUsize,
}

impl MockPaymentGateway {
    /// Mock that succeeds with fixture data.
    pub fn new() -> Self {
        Self {
            deposit_result: Ok(Deposit {
                transaction_id: Some("TX-MOCK-1".to_string()),
                qr_code: Some("00020126mockpayload".to_string()),
                qr_code_base64: Some("aVZCT1J3".to_string()),
                pix_key: Some("pix@gateway.example".to_string()),
                expires_at: Some("2024-01-01T00:00:00Z".to_string()),
            }),
            status_result: Ok(DepositStatus {
                transaction_id: "TX-MOCK-1".to_string(),
                status: PixStatus::Pending,
                amount: Some(49.9),
                paid_at: None,
            }),
            deposit_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
        }
    }

    /// Preset the result of `create_deposit`.
    pub fn with_deposit_result(mut self, result: Result<Deposit, GatewayError>) -> Self {
        self.deposit_result = result;
        self
    }

    /// Preset the result of `deposit_status`.
    pub fn with_status_result(mut self, result: Result<DepositStatus, GatewayError>) -> Self {
        self.status_result = result;
        self
    }

    /// How many deposits were attempted.
    pub fn deposit_calls(&self) -> usize {
        self.deposit_calls.load(Ordering::SeqCst)
    }

    /// How many status polls were made.
    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockPaymentGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_deposit(&self, _request: DepositRequest) -> Result<Deposit, GatewayError> {
        self.deposit_calls.fetch_add(1, Ordering::SeqCst);
        self.deposit_result.clone()
    }

    async fn deposit_status(&self, transaction_id: &str) -> Result<DepositStatus, GatewayError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.status_result.clone().map(|mut status| {
            status.transaction_id = transaction_id.to_string();
            status
        })
    }
}
