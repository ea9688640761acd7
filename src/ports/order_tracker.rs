//! Order tracking port for the analytics/attribution service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::payment_gateway::Attribution;

/// Port for the order tracking service.
#[async_trait]
pub trait OrderTracker: Send + Sync {
    /// Report an order and its payment state to the tracking service.
    async fn report_order(&self, order: TrackingOrder) -> Result<(), TrackingError>;
}

/// Order report payload.
#[derive(Debug, Clone)]
pub struct TrackingOrder {
    /// Storefront order identifier.
    pub order_id: String,

    /// Payment method name (always "pix" for this storefront).
    pub payment_method: String,

    /// Current order payment state.
    pub status: OrderTrackingStatus,

    /// When the order was created.
    pub created_at: DateTime<Utc>,

    /// When payment was approved, if it was.
    pub approved_at: Option<DateTime<Utc>>,

    /// Buyer identification.
    pub customer: TrackingCustomer,

    /// Ordered product lines.
    pub products: Vec<TrackingProduct>,

    /// Checkout attribution; absent keys go out as explicit nulls on this
    /// wire format.
    pub attribution: Option<Attribution>,

    /// Revenue split for the order.
    pub commission: Commission,

    /// Marks diagnostic orders so they are excluded from reports.
    pub is_test: bool,
}

/// Order payment state understood by the tracking service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderTrackingStatus {
    WaitingPayment,
    Paid,
    Refunded,
}

impl OrderTrackingStatus {
    /// Wire representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderTrackingStatus::WaitingPayment => "waiting_payment",
            OrderTrackingStatus::Paid => "paid",
            OrderTrackingStatus::Refunded => "refunded",
        }
    }
}

/// Buyer identification block.
#[derive(Debug, Clone)]
pub struct TrackingCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub document: String,
    /// ISO country code, "BR" for this storefront.
    pub country: String,
}

/// Single ordered product line.
#[derive(Debug, Clone)]
pub struct TrackingProduct {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub price_in_cents: i64,
}

/// Revenue split for a reported order.
#[derive(Debug, Clone)]
pub struct Commission {
    pub total_price_in_cents: i64,
    pub gateway_fee_in_cents: i64,
    pub user_commission_in_cents: i64,
    pub currency: String,
}

/// Errors from order tracking operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TrackingError {
    /// API token missing from configuration; no I/O attempted.
    #[error("tracking credentials are not configured")]
    MissingCredentials,

    /// Tracking service reported failure.
    #[error("tracking API error: {0}")]
    Api(String),

    /// Transport could not complete the request.
    #[error("tracking network error: {0}")]
    Network(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_tracker_is_object_safe() {
        fn _accepts_dyn(_tracker: &dyn OrderTracker) {}
    }

    #[test]
    fn status_wire_names() {
        assert_eq!(OrderTrackingStatus::WaitingPayment.as_str(), "waiting_payment");
        assert_eq!(OrderTrackingStatus::Paid.as_str(), "paid");
        assert_eq!(OrderTrackingStatus::Refunded.as_str(), "refunded");
    }

    #[test]
    fn error_messages_name_the_failure() {
        assert!(TrackingError::MissingCredentials
            .to_string()
            .contains("not configured"));
        assert!(TrackingError::Api("400".to_string()).to_string().contains("400"));
    }
}
