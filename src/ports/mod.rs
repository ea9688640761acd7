//! Port traits decoupling the application from provider-specific adapters.

mod order_tracker;
mod payment_gateway;

pub use order_tracker::{
    Commission, OrderTracker, OrderTrackingStatus, TrackingCustomer, TrackingError, TrackingOrder,
    TrackingProduct,
};
pub use payment_gateway::{
    Attribution, CustomerDetails, Deposit, DepositRequest, DepositStatus, GatewayError,
    GatewayErrorCode, PaymentGateway, PixStatus,
};
