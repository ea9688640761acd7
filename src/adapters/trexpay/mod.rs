//! TrexPay PIX gateway adapter.
//!
//! - [`TrexPayGateway`] - production HTTP adapter
//! - [`MockPaymentGateway`] - in-memory mock for tests and local wiring
//! - `wire` - request/response types matching the gateway API

mod adapter;
mod mock;
mod wire;

pub use adapter::{TrexPayConfig, TrexPayGateway};
pub use mock::MockPaymentGateway;
