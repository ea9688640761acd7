//! UTMify order tracking adapter.

mod adapter;
mod wire;

pub use adapter::{UtmifyConfig, UtmifyTracker};
