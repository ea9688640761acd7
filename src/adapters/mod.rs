//! Adapters: provider-specific HTTP clients and the HTTP surface.

pub mod http;
pub mod trexpay;
pub mod utmify;
