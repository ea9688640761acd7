//! PIX webhook processing: payload types, normalized events, signature
//! verification.

mod event;
mod verifier;

pub use event::{
    IncomingPixEvent, OutgoingPixEvent, PixEventType, PixMetadata, PixPayer, PixWebhookData,
    PixWebhookPayload,
};
pub use verifier::PixWebhookVerifier;
