//! PIX webhook payload types as delivered by the gateway.
//!
//! Wire field names mirror the gateway API exactly. Status strings are
//! passed through opaquely here; this layer projects fields, it does not
//! validate lifecycle transitions.

use serde::{Deserialize, Serialize};

/// Webhook event type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum PixEventType {
    /// Incoming payment settled to our account.
    #[serde(rename = "pix.received")]
    PixReceived,

    /// Outgoing payout completed.
    #[serde(rename = "pix.sent")]
    PixSent,
}

/// Full webhook envelope: event discriminator, payload, detached signature.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PixWebhookPayload {
    /// Which side of the rail this notification is about.
    pub event: PixEventType,

    /// Transaction payload.
    pub data: PixWebhookData,

    /// Signature, when the sender carries it in the body rather than a
    /// header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

/// Transaction payload nested in the webhook envelope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PixWebhookData {
    /// Gateway-assigned transaction identifier.
    #[serde(rename = "idTransaction")]
    pub transaction_id: String,

    /// Status string, passed through opaquely.
    pub status: String,

    /// Transaction amount as reported by the gateway.
    pub amount: f64,

    /// Settlement timestamp for incoming payments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<String>,

    /// Completion timestamp for outgoing payouts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,

    /// Gateway transaction kind (deposit, withdraw, ...).
    #[serde(rename = "typeTransaction")]
    pub transaction_type: String,

    /// Payer details, present on incoming payments only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer: Option<PixPayer>,

    /// Destination key, present on outgoing payouts only.
    #[serde(rename = "pixKey", skip_serializing_if = "Option::is_none")]
    pub pix_key: Option<String>,

    /// Kind of the destination key (cpf, email, phone, random).
    #[serde(rename = "pixKeyType", skip_serializing_if = "Option::is_none")]
    pub pix_key_type: Option<String>,

    /// Rail-level identifiers.
    pub metadata: PixMetadata,
}

/// Counterparty identification on incoming payments.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PixPayer {
    pub name: String,
    pub document: String,
}

/// Rail-level transaction identifiers.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PixMetadata {
    /// End-to-end identifier assigned by the PIX rail.
    #[serde(rename = "endToEndId")]
    pub end_to_end_id: String,

    /// Gateway-side transaction reference.
    pub txid: String,
}

/// Normalized incoming-payment record projected from a webhook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomingPixEvent {
    pub transaction_id: String,
    pub status: String,
    pub amount: f64,
    pub paid_at: Option<String>,
    pub payer_name: Option<String>,
    pub payer_document: Option<String>,
}

/// Normalized payout record projected from a webhook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingPixEvent {
    pub transaction_id: String,
    pub status: String,
    pub amount: f64,
    pub completed_at: Option<String>,
    pub pix_key: Option<String>,
}

impl PixWebhookPayload {
    /// Project the incoming-payment view of this payload.
    ///
    /// Pure field access; absent optionals stay absent.
    pub fn to_incoming(&self) -> IncomingPixEvent {
        IncomingPixEvent {
            transaction_id: self.data.transaction_id.clone(),
            status: self.data.status.clone(),
            amount: self.data.amount,
            paid_at: self.data.paid_at.clone(),
            payer_name: self.data.payer.as_ref().map(|p| p.name.clone()),
            payer_document: self.data.payer.as_ref().map(|p| p.document.clone()),
        }
    }

    /// Project the payout view of this payload.
    pub fn to_outgoing(&self) -> OutgoingPixEvent {
        OutgoingPixEvent {
            transaction_id: self.data.transaction_id.clone(),
            status: self.data.status.clone(),
            amount: self.data.amount,
            completed_at: self.data.completed_at.clone(),
            pix_key: self.data.pix_key.clone(),
        }
    }
}
