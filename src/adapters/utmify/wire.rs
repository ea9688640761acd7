//! UTMify wire types.
//!
//! Unlike the gateway payload, this API receives absent values as explicit
//! nulls, including every attribution key.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::ports::{Attribution, TrackingOrder};

/// Outbound order body for `POST /api-credentials/orders`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBody {
    pub order_id: String,
    pub platform: String,
    pub payment_method: String,
    pub status: String,
    pub created_at: String,
    pub approved_date: Option<String>,
    pub refunded_at: Option<String>,
    pub customer: CustomerBody,
    pub products: Vec<ProductBody>,
    pub tracking_parameters: TrackingParametersBody,
    pub commission: CommissionBody,
    pub is_test: bool,
}

#[derive(Debug, Serialize)]
pub struct CustomerBody {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub document: String,
    pub country: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductBody {
    pub id: String,
    pub name: String,
    pub plan_id: Option<String>,
    pub plan_name: Option<String>,
    pub quantity: u32,
    pub price_in_cents: i64,
}

/// Attribution keys; serialized as nulls when absent. Field names stay in
/// snake form on this wire.
#[derive(Debug, Default, Serialize)]
pub struct TrackingParametersBody {
    pub src: Option<String>,
    pub sck: Option<String>,
    pub utm_source: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_content: Option<String>,
    pub utm_term: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionBody {
    pub total_price_in_cents: i64,
    pub gateway_fee_in_cents: i64,
    pub user_commission_in_cents: i64,
    pub currency: String,
}

impl OrderBody {
    /// Build the wire body from a port-level order.
    pub fn from_order(platform: &str, order: &TrackingOrder) -> Self {
        Self {
            order_id: order.order_id.clone(),
            platform: platform.to_string(),
            payment_method: order.payment_method.clone(),
            status: order.status.as_str().to_string(),
            created_at: format_timestamp(&order.created_at),
            approved_date: order.approved_at.as_ref().map(format_timestamp),
            refunded_at: None,
            customer: CustomerBody {
                name: order.customer.name.clone(),
                email: order.customer.email.clone(),
                phone: order.customer.phone.clone(),
                document: order.customer.document.clone(),
                country: order.customer.country.clone(),
            },
            products: order
                .products
                .iter()
                .map(|p| ProductBody {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    plan_id: None,
                    plan_name: None,
                    quantity: p.quantity,
                    price_in_cents: p.price_in_cents,
                })
                .collect(),
            tracking_parameters: TrackingParametersBody::from_attribution(
                order.attribution.as_ref(),
            ),
            commission: CommissionBody {
                total_price_in_cents: order.commission.total_price_in_cents,
                gateway_fee_in_cents: order.commission.gateway_fee_in_cents,
                user_commission_in_cents: order.commission.user_commission_in_cents,
                currency: order.commission.currency.clone(),
            },
            is_test: order.is_test,
        }
    }
}

impl TrackingParametersBody {
    fn from_attribution(attribution: Option<&Attribution>) -> Self {
        match attribution {
            Some(a) => Self {
                src: a.src.clone(),
                sck: a.sck.clone(),
                utm_source: a.utm_source.clone(),
                utm_campaign: a.utm_campaign.clone(),
                utm_medium: a.utm_medium.clone(),
                utm_content: a.utm_content.clone(),
                utm_term: a.utm_term.clone(),
            },
            None => Self::default(),
        }
    }
}

/// `YYYY-MM-DD HH:MM:SS` in UTC, the format this API expects.
fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{Commission, OrderTrackingStatus, TrackingCustomer, TrackingProduct};
    use chrono::TimeZone;

    fn test_order() -> TrackingOrder {
        TrackingOrder {
            order_id: "ORDER-1".to_string(),
            payment_method: "pix".to_string(),
            status: OrderTrackingStatus::WaitingPayment,
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
            approved_at: None,
            customer: TrackingCustomer {
                name: "Maria Souza".to_string(),
                email: "maria@example.com".to_string(),
                phone: "11999999999".to_string(),
                document: "12345678900".to_string(),
                country: "BR".to_string(),
            },
            products: vec![TrackingProduct {
                id: "sku-1".to_string(),
                name: "Caderno".to_string(),
                quantity: 2,
                price_in_cents: 1990,
            }],
            attribution: None,
            commission: Commission {
                total_price_in_cents: 3980,
                gateway_fee_in_cents: 398,
                user_commission_in_cents: 3582,
                currency: "BRL".to_string(),
            },
            is_test: false,
        }
    }

    #[test]
    fn order_body_uses_expected_timestamp_format() {
        let body = OrderBody::from_order("CometaPapelaria", &test_order());
        assert_eq!(body.created_at, "2024-01-15 10:30:00");
        assert!(body.approved_date.is_none());
    }

    #[test]
    fn order_body_serializes_absent_attribution_as_nulls() {
        let body = OrderBody::from_order("CometaPapelaria", &test_order());
        let value = serde_json::to_value(&body).unwrap();

        let tracking = &value["trackingParameters"];
        assert!(tracking["src"].is_null());
        assert!(tracking["utm_source"].is_null());
        assert!(tracking["utm_term"].is_null());
    }

    #[test]
    fn order_body_uses_camel_case_envelope_keys() {
        let body = OrderBody::from_order("CometaPapelaria", &test_order());
        let value = serde_json::to_value(&body).unwrap();
        let object = value.as_object().unwrap();

        assert!(object.contains_key("orderId"));
        assert!(object.contains_key("paymentMethod"));
        assert!(object.contains_key("createdAt"));
        assert!(object.contains_key("isTest"));
        assert_eq!(value["commission"]["totalPriceInCents"], 3980);
        assert_eq!(value["products"][0]["priceInCents"], 1990);
        assert!(value["products"][0]["planId"].is_null());
    }

    #[test]
    fn order_body_carries_set_attribution() {
        let mut order = test_order();
        order.attribution = Some(Attribution {
            utm_source: Some("newsletter".to_string()),
            ..Default::default()
        });

        let body = OrderBody::from_order("CometaPapelaria", &order);
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["trackingParameters"]["utm_source"], "newsletter");
        assert!(value["trackingParameters"]["sck"].is_null());
    }
}
