// ── API-to-domain type conversions ──
//
// Bridges raw `stocklet_api` wire payloads into canonical model types.
// Each `From` impl parses string-typed fields into strong types and
// falls back to a safe default when the backend sends an unknown value.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use tracing::warn;

use stocklet_api::types::{ProductPayload, PurchasePayload, UserPayload};

use crate::model::{Product, Purchase, PurchaseStatus, Role, User};

/// Parse an ISO-8601 datetime string (as returned by the purchase
/// endpoints), silently dropping unparseable values.
fn parse_datetime(raw: Option<&String>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

impl From<UserPayload> for User {
    fn from(raw: UserPayload) -> Self {
        // Anything the client doesn't recognize gets the least-privileged
        // role.
        let role = Role::from_str(&raw.role).unwrap_or_else(|_| {
            warn!(role = %raw.role, "unknown role, treating as customer");
            Role::Customer
        });
        Self {
            id: raw.id,
            username: raw.username,
            role,
        }
    }
}

impl From<ProductPayload> for Product {
    fn from(raw: ProductPayload) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            quantity: raw.quantity,
            price: raw.price,
        }
    }
}

impl From<PurchasePayload> for Purchase {
    fn from(raw: PurchasePayload) -> Self {
        let status = PurchaseStatus::from_str(&raw.status).unwrap_or_else(|_| {
            warn!(status = %raw.status, "unknown purchase status, treating as pending");
            PurchaseStatus::Pending
        });
        let created_at = parse_datetime(raw.created_at.as_ref());
        Self {
            id: raw.id,
            customer_name: raw.customer_name,
            customer_email: raw.customer_email,
            customer_mobile: raw.customer_mobile,
            customer_address: raw.customer_address,
            product_id: raw.product_id,
            quantity: raw.quantity,
            notes: raw.notes,
            status,
            total_price: raw.total_price,
            created_at,
        }
    }
}
