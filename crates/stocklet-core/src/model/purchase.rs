// ── Purchase domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Order status as a flat enumeration.
///
/// Deliberately NOT a guarded state machine: the backend accepts any
/// value-to-value change and the admin is trusted to pick sensible ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

/// A customer order. Created by checkout, status-mutated by admins,
/// never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_mobile: String,
    pub customer_address: String,
    /// References [`Product::id`](crate::Product).
    pub product_id: i64,
    pub quantity: u32,
    pub notes: Option<String>,
    pub status: PurchaseStatus,
    /// Server-computed `price × quantity` at submission time. Not
    /// recomputed client-side; absent when the backend omits it.
    pub total_price: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
}
