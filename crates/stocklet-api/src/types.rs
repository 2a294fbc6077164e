// Wire types for the inventory REST API.
//
// These mirror the server's JSON field names exactly (`customer_name`,
// string-typed `role`/`status`). `stocklet-core` converts them into
// strongly-typed domain models; nothing here is meant for display.

use serde::{Deserialize, Serialize};

// ── Auth ───────────────────────────────────────────────────────────

/// Response of `POST /auth/login/`. Older backends return the bare token
/// pair; newer ones include the user descriptor inline.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access: String,
    pub refresh: String,
    #[serde(default)]
    pub user: Option<UserPayload>,
}

/// User descriptor as returned by `/auth/login/` and `/auth/me/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPayload {
    pub id: i64,
    pub username: String,
    pub role: String,
}

// ── Products ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPayload {
    pub id: i64,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
}

/// Envelope of `GET /products/`.
#[derive(Debug, Deserialize)]
pub struct ProductListResponse {
    #[serde(default)]
    pub products: Vec<ProductPayload>,
}

/// Body of `POST /products/add/` and `POST /products/edit/{id}/`.
#[derive(Debug, Clone, Serialize)]
pub struct ProductWrite {
    pub name: String,
    pub quantity: u32,
    pub price: f64,
}

// ── Purchases ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchasePayload {
    pub id: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_mobile: String,
    pub customer_address: String,
    pub product_id: i64,
    pub quantity: u32,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: String,
    /// Server-computed `price × quantity`; never recomputed client-side.
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Envelope of `GET /purchases/`.
#[derive(Debug, Deserialize)]
pub struct PurchaseListResponse {
    #[serde(default)]
    pub purchases: Vec<PurchasePayload>,
}

/// Body of `POST /purchases/create/` -- everything but the server-assigned
/// id, status, and total.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseCreate {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_mobile: String,
    pub customer_address: String,
    pub product_id: i64,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
