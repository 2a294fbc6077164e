// ── Product domain type ──

use serde::{Deserialize, Serialize};

/// A product row as the server last reported it.
///
/// Never mutated in place: the store only ever replaces its whole
/// product collection after a round trip to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Server-assigned, immutable.
    pub id: i64,
    pub name: String,
    /// Units in stock. Non-negative by construction.
    pub quantity: u32,
    /// Unit price. The server enforces `>= 0`; local validation mirrors it.
    pub price: f64,
}
