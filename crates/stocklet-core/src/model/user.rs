// ── User domain type ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Role assigned at login and never reassigned client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Sees and manages products and all purchases.
    Admin,
    /// Sees products and can check out; registration always produces this.
    Customer,
}

/// The authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
