// ── Domain model ──
//
// Canonical client-side types. Wire payloads from `stocklet-api` are
// converted into these in `convert.rs`; nothing else constructs them
// from raw JSON.

pub mod product;
pub mod purchase;
pub mod user;

pub use product::Product;
pub use purchase::{Purchase, PurchaseStatus};
pub use user::{Role, User};
