//! Session and data-synchronization layer between `stocklet-api` and UI
//! consumers (CLI today, anything that can read watch channels tomorrow).
//!
//! This crate owns the client-side model of a remote inventory backend:
//!
//! - **[`Inventory`]** -- Central facade. Owns the session lifecycle
//!   (login / register / logout / restore), routes every mutation through
//!   the validate → call → notify → re-fetch protocol, and enforces the
//!   global rule that any 401 response forces a logout.
//!
//! - **[`EntityStore`]** -- In-memory cache of the two server collections
//!   (products, purchases) behind `tokio::sync::watch` snapshots. Replaced
//!   wholesale after every successful fetch; never patched locally. Derived
//!   views ([`EntityStore::filtered_by`], [`EntityStore::sorted_by`]) are
//!   pure and recomputed per call.
//!
//! - **[`Session`]** -- The token pair plus user descriptor, with the
//!   invariant that a user is present exactly when an access token is.
//!   The pair persists across restarts in a small TOML file.
//!
//! - **[`Notifier`]** -- Expiring toast-style notification queue fed by
//!   every success/failure point; entries self-destruct after a fixed
//!   display duration.
//!
//! The remote REST API is the single source of truth: a successful
//! mutation never updates the store from its own response body, it
//! triggers a full re-fetch of the owning collection instead.

pub mod config;
pub mod convert;
pub mod error;
pub mod inventory;
pub mod model;
pub mod mutations;
pub mod notify;
pub mod session;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::ClientConfig;
pub use error::{AuthError, CoreError};
pub use inventory::Inventory;
pub use mutations::NewPurchase;
pub use notify::{Notification, NotificationId, NotificationKind, Notifier};
pub use session::Session;
pub use store::{sort_products, EntityStore, SortField, SortOrder};

// Re-export model types at the crate root for ergonomics.
pub use model::{Product, Purchase, PurchaseStatus, Role, User};

// The API error type crosses the crate boundary inside `CoreError`.
pub use stocklet_api::Error as ApiError;
