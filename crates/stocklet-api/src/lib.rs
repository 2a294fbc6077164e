// stocklet-api: Async Rust client for the stocklet inventory REST backend

pub mod auth;
pub mod client;
pub mod error;
pub mod products;
pub mod purchases;
pub mod types;

pub use client::ApiClient;
pub use error::Error;
