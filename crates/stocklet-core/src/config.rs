// ── Client configuration ──
//
// Plain data handed in by the consumer (the CLI builds it from figment;
// tests build it inline). Core never reads config files or env vars.

use std::path::PathBuf;

use url::Url;

/// Everything [`Inventory`](crate::Inventory) needs to talk to a backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, e.g. `http://127.0.0.1:8000`. Fixed for the lifetime of
    /// the client.
    pub base_url: Url,

    /// Where to persist the access/refresh token pair between runs.
    /// `None` keeps the session purely in memory.
    pub session_file: Option<PathBuf>,
}

impl ClientConfig {
    /// In-memory configuration for the given API root.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            session_file: None,
        }
    }

    /// Persist the token pair at `path` across restarts.
    pub fn with_session_file(mut self, path: PathBuf) -> Self {
        self.session_file = Some(path);
        self
    }
}
