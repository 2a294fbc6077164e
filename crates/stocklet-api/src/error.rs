use thiserror::Error;

/// Top-level error type for the `stocklet-api` crate.
///
/// Covers every failure mode of the REST collaborator: transport,
/// authorization rejection, structured API errors, and payload decoding.
/// `stocklet-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    // ── Authorization ───────────────────────────────────────────────
    /// The server rejected the request with HTTP 401. The bearer token
    /// is absent, expired, or the submitted credentials were wrong.
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    // ── API ─────────────────────────────────────────────────────────
    /// Any other non-2xx response, with the server-provided message when
    /// one could be extracted. `field` is set when the server returned a
    /// per-field error payload (e.g. `{"username": ["already taken"]}`).
    #[error("API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        message: String,
        field: Option<String>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error means the session is no longer valid
    /// and the caller must force a logout.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// The server-provided message, if any, for user-facing notifications.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } | Self::Unauthorized { message } => Some(message),
            _ => None,
        }
    }

    /// The per-field error key (`"username"`, `"email"`), if the server
    /// reported one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Api { field, .. } => field.as_deref(),
            _ => None,
        }
    }
}
