use thiserror::Error;

/// Authentication failures, separated from generic API errors because
/// each maps to a distinct user-facing remedy.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Login rejected (wrong username/password).
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Registration rejected: the username is taken.
    #[error("Username already taken")]
    UsernameTaken,

    /// Registration rejected: the email is already registered.
    #[error("Email already registered")]
    EmailTaken,

    /// A 401 arrived on an authenticated call. The session has been
    /// cleared by the time this error reaches the caller.
    #[error("Session expired -- login again")]
    SessionExpired,

    /// Any other server-reported auth failure, message passed through.
    #[error("{0}")]
    Other(String),
}

/// Top-level error type for `stocklet-core`.
///
/// `Validation` never reaches the network; `Auth` and `Api` carry what
/// the server said. All three feed the notification queue, but stay
/// distinguishable for callers and tests.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Local field check failed before any request was issued.
    #[error("Invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Api(#[from] stocklet_api::Error),
}

impl CoreError {
    /// Returns `true` for errors that were caught before the network.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns `true` when the underlying cause was an expired session.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::Auth(AuthError::SessionExpired))
    }
}
