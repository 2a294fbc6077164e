//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use stocklet_core::{ApiError, AuthError, CoreError};

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Session ──────────────────────────────────────────────────────
    #[error("Not logged in")]
    #[diagnostic(
        code(stocklet::not_logged_in),
        help("Log in first: stocklet login")
    )]
    NotLoggedIn,

    #[error("Session expired")]
    #[diagnostic(
        code(stocklet::session_expired),
        help("The saved token was rejected by the server. Run: stocklet login")
    )]
    SessionExpired,

    #[error("{message}")]
    #[diagnostic(
        code(stocklet::auth_failed),
        help("Check the credentials and try again.")
    )]
    AuthFailed { message: String },

    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the API server")]
    #[diagnostic(
        code(stocklet::connection_failed),
        help(
            "Check that the backend is running and the URL is right.\n\
             Set it with --api-url or STOCKLET_API_URL."
        )
    )]
    Connection {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Server rejected the request (HTTP {status}): {message}")]
    #[diagnostic(code(stocklet::api_error))]
    Api { status: u16, message: String },

    #[error("Could not decode the server response: {message}")]
    #[diagnostic(
        code(stocklet::bad_response),
        help("The URL may point at something that is not a stocklet backend.")
    )]
    BadResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid {field}: {reason}")]
    #[diagnostic(code(stocklet::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(stocklet::config))]
    Config(Box<figment::Error>),

    // ── Interactive / IO ─────────────────────────────────────────────
    #[error("Aborted")]
    #[diagnostic(code(stocklet::aborted))]
    Aborted,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotLoggedIn | Self::SessionExpired | Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Connection { .. } => exit_code::CONNECTION,
            Self::Api { status: 404, .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::Aborted => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { field, reason } => Self::Validation {
                field: field.into(),
                reason,
            },

            CoreError::Auth(AuthError::SessionExpired) => Self::SessionExpired,
            CoreError::Auth(auth) => Self::AuthFailed {
                message: auth.to_string(),
            },

            CoreError::Api(api) => match api {
                ApiError::Transport(source) => Self::Connection {
                    source: source.into(),
                },
                ApiError::Unauthorized { message } => Self::AuthFailed { message },
                ApiError::Api { status, message, .. } => Self::Api { status, message },
                ApiError::Deserialization { message, .. } => Self::BadResponse { message },
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_distinguish_failure_classes() {
        assert_eq!(CliError::NotLoggedIn.exit_code(), exit_code::AUTH);
        assert_eq!(CliError::SessionExpired.exit_code(), exit_code::AUTH);
        assert_eq!(
            CliError::Api {
                status: 404,
                message: "missing".into()
            }
            .exit_code(),
            exit_code::NOT_FOUND
        );
        assert_eq!(
            CliError::Api {
                status: 500,
                message: "boom".into()
            }
            .exit_code(),
            exit_code::GENERAL
        );
        assert_eq!(
            CliError::Validation {
                field: "quantity".into(),
                reason: "too big".into()
            }
            .exit_code(),
            exit_code::USAGE
        );
    }

    #[test]
    fn core_errors_map_to_cli_variants() {
        let expired: CliError = CoreError::Auth(AuthError::SessionExpired).into();
        assert!(matches!(expired, CliError::SessionExpired));

        let invalid: CliError = CoreError::Auth(AuthError::InvalidCredentials).into();
        match invalid {
            CliError::AuthFailed { message } => {
                assert_eq!(message, "Invalid username or password");
            }
            other => panic!("unexpected mapping: {other:?}"),
        }

        let not_found: CliError = CoreError::Api(ApiError::Api {
            status: 404,
            message: "Product not found".into(),
            field: None,
        })
        .into();
        assert_eq!(not_found.exit_code(), exit_code::NOT_FOUND);
    }
}
