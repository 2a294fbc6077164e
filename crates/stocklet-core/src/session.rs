// ── Session state and token persistence ──
//
// The session is exclusively owned by the `Inventory` facade; everything
// else gets read-only copies. The token pair survives restarts in a
// small TOML file keyed `access` / `refresh`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::{Role, User};

/// The authenticated identity and token pair governing which calls may
/// succeed.
///
/// Invariant: `user` is present exactly when `access` is. Login and
/// restore populate all fields together; logout clears them together.
#[derive(Debug, Clone, Default)]
pub struct Session {
    access: Option<String>,
    refresh: Option<String>,
    user: Option<User>,
}

impl Session {
    /// Whether a login (or restore) has taken effect.
    pub fn is_authenticated(&self) -> bool {
        self.access.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access.as_deref()
    }

    /// The refresh token is stored but never exercised: token renewal is
    /// out of scope for this client.
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh.as_deref()
    }

    /// Populate the session after a successful token exchange.
    pub(crate) fn establish(&mut self, access: String, refresh: Option<String>, user: User) {
        self.access = Some(access);
        self.refresh = refresh;
        self.user = Some(user);
        debug_assert!(self.invariant_holds());
    }

    /// Clear all fields. Idempotent.
    pub(crate) fn clear(&mut self) {
        self.access = None;
        self.refresh = None;
        self.user = None;
        debug_assert!(self.invariant_holds());
    }

    /// `user` present iff `access` present. Checked (in debug builds)
    /// after every transition; tests assert it directly.
    pub fn invariant_holds(&self) -> bool {
        self.user.is_some() == self.access.is_some()
    }
}

// ── On-disk token pair ───────────────────────────────────────────────

/// What actually hits the disk: the token pair and nothing else. The
/// user descriptor is re-resolved via `/auth/me/` on restore, so a
/// revoked token can never impersonate a logged-in state.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct StoredTokens {
    pub access: String,
    pub refresh: Option<String>,
}

/// Load a previously persisted token pair, if any. Unreadable or
/// unparseable files are treated as absent.
pub(crate) fn load_tokens(path: &Path) -> Option<StoredTokens> {
    let raw = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&raw) {
        Ok(tokens) => Some(tokens),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring malformed session file");
            None
        }
    }
}

/// Persist the token pair. Failures are logged, not fatal: a session
/// that only lives for this process is still a working session.
pub(crate) fn save_tokens(path: &Path, tokens: &StoredTokens) {
    let serialized = match toml::to_string(tokens) {
        Ok(s) => s,
        Err(e) => {
            warn!(error = %e, "failed to serialize session file");
            return;
        }
    };
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            warn!(path = %parent.display(), error = %e, "failed to create session dir");
            return;
        }
    }
    match std::fs::write(path, serialized) {
        Ok(()) => debug!(path = %path.display(), "session persisted"),
        Err(e) => warn!(path = %path.display(), error = %e, "failed to persist session"),
    }
}

/// Remove the persisted token pair. Missing files are fine.
pub(crate) fn clear_tokens(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!(path = %path.display(), "persisted session removed"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "failed to remove session file"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            id: 1,
            username: "alice".into(),
            role: Role::Admin,
        }
    }

    #[test]
    fn empty_session_is_anonymous() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert!(session.invariant_holds());
    }

    #[test]
    fn establish_and_clear_keep_invariant() {
        let mut session = Session::default();
        session.establish("acc".into(), Some("ref".into()), test_user());

        assert!(session.is_authenticated());
        assert_eq!(session.access_token(), Some("acc"));
        assert_eq!(session.refresh_token(), Some("ref"));
        assert_eq!(session.role(), Some(Role::Admin));
        assert!(session.invariant_holds());

        session.clear();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert!(session.invariant_holds());

        // Idempotent.
        session.clear();
        assert!(session.invariant_holds());
    }

    #[test]
    fn token_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.toml");

        save_tokens(
            &path,
            &StoredTokens {
                access: "acc".into(),
                refresh: Some("ref".into()),
            },
        );

        let loaded = load_tokens(&path).unwrap();
        assert_eq!(loaded.access, "acc");
        assert_eq!(loaded.refresh.as_deref(), Some("ref"));

        clear_tokens(&path);
        assert!(load_tokens(&path).is_none());
        // Clearing again is a no-op.
        clear_tokens(&path);
    }

    #[test]
    fn malformed_session_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "not really toml {{").unwrap();
        assert!(load_tokens(&path).is_none());
    }
}
