// ── Inventory facade ──
//
// Central coordinator tying the HTTP client, session, entity store, and
// notification queue together. Owns the session lifecycle (login,
// register, logout, restore) and the cross-cutting rule that any 401 on
// an authenticated call forces a logout.
//
// Mutations live in `mutations.rs` as further inherent methods; this
// file covers construction, auth, and collection fetches.

use std::sync::{Arc, RwLock};

use secrecy::SecretString;
use tracing::{debug, info, warn};

use stocklet_api::types::TokenResponse;
use stocklet_api::ApiClient;

use crate::config::ClientConfig;
use crate::error::{AuthError, CoreError};
use crate::model::{Role, User};
use crate::notify::Notifier;
use crate::session::{self, Session, StoredTokens};
use crate::store::EntityStore;

struct Inner {
    api: ApiClient,
    store: EntityStore,
    notifier: Notifier,
    session: RwLock<Session>,
    config: ClientConfig,
}

/// Handle to the whole client-side model. Clones share state.
///
/// All reads go through [`store`](Self::store) snapshots; all writes go
/// through the remote API followed by a re-fetch of the owning
/// collection. The session is never mutated by callers directly.
#[derive(Clone)]
pub struct Inventory {
    inner: Arc<Inner>,
}

impl Inventory {
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let api = ApiClient::new(config.base_url.clone())?;
        Ok(Self {
            inner: Arc::new(Inner {
                api,
                store: EntityStore::new(),
                notifier: Notifier::new(),
                session: RwLock::new(Session::default()),
                config,
            }),
        })
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn store(&self) -> &EntityStore {
        &self.inner.store
    }

    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.inner.session.read().expect("session lock poisoned").clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.session().user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.session().role() == Some(Role::Admin)
    }

    pub(crate) fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    // ── Authentication ───────────────────────────────────────────────

    /// Exchange credentials for a session. On success the store is
    /// primed with an initial fetch (products for everyone, purchases
    /// for admins) and a welcome notification is queued.
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<User, CoreError> {
        let tokens = match self.inner.api.login(username, password).await {
            Ok(tokens) => tokens,
            Err(err) => return Err(self.reject(Self::login_failure(err))),
        };

        let user = self.authenticate(tokens).await?;
        self.inner
            .notifier
            .success(format!("Welcome {}! ({})", user.username, user.role));
        Ok(user)
    }

    /// Create an account and log straight into it. Accounts created here
    /// are always customers; admin accounts are provisioned server-side.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<User, CoreError> {
        if let Err(err) = self
            .inner
            .api
            .register(username, email, password, "customer")
            .await
        {
            return Err(self.reject(Self::register_failure(err)));
        }

        // Registration does not authenticate; the token exchange is a
        // separate call with the same credentials.
        let tokens = match self.inner.api.login(username, password).await {
            Ok(tokens) => tokens,
            Err(err) => return Err(self.reject(Self::login_failure(err))),
        };

        let user = self.authenticate(tokens).await?;
        self.inner.notifier.success(format!(
            "Welcome {}! Your account has been created.",
            user.username
        ));
        Ok(user)
    }

    /// Drop the session, the stored token, the cached collections, and
    /// the persisted token pair. Silent and idempotent.
    pub fn logout(&self) {
        debug!("logging out");
        self.inner
            .session
            .write()
            .expect("session lock poisoned")
            .clear();
        self.inner.api.clear_access_token();
        self.inner.store.clear();
        if let Some(path) = &self.inner.config.session_file {
            session::clear_tokens(path);
        }
    }

    /// Try to resume a previous session from the persisted token pair.
    ///
    /// The stored access token is only trusted after `/auth/me/` accepts
    /// it; a rejected or missing pair leaves the client anonymous (and
    /// removes the stale file). Returns whether a session was restored.
    pub async fn restore_session(&self) -> bool {
        let Some(path) = self.inner.config.session_file.clone() else {
            return false;
        };
        let Some(stored) = session::load_tokens(&path) else {
            return false;
        };

        self.inner.api.set_access_token(stored.access.clone());
        match self.inner.api.me().await {
            Ok(payload) => {
                let user = User::from(payload);
                info!(username = %user.username, "session restored");
                self.inner
                    .session
                    .write()
                    .expect("session lock poisoned")
                    .establish(stored.access, stored.refresh, user);
                self.initial_load().await;
                true
            }
            Err(err) => {
                debug!(error = %err, "persisted session rejected");
                self.inner.api.clear_access_token();
                session::clear_tokens(&path);
                false
            }
        }
    }

    /// Shared tail of login, register, and restore: store the access
    /// token, resolve the user, persist the pair, prime the store.
    async fn authenticate(&self, tokens: TokenResponse) -> Result<User, CoreError> {
        self.inner.api.set_access_token(tokens.access.clone());

        // Older backends return the bare pair; resolve the user then.
        let user = match tokens.user {
            Some(payload) => User::from(payload),
            None => match self.inner.api.me().await {
                Ok(payload) => User::from(payload),
                Err(err) => {
                    self.inner.api.clear_access_token();
                    return Err(self.reject(CoreError::Api(err)));
                }
            },
        };

        self.inner
            .session
            .write()
            .expect("session lock poisoned")
            .establish(tokens.access.clone(), Some(tokens.refresh.clone()), user.clone());

        if let Some(path) = &self.inner.config.session_file {
            session::save_tokens(
                path,
                &StoredTokens {
                    access: tokens.access,
                    refresh: Some(tokens.refresh),
                },
            );
        }

        self.initial_load().await;
        Ok(user)
    }

    /// Prime the store after authentication: products for everyone,
    /// purchases only for admins. A failed load is logged and skipped,
    /// never fatal -- login already succeeded.
    async fn initial_load(&self) {
        if let Err(err) = self.refresh_products().await {
            warn!(error = %err, "initial product load failed");
        }
        if self.is_admin() {
            if let Err(err) = self.refresh_purchases().await {
                warn!(error = %err, "initial purchase load failed");
            }
        }
    }

    // ── Collection fetches ───────────────────────────────────────────

    /// Re-fetch the product list and replace the cached snapshot.
    pub async fn refresh_products(&self) -> Result<(), CoreError> {
        let payloads = self
            .inner
            .api
            .list_products()
            .await
            .map_err(|err| self.api_failure(err))?;
        self.inner
            .store
            .replace_products(payloads.into_iter().map(Into::into).collect());
        Ok(())
    }

    /// Re-fetch the purchase list and replace the cached snapshot. The
    /// backend restricts this to admin sessions.
    pub async fn refresh_purchases(&self) -> Result<(), CoreError> {
        let payloads = self
            .inner
            .api
            .list_purchases()
            .await
            .map_err(|err| self.api_failure(err))?;
        self.inner
            .store
            .replace_purchases(payloads.into_iter().map(Into::into).collect());
        Ok(())
    }

    // ── Error routing ────────────────────────────────────────────────

    /// Queue a failure notification and hand the error back.
    pub(crate) fn reject(&self, err: CoreError) -> CoreError {
        self.inner.notifier.error(err.to_string());
        err
    }

    /// Route an API error from an authenticated call. A 401 means the
    /// token died out from under us: the session is torn down before the
    /// error propagates, so no caller ever observes an authenticated
    /// state with a dead token.
    pub(crate) fn api_failure(&self, err: stocklet_api::Error) -> CoreError {
        if err.is_unauthorized() {
            warn!("access token rejected, forcing logout");
            self.logout();
            self.reject(CoreError::Auth(AuthError::SessionExpired))
        } else {
            self.reject(CoreError::Api(err))
        }
    }

    /// Login rejections become credential errors; anything else (network
    /// down, 5xx) passes through untouched.
    fn login_failure(err: stocklet_api::Error) -> CoreError {
        match &err {
            stocklet_api::Error::Unauthorized { .. } => {
                CoreError::Auth(AuthError::InvalidCredentials)
            }
            stocklet_api::Error::Api { status, .. } if *status == 400 || *status == 403 => {
                CoreError::Auth(AuthError::InvalidCredentials)
            }
            _ => CoreError::Api(err),
        }
    }

    /// Map per-field registration rejections onto typed errors, keeping
    /// the server's message for anything unrecognized.
    fn register_failure(err: stocklet_api::Error) -> CoreError {
        match &err {
            stocklet_api::Error::Api { field, message, .. } => match field.as_deref() {
                Some("username") => CoreError::Auth(AuthError::UsernameTaken),
                Some("email") => CoreError::Auth(AuthError::EmailTaken),
                _ => CoreError::Auth(AuthError::Other(message.clone())),
            },
            _ => CoreError::Api(err),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn api_error(status: u16, message: &str, field: Option<&str>) -> stocklet_api::Error {
        stocklet_api::Error::Api {
            status,
            message: message.into(),
            field: field.map(String::from),
        }
    }

    #[test]
    fn login_failure_maps_rejections_to_invalid_credentials() {
        let err = Inventory::login_failure(stocklet_api::Error::Unauthorized {
            message: "No active account".into(),
        });
        assert!(matches!(
            err,
            CoreError::Auth(AuthError::InvalidCredentials)
        ));

        let err = Inventory::login_failure(api_error(400, "bad request", None));
        assert!(matches!(
            err,
            CoreError::Auth(AuthError::InvalidCredentials)
        ));

        let err = Inventory::login_failure(api_error(500, "boom", None));
        assert!(matches!(err, CoreError::Api(_)));
    }

    #[test]
    fn register_failure_maps_field_errors() {
        let err = Inventory::register_failure(api_error(400, "taken", Some("username")));
        assert!(matches!(err, CoreError::Auth(AuthError::UsernameTaken)));

        let err = Inventory::register_failure(api_error(400, "registered", Some("email")));
        assert!(matches!(err, CoreError::Auth(AuthError::EmailTaken)));

        let err = Inventory::register_failure(api_error(400, "password too short", None));
        match err {
            CoreError::Auth(AuthError::Other(message)) => {
                assert_eq!(message, "password too short");
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}
