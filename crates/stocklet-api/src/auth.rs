// Authentication endpoints
//
// Token-pair login, registration, and current-user resolution. Storing
// the returned access token on the client is the caller's job -- the
// session layer decides when a login "takes".

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{TokenResponse, UserPayload};

impl ApiClient {
    /// Exchange credentials for a token pair via `POST /auth/login/`.
    ///
    /// Does NOT store the returned access token; callers that want the
    /// session to persist must call [`set_access_token`](Self::set_access_token).
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<TokenResponse, Error> {
        debug!("logging in as {username}");

        let body = json!({
            "username": username,
            "password": password.expose_secret(),
        });

        self.post("auth/login/", &body).await
    }

    /// Create an account via `POST /auth/register/`.
    ///
    /// Registration does not authenticate; follow up with
    /// [`login`](Self::login) using the same credentials. Per-field
    /// rejections surface as [`Error::Api`] with `field` set.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
        role: &str,
    ) -> Result<UserPayload, Error> {
        debug!("registering {username} ({role})");

        let body = json!({
            "username": username,
            "email": email,
            "password": password.expose_secret(),
            "role": role,
        });

        self.post("auth/register/", &body).await
    }

    /// Resolve the user behind the stored access token via `GET /auth/me/`.
    pub async fn me(&self) -> Result<UserPayload, Error> {
        self.get("auth/me/").await
    }
}
