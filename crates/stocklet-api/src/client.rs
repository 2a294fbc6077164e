// Inventory API HTTP client
//
// Wraps `reqwest::Client` with base-URL construction, bearer-token
// injection, and error extraction. All endpoint groups (auth, products,
// purchases) are implemented as inherent methods via separate files to
// keep this module focused on transport mechanics.
//
// Deliberately absent: retries, request timeouts, and cancellation.
// A hung request hangs its caller; failed requests surface once.

use std::sync::RwLock;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;

/// Servers report failures as `{"error": "..."}` or as per-field arrays
/// (`{"username": ["..."], "email": ["..."]}`) on registration.
#[derive(serde::Deserialize, Default)]
struct ServerErrorBody {
    error: Option<String>,
    #[serde(default)]
    username: Vec<String>,
    #[serde(default)]
    email: Vec<String>,
}

/// Raw HTTP client for the inventory REST API.
///
/// Every request is stamped with `Authorization: Bearer <access>` when an
/// access token is present, and sent bare otherwise. The base address is
/// fixed at construction.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    /// Current access token. Read on every request, mutated only by the
    /// session layer in `stocklet-core` (login/logout/restore).
    access_token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Create a new client for the given API root
    /// (e.g. `http://127.0.0.1:8000`).
    pub fn new(base_url: Url) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("stocklet/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Transport)?;
        Ok(Self {
            http,
            base_url,
            access_token: RwLock::new(None),
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            access_token: RwLock::new(None),
        }
    }

    /// The API root URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Bearer token management ──────────────────────────────────────

    /// Store the access token used for subsequent requests.
    pub fn set_access_token(&self, token: String) {
        debug!("storing access token");
        *self.access_token.write().expect("token lock poisoned") = Some(token);
    }

    /// Drop the stored access token; subsequent requests go out bare.
    pub fn clear_access_token(&self) {
        debug!("clearing access token");
        *self.access_token.write().expect("token lock poisoned") = None;
    }

    /// Whether an access token is currently stored.
    pub fn has_access_token(&self) -> bool {
        self.access_token
            .read()
            .expect("token lock poisoned")
            .is_some()
    }

    /// Apply the stored access token to a request builder.
    fn apply_bearer(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let guard = self.access_token.read().expect("token lock poisoned");
        match guard.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for an API path. The backend requires trailing
    /// slashes on every endpoint, so `path` must carry its own
    /// (e.g. `"products/add/"`).
    pub(crate) fn endpoint_url(&self, path: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let full = format!("{base}/{path}");
        Url::parse(&full).expect("invalid endpoint URL")
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.endpoint_url(path);
        debug!("GET {}", url);

        let builder = self.apply_bearer(self.http.get(url));
        let resp = builder.send().await.map_err(Error::Transport)?;

        Self::parse_response(resp).await
    }

    /// Send a POST request with JSON body and decode the JSON response.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let url = self.endpoint_url(path);
        debug!("POST {}", url);

        let builder = self.apply_bearer(self.http.post(url).json(body));
        let resp = builder.send().await.map_err(Error::Transport)?;

        Self::parse_response(resp).await
    }

    /// Send a POST request where only the response status matters
    /// (e.g. product deletion returns no useful body).
    pub(crate) async fn post_unit(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<(), Error> {
        let url = self.endpoint_url(path);
        debug!("POST {}", url);

        let builder = self.apply_bearer(self.http.post(url).json(body));
        let resp = builder.send().await.map_err(Error::Transport)?;

        Self::check_status(resp).await.map(|_| ())
    }

    /// Send a PUT request with JSON body and decode the JSON response.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let url = self.endpoint_url(path);
        debug!("PUT {}", url);

        let builder = self.apply_bearer(self.http.put(url).json(body));
        let resp = builder.send().await.map_err(Error::Transport)?;

        Self::parse_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    /// Reject non-2xx responses, returning the body text on success.
    async fn check_status(resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            let body = resp.text().await.unwrap_or_default();
            let message = extract_server_message(&body)
                .map_or_else(|| "access token expired or invalid".to_owned(), |(m, _)| m);
            return Err(Error::Unauthorized { message });
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let (message, field) = extract_server_message(&body).unwrap_or_else(|| {
                (format!("HTTP {status}: {}", body_preview(&body)), None)
            });
            return Err(Error::Api {
                status: status.as_u16(),
                message,
                field,
            });
        }

        resp.text().await.map_err(Error::Transport)
    }

    /// Reject non-2xx responses and decode the body as `T`.
    async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let body = Self::check_status(resp).await?;

        serde_json::from_str(&body).map_err(|e| {
            let preview = body_preview(&body);
            trace!("undecodable body: {preview:?}");
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }
}

/// Clip a server body to at most 200 bytes for log and error messages.
/// Bodies are arbitrary server output, so the cut must land on a UTF-8
/// character boundary.
fn body_preview(body: &str) -> &str {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body;
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

/// Best-effort extraction of the server's error message from a failure
/// body. Checks the `error` field first, then the first per-field entry
/// (`username`, then `email`).
fn extract_server_message(body: &str) -> Option<(String, Option<String>)> {
    let parsed: ServerErrorBody = serde_json::from_str(body).ok()?;

    if let Some(message) = parsed.error {
        return Some((message, None));
    }
    if let Some(message) = parsed.username.into_iter().next() {
        return Some((message, Some("username".to_owned())));
    }
    if let Some(message) = parsed.email.into_iter().next() {
        return Some((message, Some("email".to_owned())));
    }
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn extract_prefers_error_field() {
        let body = r#"{"error": "Out of stock", "username": ["taken"]}"#;
        let (message, field) = extract_server_message(body).unwrap();
        assert_eq!(message, "Out of stock");
        assert_eq!(field, None);
    }

    #[test]
    fn extract_falls_back_to_field_errors() {
        let body = r#"{"username": ["A user with that username already exists."]}"#;
        let (message, field) = extract_server_message(body).unwrap();
        assert_eq!(message, "A user with that username already exists.");
        assert_eq!(field.as_deref(), Some("username"));

        let body = r#"{"email": ["Enter a valid email address."]}"#;
        let (_, field) = extract_server_message(body).unwrap();
        assert_eq!(field.as_deref(), Some("email"));
    }

    #[test]
    fn extract_rejects_unstructured_bodies() {
        assert!(extract_server_message("<html>502</html>").is_none());
        assert!(extract_server_message("{}").is_none());
    }

    #[test]
    fn preview_cuts_on_char_boundaries() {
        assert_eq!(body_preview("short"), "short");

        // 3-byte characters; byte 200 falls mid-character.
        let long = "€".repeat(100);
        let preview = body_preview(&long);
        assert!(preview.len() <= 200);
        assert_eq!(preview.chars().count(), 66);
        assert!(preview.chars().all(|c| c == '€'));
    }

    #[test]
    fn endpoint_url_normalizes_slashes() {
        let client = ApiClient::with_client(
            reqwest::Client::new(),
            Url::parse("http://127.0.0.1:8000/").unwrap(),
        );
        assert_eq!(
            client.endpoint_url("products/add/").as_str(),
            "http://127.0.0.1:8000/products/add/"
        );
        assert_eq!(
            client.endpoint_url("/auth/me/").as_str(),
            "http://127.0.0.1:8000/auth/me/"
        );
    }
}
