//! HTTP client for the Resource School backend.
//!
//! Every request goes through a single dispatch path, which attaches the
//! stored bearer token, bounds the exchange with the configured deadline, and
//! turns failures into an [`ApiError`] carrying a display message. A 401 on a
//! session-bearing call clears the store and fires the auth-lost callback
//! before the error is returned.

use std::rc::Rc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use store::{ClientConfig, MemorySessionStore, SessionStore};

use crate::deadline;
use crate::error::{ApiError, Operation};

/// Callback invoked after the backend rejected the stored credential.
pub type AuthLostHook = Rc<dyn Fn()>;

/// Client for the backend HTTP API.
///
/// Cheap to clone; clones share the HTTP connection pool, the session store
/// and the auth-lost callback. Use [`ApiClientBuilder`] to construct one.
///
/// # Examples
///
/// ```rust,no_run
/// use api::ApiClient;
/// use store::MemorySessionStore;
///
/// # async fn example() -> Result<(), api::ApiError> {
/// let client = ApiClient::builder()
///     .base_url("http://localhost:8000")
///     .store(MemorySessionStore::new())
///     .on_auth_lost(|| tracing::info!("signed out"))
///     .build()?;
///
/// let resources = client.list_resources().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    store: Rc<dyn SessionStore>,
    on_auth_lost: Option<AuthLostHook>,
    timeout: Duration,
    max_upload_bytes: u64,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new builder for configuring the client
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    /// The session store shared with [`crate::SessionManager`].
    pub fn store(&self) -> &Rc<dyn SessionStore> {
        &self.store
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Issue a request with an optional JSON body and return the parsed
    /// response body (`null` for an empty one).
    pub async fn send(
        &self,
        op: Operation,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let mut request = self.http.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        self.dispatch(op, request).await
    }

    /// GET `path` and decode the response into `T`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        op: Operation,
        path: &str,
    ) -> Result<T, ApiError> {
        let value = self.send(op, Method::GET, path, None).await?;
        decode(op, value)
    }

    /// Send `body` as JSON and decode the response into `T`.
    pub async fn send_json<B, T>(
        &self,
        op: Operation,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.request(method, self.url(path)).json(body);
        let value = self.dispatch(op, request).await?;
        decode(op, value)
    }

    /// POST a multipart form.
    pub async fn send_multipart(
        &self,
        op: Operation,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<Value, ApiError> {
        let request = self.http.post(self.url(path)).multipart(form);
        self.dispatch(op, request).await
    }

    async fn dispatch(&self, op: Operation, request: RequestBuilder) -> Result<Value, ApiError> {
        let token = self.store.read_token();
        let credential_sent = token.is_some();
        let request = match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let request = request.build().map_err(|e| {
            tracing::warn!("Failed to build {:?} request: {}", op, e);
            ApiError::Transport {
                message: op.default_message().to_string(),
                timed_out: false,
            }
        })?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let exchange = async {
            let response = self.http.execute(request).await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        let (status, body) = match deadline::within(self.timeout, exchange).await {
            Ok(Ok(received)) => received,
            Ok(Err(e)) => {
                tracing::warn!("{} {} failed: {}", method, path, e);
                return Err(ApiError::Transport {
                    message: op.default_message().to_string(),
                    timed_out: false,
                });
            }
            Err(deadline::Elapsed) => {
                tracing::warn!("{} {} timed out after {:?}", method, path, self.timeout);
                return Err(ApiError::Transport {
                    message: format!("{}: request timed out", op.default_message()),
                    timed_out: true,
                });
            }
        };
        tracing::debug!("{} {} -> {}", method, path, status.as_u16());

        if status.is_success() {
            return parse_success(op, &body);
        }

        let message =
            error_message(&body).unwrap_or_else(|| op.default_message().to_string());

        // Without a credential on the request there is no session to reject
        if status == StatusCode::UNAUTHORIZED && op.rejects_session_on_401() && credential_sent {
            self.drop_session();
            return Err(ApiError::AuthRejected { message });
        }

        Err(ApiError::Http {
            status: status.as_u16(),
            message,
        })
    }

    fn drop_session(&self) {
        tracing::info!("Backend rejected the stored credential, signing out");
        if let Err(e) = self.store.clear() {
            tracing::warn!("Failed to clear rejected session: {}", e);
        }
        if let Some(hook) = &self.on_auth_lost {
            hook();
        }
    }
}

fn parse_success(op: Operation, body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!("{:?} returned a non-JSON body: {}", op, e);
        ApiError::InvalidResponse {
            message: op.default_message().to_string(),
        }
    })
}

pub(crate) fn decode<T: DeserializeOwned>(op: Operation, value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| {
        tracing::warn!("{:?} returned an unexpected payload: {}", op, e);
        ApiError::InvalidResponse {
            message: op.default_message().to_string(),
        }
    })
}

/// Pull a display message out of an error body: `message` first, then a
/// FastAPI `detail` string or list of validation errors.
fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let non_empty = |s: &str| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    };

    if let Some(message) = value.get("message").and_then(Value::as_str).and_then(non_empty) {
        return Some(message);
    }
    match value.get("detail")? {
        Value::String(detail) => non_empty(detail.as_str()),
        Value::Array(items) => {
            let joined = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("; ");
            non_empty(&joined)
        }
        _ => None,
    }
}

/// Builder for [`ApiClient`].
pub struct ApiClientBuilder {
    config: ClientConfig,
    timeout: Option<Duration>,
    store: Option<Rc<dyn SessionStore>>,
    on_auth_lost: Option<AuthLostHook>,
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClientBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            timeout: None,
            store: None,
            on_auth_lost: None,
        }
    }

    /// Take base URL, timeout and upload ceiling from `config`.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.api.base_url = base_url.into();
        self
    }

    /// Override the configured timeout with sub-second precision.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn store(mut self, store: impl SessionStore + 'static) -> Self {
        self.store = Some(Rc::new(store));
        self
    }

    pub fn shared_store(mut self, store: Rc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn on_auth_lost(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_auth_lost = Some(Rc::new(hook));
        self
    }

    pub fn build(self) -> Result<ApiClient, ApiError> {
        let http = reqwest::Client::builder().build().map_err(|e| {
            tracing::warn!("Failed to initialise HTTP client: {}", e);
            ApiError::Transport {
                message: "could not initialise HTTP client".to_string(),
                timed_out: false,
            }
        })?;

        Ok(ApiClient {
            base_url: self.config.api.base_url.trim_end_matches('/').to_string(),
            http,
            store: self
                .store
                .unwrap_or_else(|| Rc::new(MemorySessionStore::new())),
            on_auth_lost: self.on_auth_lost,
            timeout: self.timeout.unwrap_or_else(|| self.config.timeout()),
            max_upload_bytes: self.config.upload.max_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use axum::http::{header, HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    use super::*;
    use crate::test_support::{admin, client_for, serve, unreachable_url};

    async fn echo_auth(headers: HeaderMap) -> Json<Value> {
        let auth = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Json(json!({ "auth": auth }))
    }

    #[test]
    fn test_error_message_preference() {
        assert_eq!(
            error_message(br#"{"message": "bad input", "detail": "ignored"}"#).as_deref(),
            Some("bad input")
        );
        assert_eq!(
            error_message(br#"{"detail": "Incorrect username or password"}"#).as_deref(),
            Some("Incorrect username or password")
        );
        assert_eq!(
            error_message(br#"{"detail": [{"msg": "field required"}, {"msg": "too short"}]}"#)
                .as_deref(),
            Some("field required; too short")
        );
        assert_eq!(error_message(br#"{"message": "  "}"#), None);
        assert_eq!(error_message(b"<html>502</html>"), None);
        assert_eq!(error_message(b""), None);
    }

    #[test]
    fn test_builder_defaults() {
        let client = ApiClient::builder()
            .config(ClientConfig::default().with_base_url("http://example.test/"))
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://example.test");
        assert_eq!(client.timeout(), Duration::from_secs(10));
        assert_eq!(client.max_upload_bytes(), 10 * 1024 * 1024);
        assert_eq!(client.url("resources"), "http://example.test/resources");
        assert_eq!(client.url("/resources"), "http://example.test/resources");
    }

    #[tokio::test]
    async fn test_bearer_token_attached_when_present() {
        let base = serve(Router::new().route("/echo", get(echo_auth))).await;
        let store = MemorySessionStore::new();
        let client = client_for(&base, store.clone());

        let anonymous = client
            .send(Operation::CurrentUser, Method::GET, "/echo", None)
            .await
            .unwrap();
        assert_eq!(anonymous["auth"], Value::Null);

        store.save("t1", &admin()).unwrap();
        let authed = client
            .send(Operation::CurrentUser, Method::GET, "/echo", None)
            .await
            .unwrap();
        assert_eq!(authed["auth"], "Bearer t1");
    }

    #[tokio::test]
    async fn test_error_body_message_and_fallback() {
        let router = Router::new()
            .route(
                "/message",
                get(|| async { (StatusCode::BAD_REQUEST, Json(json!({ "message": "bad file" }))) }),
            )
            .route(
                "/detail",
                get(|| async { (StatusCode::FORBIDDEN, Json(json!({ "detail": "not yours" }))) }),
            )
            .route(
                "/plain",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            );
        let base = serve(router).await;
        let client = client_for(&base, MemorySessionStore::new());

        let err = client
            .send(Operation::Upload, Method::GET, "/message", None)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.to_string(), "bad file");

        let err = client
            .send(Operation::Recommendations, Method::GET, "/detail", None)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.to_string(), "not yours");

        let err = client
            .send(Operation::Upload, Method::GET, "/plain", None)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "upload failed");
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session_and_notifies() {
        let router = Router::new().route(
            "/private",
            get(|| async { (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "token expired" }))) }),
        );
        let base = serve(router).await;
        let store = MemorySessionStore::new();
        store.save("stale", &admin()).unwrap();

        let lost = Rc::new(Cell::new(0u32));
        let counter = lost.clone();
        let client = ApiClient::builder()
            .base_url(base)
            .store(store.clone())
            .on_auth_lost(move || counter.set(counter.get() + 1))
            .build()
            .unwrap();

        let err = client
            .send(Operation::Recommendations, Method::GET, "/private", None)
            .await
            .unwrap_err();

        assert!(err.is_auth_rejected());
        assert_eq!(err.to_string(), "token expired");
        assert!(store.read_token().is_none());
        assert!(store.read_user().is_none());
        assert_eq!(lost.get(), 1);
    }

    #[tokio::test]
    async fn test_anonymous_unauthorized_keeps_quiet() {
        let router = Router::new().route(
            "/private",
            get(|| async { (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "Not authenticated" }))) }),
        );
        let base = serve(router).await;
        let store = MemorySessionStore::new();

        let lost = Rc::new(Cell::new(0u32));
        let counter = lost.clone();
        let client = ApiClient::builder()
            .base_url(base)
            .store(store.clone())
            .on_auth_lost(move || counter.set(counter.get() + 1))
            .build()
            .unwrap();

        let err = client
            .send(Operation::ListResources, Method::GET, "/private", None)
            .await
            .unwrap_err();

        assert!(!err.is_auth_rejected());
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "Not authenticated");
        assert_eq!(lost.get(), 0);
    }

    #[tokio::test]
    async fn test_empty_success_body_is_null() {
        let router = Router::new().route("/empty", get(|| async { StatusCode::NO_CONTENT }));
        let base = serve(router).await;
        let client = client_for(&base, MemorySessionStore::new());

        let value = client
            .send(Operation::DeleteResource, Method::GET, "/empty", None)
            .await
            .unwrap();
        assert_eq!(value, Value::Null);
    }

    #[tokio::test]
    async fn test_non_json_success_is_invalid_response() {
        let router = Router::new().route("/html", get(|| async { "<html></html>" }));
        let base = serve(router).await;
        let client = client_for(&base, MemorySessionStore::new());

        let err = client
            .send(Operation::ListResources, Method::GET, "/html", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse { .. }));
        assert_eq!(err.to_string(), "failed to load resources");
    }

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let router = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({}))
            }),
        );
        let base = serve(router).await;
        let client = ApiClient::builder()
            .base_url(base)
            .timeout(Duration::from_millis(100))
            .build()
            .unwrap();

        let err = client
            .send(Operation::ListResources, Method::GET, "/slow", None)
            .await
            .unwrap_err();
        assert!(err.is_timeout());
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let base = unreachable_url().await;
        let client = client_for(&base, MemorySessionStore::new());

        let err = client
            .send(Operation::Login, Method::GET, "/anything", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport { timed_out: false, .. }));
        assert_eq!(err.to_string(), "login failed");
    }
}
