//! Stub backend helpers shared by the unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use store::{MemorySessionStore, User};
use tokio::net::TcpListener;

use crate::ApiClient;

/// Token the stub issues for `admin` / `password`.
pub(crate) const STUB_TOKEN: &str = "t1";

/// Serve `router` on an ephemeral local port and return its base URL.
pub(crate) async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base URL nothing is listening on.
pub(crate) async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub(crate) fn client_for(base_url: &str, store: MemorySessionStore) -> ApiClient {
    ApiClient::builder()
        .base_url(base_url)
        .store(store)
        .build()
        .unwrap()
}

pub(crate) fn admin() -> User {
    User {
        id: 1,
        username: "admin".to_string(),
        email: None,
        full_name: None,
    }
}

#[derive(Clone, Default)]
struct StubState {
    hits: Arc<AtomicUsize>,
    recommendations: Arc<Vec<Value>>,
}

impl StubState {
    fn hit(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }
}

/// An in-process imitation of the admissions backend.
pub(crate) struct StubBackend {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl StubBackend {
    pub async fn start() -> Self {
        Self::with_recommendations(Vec::new()).await
    }

    pub async fn with_recommendations(recommendations: Vec<Value>) -> Self {
        let state = StubState {
            hits: Arc::new(AtomicUsize::new(0)),
            recommendations: Arc::new(recommendations),
        };
        let hits = state.hits.clone();
        let router = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/register", post(register))
            .route("/api/auth/me", get(me))
            .route("/api/recommendation/{user_id}", get(list_recommendations))
            .route("/api/upload", post(upload))
            .route("/resources", get(list_resources).post(create_resource))
            .route(
                "/resources/{id}",
                get(get_resource).put(update_resource).delete(delete_resource),
            )
            .with_state(state);
        let base_url = serve(router).await;
        Self { base_url, hits }
    }

    /// Number of requests the stub has answered.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn client(&self, store: MemorySessionStore) -> ApiClient {
        client_for(&self.base_url, store)
    }
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Could not validate credentials" })),
    )
}

async fn login(State(state): State<StubState>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    state.hit();
    if body["username"] == "admin" && body["password"] == "password" {
        (
            StatusCode::OK,
            Json(json!({ "token": STUB_TOKEN, "user": { "id": 1, "username": "admin" } })),
        )
    } else if body["username"] == "legacy" {
        (
            StatusCode::OK,
            Json(json!({
                "access_token": "legacy-token",
                "token_type": "bearer",
                "user": { "id": 9, "username": "legacy", "email": "legacy@example.com" }
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Incorrect username or password" })),
        )
    }
}

async fn register(State(state): State<StubState>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    state.hit();
    if body["username"] == "admin" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Username already registered" })),
        );
    }
    (
        StatusCode::CREATED,
        Json(json!({
            "id": 2,
            "username": body["username"],
            "email": body["email"],
            "full_name": body["full_name"],
        })),
    )
}

async fn me(State(state): State<StubState>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    state.hit();
    match bearer(&headers) {
        Some(STUB_TOKEN) => (
            StatusCode::OK,
            Json(json!({ "id": 1, "username": "admin", "full_name": "Site Admin" })),
        ),
        _ => unauthorized(),
    }
}

async fn list_recommendations(
    State(state): State<StubState>,
    headers: HeaderMap,
    Path(user_id): Path<i64>,
) -> (StatusCode, Json<Value>) {
    state.hit();
    if bearer(&headers) != Some(STUB_TOKEN) {
        return unauthorized();
    }
    if user_id != 1 {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "detail": "Not authorized to view these recommendations" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "recommendations": state.recommendations.as_slice(),
            "total": state.recommendations.len(),
            "user_id": user_id,
        })),
    )
}

async fn upload(
    State(state): State<StubState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    state.hit();
    if bearer(&headers) != Some(STUB_TOKEN) {
        return unauthorized();
    }
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let Ok(bytes) = field.bytes().await else {
            break;
        };
        return (
            StatusCode::OK,
            Json(json!({
                "message": "File uploaded successfully",
                "upload_id": 5,
                "status": "completed",
                "file_name": file_name,
                "content_type": content_type,
                "size": bytes.len(),
            })),
        );
    }
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "detail": [{ "msg": "field required", "loc": ["body", "file"] }] })),
    )
}

fn resource(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "Study guide",
        "category": "guide",
        "url": format!("https://example.com/{id}"),
        "created_at": "2024-01-01T00:00:00",
        "updated_at": "2024-01-01T00:00:00",
    })
}

async fn list_resources(State(state): State<StubState>) -> Json<Value> {
    state.hit();
    Json(json!([resource(1, "Interview tips"), resource(2, "Portfolio checklist")]))
}

async fn get_resource(State(state): State<StubState>, Path(id): Path<i64>) -> (StatusCode, Json<Value>) {
    state.hit();
    match id {
        1 => (StatusCode::OK, Json(resource(1, "Interview tips"))),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Resource not found" })),
        ),
    }
}

async fn create_resource(State(state): State<StubState>, Json(body): Json<Value>) -> Json<Value> {
    state.hit();
    let mut created = body;
    created["id"] = json!(3);
    Json(created)
}

async fn update_resource(
    State(state): State<StubState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.hit();
    let mut updated = body;
    updated["id"] = json!(id);
    Json(updated)
}

async fn delete_resource(State(state): State<StubState>, Path(_id): Path<i64>) -> StatusCode {
    state.hit();
    StatusCode::NO_CONTENT
}
