//! In-process catalog service for client integration tests.
//!
//! Serves the same routes as the real backend on a random local port and
//! records what it received so tests can assert on the wire traffic.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use izzymart_client::{ApiClient, ApiConfig};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// UPC the mock answers with 404.
pub const UNKNOWN_UPC: &str = "000000000000";

/// Password the mock rejects with 401.
pub const WRONG_PASSWORD: &str = "wrong";

#[derive(Debug, Clone)]
pub struct Upload {
    pub field: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub len: usize,
}

#[derive(Default)]
pub struct MockState {
    pub token_requests: AtomicUsize,
    pub list_requests: AtomicUsize,
    /// Number of upcoming `GET /products` calls to answer with 401.
    pub reject_next_lists: AtomicUsize,
    /// Answer every `GET /products` with 401.
    pub always_reject: AtomicBool,
    pub logins: Mutex<Vec<(String, String)>>,
    pub cache_flags: Mutex<Vec<String>>,
    pub updates: Mutex<Vec<(String, Value)>>,
    pub deletes: Mutex<Vec<String>>,
    pub uploads: Mutex<Vec<Upload>>,
}

pub struct MockBackend {
    pub origin: String,
    pub state: Arc<MockState>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = router(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockBackend {
            origin: format!("http://{addr}"),
            state,
        }
    }

    pub fn api_base(&self) -> String {
        format!("{}/api/v1", self.origin)
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&ApiConfig::new(self.api_base())).unwrap()
    }

    pub fn token_requests(&self) -> usize {
        self.state.token_requests.load(Ordering::SeqCst)
    }

    pub fn list_requests(&self) -> usize {
        self.state.list_requests.load(Ordering::SeqCst)
    }
}

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/v1/auth/token", post(token))
        .route("/api/v1/products", get(list_products))
        .route("/api/v1/products/upc/{upc}", get(product_by_upc))
        .route(
            "/api/v1/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/api/v1/files", post(upload))
        .route("/cdn/{name}", get(cdn_image))
        .route("/", get(bare_image))
        .with_state(state)
}

fn catalog() -> Value {
    json!([
        {"id": "p-1", "upc": "1", "name": "Cola", "brand": "Fizz", "price": 1.99},
        {"id": "p-2", "upc": "2", "name": "Diet COLA", "price": 2.09},
        {"id": "p-3", "upc": "3", "name": "Crackers", "brand": "ColaCo"},
        {"id": "p-4", "upc": "4", "name": "Bread", "brand": "Bakery"},
        {"id": "p-5", "upc": "5"}
    ])
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer token-"))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Could not validate credentials"})),
    )
        .into_response()
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn token(State(state): State<Arc<MockState>>, Form(form): Form<LoginForm>) -> Response {
    let n = state.token_requests.fetch_add(1, Ordering::SeqCst) + 1;
    state
        .logins
        .lock()
        .unwrap()
        .push((form.username.clone(), form.password.clone()));

    if form.password == WRONG_PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Incorrect username or password"})),
        )
            .into_response();
    }

    Json(json!({"access_token": format!("token-{n}"), "token_type": "bearer"})).into_response()
}

async fn product_by_upc(
    State(state): State<Arc<MockState>>,
    Path(upc): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state
        .cache_flags
        .lock()
        .unwrap()
        .push(query.get("cache").cloned().unwrap_or_default());

    if upc == UNKNOWN_UPC {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Product not found"})),
        )
            .into_response();
    }

    Json(json!({
        "id": "p-1",
        "upc": upc,
        "name": "Cola",
        "brand": "Fizz",
        "price": 1.99,
        "nutrition": {"calories": 140.0, "nutrition_grade": "e"}
    }))
    .into_response()
}

async fn list_products(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.list_requests.fetch_add(1, Ordering::SeqCst);

    if !authorized(&headers) || state.always_reject.load(Ordering::SeqCst) {
        return unauthorized();
    }

    let pending = state.reject_next_lists.load(Ordering::SeqCst);
    if pending > 0 {
        state.reject_next_lists.store(pending - 1, Ordering::SeqCst);
        return unauthorized();
    }

    Json(catalog()).into_response()
}

async fn get_product(headers: HeaderMap, Path(id): Path<String>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if id == "missing" {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(json!({"id": id, "upc": "9", "name": "Tea"})).into_response()
}

async fn update_product(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    state.updates.lock().unwrap().push((id, body));
    Json(json!({"message": "Product updated"})).into_response()
}

async fn delete_product(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    state.deletes.lock().unwrap().push(id);
    Json(json!({"message": "Product deleted"})).into_response()
}

async fn upload(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }

    let mut filename = None;
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let len = field.bytes().await.unwrap().len();

        filename = file_name.clone();
        state.uploads.lock().unwrap().push(Upload {
            field: name,
            filename: file_name,
            content_type,
            len,
        });
    }

    match filename.as_deref() {
        Some("plain-id.png") => Json(json!({"id": "img-plain"})).into_response(),
        Some("no-id.png") => Json(json!({"filename": "no-id.png"})).into_response(),
        _ => Json(json!({"_id": "img-123", "filename": filename})).into_response(),
    }
}

async fn cdn_image(Path(name): Path<String>) -> Response {
    if name == "missing.png" {
        return StatusCode::NOT_FOUND.into_response();
    }
    (
        [(header::CONTENT_TYPE, "image/png")],
        vec![0x89u8, b'P', b'N', b'G', 0x0d, 0x0a],
    )
        .into_response()
}

async fn bare_image() -> Response {
    vec![0xffu8, 0xd8, 0xff].into_response()
}
