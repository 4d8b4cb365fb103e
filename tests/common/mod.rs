// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use pantry_chef::config::Config;
use pantry_chef::routes::create_router;
use pantry_chef::AppState;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Requests seen by the fake backend.
#[derive(Default)]
pub struct BackendLog {
    hits: Mutex<Vec<Hit>>,
    saved: Mutex<Vec<Value>>,
}

#[derive(Debug, Clone)]
pub struct Hit {
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

impl BackendLog {
    fn record(&self, path: &str, headers: &HeaderMap, body: Value) {
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.hits.lock().unwrap().push(Hit {
            path: path.to_string(),
            authorization,
            body,
        });
    }

    #[allow(dead_code)]
    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn count(&self) -> usize {
        self.hits.lock().unwrap().len()
    }
}

type Log = State<Arc<BackendLog>>;

async fn login(State(log): Log, headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    log.record("/users/login", &headers, body.clone());
    if body["password"] == "correct-horse" {
        (
            StatusCode::OK,
            Json(json!({
                "access_token": "backend-issued-token",
                "user": { "id": 7, "name": "Ana", "email": body["email"], "gender": "female" }
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Incorrect email or password" })),
        )
    }
}

async fn signup(State(log): Log, headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    log.record("/users/signup", &headers, body.clone());
    (
        StatusCode::CREATED,
        Json(json!({ "id": 8, "email": body["email"], "name": body["name"], "gender": body["gender"] })),
    )
}

async fn inventory(State(log): Log, headers: HeaderMap) -> impl IntoResponse {
    log.record("/inventory", &headers, Value::Null);
    Json(json!({
        "Dairy": [{ "id": 1, "name": "egg" }],
        "Vegetables": [{ "id": 2, "name": "tomato" }]
    }))
}

async fn generate(State(log): Log, headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    log.record("/recipes/generate", &headers, body);
    Json(json!({
        "recipes": [{
            "name": "Tomato Egg Curry",
            "ingredients": { "available": ["egg", "tomato"], "needed": ["garam masala"] },
            "instructions": [
                { "step": 1, "description": "Boil the eggs." },
                { "step": "2", "description": "Simmer with tomato." }
            ],
            "nutrition": { "calories": "320 kcal" },
            "prep_time": "10 mins",
            "cook_time": "20 mins",
            "total_time": "30 mins",
            "servings": 2
        }]
    }))
}

/// "Dal" counts as already saved; anything else is stored with a new id.
async fn save(State(log): Log, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    log.record("/recipes/save", &headers, body.clone());
    if body["name"] == "Dal" {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "message": "Recipe already saved" })),
        )
            .into_response();
    }

    let mut saved = log.saved.lock().unwrap();
    let mut record = body;
    record["id"] = json!(saved.len() + 1);
    saved.push(record.clone());
    Json(record).into_response()
}

/// The `broken` token makes the backend answer with an HTML error page.
async fn saved(State(log): Log, headers: HeaderMap) -> Response {
    log.record("/recipes/saved", &headers, Value::Null);
    if headers.get("authorization").is_some_and(|v| v == "Bearer broken") {
        return (StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>").into_response();
    }
    Json(Value::Array(log.saved.lock().unwrap().clone())).into_response()
}

async fn youtube_search(State(log): Log, headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    log.record("/recipes/youtube-search", &headers, body.clone());
    Json(json!({
        "videos": [{
            "video_id": "abc123xyz",
            "title": format!("How to cook {}", body["recipe_name"].as_str().unwrap_or_default()),
            "channel_title": "Home Kitchen"
        }]
    }))
}

/// Spawn a fake recipe backend on an ephemeral port.
#[allow(dead_code)]
pub async fn spawn_backend() -> (String, Arc<BackendLog>) {
    let log = Arc::new(BackendLog::default());
    let app = Router::new()
        .route("/users/login", post(login))
        .route("/users/signup", post(signup))
        .route("/inventory", get(inventory))
        .route("/recipes/generate", post(generate))
        .route("/recipes/save", post(save))
        .route("/recipes/saved", get(saved))
        .route("/recipes/youtube-search", post(youtube_search))
        .with_state(log.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), log)
}

/// Create a test app whose backend lives at `backend_url`.
#[allow(dead_code)]
pub fn create_test_app(backend_url: &str) -> (Router, Arc<AppState>) {
    let mut config = Config::test_default();
    config.backend_url = backend_url.to_string();
    let state = Arc::new(AppState::new(config));
    (create_router(state.clone()), state)
}

/// Serve the gateway itself on an ephemeral port.
#[allow(dead_code)]
pub async fn spawn_gateway(backend_url: &str) -> String {
    let (app, _) = create_test_app(backend_url);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Backend URL nothing listens on.
#[allow(dead_code)]
pub async fn unreachable_backend() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
