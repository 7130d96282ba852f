//! Fake ChurchLink backend for client integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use churchlink_client::ApiClient;
use churchlink_core::config::api::ApiConfig;
use serde_json::{json, Value};

/// Everything the fake backend stores or observed.
#[derive(Debug, Default)]
pub struct BackendState {
    pub staging: HashMap<String, Value>,
    pub live: HashMap<String, Value>,
    pub header: Vec<Value>,
    pub footer: Vec<Value>,
    pub authorization: Vec<String>,
    pub if_match: Vec<String>,
    pub list_queries: Vec<HashMap<String, String>>,
    pub translate_requests: Vec<Value>,
}

type Shared = Arc<Mutex<BackendState>>;

/// A running fake backend plus a client pointed at it.
pub struct TestApp {
    pub state: Shared,
    pub client: ApiClient,
    pub base_url: String,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_token(Some("test-token")).await
    }

    pub async fn with_token(token: Option<&str>) -> Self {
        let state: Shared = Arc::new(Mutex::new(BackendState::default()));
        let router = Router::new()
            .route("/v1/pages/", get(list_pages))
            .route("/v1/pages/staging/{slug}", get(get_staging).put(put_staging))
            .route("/v1/pages/preview/{slug}", get(get_staging))
            .route("/v1/pages/slug/{slug}", get(get_live))
            .route("/v1/pages/publish/{slug}", post(publish))
            .route("/v1/header/items", get(get_header).put(put_header))
            .route("/v1/footer/items", get(get_footer))
            .route("/v1/footer/items/edit/{title}", put(put_footer))
            .route("/v1/translator/translate-multi", post(translate))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let base_url = format!("http://{addr}");
        let client = ApiClient::new(&ApiConfig {
            base_url: base_url.clone(),
            token: token.map(str::to_string),
            timeout_seconds: 5,
        })
        .unwrap();

        Self {
            state,
            client,
            base_url,
        }
    }

    pub fn seed_staging(&self, slug: &str, page: Value) {
        self.state.lock().unwrap().staging.insert(slug.to_string(), page);
    }

    pub fn seed_header(&self, items: Value) {
        self.state.lock().unwrap().header = as_array(items);
    }

    pub fn seed_footer(&self, sections: Value) {
        self.state.lock().unwrap().footer = as_array(sections);
    }
}

pub fn sample_page(slug: &str, revision: u64) -> Value {
    json!({
        "_id": format!("id-{slug}"),
        "title": "Home",
        "slug": slug,
        "version": 2,
        "revision": revision,
        "default_locale": "en",
        "sections": [{
            "id": "hero",
            "name": "Hero",
            "children": [
                {"id": "n1", "type": "text", "props": {"html": "Welcome"}},
                {"id": "n2", "type": "button", "props": {"label": "Join us", "href": "/join"},
                 "i18n": {"es": {"label": "Únete"}}}
            ]
        }]
    })
}

fn as_array(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"detail": format!("{what} not found")})),
    )
        .into_response()
}

fn record_auth(state: &mut BackendState, headers: &HeaderMap) {
    if let Some(value) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        state.authorization.push(value.to_string());
    }
}

async fn get_staging(
    State(state): State<Shared>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.lock().unwrap();
    record_auth(&mut state, &headers);
    if headers.get("authorization").is_none() {
        return (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Not authenticated"})))
            .into_response();
    }
    match state.staging.get(&slug) {
        Some(page) => Json(page.clone()).into_response(),
        None => not_found("Page"),
    }
}

async fn get_live(State(state): State<Shared>, Path(slug): Path<String>) -> Response {
    let state = state.lock().unwrap();
    match state.live.get(&slug) {
        Some(page) => Json(page.clone()).into_response(),
        None => not_found("Page"),
    }
}

async fn put_staging(
    State(state): State<Shared>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    Json(mut page): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    record_auth(&mut state, &headers);
    let expected = headers
        .get("if-match")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state.if_match.push(expected.clone());

    let current = state
        .staging
        .get(&slug)
        .and_then(|p| p.get("revision"))
        .and_then(Value::as_u64)
        .unwrap_or(0);
    if expected != current.to_string() {
        return (
            StatusCode::CONFLICT,
            Json(json!({"detail": format!("revision {current} is newer than {expected}")})),
        )
            .into_response();
    }

    let next = current + 1;
    page["revision"] = json!(next);
    state.staging.insert(slug, page);
    Json(json!({"revision": next, "updated_at": "2026-10-01T12:00:00Z"})).into_response()
}

async fn publish(State(state): State<Shared>, Path(slug): Path<String>) -> Response {
    let mut state = state.lock().unwrap();
    match state.staging.get(&slug).cloned() {
        Some(page) => {
            state.live.insert(slug, page);
            Json(json!({"success": true})).into_response()
        }
        None => not_found("Page"),
    }
}

async fn list_pages(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.list_queries.push(query.clone());
    let search = query.get("search").cloned().unwrap_or_default();
    let mut items: Vec<Value> = state
        .staging
        .values()
        .filter(|p| p["slug"].as_str().unwrap_or_default().contains(&search))
        .map(|p| json!({"_id": p["_id"], "title": p["title"], "slug": p["slug"]}))
        .collect();
    items.sort_by_key(|p| p["slug"].as_str().unwrap_or_default().to_string());
    let total = items.len();
    Json(json!({"items": items, "page": 1, "page_size": 25, "total_items": total}))
        .into_response()
}

async fn get_header(State(state): State<Shared>) -> Json<Vec<Value>> {
    Json(state.lock().unwrap().header.clone())
}

async fn put_header(State(state): State<Shared>, Json(items): Json<Vec<Value>>) -> StatusCode {
    state.lock().unwrap().header = items;
    StatusCode::NO_CONTENT
}

async fn get_footer(State(state): State<Shared>) -> Json<Vec<Value>> {
    Json(state.lock().unwrap().footer.clone())
}

async fn put_footer(
    State(state): State<Shared>,
    Path(title): Path<String>,
    Json(section): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    match state.footer.iter_mut().find(|s| s["title"] == title.as_str()) {
        Some(existing) => {
            *existing = section;
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found("Footer section"),
    }
}

/// Translates by prefixing each item with the destination locale.
async fn translate(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    state.lock().unwrap().translate_requests.push(body.clone());
    let mut translations = serde_json::Map::new();
    for item in body["items"].as_array().cloned().unwrap_or_default() {
        let Some(text) = item.as_str() else { continue };
        let mut per_locale = serde_json::Map::new();
        for dest in body["dest_languages"].as_array().cloned().unwrap_or_default() {
            if let Some(code) = dest.as_str() {
                per_locale.insert(code.to_string(), json!(format!("[{code}] {text}")));
            }
        }
        translations.insert(text.to_string(), Value::Object(per_locale));
    }
    Json(json!({"translations": translations}))
}
