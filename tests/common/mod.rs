#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use admin_portal_rust::api::ApiClient;
use admin_portal_rust::auth::TokenStore;
use admin_portal_rust::config::AppConfig;
use anyhow::{Context, Result};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

pub const GOOD_TOKEN: &str = "tok123";
pub const BROKEN_TOKEN: &str = "broken";

/// Requests seen by the mock backend, in arrival order
#[derive(Clone, Default)]
pub struct Recorded {
    pub paginate_bodies: Arc<Mutex<Vec<Value>>>,
    pub deleted: Arc<Mutex<Vec<String>>>,
}

#[derive(Clone)]
struct MockState {
    recorded: Recorded,
    /// Delay applied to page 1 of the users listing
    slow_first_page: Option<Duration>,
}

pub struct MockBackend {
    pub base_url: String,
    pub recorded: Recorded,
    handle: JoinHandle<()>,
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn spawn_backend() -> Result<MockBackend> {
    spawn_backend_with(None).await
}

pub async fn spawn_backend_with(slow_first_page: Option<Duration>) -> Result<MockBackend> {
    // Pick an unused port for isolation
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind mock backend")?;

    let recorded = Recorded::default();
    let state = MockState {
        recorded: recorded.clone(),
        slow_first_page,
    };

    let app = Router::new()
        .route("/auth/api/v1/menus", get(menus))
        .route("/auth/api/v1/users/paginate", post(users_paginate))
        .route("/auth/api/v1/users/:id", delete(delete_user))
        .route("/auth/api/v1/roles/paginate", post(roles_paginate))
        .route("/auth/api/v1/companies/save", post(save_company))
        .with_state(state);

    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(MockBackend {
        base_url: format!("http://127.0.0.1:{}", port),
        recorded,
        handle,
    })
}

pub fn client(base_url: &str, tokens: Arc<dyn TokenStore>) -> ApiClient {
    let mut config = AppConfig::default();
    config.api.base_url = base_url.to_string();
    config.api.request_timeout_secs = 5;
    ApiClient::new(&config.api, &config.menu.endpoint, tokens).expect("client builds")
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

async fn menus(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    match bearer(&headers) {
        Some(GOOD_TOKEN) => (
            StatusCode::OK,
            Json(json!({"menus": [{"title": "Dashboard", "path": "/dashboard"}]})),
        ),
        Some(BROKEN_TOKEN) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"status": "failure", "status_code": "0500", "message": "menu table unavailable"})),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"status": "failure", "status_code": "0410", "message": "invalid token"})),
        ),
    }
}

fn all_users() -> Vec<Value> {
    (1..=25)
        .map(|i| {
            json!({
                "id": i,
                "name": format!("user{:02}", i),
                "email": format!("user{:02}@example.com", i),
                "is_active": i % 2 == 0,
                "is_admin": i == 1
            })
        })
        .collect()
}

async fn users_paginate(State(state): State<MockState>, Json(body): Json<Value>) -> Json<Value> {
    if let Ok(mut bodies) = state.recorded.paginate_bodies.lock() {
        bodies.push(body.clone());
    }

    let page = body["page"].as_u64().unwrap_or(1).max(1);
    let page_size = body["pageSize"].as_u64().unwrap_or(10).max(1);
    if page == 1 {
        if let Some(delay) = state.slow_first_page {
            tokio::time::sleep(delay).await;
        }
    }

    let mut users = all_users();
    if let Some(filters) = body["filters"].as_array() {
        for filter in filters {
            let field = filter["field"].as_str().unwrap_or_default().to_string();
            let value = filter["value"].as_str().unwrap_or_default().to_string();
            users.retain(|user| user[&field].as_str().is_some_and(|s| s.contains(&value)));
        }
    }

    let total = users.len() as u64;
    let rows: Vec<Value> = users
        .into_iter()
        .skip(((page - 1) * page_size) as usize)
        .take(page_size as usize)
        .collect();

    Json(json!({
        "data": rows,
        "total": total,
        "page": page,
        "page_size": page_size,
        "total_pages": total.div_ceil(page_size)
    }))
}

async fn roles_paginate(Json(_body): Json<Value>) -> Json<Value> {
    Json(json!({
        "success": true,
        "status_code": "0000",
        "data": {
            "roles": [
                {"id": 1, "name": "admin", "description": "Administrators", "company_id": "c-1"},
                {"id": 2, "name": "viewer", "description": "Read only", "company_id": "c-1"}
            ],
            "total": 2,
            "pageSize": 10,
            "totalPages": 1
        }
    }))
}

async fn save_company(Json(mut body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["name"].as_str().unwrap_or_default().is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"status": "failure", "status_code": "0421", "message": "Company name is required"})),
        );
    }
    if body.get("id").is_none() {
        body["id"] = json!("c-99");
    }
    (StatusCode::OK, Json(json!({"success": true, "data": body})))
}

async fn delete_user(State(state): State<MockState>, Path(id): Path<String>) -> Json<Value> {
    if let Ok(mut deleted) = state.recorded.deleted.lock() {
        deleted.push(id);
    }
    Json(json!({"success": true, "status_code": "0000", "data": null}))
}
