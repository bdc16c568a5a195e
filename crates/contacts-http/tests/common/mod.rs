//! In-process fake of the contacts backend
//!
//! Mirrors the real backend's routes and status codes closely enough to
//! exercise `RestClient` over a real socket.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct FakeBackend {
    pub contacts: Vec<Value>,
    pub next_id: u64,
    /// Raw request log: "METHOD path"
    pub requests: Vec<String>,
}

pub type Shared = Arc<Mutex<FakeBackend>>;

impl FakeBackend {
    pub fn shared() -> Shared {
        Arc::new(Mutex::new(FakeBackend {
            next_id: 1,
            ..Default::default()
        }))
    }

    pub fn seed(state: &Shared, first: &str, last: &str, email: &str) -> u64 {
        let mut guard = state.lock().unwrap();
        let id = guard.next_id;
        guard.next_id += 1;
        guard.contacts.push(json!({
            "id": id,
            "firstName": first,
            "lastName": last,
            "email": email,
        }));
        id
    }
}

fn field<'a>(body: &'a Value, name: &str) -> Option<&'a str> {
    body.get(name).and_then(Value::as_str).filter(|s| !s.is_empty())
}

async fn list_contacts(State(state): State<Shared>) -> Json<Value> {
    let mut guard = state.lock().unwrap();
    guard.requests.push("GET /contacts".to_string());
    Json(json!({ "contacts": guard.contacts }))
}

async fn create_contact(State(state): State<Shared>, Json(body): Json<Value>) -> impl IntoResponse {
    let mut guard = state.lock().unwrap();
    guard.requests.push("POST /create_contact".to_string());

    let (Some(first), Some(last), Some(email)) = (
        field(&body, "firstName"),
        field(&body, "lastName"),
        field(&body, "email"),
    ) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "You must include a first name, last name and email" })),
        );
    };

    if guard.contacts.iter().any(|c| c["email"] == email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Email already exists" })),
        );
    }

    let id = guard.next_id;
    guard.next_id += 1;
    guard.contacts.push(json!({
        "id": id,
        "firstName": first,
        "lastName": last,
        "email": email,
    }));
    (StatusCode::CREATED, Json(json!({ "message": "Contact created" })))
}

async fn update_contact(
    State(state): State<Shared>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let mut guard = state.lock().unwrap();
    guard.requests.push(format!("PATCH /update_contact/{}", id));

    let Some(contact) = guard.contacts.iter_mut().find(|c| c["id"] == id) else {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "User not found" })));
    };
    for name in ["firstName", "lastName", "email"] {
        if let Some(value) = field(&body, name) {
            contact[name] = json!(value);
        }
    }
    (StatusCode::OK, Json(json!({ "message": "User updated." })))
}

async fn delete_contact(State(state): State<Shared>, Path(id): Path<u64>) -> impl IntoResponse {
    let mut guard = state.lock().unwrap();
    guard.requests.push(format!("DELETE /delete_contact/{}", id));

    let before = guard.contacts.len();
    guard.contacts.retain(|c| c["id"] != id);
    if guard.contacts.len() == before {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "User not found" }))).into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

/// Router with the four backend endpoints
pub fn backend_router(state: Shared) -> Router {
    Router::new()
        .route("/contacts", get(list_contacts))
        .route("/create_contact", post(create_contact))
        .route("/update_contact/:id", patch(update_contact))
        .route("/delete_contact/:id", delete(delete_contact))
        .with_state(state)
}

/// Serve a router on an ephemeral port and return its base URL
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("fake backend runs");
    });
    format!("http://{}", addr)
}

/// Start the fake backend with the given state
pub async fn spawn_backend(state: Shared) -> String {
    spawn(backend_router(state)).await
}

/// A base URL on which nothing is listening
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}
