//! Tests of the mutation endpoint wrappers against a local mock backend:
//! post edits, media renames, folder creation, and account removal.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::routing::{delete, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use flowdeck::api::{ApiClient, TokenPair};

#[derive(Default)]
struct Backend {
    /// Bearer header seen on the most recent request
    last_bearer: Mutex<Option<String>>,
    /// Path and body of each PATCH, in arrival order
    patches: Mutex<Vec<(String, Value)>>,
    /// Bodies posted to `POST /media/folders`
    folder_bodies: Mutex<Vec<Value>>,
    account_deletes: AtomicUsize,
}

impl Backend {
    fn record_bearer(&self, headers: &HeaderMap) {
        let bearer = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        *self.last_bearer.lock().expect("lock poisoned") = bearer;
    }
}

async fn patch_post_handler(
    State(backend): State<Arc<Backend>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    backend.record_bearer(&headers);
    let content = body["content"].as_str().unwrap_or("unchanged");
    backend
        .patches
        .lock()
        .expect("lock poisoned")
        .push((format!("/posts/{}", id), body.clone()));

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": {
                "post": {
                    "_id": id,
                    "content": content,
                    "status": "scheduled",
                    "scheduledAt": "2026-09-01T10:00:00Z"
                }
            }
        })),
    )
}

async fn patch_media_handler(
    State(backend): State<Arc<Backend>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    backend.record_bearer(&headers);
    let alt_text = body["altText"].as_str().unwrap_or("");
    backend
        .patches
        .lock()
        .expect("lock poisoned")
        .push((format!("/media/{}", id), body.clone()));

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": {
                "media": {
                    "_id": id,
                    "filename": "sunset-final.jpg",
                    "type": "image",
                    "url": "https://cdn.example.com/sunset-final.jpg",
                    "altText": alt_text
                }
            }
        })),
    )
}

async fn create_folder_handler(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    backend.record_bearer(&headers);
    backend
        .folder_bodies
        .lock()
        .expect("lock poisoned")
        .push(body.clone());

    (
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": { "folder": { "name": body["name"], "count": 0 } }
        })),
    )
}

async fn delete_account_handler(
    State(backend): State<Arc<Backend>>,
    Path(_id): Path<String>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    backend.record_bearer(&headers);
    backend.account_deletes.fetch_add(1, Ordering::SeqCst);
    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": "Account removed" })),
    )
}

/// Start the mock backend on an ephemeral port, returning its base URL and
/// a client already holding a token pair.
async fn serve(backend: Arc<Backend>) -> ApiClient {
    let router = Router::new()
        .route("/api/posts/:id", patch(patch_post_handler))
        .route("/api/media/:id", patch(patch_media_handler))
        .route("/api/media/folders", post(create_folder_handler))
        .route("/api/accounts/:id", delete(delete_account_handler))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock server");
    });

    let client = ApiClient::new(format!("http://{}/api", addr)).expect("client");
    client.set_tokens(TokenPair {
        token: "acc1".to_string(),
        refresh_token: "ref1".to_string(),
    });
    client
}

#[tokio::test]
async fn updating_a_post_sends_the_changes_and_returns_the_post() {
    let backend = Arc::new(Backend::default());
    let client = serve(backend.clone()).await;

    let changes = json!({ "content": "Launch moved to Friday" });
    let updated = client.update_post("p9", &changes).await.expect("update");

    assert_eq!(updated.id, "p9");
    assert_eq!(updated.content, "Launch moved to Friday");

    let patches = backend.patches.lock().expect("lock");
    assert_eq!(patches.len(), 1);
    assert_eq!(patches[0].0, "/posts/p9");
    assert_eq!(patches[0].1, changes);
    assert_eq!(
        backend.last_bearer.lock().expect("lock").as_deref(),
        Some("Bearer acc1")
    );
}

#[tokio::test]
async fn updating_media_returns_the_modified_item() {
    let backend = Arc::new(Backend::default());
    let client = serve(backend.clone()).await;

    let changes = json!({ "altText": "Sunset over the bay" });
    let item = client.update_media("m3", &changes).await.expect("update");

    assert_eq!(item.id, "m3");
    assert_eq!(item.alt_text.as_deref(), Some("Sunset over the bay"));

    let patches = backend.patches.lock().expect("lock");
    assert_eq!(patches[0].0, "/media/m3");
    assert_eq!(patches[0].1, changes);
}

#[tokio::test]
async fn creating_a_folder_posts_its_name() {
    let backend = Arc::new(Backend::default());
    let client = serve(backend.clone()).await;

    client
        .create_media_folder("spring-campaign")
        .await
        .expect("create folder");

    let bodies = backend.folder_bodies.lock().expect("lock");
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0], json!({ "name": "spring-campaign" }));
}

#[tokio::test]
async fn removing_an_account_issues_one_authorized_delete() {
    let backend = Arc::new(Backend::default());
    let client = serve(backend.clone()).await;

    client.delete_account("a7").await.expect("delete account");

    assert_eq!(backend.account_deletes.load(Ordering::SeqCst), 1);
    assert_eq!(
        backend.last_bearer.lock().expect("lock").as_deref(),
        Some("Bearer acc1")
    );
}
