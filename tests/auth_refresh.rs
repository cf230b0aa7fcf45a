//! End-to-end tests of the client's token refresh behavior against a local
//! mock backend.
//!
//! These cover the authentication contract: the bearer credential is attached
//! exactly once per request, an expired access token is exchanged and the
//! request retried exactly once, and a failed or rejected refresh ends the
//! session without retry loops.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use flowdeck::api::{ApiClient, ApiError, TokenPair};

/// How the mock backend answers `POST /auth/refresh-token`.
#[derive(Clone, Copy)]
enum RefreshMode {
    /// Issue this new token pair
    Grant {
        token: &'static str,
        refresh_token: &'static str,
    },
    /// 401 - refresh token invalid or revoked
    Reject,
    /// 200 but with no data in the envelope
    EmptyEnvelope,
}

struct Backend {
    /// The one access token `GET /auth/me` accepts
    valid_token: Mutex<String>,
    refresh_mode: RefreshMode,
    /// Force this status from `GET /auth/me` regardless of the token
    me_status_override: Option<StatusCode>,

    me_calls: AtomicUsize,
    refresh_calls: AtomicUsize,
    /// Number of Authorization headers seen on each `/auth/me` request
    auth_header_counts: Mutex<Vec<usize>>,
    /// Bodies posted to the refresh endpoint
    refresh_bodies: Mutex<Vec<Value>>,
}

impl Backend {
    fn new(valid_token: &str, refresh_mode: RefreshMode) -> Arc<Self> {
        Self::build(valid_token, refresh_mode, None)
    }

    fn with_me_status(valid_token: &str, status: StatusCode) -> Arc<Self> {
        Self::build(valid_token, RefreshMode::Reject, Some(status))
    }

    fn build(
        valid_token: &str,
        refresh_mode: RefreshMode,
        me_status_override: Option<StatusCode>,
    ) -> Arc<Self> {
        Arc::new(Self {
            valid_token: Mutex::new(valid_token.to_string()),
            refresh_mode,
            me_status_override,
            me_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
            auth_header_counts: Mutex::new(Vec::new()),
            refresh_bodies: Mutex::new(Vec::new()),
        })
    }

    fn me_calls(&self) -> usize {
        self.me_calls.load(Ordering::SeqCst)
    }

    fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }
}

async fn me_handler(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    backend.me_calls.fetch_add(1, Ordering::SeqCst);

    let auth_count = headers.get_all(AUTHORIZATION).iter().count();
    backend
        .auth_header_counts
        .lock()
        .expect("lock poisoned")
        .push(auth_count);

    if let Some(status) = backend.me_status_override {
        return (
            status,
            Json(json!({ "success": false, "message": "forced status" })),
        );
    }

    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let expected = format!(
        "Bearer {}",
        backend.valid_token.lock().expect("lock poisoned")
    );

    if bearer == expected {
        (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "user": {
                        "_id": "u1",
                        "email": "casey@example.com",
                        "firstName": "Casey",
                        "lastName": "Nguyen"
                    }
                }
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Token expired" })),
        )
    }
}

async fn refresh_handler(
    State(backend): State<Arc<Backend>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    backend.refresh_calls.fetch_add(1, Ordering::SeqCst);
    backend
        .refresh_bodies
        .lock()
        .expect("lock poisoned")
        .push(body);

    match backend.refresh_mode {
        RefreshMode::Grant {
            token,
            refresh_token,
        } => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": { "token": token, "refreshToken": refresh_token }
            })),
        ),
        RefreshMode::Reject => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Invalid refresh token" })),
        ),
        RefreshMode::EmptyEnvelope => (StatusCode::OK, Json(json!({ "success": true }))),
    }
}

/// Start the mock backend on an ephemeral port, returning its base URL.
async fn serve(backend: Arc<Backend>) -> String {
    let router = Router::new()
        .route("/api/auth/me", get(me_handler))
        .route("/api/auth/refresh-token", post(refresh_handler))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock server");
    });

    format!("http://{}/api", addr)
}

fn pair(token: &str, refresh: &str) -> TokenPair {
    TokenPair {
        token: token.to_string(),
        refresh_token: refresh.to_string(),
    }
}

#[tokio::test]
async fn bearer_attached_exactly_once_per_request() {
    let backend = Backend::new("acc1", RefreshMode::Reject);
    let base_url = serve(backend.clone()).await;

    let client = ApiClient::new(base_url).expect("client");
    client.set_tokens(pair("acc1", "ref1"));

    let user = client.fetch_me().await.expect("fetch_me");
    assert_eq!(user.display_name(), "Casey Nguyen");

    assert_eq!(backend.me_calls(), 1);
    assert_eq!(backend.refresh_calls(), 0);
    assert_eq!(
        *backend.auth_header_counts.lock().expect("lock"),
        vec![1],
        "each request must carry exactly one Authorization header"
    );
}

#[tokio::test]
async fn expired_token_refreshes_once_and_retries() {
    // Server only accepts acc2; the client starts with stale acc1.
    let backend = Backend::new(
        "acc2",
        RefreshMode::Grant {
            token: "acc2",
            refresh_token: "ref2",
        },
    );
    let base_url = serve(backend.clone()).await;

    let client = ApiClient::new(base_url).expect("client");
    client.set_tokens(pair("acc1", "ref1"));

    let user = client.fetch_me().await.expect("fetch_me after refresh");
    assert_eq!(user.email, "casey@example.com");

    assert_eq!(backend.me_calls(), 2, "original attempt plus one retry");
    assert_eq!(backend.refresh_calls(), 1);

    // The stored refresh token was the one exchanged
    let bodies = backend.refresh_bodies.lock().expect("lock");
    assert_eq!(bodies[0]["refreshToken"], "ref1");

    // The rotated pair replaced the stale one
    assert_eq!(client.tokens(), Some(pair("acc2", "ref2")));
}

#[tokio::test]
async fn missing_tokens_fail_without_refresh() {
    let backend = Backend::new("acc1", RefreshMode::Reject);
    let base_url = serve(backend.clone()).await;

    let client = ApiClient::new(base_url).expect("client");
    // No tokens installed

    let err = client.fetch_me().await.expect_err("must fail");
    assert!(matches!(err, ApiError::Unauthorized));

    assert_eq!(backend.me_calls(), 1, "no retry without a refresh token");
    assert_eq!(backend.refresh_calls(), 0);
}

#[tokio::test]
async fn rejected_refresh_ends_session_without_retry() {
    let backend = Backend::new("acc2", RefreshMode::Reject);
    let base_url = serve(backend.clone()).await;

    let client = ApiClient::new(base_url).expect("client");
    client.set_tokens(pair("acc1", "revoked"));

    let err = client.fetch_me().await.expect_err("must fail");
    assert!(matches!(err, ApiError::SessionExpired));
    assert!(err.is_session_expired());

    assert_eq!(backend.me_calls(), 1, "request is not retried");
    assert_eq!(backend.refresh_calls(), 1);
    assert_eq!(client.tokens(), None, "credentials must be cleared");
}

#[tokio::test]
async fn refresh_envelope_without_data_ends_session() {
    let backend = Backend::new("acc2", RefreshMode::EmptyEnvelope);
    let base_url = serve(backend.clone()).await;

    let client = ApiClient::new(base_url).expect("client");
    client.set_tokens(pair("acc1", "ref1"));

    let err = client.fetch_me().await.expect_err("must fail");
    assert!(matches!(err, ApiError::SessionExpired));

    assert_eq!(backend.me_calls(), 1);
    assert_eq!(backend.refresh_calls(), 1);
    assert_eq!(client.tokens(), None);
}

#[tokio::test]
async fn second_unauthorized_after_refresh_is_terminal() {
    // Refresh succeeds but grants a token the server still rejects. The
    // client must fail hard after one retry instead of looping.
    let backend = Backend::new(
        "something-else-entirely",
        RefreshMode::Grant {
            token: "acc2",
            refresh_token: "ref2",
        },
    );
    let base_url = serve(backend.clone()).await;

    let client = ApiClient::new(base_url).expect("client");
    client.set_tokens(pair("acc1", "ref1"));

    let err = client.fetch_me().await.expect_err("must fail");
    assert!(matches!(err, ApiError::SessionExpired));

    assert_eq!(backend.me_calls(), 2, "exactly one retry, no loop");
    assert_eq!(backend.refresh_calls(), 1, "exactly one refresh attempt");
    assert_eq!(client.tokens(), None);
}

#[tokio::test]
async fn server_errors_never_trigger_refresh() {
    let backend = Backend::with_me_status("acc1", StatusCode::INTERNAL_SERVER_ERROR);
    let base_url = serve(backend.clone()).await;

    let client = ApiClient::new(base_url).expect("client");
    client.set_tokens(pair("acc1", "ref1"));

    let err = client.fetch_me().await.expect_err("must fail");
    assert!(matches!(err, ApiError::ServerError(_)));

    assert_eq!(backend.me_calls(), 1);
    assert_eq!(backend.refresh_calls(), 0);
    assert_eq!(
        client.tokens(),
        Some(pair("acc1", "ref1")),
        "tokens survive non-auth failures"
    );
}

#[tokio::test]
async fn not_found_never_triggers_refresh() {
    let backend = Backend::with_me_status("acc1", StatusCode::NOT_FOUND);
    let base_url = serve(backend.clone()).await;

    let client = ApiClient::new(base_url).expect("client");
    client.set_tokens(pair("acc1", "ref1"));

    let err = client.fetch_me().await.expect_err("must fail");
    assert!(matches!(err, ApiError::NotFound(_)));

    assert_eq!(backend.me_calls(), 1);
    assert_eq!(backend.refresh_calls(), 0);
}
