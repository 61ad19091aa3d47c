use super::*;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use shared::domain::ChallengeId;
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

use crate::forms::ChallengeFields;

#[derive(Debug, PartialEq)]
enum CapturedRequest {
    Create(serde_json::Value),
    Fetch {
        challenge_id: i64,
    },
    Approve {
        challenge_id: i64,
        payload: serde_json::Value,
    },
    Delete {
        challenge_id: i64,
    },
    Login(serde_json::Value),
}

#[derive(Clone)]
struct ServerState {
    tx: Arc<Mutex<Option<oneshot::Sender<CapturedRequest>>>>,
    response_status: StatusCode,
    response_body: &'static str,
}

impl ServerState {
    async fn capture(&self, request: CapturedRequest) {
        if let Some(tx) = self.tx.lock().await.take() {
            let _ = tx.send(request);
        }
    }

    fn respond(&self) -> (StatusCode, String) {
        (self.response_status, self.response_body.to_string())
    }
}

async fn handle_create(
    State(state): State<ServerState>,
    Json(payload): Json<serde_json::Value>,
) -> (StatusCode, String) {
    state.capture(CapturedRequest::Create(payload)).await;
    state.respond()
}

async fn handle_fetch(
    Path(challenge_id): Path<i64>,
    State(state): State<ServerState>,
) -> (StatusCode, String) {
    state.capture(CapturedRequest::Fetch { challenge_id }).await;
    state.respond()
}

async fn handle_approve(
    Path(challenge_id): Path<i64>,
    State(state): State<ServerState>,
    Json(payload): Json<serde_json::Value>,
) -> (StatusCode, String) {
    state
        .capture(CapturedRequest::Approve {
            challenge_id,
            payload,
        })
        .await;
    state.respond()
}

async fn handle_delete(
    Path(challenge_id): Path<i64>,
    State(state): State<ServerState>,
) -> (StatusCode, String) {
    state.capture(CapturedRequest::Delete { challenge_id }).await;
    state.respond()
}

async fn handle_login(
    State(state): State<ServerState>,
    Json(payload): Json<serde_json::Value>,
) -> (StatusCode, String) {
    state.capture(CapturedRequest::Login(payload)).await;
    state.respond()
}

async fn spawn_admin_server(
    response_status: StatusCode,
    response_body: &'static str,
) -> (String, oneshot::Receiver<CapturedRequest>) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("mock server addr");
    let (tx, rx) = oneshot::channel();
    let state = ServerState {
        tx: Arc::new(Mutex::new(Some(tx))),
        response_status,
        response_body,
    };
    let app = Router::new()
        .route("/api/admin/challenges/create", post(handle_create))
        .route("/api/challenges/:id", get(handle_fetch))
        .route("/api/admin/challenges/approve/:id", put(handle_approve))
        .route("/api/admin/challenges/delete/:id", delete(handle_delete))
        .route("/api/auth/login", post(handle_login))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), rx)
}

fn sample_fields() -> ChallengeFields {
    ChallengeFields {
        photo_url: "data:image/png;base64,abc".to_string(),
        name: "Run 5k".to_string(),
        points: "10".to_string(),
        description: "desc".to_string(),
        added_by: String::new(),
    }
}

#[tokio::test]
async fn create_challenge_posts_payload_with_parsed_points() {
    let (server_url, payload_rx) = spawn_admin_server(StatusCode::CREATED, "").await;
    let client = AdminClient::new(&server_url).expect("client");

    client
        .create_challenge(&sample_fields().create_request())
        .await
        .expect("create");

    let captured = payload_rx.await.expect("captured request");
    assert_eq!(
        captured,
        CapturedRequest::Create(serde_json::json!({
            "challengeName": "Run 5k",
            "points": 10,
            "description": "desc",
            "photoUrl": "data:image/png;base64,abc",
        }))
    );
}

#[tokio::test]
async fn create_challenge_surfaces_rejection_body() {
    let (server_url, _payload_rx) =
        spawn_admin_server(StatusCode::BAD_REQUEST, "Challenge name already exists").await;
    let client = AdminClient::new(&server_url).expect("client");

    let err = client
        .create_challenge(&sample_fields().create_request())
        .await
        .expect_err("rejection");

    match err {
        ClientError::Rejected { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, "Challenge name already exists");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_challenge_parses_detail_with_name_alias() {
    let (server_url, payload_rx) = spawn_admin_server(
        StatusCode::OK,
        r#"{"challengeName":"Run 5k","points":10,"photoUrl":"http://img","addedBy":"@melissa"}"#,
    )
    .await;
    let client = AdminClient::new(&server_url).expect("client");

    let detail = client
        .fetch_challenge(ChallengeId(7))
        .await
        .expect("fetch");

    assert_eq!(
        payload_rx.await.expect("captured request"),
        CapturedRequest::Fetch { challenge_id: 7 }
    );
    assert_eq!(detail.name.as_deref(), Some("Run 5k"));
    assert_eq!(detail.points, Some(10));
    assert_eq!(detail.added_by.as_deref(), Some("@melissa"));
    // Absent fields stay absent; the form layer substitutes empty strings.
    assert_eq!(detail.description, None);
}

#[tokio::test]
async fn fetch_challenge_rejection_discards_body() {
    let (server_url, _payload_rx) = spawn_admin_server(StatusCode::NOT_FOUND, "no such row").await;
    let client = AdminClient::new(&server_url).expect("client");

    let err = client
        .fetch_challenge(ChallengeId(7))
        .await
        .expect_err("rejection");

    match err {
        ClientError::Rejected { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn approve_challenge_puts_full_editable_record() {
    let (server_url, payload_rx) = spawn_admin_server(StatusCode::OK, "").await;
    let client = AdminClient::new(&server_url).expect("client");

    let mut fields = sample_fields();
    fields.added_by = "@melissa".to_string();
    client
        .approve_challenge(ChallengeId(42), &fields.approve_request())
        .await
        .expect("approve");

    // The editable record travels as the form holds it: every field a
    // string, points included.
    assert_eq!(
        payload_rx.await.expect("captured request"),
        CapturedRequest::Approve {
            challenge_id: 42,
            payload: serde_json::json!({
                "photoUrl": "data:image/png;base64,abc",
                "name": "Run 5k",
                "points": "10",
                "description": "desc",
                "addedBy": "@melissa",
            }),
        }
    );
}

#[tokio::test]
async fn approve_challenge_rejection_ignores_body() {
    let (server_url, _payload_rx) =
        spawn_admin_server(StatusCode::INTERNAL_SERVER_ERROR, "stack trace here").await;
    let client = AdminClient::new(&server_url).expect("client");

    let err = client
        .approve_challenge(ChallengeId(42), &sample_fields().approve_request())
        .await
        .expect_err("rejection");

    match err {
        ClientError::Rejected { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_challenge_issues_delete_with_no_body() {
    let (server_url, payload_rx) = spawn_admin_server(StatusCode::OK, "").await;
    let client = AdminClient::new(&server_url).expect("client");

    client
        .delete_challenge(ChallengeId(13))
        .await
        .expect("delete");

    assert_eq!(
        payload_rx.await.expect("captured request"),
        CapturedRequest::Delete { challenge_id: 13 }
    );
}

#[tokio::test]
async fn login_posts_credentials() {
    let (server_url, payload_rx) = spawn_admin_server(StatusCode::OK, "").await;
    let client = AdminClient::new(&server_url).expect("client");

    client
        .login(&shared::protocol::LoginRequest {
            username: "admin".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .expect("login");

    assert_eq!(
        payload_rx.await.expect("captured request"),
        CapturedRequest::Login(serde_json::json!({
            "username": "admin",
            "password": "hunter2",
        }))
    );
}

#[tokio::test]
async fn connection_refusal_maps_to_transport_error() {
    // Bind a port, then drop the listener so the address refuses connections.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = AdminClient::new(&format!("http://{addr}")).expect("client");
    let err = client
        .delete_challenge(ChallengeId(1))
        .await
        .expect_err("refused");

    assert!(matches!(err, ClientError::Transport(_)), "got {err:?}");
}

#[test]
fn rejects_invalid_base_url() {
    let err = AdminClient::new("not a url").expect_err("invalid url");
    assert!(matches!(err, ClientError::InvalidBaseUrl(_)));
}
