use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use smartdict_agent::{DictionaryAgent, DictionaryFetch, FetchError, FetchResponse};
use smartdict_server::{app, ServerState};

struct MockFetch {
    responses: Mutex<VecDeque<Result<FetchResponse, FetchError>>>,
}

#[async_trait::async_trait]
impl DictionaryFetch for MockFetch {
    async fn fetch(&self, _url: &str) -> Result<FetchResponse, FetchError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Transport("no scripted response".into())))
    }
}

fn test_app(responses: Vec<Result<FetchResponse, FetchError>>) -> axum::Router {
    test_app_with_manifest(responses, "/definitely/missing/agent.json".into())
}

fn test_app_with_manifest(
    responses: Vec<Result<FetchResponse, FetchError>>,
    manifest_path: std::path::PathBuf,
) -> axum::Router {
    let fetch = Arc::new(MockFetch {
        responses: Mutex::new(VecDeque::from(responses)),
    });
    let agent = Arc::new(DictionaryAgent::with_fetcher(
        "http://127.0.0.1:1/entries",
        fetch,
    ));
    app(Arc::new(ServerState::with_agent(agent, manifest_path)))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn webhook_answers_ping_over_http_200() {
    let app = test_app(vec![]);
    let request = post_json(
        "/a2a/message",
        &json!({"jsonrpc": "2.0", "method": "ping", "id": "x"}),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({
            "jsonrpc": "2.0",
            "result": {"status": "ok", "agent": "SmartDict Bot"},
            "id": "x",
        })
    );
}

#[tokio::test]
async fn protocol_errors_still_ride_http_200() {
    let app = test_app(vec![]);
    let request = post_json(
        "/a2a/message",
        &json!({"jsonrpc": "1.0", "method": "ping", "id": 1}),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], -32600);
    assert!(body.get("result").is_none());
}

#[tokio::test]
async fn malformed_body_is_http_500_with_rpc_envelope() {
    let app = test_app(vec![]);
    let request = Request::builder()
        .method("POST")
        .uri("/a2a/message")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["error"]["code"], -32603);
    assert_eq!(body["id"], Value::Null);
}

#[tokio::test]
async fn webhook_runs_a_lookup_end_to_end() {
    let entries = json!([{
        "word": "ephemeral",
        "phonetic": "/ɪˈfem(ə)rəl/",
        "meanings": [{
            "partOfSpeech": "adjective",
            "definitions": [{"definition": "lasting for a very short time"}],
        }],
    }]);
    let app = test_app(vec![Ok(FetchResponse {
        status: 200,
        body: entries.to_string(),
    })]);

    let request = post_json(
        "/a2a/message",
        &json!({
            "jsonrpc": "2.0",
            "method": "message",
            "params": {"message": "define ephemeral"},
            "id": 42,
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let content = body["result"]["content"].as_str().unwrap();
    assert!(content.contains("EPHEMERAL"));
    assert!(content.contains("lasting for a very short time"));
    assert_eq!(body["result"]["content"], body["result"]["response"]);
    assert_eq!(body["id"], 42);
}

#[tokio::test]
async fn root_reports_service_shape() {
    let app = test_app(vec![]);
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "online");
    assert_eq!(body["agent"], "SmartDict Bot");
    assert_eq!(body["endpoints"]["a2a_webhook"], "/a2a/message");
}

#[tokio::test]
async fn health_names_the_agent() {
    let app = test_app(vec![]);
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body, json!({"status": "healthy", "agent": "SmartDict Bot"}));
}

#[tokio::test]
async fn info_returns_the_descriptor() {
    let app = test_app(vec![]);
    let request = Request::builder().uri("/info").body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["name"], "SmartDict Bot");
    assert_eq!(body["status"], "online");
}

#[tokio::test]
async fn test_endpoint_is_a_plain_passthrough() {
    let app = test_app(vec![]);
    let request = post_json("/test", &json!({"message": "help"}));

    let response = app.oneshot(request).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["input"], "help");
    assert!(body["output"].as_str().unwrap().contains("How to Use"));
}

#[tokio::test]
async fn manifest_is_served_verbatim() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"name": "SmartDict Bot", "version": "1.0.0"}}"#).unwrap();
    let app = test_app_with_manifest(vec![], file.path().to_path_buf());

    let request = Request::builder()
        .uri("/.well-known/agent.json")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );

    let body = body_json(response).await;
    assert_eq!(body["name"], "SmartDict Bot");
}

#[tokio::test]
async fn missing_manifest_is_404() {
    let app = test_app(vec![]);
    let request = Request::builder()
        .uri("/.well-known/agent.json")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"]["type"], "not_found");
}
