use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

use smartdict_types::{AgentInfo, RpcResponse, AGENT_VERSION, INTERNAL_ERROR};

use crate::{ApiError, Result, ServerState};

pub fn router() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/info", get(info))
        .route("/a2a/message", post(a2a_webhook))
        .route("/test", post(test_agent))
        .route("/.well-known/agent.json", get(agent_manifest))
}

#[derive(Debug, Serialize)]
struct RootResponse {
    status: String,
    agent: String,
    version: String,
    protocol: String,
    manifest: String,
    endpoints: EndpointMap,
}

#[derive(Debug, Serialize)]
struct EndpointMap {
    a2a_webhook: String,
    health: String,
    info: String,
}

async fn root(State(state): State<Arc<ServerState>>) -> Json<RootResponse> {
    Json(RootResponse {
        status: "online".to_string(),
        agent: state.agent.name().to_string(),
        version: AGENT_VERSION.to_string(),
        protocol: "A2A (Agent-to-Agent)".to_string(),
        manifest: "/.well-known/agent.json".to_string(),
        endpoints: EndpointMap {
            a2a_webhook: "/a2a/message".to_string(),
            health: "/health".to_string(),
            info: "/info".to_string(),
        },
    })
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    agent: String,
}

async fn health(State(state): State<Arc<ServerState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        agent: state.agent.name().to_string(),
    })
}

async fn info(State(state): State<Arc<ServerState>>) -> Json<AgentInfo> {
    Json(state.dispatcher.agent_info())
}

/// Main A2A webhook. Handled requests ride an HTTP 200 even when the
/// dispatcher answers with a JSON-RPC error envelope; only a body that
/// never parses as JSON yields an HTTP 500.
async fn a2a_webhook(
    State(state): State<Arc<ServerState>>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            tracing::error!(%rejection, "A2A webhook body was not valid JSON");
            let envelope = RpcResponse::failure(
                Value::Null,
                INTERNAL_ERROR,
                format!("Internal server error: {}", rejection),
            );
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(envelope)).into_response();
        }
    };

    tracing::debug!(%payload, "A2A webhook called");

    let response = state.dispatcher.dispatch(&payload).await;
    Json(response).into_response()
}

/// Local debugging passthrough straight to the agent, bypassing JSON-RPC.
async fn test_agent(
    State(state): State<Arc<ServerState>>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Json<Value> {
    match payload {
        Ok(Json(data)) => {
            let message = data
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string();
            let output = state.agent.process_message(&message).await;
            Json(json!({"input": message, "output": output}))
        }
        Err(rejection) => Json(json!({"error": rejection.to_string()})),
    }
}

/// Serve the agent manifest verbatim. Required for platform discovery.
async fn agent_manifest(State(state): State<Arc<ServerState>>) -> Result<Response> {
    match tokio::fs::read(&state.manifest_path).await {
        Ok(bytes) => {
            Ok(([(header::CONTENT_TYPE, "application/json")], bytes).into_response())
        }
        Err(error) => {
            tracing::warn!(%error, path = %state.manifest_path.display(), "manifest not readable");
            Err(ApiError::NotFound("Manifest not found".to_string()))
        }
    }
}
