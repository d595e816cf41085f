use std::sync::Arc;

use serde_json::{json, Value};

use smartdict_agent::DictionaryAgent;
use smartdict_types::{
    AgentInfo, RpcResponse, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION,
    METHOD_NOT_FOUND,
};

/// Fields tried, in order, when pulling the chat text out of `params`.
const TEXT_FIELDS: [&str; 4] = ["message", "text", "content", "input"];

/// Routes JSON-RPC envelopes to the agent and builds response envelopes.
///
/// `dispatch` is a hard boundary: it always returns a well-formed
/// [`RpcResponse`], whatever the payload looks like. Protocol problems
/// become error envelopes; lookup problems are already plain text by the
/// time they leave the agent.
pub struct RpcDispatcher {
    agent: Arc<DictionaryAgent>,
}

impl RpcDispatcher {
    pub fn new(agent: Arc<DictionaryAgent>) -> Self {
        Self { agent }
    }

    pub fn agent(&self) -> &Arc<DictionaryAgent> {
        &self.agent
    }

    pub fn agent_info(&self) -> AgentInfo {
        AgentInfo::default()
    }

    pub async fn dispatch(&self, payload: &Value) -> RpcResponse {
        // The id is read off the raw payload before any validation so even
        // a malformed envelope gets it echoed back (absent id -> null).
        let id = payload.get("id").cloned().unwrap_or(Value::Null);

        if payload.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
            return RpcResponse::failure(id, INVALID_REQUEST, "Invalid JSON-RPC version");
        }

        let method = payload.get("method").and_then(Value::as_str);
        let params = payload.get("params").cloned().unwrap_or_else(|| json!({}));

        tracing::info!(method = method.unwrap_or("<none>"), id = %id, "A2A request");

        match method {
            Some("message") => self.handle_message(&params, id).await,

            Some("ping") => RpcResponse::success(
                id,
                json!({"status": "ok", "agent": self.agent.name()}),
            ),

            Some("info") => match serde_json::to_value(self.agent_info()) {
                Ok(info) => RpcResponse::success(id, info),
                Err(error) => {
                    RpcResponse::failure(id, INTERNAL_ERROR, format!("Internal error: {}", error))
                }
            },

            other => RpcResponse::failure(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", other.unwrap_or("null")),
            ),
        }
    }

    async fn handle_message(&self, params: &Value, id: Value) -> RpcResponse {
        let text = TEXT_FIELDS
            .iter()
            .find_map(|key| {
                params
                    .get(key)
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
            })
            .unwrap_or("");

        let user = params
            .get("user")
            .and_then(|u| u.get("id"))
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        let channel = params
            .get("channel")
            .and_then(|c| c.get("id"))
            .and_then(Value::as_str)
            .unwrap_or("unknown");

        tracing::info!(user, channel, text, "message received");

        if text.trim().is_empty() {
            return RpcResponse::failure(id, INVALID_PARAMS, "No message content provided");
        }

        let reply = self.agent.process_message(text).await;

        tracing::info!(chars = reply.len(), "generated reply");

        // The downstream consumer's expected key is unknown, so the reply is
        // mirrored under every field name it has been seen to read.
        let result = json!({
            "type": "message",
            "content": reply,
            "format": "text",
            "message": reply,
            "text": reply,
            "response": reply,
            "status": "success",
            "agent": self.agent.name(),
        });

        RpcResponse::success(id, result)
    }
}
