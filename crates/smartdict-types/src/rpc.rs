use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

// JSON-RPC 2.0 error codes used by the dispatcher.
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

/// Inbound JSON-RPC 2.0 envelope.
///
/// `params` and `id` default to `Value::Null` so a sparse envelope still
/// deserializes; the dispatcher additionally reads the id straight off the
/// raw payload so that even a malformed envelope gets its id echoed back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Value,
    #[serde(default)]
    pub id: Value,
}

impl RpcRequest {
    pub fn new(method: impl Into<String>, params: Value, id: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

/// Outbound JSON-RPC 2.0 envelope.
///
/// Untagged so that exactly one of `result`/`error` appears on the wire,
/// with compile-time exhaustiveness instead of two optional fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RpcResponse {
    Success {
        jsonrpc: String,
        result: Value,
        id: Value,
    },
    Failure {
        jsonrpc: String,
        error: RpcError,
        id: Value,
    },
}

impl RpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        RpcResponse::Success {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result,
            id,
        }
    }

    pub fn failure(id: Value, code: i64, message: impl Into<String>) -> Self {
        RpcResponse::Failure {
            jsonrpc: JSONRPC_VERSION.to_string(),
            error: RpcError {
                code,
                message: message.into(),
            },
            id,
        }
    }

    pub fn id(&self) -> &Value {
        match self {
            RpcResponse::Success { id, .. } => id,
            RpcResponse::Failure { id, .. } => id,
        }
    }

    pub fn result(&self) -> Option<&Value> {
        match self {
            RpcResponse::Success { result, .. } => Some(result),
            RpcResponse::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&RpcError> {
        match self {
            RpcResponse::Success { .. } => None,
            RpcResponse::Failure { error, .. } => Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RpcResponse::Success { .. })
    }
}
