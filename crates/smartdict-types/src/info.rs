use serde::{Deserialize, Serialize};

/// Display name announced to the messaging platform.
pub const AGENT_NAME: &str = "SmartDict Bot";

pub const AGENT_VERSION: &str = "1.0.0";

/// Agent descriptor returned by the `info` RPC method and `GET /info`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentInfo {
    pub name: String,
    pub version: String,
    pub capabilities: Vec<String>,
    pub commands: Vec<String>,
    pub status: String,
}

impl Default for AgentInfo {
    fn default() -> Self {
        Self {
            name: AGENT_NAME.to_string(),
            version: AGENT_VERSION.to_string(),
            capabilities: vec![
                "message".to_string(),
                "definitions".to_string(),
                "examples".to_string(),
            ],
            commands: vec![
                "define".to_string(),
                "meaning".to_string(),
                "help".to_string(),
            ],
            status: "online".to_string(),
        }
    }
}
