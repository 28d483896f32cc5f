use super::endpoint::StatusEndpoint;
use qlstatus_models::{ServerAddress, ServerRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Body returned by the status-aggregation service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub servers: Vec<ServerEntry>,
}

/// One server as reported by the service. Every field may be missing or null.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerEntry {
    #[serde(default)]
    pub server: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub map: Option<String>,
    #[serde(default)]
    pub players: Option<u32>,
    #[serde(default)]
    pub max_players: Option<u32>,
    #[serde(default)]
    pub error: Option<Value>,
}

/// Issues batch status queries and normalizes the answer
pub struct StatusFetcher {
    pub(super) endpoint: Arc<dyn StatusEndpoint>,
}

impl StatusResponse {
    pub fn remote_error(&self) -> Option<String> {
        error_text(self.error.as_ref())
    }
}

impl ServerEntry {
    pub fn error_text(&self) -> Option<String> {
        error_text(self.error.as_ref())
    }

    /// Missing fields fall back to empty strings and zero counts
    pub fn into_record(self, address: ServerAddress) -> ServerRecord {
        let error = self.error_text();
        ServerRecord {
            address,
            name: self.name.unwrap_or_default(),
            map: self.map.unwrap_or_default(),
            players: self.players.unwrap_or_default(),
            max_players: self.max_players.unwrap_or_default(),
            error,
        }
    }
}

/// `null`, `false` and `""` all mean "no error"
fn error_text(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}
