//! API DTOs (Data Transfer Objects)

use crate::error::{ChatError, ChatResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request for POST (any path)
///
/// Both fields are optional; `null` is treated like an absent field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PostMessageRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl PostMessageRequest {
    /// Parse a request body, which must be a JSON object
    ///
    /// Decoding goes through a map first so that arrays are rejected
    /// instead of being read positionally.
    pub fn parse(body: &[u8]) -> ChatResult<Self> {
        let object: Map<String, Value> =
            serde_json::from_slice(body).map_err(ChatError::InvalidJson)?;
        serde_json::from_value(Value::Object(object)).map_err(ChatError::InvalidJson)
    }
}

/// Response for GET /online
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnlineResponse {
    pub online: usize,
}
