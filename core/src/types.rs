//! Domain DTOs for the homework status API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single homework submission as reported by the status API.
///
/// The API documents `homework_name` and `status`, but neither is trusted to
/// be present: the formatter checks them explicitly so that a missing field
/// surfaces as a schema error instead of a deserialization failure of the
/// whole list. Any other fields are kept verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HomeworkRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homework_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HomeworkRecord {
    pub fn new(homework_name: &str, status: &str) -> Self {
        Self {
            homework_name: Some(homework_name.to_string()),
            status: Some(status.to_string()),
            extra: Map::new(),
        }
    }
}

/// Request payload for the Bot API `sendMessage` method.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SendMessage {
    pub chat_id: String,
    pub text: String,
}

/// Reply envelope shared by every Bot API method.
#[derive(Debug, Clone, Deserialize)]
pub struct BotApiReply {
    pub ok: bool,
    #[serde(default)]
    pub description: Option<String>,
}
