use serde::{Deserialize, Serialize};

/// Failure body sent by the recipe API alongside a non-success status,
/// e.g. `{ "status": "fail", "message": "Invalid _id: nope" }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl ApiErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: Some("fail".into()),
            message: message.into(),
        }
    }
}
