use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the photo service on non-2xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
}

impl ApiErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Best-effort parse; falls back to the raw text when the body is not JSON.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Self>(raw) {
            Ok(body) if !body.message.is_empty() => body,
            _ => Self::new(raw.trim()),
        }
    }
}

#[derive(Debug, Error)]
#[error("service responded {status}: {message}")]
pub struct ApiException {
    pub status: u16,
    pub message: String,
}

impl ApiException {
    pub fn new(status: u16, body: ApiErrorBody) -> Self {
        Self {
            status,
            message: body.message,
        }
    }
}
