//! Request/response boundary to the remote photo service.

use async_trait::async_trait;
use shared::{
    domain::{Card, CardId, Profile},
    error::ApiException,
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorCategory {
    Transport,
    Unauthorized,
    NotFound,
    Validation,
    Server,
    Decode,
}

/// Transport or validation failure reported by a [`RemoteService`] call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{category:?}: {message}")]
pub struct RemoteError {
    category: RemoteErrorCategory,
    message: String,
}

impl RemoteError {
    pub fn new(category: RemoteErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(RemoteErrorCategory::Transport, message)
    }

    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let category = match status {
            401 | 403 => RemoteErrorCategory::Unauthorized,
            404 => RemoteErrorCategory::NotFound,
            400 | 409 | 422 => RemoteErrorCategory::Validation,
            _ => RemoteErrorCategory::Server,
        };
        Self::new(category, message)
    }

    pub fn category(&self) -> RemoteErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ApiException> for RemoteError {
    fn from(value: ApiException) -> Self {
        let message = value.to_string();
        Self::from_status(value.status, message)
    }
}

pub type RemoteResult<T> = Result<T, RemoteError>;

#[async_trait]
pub trait RemoteService: Send + Sync {
    async fn fetch_cards(&self) -> RemoteResult<Vec<Card>>;
    async fn fetch_profile(&self) -> RemoteResult<Profile>;
    async fn update_profile(&self, display_name: &str, bio: &str) -> RemoteResult<Profile>;
    async fn update_avatar(&self, avatar_url: &str) -> RemoteResult<Profile>;
    async fn create_card(&self, caption: &str, image_url: &str) -> RemoteResult<Card>;
    async fn delete_card(&self, card_id: &CardId) -> RemoteResult<()>;
    async fn set_like(&self, card_id: &CardId, liked: bool) -> RemoteResult<Card>;
}

/// Stand-in used when no service endpoint is configured.
pub struct MissingRemoteService;

impl MissingRemoteService {
    fn unavailable<T>() -> RemoteResult<T> {
        Err(RemoteError::transport("photo service endpoint is not configured"))
    }
}

#[async_trait]
impl RemoteService for MissingRemoteService {
    async fn fetch_cards(&self) -> RemoteResult<Vec<Card>> {
        Self::unavailable()
    }

    async fn fetch_profile(&self) -> RemoteResult<Profile> {
        Self::unavailable()
    }

    async fn update_profile(&self, _display_name: &str, _bio: &str) -> RemoteResult<Profile> {
        Self::unavailable()
    }

    async fn update_avatar(&self, _avatar_url: &str) -> RemoteResult<Profile> {
        Self::unavailable()
    }

    async fn create_card(&self, _caption: &str, _image_url: &str) -> RemoteResult<Card> {
        Self::unavailable()
    }

    async fn delete_card(&self, _card_id: &CardId) -> RemoteResult<()> {
        Self::unavailable()
    }

    async fn set_like(&self, _card_id: &CardId, _liked: bool) -> RemoteResult<Card> {
        Self::unavailable()
    }
}
