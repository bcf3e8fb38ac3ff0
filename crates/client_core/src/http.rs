//! reqwest-backed [`RemoteService`] speaking the photo service's JSON API.

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Card, CardId, Profile},
    error::{ApiErrorBody, ApiException},
    protocol::{
        CardRecord, CreateCardRequest, ProfileRecord, UpdateAvatarRequest, UpdateProfileRequest,
    },
};
use tracing::debug;
use url::Url;

use crate::remote::{RemoteError, RemoteErrorCategory, RemoteResult, RemoteService};

#[derive(Debug, Clone)]
pub struct RemoteSettings {
    pub base_url: Url,
    pub auth_token: String,
}

impl RemoteSettings {
    pub fn new(base_url: Url, auth_token: impl Into<String>) -> Self {
        Self {
            base_url,
            auth_token: auth_token.into(),
        }
    }
}

pub struct HttpRemoteService {
    http: Client,
    base_url: Url,
    auth_token: String,
}

impl HttpRemoteService {
    pub fn new(settings: RemoteSettings) -> Self {
        let mut base_url = settings.base_url;
        // `Url::join` drops the last segment unless the base ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            http: Client::new(),
            base_url,
            auth_token: settings.auth_token,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `segments` to the base path. Each segment is percent-encoded, so ids
    /// containing `/`, `?` or `#` stay inside their own segment.
    fn endpoint(&self, segments: &[&str]) -> RemoteResult<Url> {
        if let Some(segment) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(RemoteError::new(
                RemoteErrorCategory::Validation,
                format!("'{segment}' is not a valid path segment"),
            ));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                RemoteError::new(
                    RemoteErrorCategory::Transport,
                    format!("base url '{}' cannot carry a path", self.base_url),
                )
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(AUTHORIZATION, &self.auth_token)
    }

    async fn send(&self, operation: &'static str, request: RequestBuilder) -> RemoteResult<Response> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(transport_error)?;
        debug!(operation, status = response.status().as_u16(), "remote: response received");
        ensure_success(response).await
    }
}

fn transport_error(err: reqwest::Error) -> RemoteError {
    if err.is_decode() {
        RemoteError::new(RemoteErrorCategory::Decode, err.to_string())
    } else {
        RemoteError::transport(err.to_string())
    }
}

async fn ensure_success(response: Response) -> RemoteResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let raw = match response.text().await {
        Ok(raw) => raw,
        Err(err) => {
            debug!(status = status.as_u16(), "remote: error body unreadable: {err}");
            String::new()
        }
    };
    Err(ApiException::new(status.as_u16(), ApiErrorBody::parse(&raw)).into())
}

async fn read_json<T: DeserializeOwned>(response: Response) -> RemoteResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|err| RemoteError::new(RemoteErrorCategory::Decode, err.to_string()))
}

#[async_trait]
impl RemoteService for HttpRemoteService {
    async fn fetch_cards(&self) -> RemoteResult<Vec<Card>> {
        let url = self.endpoint(&["cards"])?;
        let response = self.send("fetch_cards", self.http.get(url)).await?;
        let records: Vec<CardRecord> = read_json(response).await?;
        Ok(records.into_iter().map(Card::from).collect())
    }

    async fn fetch_profile(&self) -> RemoteResult<Profile> {
        let url = self.endpoint(&["users", "me"])?;
        let response = self.send("fetch_profile", self.http.get(url)).await?;
        let record: ProfileRecord = read_json(response).await?;
        Ok(record.into())
    }

    async fn update_profile(&self, display_name: &str, bio: &str) -> RemoteResult<Profile> {
        let url = self.endpoint(&["users", "me"])?;
        let body = UpdateProfileRequest {
            name: display_name.to_string(),
            about: bio.to_string(),
        };
        let response = self
            .send("update_profile", self.http.patch(url).json(&body))
            .await?;
        let record: ProfileRecord = read_json(response).await?;
        Ok(record.into())
    }

    async fn update_avatar(&self, avatar_url: &str) -> RemoteResult<Profile> {
        let url = self.endpoint(&["users", "me", "avatar"])?;
        let body = UpdateAvatarRequest {
            avatar: avatar_url.to_string(),
        };
        let response = self
            .send("update_avatar", self.http.patch(url).json(&body))
            .await?;
        let record: ProfileRecord = read_json(response).await?;
        Ok(record.into())
    }

    async fn create_card(&self, caption: &str, image_url: &str) -> RemoteResult<Card> {
        let url = self.endpoint(&["cards"])?;
        let body = CreateCardRequest {
            name: caption.to_string(),
            link: image_url.to_string(),
        };
        let response = self
            .send("create_card", self.http.post(url).json(&body))
            .await?;
        let record: CardRecord = read_json(response).await?;
        Ok(record.into())
    }

    async fn delete_card(&self, card_id: &CardId) -> RemoteResult<()> {
        let url = self.endpoint(&["cards", card_id.as_str()])?;
        self.send("delete_card", self.http.delete(url)).await?;
        Ok(())
    }

    async fn set_like(&self, card_id: &CardId, liked: bool) -> RemoteResult<Card> {
        let url = self.endpoint(&["cards", card_id.as_str(), "likes"])?;
        let request = if liked {
            self.http.put(url)
        } else {
            self.http.delete(url)
        };
        let response = self.send("set_like", request).await?;
        let record: CardRecord = read_json(response).await?;
        Ok(record.into())
    }
}
