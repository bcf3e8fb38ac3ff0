//! Wire records exchanged with the remote photo service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Card, CardId, Profile, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(rename = "_id")]
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub avatar: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardRecord {
    #[serde(rename = "_id")]
    pub id: CardId,
    pub name: String,
    pub link: String,
    pub owner: ProfileRecord,
    #[serde(default)]
    pub likes: Vec<ProfileRecord>,
    #[serde(
        rename = "createdAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub about: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAvatarRequest {
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCardRequest {
    pub name: String,
    pub link: String,
}

impl From<ProfileRecord> for Profile {
    fn from(value: ProfileRecord) -> Self {
        Self {
            id: value.id,
            display_name: value.name,
            bio: value.about,
            avatar_url: value.avatar,
        }
    }
}

impl From<CardRecord> for Card {
    fn from(value: CardRecord) -> Self {
        Self {
            id: value.id,
            image_url: value.link,
            caption: value.name,
            owner_id: value.owner.id,
            liked_by: value.likes.into_iter().map(|user| user.id).collect(),
            created_at: value.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_record_collapses_likes_to_identity_set() {
        let raw = r#"{
            "_id": "c1",
            "name": "Baikal",
            "link": "https://example.com/baikal.jpg",
            "owner": { "_id": "u1", "name": "Jacques", "about": "Explorer", "avatar": "https://example.com/u1.png", "cohort": "cohort-42" },
            "likes": [
                { "_id": "u2", "name": "Ann", "about": "", "avatar": "" },
                { "_id": "u3", "name": "Bob", "about": "", "avatar": "" },
                { "_id": "u2", "name": "Ann", "about": "", "avatar": "" }
            ],
            "createdAt": "2024-01-01T00:00:00.000Z"
        }"#;

        let record: CardRecord = serde_json::from_str(raw).expect("parse card");
        let card = Card::from(record);

        assert_eq!(card.id, CardId::new("c1"));
        assert_eq!(card.caption, "Baikal");
        assert_eq!(card.owner_id, UserId::new("u1"));
        assert_eq!(card.like_count(), 2);
        assert!(card.is_liked_by(&UserId::new("u3")));
        assert!(card.created_at.is_some());
    }

    #[test]
    fn profile_record_maps_field_names() {
        let raw = r#"{ "_id": "u1", "name": "Jacques", "about": "Explorer", "avatar": "https://example.com/a.png" }"#;
        let profile = Profile::from(serde_json::from_str::<ProfileRecord>(raw).expect("parse"));

        assert_eq!(profile.display_name, "Jacques");
        assert_eq!(profile.bio, "Explorer");
        assert_eq!(profile.avatar_url, "https://example.com/a.png");
    }

    #[test]
    fn create_card_request_uses_service_field_names() {
        let body = serde_json::to_value(CreateCardRequest {
            name: "Arkhyz".to_string(),
            link: "https://example.com/arkhyz.jpg".to_string(),
        })
        .expect("serialize");

        assert_eq!(body["name"], "Arkhyz");
        assert_eq!(body["link"], "https://example.com/arkhyz.jpg");
    }
}
