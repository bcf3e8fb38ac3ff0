use std::{
    collections::{BTreeSet, HashMap, HashSet, VecDeque},
    sync::{Arc, Mutex as StdMutex},
};

use async_trait::async_trait;
use shared::domain::{Card, CardId, Profile, UserId};
use tokio::sync::Semaphore;

use crate::{
    remote::{RemoteError, RemoteResult, RemoteService},
    session::Session,
};

pub(crate) const VIEWER: &str = "u1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RemoteCall {
    FetchCards,
    FetchProfile,
    UpdateProfile { name: String, bio: String },
    UpdateAvatar(String),
    CreateCard { caption: String, url: String },
    DeleteCard(CardId),
    SetLike(CardId, bool),
}

pub(crate) fn profile(id: &str) -> Profile {
    Profile {
        id: UserId::new(id),
        display_name: "Jacques Cousteau".to_string(),
        bio: "Sailor, researcher".to_string(),
        avatar_url: format!("https://example.com/{id}.png"),
    }
}

pub(crate) fn card(id: &str, liked_by: &[&str]) -> Card {
    Card {
        id: CardId::new(id),
        image_url: format!("https://example.com/{id}.jpg"),
        caption: format!("place {id}"),
        owner_id: UserId::new(VIEWER),
        liked_by: liked_by.iter().map(|user| UserId::new(*user)).collect(),
        created_at: None,
    }
}

pub(crate) fn ids(cards: &[Card]) -> Vec<&str> {
    cards.iter().map(|card| card.id.as_str()).collect()
}

/// Scripted photo service. Holds its own copy of the cards so like/delete behave like the real one.
pub(crate) struct FakeRemote {
    profile: StdMutex<Profile>,
    cards: StdMutex<Vec<Card>>,
    failing: StdMutex<HashSet<&'static str>>,
    calls: StdMutex<Vec<RemoteCall>>,
    issued_ids: StdMutex<VecDeque<String>>,
    created: StdMutex<u32>,
    gate: Semaphore,
}

impl FakeRemote {
    pub(crate) fn new(profile: Profile, cards: Vec<Card>) -> Self {
        Self {
            profile: StdMutex::new(profile),
            cards: StdMutex::new(cards),
            failing: StdMutex::new(HashSet::new()),
            calls: StdMutex::new(Vec::new()),
            issued_ids: StdMutex::new(VecDeque::new()),
            created: StdMutex::new(0),
            gate: Semaphore::new(Semaphore::MAX_PERMITS),
        }
    }

    /// Mutations block until [`FakeRemote::release`] hands out permits.
    pub(crate) fn gated(profile: Profile, cards: Vec<Card>) -> Self {
        let mut remote = Self::new(profile, cards);
        remote.gate = Semaphore::new(0);
        remote
    }

    pub(crate) fn fail(&self, operation: &'static str) {
        self.failing.lock().expect("failing").insert(operation);
    }

    pub(crate) fn recover(&self, operation: &'static str) {
        self.failing.lock().expect("failing").remove(operation);
    }

    pub(crate) fn release(&self, permits: usize) {
        self.gate.add_permits(permits);
    }

    pub(crate) fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().expect("calls").clone()
    }

    /// Identity the service assigns to the next created card.
    pub(crate) fn issue_card_id(&self, id: &str) {
        self.issued_ids.lock().expect("issued ids").push_back(id.to_string());
    }

    fn record(&self, call: RemoteCall) {
        self.calls.lock().expect("calls").push(call);
    }

    fn check(&self, operation: &'static str) -> RemoteResult<()> {
        if self.failing.lock().expect("failing").contains(operation) {
            return Err(RemoteError::from_status(
                400,
                format!("{operation} rejected by test service"),
            ));
        }
        Ok(())
    }

    async fn pass_gate(&self) {
        self.gate.acquire().await.expect("gate open").forget();
    }
}

#[async_trait]
impl RemoteService for FakeRemote {
    async fn fetch_cards(&self) -> RemoteResult<Vec<Card>> {
        self.record(RemoteCall::FetchCards);
        self.check("fetch_cards")?;
        Ok(self.cards.lock().expect("cards").clone())
    }

    async fn fetch_profile(&self) -> RemoteResult<Profile> {
        self.record(RemoteCall::FetchProfile);
        self.check("fetch_profile")?;
        Ok(self.profile.lock().expect("profile").clone())
    }

    async fn update_profile(&self, display_name: &str, bio: &str) -> RemoteResult<Profile> {
        self.record(RemoteCall::UpdateProfile {
            name: display_name.to_string(),
            bio: bio.to_string(),
        });
        self.pass_gate().await;
        self.check("update_profile")?;
        let mut profile = self.profile.lock().expect("profile");
        profile.display_name = display_name.to_string();
        profile.bio = bio.to_string();
        Ok(profile.clone())
    }

    async fn update_avatar(&self, avatar_url: &str) -> RemoteResult<Profile> {
        self.record(RemoteCall::UpdateAvatar(avatar_url.to_string()));
        self.pass_gate().await;
        self.check("update_avatar")?;
        let mut profile = self.profile.lock().expect("profile");
        profile.avatar_url = avatar_url.to_string();
        Ok(profile.clone())
    }

    async fn create_card(&self, caption: &str, image_url: &str) -> RemoteResult<Card> {
        self.record(RemoteCall::CreateCard {
            caption: caption.to_string(),
            url: image_url.to_string(),
        });
        self.pass_gate().await;
        self.check("create_card")?;
        let id = {
            let mut created = self.created.lock().expect("created");
            *created += 1;
            self.issued_ids
                .lock()
                .expect("issued ids")
                .pop_front()
                .unwrap_or_else(|| format!("new-{}", *created))
        };
        let owner = self.profile.lock().expect("profile").id.clone();
        let card = Card {
            id: CardId::new(id),
            image_url: image_url.to_string(),
            caption: caption.to_string(),
            owner_id: owner,
            liked_by: BTreeSet::new(),
            created_at: None,
        };
        self.cards.lock().expect("cards").insert(0, card.clone());
        Ok(card)
    }

    async fn delete_card(&self, card_id: &CardId) -> RemoteResult<()> {
        self.record(RemoteCall::DeleteCard(card_id.clone()));
        self.pass_gate().await;
        self.check("delete_card")?;
        self.cards
            .lock()
            .expect("cards")
            .retain(|card| &card.id != card_id);
        Ok(())
    }

    async fn set_like(&self, card_id: &CardId, liked: bool) -> RemoteResult<Card> {
        self.record(RemoteCall::SetLike(card_id.clone(), liked));
        self.pass_gate().await;
        self.check("set_like")?;
        let viewer = self.profile.lock().expect("profile").id.clone();
        let mut cards = self.cards.lock().expect("cards");
        let card = cards
            .iter_mut()
            .find(|card| &card.id == card_id)
            .ok_or_else(|| RemoteError::from_status(404, format!("card {card_id} not found")))?;
        if liked {
            card.liked_by.insert(viewer);
        } else {
            card.liked_by.remove(&viewer);
        }
        Ok(card.clone())
    }
}

/// Starts a session over `remote` and asserts the initial fetch succeeded.
pub(crate) async fn started_session(remote: Arc<FakeRemote>) -> Session {
    let session = Session::new(remote);
    session.start().await.expect("start session");
    session
}

pub(crate) fn counts(calls: &[RemoteCall]) -> HashMap<&'static str, usize> {
    let mut counts = HashMap::new();
    for call in calls {
        let name = match call {
            RemoteCall::FetchCards => "fetch_cards",
            RemoteCall::FetchProfile => "fetch_profile",
            RemoteCall::UpdateProfile { .. } => "update_profile",
            RemoteCall::UpdateAvatar(_) => "update_avatar",
            RemoteCall::CreateCard { .. } => "create_card",
            RemoteCall::DeleteCard(_) => "delete_card",
            RemoteCall::SetLike(..) => "set_like",
        };
        *counts.entry(name).or_insert(0) += 1;
    }
    counts
}
