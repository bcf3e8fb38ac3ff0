//! The only component that talks to the [`RemoteService`]; reconciles responses into the view.

use std::sync::Arc;

use shared::domain::{Card, CardId, LikeDirection, UserId};
use tokio::sync::Mutex;
use tracing::info;

use crate::{
    error::{InvariantViolation, SyncError},
    events::EventBus,
    remote::RemoteService,
    view_state::{ModalState, ViewState},
};

pub struct SyncController {
    remote: Arc<dyn RemoteService>,
    view: Arc<Mutex<ViewState>>,
    events: EventBus,
}

impl SyncController {
    pub(crate) fn new(
        remote: Arc<dyn RemoteService>,
        view: Arc<Mutex<ViewState>>,
        events: EventBus,
    ) -> Self {
        Self {
            remote,
            view,
            events,
        }
    }

    /// Fetches cards and profile concurrently; the view is initialized only if both arrive.
    pub async fn start(&self) -> Result<(), SyncError> {
        let (cards, profile) =
            futures::join!(self.remote.fetch_cards(), self.remote.fetch_profile());

        let (cards, profile) = match (cards, profile) {
            (Ok(cards), Ok(profile)) => (cards, profile),
            (cards, profile) => {
                // Log both failures; the caller sees the first.
                let cards_err = cards.err().map(|source| {
                    self.events.failed(SyncError::Fetch {
                        operation: "fetch_cards",
                        source,
                    })
                });
                let profile_err = profile.err().map(|source| {
                    self.events.failed(SyncError::Fetch {
                        operation: "fetch_profile",
                        source,
                    })
                });
                return Err(cards_err
                    .or(profile_err)
                    .unwrap_or(SyncError::Invariant(InvariantViolation::NotInitialized)));
            }
        };

        let card_count = cards.len();
        let user_id = profile.id.clone();
        self.view
            .lock()
            .await
            .initialize(profile, cards)
            .map_err(|violation| self.events.failed(violation.into()))?;
        info!(user_id = %user_id, card_count, "sync: view initialized");
        self.events.changed();
        Ok(())
    }

    pub async fn edit_profile(&self, display_name: &str, bio: &str) -> Result<(), SyncError> {
        self.require_modal(&ModalState::EditProfile, "edit_profile")
            .await?;
        let profile = self
            .remote
            .update_profile(display_name, bio)
            .await
            .map_err(|source| {
                self.events.failed(SyncError::Mutation {
                    operation: "update_profile",
                    source,
                })
            })?;

        {
            let mut view = self.view.lock().await;
            view.replace_profile(profile);
            close_if_active(&mut view, &ModalState::EditProfile);
        }
        info!("sync: profile updated");
        self.events.changed();
        Ok(())
    }

    pub async fn change_avatar(&self, avatar_url: &str) -> Result<(), SyncError> {
        self.require_modal(&ModalState::EditAvatar, "change_avatar")
            .await?;
        let profile = self.remote.update_avatar(avatar_url).await.map_err(|source| {
            self.events.failed(SyncError::Mutation {
                operation: "update_avatar",
                source,
            })
        })?;

        {
            let mut view = self.view.lock().await;
            view.replace_profile(profile);
            close_if_active(&mut view, &ModalState::EditAvatar);
        }
        info!("sync: avatar updated");
        self.events.changed();
        Ok(())
    }

    pub async fn add_card(&self, caption: &str, image_url: &str) -> Result<CardId, SyncError> {
        self.require_modal(&ModalState::AddPlace, "add_card").await?;
        let card = self
            .remote
            .create_card(caption, image_url)
            .await
            .map_err(|source| {
                self.events.failed(SyncError::Mutation {
                    operation: "create_card",
                    source,
                })
            })?;

        let card_id = card.id.clone();
        {
            let mut view = self.view.lock().await;
            view.prepend_card(card)
                .map_err(|violation| self.events.failed(violation.into()))?;
            close_if_active(&mut view, &ModalState::AddPlace);
        }
        info!(card_id = %card_id, "sync: card created");
        self.events.changed();
        Ok(card_id)
    }

    /// Toggles the viewer's like on `card`. The direction comes from this snapshot only;
    /// two rapid calls with the same snapshot send the same direction twice.
    pub async fn toggle_like(&self, card: &Card) -> Result<LikeDirection, SyncError> {
        let viewer = self.viewer_for(&card.id).await?;
        let direction = LikeDirection::toggle_for(card, &viewer);

        let updated = self
            .remote
            .set_like(&card.id, direction.as_liked())
            .await
            .map_err(|source| {
                self.events.failed(SyncError::Mutation {
                    operation: "set_like",
                    source,
                })
            })?;

        self.view
            .lock()
            .await
            .replace_card(&card.id, updated)
            .map_err(|violation| self.events.failed(violation.into()))?;
        info!(card_id = %card.id, %direction, "sync: like reconciled");
        self.events.changed();
        Ok(direction)
    }

    pub async fn delete_card(&self, card_id: &CardId) -> Result<(), SyncError> {
        if self.view.lock().await.card(card_id).is_none() {
            return Err(self
                .events
                .failed(InvariantViolation::UnknownCard(card_id.clone()).into()));
        }
        self.remote.delete_card(card_id).await.map_err(|source| {
            self.events.failed(SyncError::Mutation {
                operation: "delete_card",
                source,
            })
        })?;

        self.view
            .lock()
            .await
            .remove_card(card_id)
            .map_err(|violation| self.events.failed(violation.into()))?;
        info!(card_id = %card_id, "sync: card deleted");
        self.events.changed();
        Ok(())
    }

    /// Deletes the card held by the open confirmation modal.
    pub async fn confirm_delete(&self) -> Result<(), SyncError> {
        let card_id = {
            let view = self.view.lock().await;
            match view.modal() {
                ModalState::ConfirmDelete(card_id) => card_id.clone(),
                active => {
                    return Err(self.events.failed(
                        InvariantViolation::ModalNotOpen {
                            required: "confirm_delete",
                            active: active.clone(),
                        }
                        .into(),
                    ));
                }
            }
        };
        // The confirmation modal references the card, so a successful removal closes it.
        self.delete_card(&card_id).await
    }

    async fn require_modal(
        &self,
        required: &ModalState,
        operation: &'static str,
    ) -> Result<(), SyncError> {
        let view = self.view.lock().await;
        if view.modal() == required {
            return Ok(());
        }
        let violation = InvariantViolation::ModalNotOpen {
            required: operation,
            active: view.modal().clone(),
        };
        drop(view);
        Err(self.events.failed(violation.into()))
    }

    async fn viewer_for(&self, card_id: &CardId) -> Result<UserId, SyncError> {
        let view = self.view.lock().await;
        let violation = match view.current_user_id() {
            None => InvariantViolation::NotInitialized,
            Some(_) if view.card(card_id).is_none() => {
                InvariantViolation::UnknownCard(card_id.clone())
            }
            Some(viewer) => return Ok(viewer.clone()),
        };
        drop(view);
        Err(self.events.failed(violation.into()))
    }
}

/// Success closes the modal that gated the request, not one the user opened since.
fn close_if_active(view: &mut ViewState, gating: &ModalState) {
    if view.modal() == gating {
        view.clear_modal();
    }
}

#[cfg(test)]
#[path = "tests/sync_tests.rs"]
mod tests;
