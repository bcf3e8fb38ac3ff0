//! Session-scoped owner of the view and the intent entry point for the presentation layer.

use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};
use tracing::debug;

use crate::{
    error::{InvariantViolation, SyncError},
    events::{EventBus, Intent, SessionEvent},
    modal::ModalCoordinator,
    remote::RemoteService,
    sync::SyncController,
    view_state::{ModalState, ViewSnapshot, ViewState},
};

pub struct Session {
    view: Arc<Mutex<ViewState>>,
    sync: SyncController,
    modals: ModalCoordinator,
    events: EventBus,
}

impl Session {
    pub fn new(remote: Arc<dyn RemoteService>) -> Self {
        let view = Arc::new(Mutex::new(ViewState::new()));
        let events = EventBus::new();
        Self {
            sync: SyncController::new(remote, Arc::clone(&view), events.clone()),
            modals: ModalCoordinator::new(Arc::clone(&view), events.clone()),
            view,
            events,
        }
    }

    pub async fn start(&self) -> Result<(), SyncError> {
        self.sync.start().await
    }

    /// Applies one intent. Failures are already logged and published when this returns.
    pub async fn dispatch(&self, intent: Intent) -> Result<(), SyncError> {
        debug!(intent = intent.name(), "session: dispatching intent");
        match intent {
            Intent::OpenEditProfile => self.modals.open(ModalState::EditProfile).await,
            Intent::OpenEditAvatar => self.modals.open(ModalState::EditAvatar).await,
            Intent::OpenAddPlace => self.modals.open(ModalState::AddPlace).await,
            Intent::OpenConfirmDelete(card_id) => {
                self.modals.open(ModalState::ConfirmDelete(card_id)).await
            }
            Intent::View(card_id) => self.modals.view(&card_id).await,
            Intent::Close => {
                self.modals.close().await;
                Ok(())
            }
            Intent::SubmitEditProfile { name, bio } => self.sync.edit_profile(&name, &bio).await,
            Intent::SubmitAvatar { url } => self.sync.change_avatar(&url).await,
            Intent::SubmitAddCard { caption, url } => {
                self.sync.add_card(&caption, &url).await.map(|_| ())
            }
            Intent::Like(card_id) => {
                let card = self.view.lock().await.card(&card_id).cloned();
                match card {
                    Some(card) => self.sync.toggle_like(&card).await.map(|_| ()),
                    None => Err(self
                        .events
                        .failed(InvariantViolation::UnknownCard(card_id).into())),
                }
            }
            Intent::Delete(card_id) => self.sync.delete_card(&card_id).await,
            Intent::ConfirmDelete => self.sync.confirm_delete().await,
        }
    }

    pub async fn snapshot(&self) -> ViewSnapshot {
        self.view.lock().await.snapshot()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
