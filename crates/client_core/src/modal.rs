//! Routes open/close intents onto the view's single modal slot.

use std::sync::Arc;

use shared::domain::CardId;
use tokio::sync::Mutex;
use tracing::debug;

use crate::{
    error::SyncError,
    events::EventBus,
    view_state::{ModalState, ViewState},
};

pub struct ModalCoordinator {
    view: Arc<Mutex<ViewState>>,
    events: EventBus,
}

impl ModalCoordinator {
    pub(crate) fn new(view: Arc<Mutex<ViewState>>, events: EventBus) -> Self {
        Self { view, events }
    }

    /// Opens `state` from the closed position. Opening over another modal is ignored.
    pub async fn open(&self, state: ModalState) -> Result<(), SyncError> {
        if !state.is_open() {
            self.close().await;
            return Ok(());
        }
        let name = state.name();
        self.view
            .lock()
            .await
            .set_modal(state)
            .map_err(|violation| self.events.failed(violation.into()))?;
        debug!(modal = name, "modal: opened");
        self.events.changed();
        Ok(())
    }

    /// Shows `card_id` full size.
    pub async fn view(&self, card_id: &CardId) -> Result<(), SyncError> {
        self.view
            .lock()
            .await
            .set_selection(card_id)
            .map_err(|violation| self.events.failed(violation.into()))?;
        debug!(card_id = %card_id, "modal: viewing card");
        self.events.changed();
        Ok(())
    }

    /// Closes whatever is open. Returns what was closed.
    pub async fn close(&self) -> ModalState {
        let closed = self.view.lock().await.clear_modal();
        if closed.is_open() {
            debug!(modal = closed.name(), "modal: closed");
            self.events.changed();
        }
        closed
    }

    pub async fn active(&self) -> ModalState {
        self.view.lock().await.modal().clone()
    }
}

#[cfg(test)]
#[path = "tests/modal_tests.rs"]
mod tests;
