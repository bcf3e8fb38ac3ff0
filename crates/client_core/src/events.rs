//! Messages between the presentation layer and the session core.

use shared::domain::CardId;
use tokio::sync::broadcast;
use tracing::{error, warn};

use crate::error::SyncError;

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// A discrete user intent emitted by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    OpenEditProfile,
    OpenEditAvatar,
    OpenAddPlace,
    OpenConfirmDelete(CardId),
    View(CardId),
    Close,
    SubmitEditProfile { name: String, bio: String },
    SubmitAvatar { url: String },
    SubmitAddCard { caption: String, url: String },
    Like(CardId),
    Delete(CardId),
    ConfirmDelete,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenEditProfile => "open_edit_profile",
            Self::OpenEditAvatar => "open_edit_avatar",
            Self::OpenAddPlace => "open_add_place",
            Self::OpenConfirmDelete(_) => "open_confirm_delete",
            Self::View(_) => "view",
            Self::Close => "close",
            Self::SubmitEditProfile { .. } => "submit_edit_profile",
            Self::SubmitAvatar { .. } => "submit_avatar",
            Self::SubmitAddCard { .. } => "submit_add_card",
            Self::Like(_) => "like",
            Self::Delete(_) => "delete",
            Self::ConfirmDelete => "confirm_delete",
        }
    }
}

/// Published to subscribers after the view changes or an attempted action fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    StateChanged,
    Failed(SyncError),
}

/// Fan-out of [`SessionEvent`]s; also the single place failures get logged.
#[derive(Clone)]
pub(crate) struct EventBus {
    tx: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    pub(crate) fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { tx }
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    pub(crate) fn changed(&self) {
        let _ = self.tx.send(SessionEvent::StateChanged);
    }

    /// Logs `err` with its operation context, publishes it, and hands it back.
    pub(crate) fn failed(&self, err: SyncError) -> SyncError {
        match &err {
            SyncError::Invariant(violation) => {
                warn!("session: invariant violation ignored: {violation}");
            }
            SyncError::Fetch { operation, source } | SyncError::Mutation { operation, source } => {
                error!(
                    operation = *operation,
                    category = ?source.category(),
                    "request to photo service failed: {}",
                    source.message()
                );
            }
        }
        let _ = self.tx.send(SessionEvent::Failed(err.clone()));
        err
    }
}
