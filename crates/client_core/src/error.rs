//! Failure taxonomy for the session core.

use shared::domain::CardId;
use thiserror::Error;

use crate::{remote::RemoteError, view_state::ModalState};

/// A request that would break a view invariant. Logged and ignored, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("cannot open {requested:?} while {active:?} is open")]
    ModalAlreadyOpen {
        active: ModalState,
        requested: ModalState,
    },
    #[error("{required} requires its modal to be open (active: {active:?})")]
    ModalNotOpen {
        required: &'static str,
        active: ModalState,
    },
    #[error("card {0} is not in the collection")]
    UnknownCard(CardId),
    #[error("card {0} is already in the collection")]
    DuplicateCard(CardId),
    #[error("view state is already initialized")]
    AlreadyInitialized,
    #[error("view state is not initialized yet")]
    NotInitialized,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("startup fetch '{operation}' failed: {source}")]
    Fetch {
        operation: &'static str,
        #[source]
        source: RemoteError,
    },
    #[error("mutation '{operation}' failed: {source}")]
    Mutation {
        operation: &'static str,
        #[source]
        source: RemoteError,
    },
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl SyncError {
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Fetch { operation, .. } | Self::Mutation { operation, .. } => Some(*operation),
            Self::Invariant(_) => None,
        }
    }

    pub fn remote(&self) -> Option<&RemoteError> {
        match self {
            Self::Fetch { source, .. } | Self::Mutation { source, .. } => Some(source),
            Self::Invariant(_) => None,
        }
    }

    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::Invariant(_))
    }
}
