//! Client-side state for the photo feed: the view, its sync with the photo service,
//! and the modal dialogs that mutate it.

pub mod error;
pub mod events;
pub mod http;
pub mod modal;
pub mod remote;
pub mod session;
pub mod sync;
pub mod view_state;

pub use error::{InvariantViolation, SyncError};
pub use events::{Intent, SessionEvent};
pub use http::{HttpRemoteService, RemoteSettings};
pub use modal::ModalCoordinator;
pub use remote::{
    MissingRemoteService, RemoteError, RemoteErrorCategory, RemoteResult, RemoteService,
};
pub use session::Session;
pub use sync::SyncController;
pub use view_state::{ModalState, ViewSnapshot, ViewState};

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "tests/http_tests.rs"]
mod http_tests;
