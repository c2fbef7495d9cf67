//! The approval inbox workflow, independent of any terminal.
//!
//! [`InboxScreen`] is driven by user intents and backend completions and
//! answers with [`Effect`]s; the [`Dispatcher`] runs those effects against an
//! [`InboxApi`](crate::api::InboxApi) off the UI thread.

pub mod confirm;
pub mod dispatch;
pub mod qr;
pub mod screen;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use confirm::{ConfirmFlow, ConfirmState, PendingAction};
pub use dispatch::Dispatcher;
pub use qr::{QrArtifact, QrState, QrViewer};
pub use screen::{ApiEvent, DetailPane, Effect, InboxScreen, NoticeLevel, Notification, Phase};
pub use store::{FetchTicket, InboxStore};
