//! Hand-off of engine notifications to the control thread
//!
//! The engine calls back from threads this crate does not control. Nothing in
//! those contexts touches session state: each callback becomes a
//! [`Notification`] pushed onto an unbounded channel that the session's run
//! loop drains.

use tokio::sync::mpsc;

use super::handle::BrowseHandle;
use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    LoggedIn(Result<(), EngineError>),
    LoggedOut,
    MetadataUpdated,
    ConnectionError(EngineError),
    MessageToUser(String),
    /// The engine wants `process_events` to run soon
    Wake,
    PlayTokenLost,
    LogMessage(String),
    EndOfTrack,
    ContainerLoaded,
    BrowseComplete(BrowseHandle),
}

/// Cloneable, thread-safe sender the engine uses for every notification.
///
/// Sending never blocks, so every method is safe from audio threads and from
/// inside other engine callbacks.
#[derive(Clone, Debug)]
pub struct EngineNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl EngineNotifier {
    pub(crate) fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn notify(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            tracing::trace!("Session gone, dropping engine notification");
        }
    }

    /// Schedules an event-processing pass on the control thread.
    pub fn request_wake(&self) {
        self.notify(Notification::Wake);
    }
}
