//! Run loop of the control thread and the engine notification handlers

use std::future::Future;

use tokio::time::Instant;

use crate::engine::{BrowseHandle, Notification};
use crate::error::{EngineError, Result, SessionError};
use crate::logging;

use super::Session;

enum Step {
    Shutdown,
    Notification(Option<Notification>),
    Wakeup,
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

impl Session {
    /// Services notifications and the engine wakeup timer until `shutdown`
    /// completes. Returns early only on a fatal error.
    pub async fn run_until<F: Future>(&mut self, shutdown: F) -> Result<()> {
        tokio::pin!(shutdown);
        tracing::info!("Starting session event loop");

        loop {
            let wakeup = self.scheduler.next_wakeup();
            let step = tokio::select! {
                biased;
                _ = &mut shutdown => Step::Shutdown,
                notification = self.inbox.recv() => Step::Notification(notification),
                _ = sleep_until(wakeup) => Step::Wakeup,
            };

            match step {
                Step::Shutdown => {
                    tracing::debug!("Session event loop shutting down");
                    return Ok(());
                }
                Step::Notification(Some(notification)) => self.handle_notification(notification)?,
                Step::Notification(None) => return Ok(()),
                Step::Wakeup => {
                    self.scheduler.fire();
                }
            }
        }
    }

    /// Handles every notification already queued, without waiting.
    pub fn process_pending(&mut self) -> Result<usize> {
        let mut handled = 0;
        while let Ok(notification) = self.inbox.try_recv() {
            self.handle_notification(notification)?;
            handled += 1;
        }
        Ok(handled)
    }

    pub fn handle_notification(&mut self, notification: Notification) -> Result<()> {
        match notification {
            Notification::LoggedIn(result) => self.on_logged_in(result)?,
            Notification::LoggedOut => tracing::info!("Logged out."),
            Notification::MetadataUpdated => tracing::trace!("Metadata updated"),
            Notification::ConnectionError(error) => {
                tracing::warn!(error = %error, "Connection error");
            }
            Notification::MessageToUser(message) => tracing::info!("{}", message),
            Notification::Wake => {
                self.scheduler.drive_events();
            }
            Notification::PlayTokenLost => tracing::warn!("Play token lost."),
            Notification::LogMessage(line) => logging::engine_message(&line),
            Notification::EndOfTrack => self.on_end_of_track(),
            Notification::ContainerLoaded => {
                tracing::debug!("Container loaded.");
                self.playlists.mark_container_loaded();
            }
            Notification::BrowseComplete(handle) => self.on_browse_complete(handle),
        }
        Ok(())
    }

    fn on_logged_in(&mut self, result: std::result::Result<(), EngineError>) -> Result<()> {
        match result {
            Ok(()) => tracing::info!("Logged in."),
            Err(error) => tracing::warn!(error = %error, "Login failed"),
        }

        tracing::debug!("Getting playlist container...");
        let container = self
            .ctx
            .engine
            .playlist_container()
            .ok_or(SessionError::ContainerUnavailable)?;
        self.playlists.attach_container(container);
        self.ctx.engine.watch_container(container);
        tracing::debug!("Playlist container ready.");
        Ok(())
    }

    fn on_end_of_track(&mut self) {
        tracing::debug!("End of track.");

        let Some(mut hook) = self.next_track.take() else {
            tracing::debug!("No next-track hook installed");
            return;
        };
        if let Err(e) = hook(self) {
            tracing::error!(error = %e, "Failed to advance to next track");
        }
        // The hook may have installed a replacement for itself.
        if self.next_track.is_none() {
            self.next_track = Some(hook);
        }
    }

    fn on_browse_complete(&mut self, handle: BrowseHandle) {
        match self.pending_browses.remove(&handle) {
            Some(on_complete) => on_complete(handle),
            None => tracing::warn!(handle = ?handle, "Completion for unknown browse request"),
        }
    }
}
