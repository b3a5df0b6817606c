//! Login and player lifecycle: Empty -> Loaded -> Playing/Paused -> Empty

use crate::engine::TrackHandle;
use crate::error::{Result, SessionError};
use crate::model::{SessionCallback, SessionEvent, Subscription, UserData};

use super::{PlayerState, Session};

impl Session {
    pub fn login(&self, username: &str, password: &str) {
        tracing::debug!(username, "Logging in...");
        self.ctx.engine.login(username, password, true);
    }

    pub fn logout(&self) {
        tracing::debug!("Logging out...");
        self.ctx.engine.logout();
    }

    /// Loads `track` into the player without starting playback.
    pub fn load(&mut self, track: TrackHandle) -> Result<()> {
        tracing::debug!(track = ?track, "Loading track.");

        let result = self.ctx.engine.player_load(track);
        crate::log_engine_result!("player_load", result);
        result.map_err(SessionError::LoadRejected)?;
        self.player = PlayerState::Loaded(track);

        // Let the engine start buffering right away.
        self.scheduler.drive_events();

        self.callbacks.dispatch(&SessionEvent::TrackLoaded(track));
        Ok(())
    }

    /// Subscribers hear about the unload while the track is still loaded.
    pub fn unload(&mut self) {
        tracing::debug!(track = ?self.player.track(), "Unloading track.");

        self.callbacks.dispatch(&SessionEvent::TrackUnloaded);

        self.ctx.engine.player_play(false);
        self.ctx.sink.flush();
        self.ctx.engine.player_unload();
        self.player = PlayerState::Empty;
        self.scheduler.drive_events();
        self.ctx.clock.lock().reset();
    }

    pub fn set_playing(&mut self, play: bool) {
        tracing::debug!(play, "Setting playback state");
        self.ctx.engine.player_play(play);

        if !play {
            // Stop the sink from draining stale audio while paused.
            self.ctx.sink.flush();
        }
        if let Some(track) = self.player.track() {
            self.player = if play {
                PlayerState::Playing(track)
            } else {
                PlayerState::Paused(track)
            };
        }

        self.scheduler.drive_events();
    }

    pub fn seek(&mut self, pos_secs: u32) {
        tracing::debug!(pos_secs, "Seeking");
        self.ctx.engine.player_seek(pos_secs.saturating_mul(1000));
        self.ctx.clock.lock().seek(pos_secs);
        self.scheduler.drive_events();
    }

    /// Whole seconds into the current track.
    pub fn play_time(&self) -> u64 {
        self.ctx.clock.lock().play_time()
    }

    pub fn subscribe(&mut self, callback: SessionCallback, user_data: UserData) -> Subscription {
        let outcome = self.callbacks.subscribe(callback, user_data);
        tracing::trace!(?outcome, subscribers = self.callbacks.len(), "Session subscription");
        outcome
    }
}
