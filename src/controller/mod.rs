//! Controller module - the session and everything that runs on its thread
//!
//! All session state lives in [`Session`] and is only touched from the task
//! that owns it. `impl Session` is split by responsibility:
//!
//! - `scheduler`: the single re-arming timer around `process_events`
//! - `lifecycle`: login, load/unload, play/pause, seek
//! - `notifications`: the run loop and engine notification handlers
//! - `catalog`: playlist, track and browsing queries

mod scheduler;
mod lifecycle;
mod notifications;
mod catalog;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::audio::{AudioSink, MusicDelivery};
use crate::config::{self, Config};
use crate::context::SessionContext;
use crate::engine::{
    BrowseHandle, Engine, EngineCallbacks, EngineConfig, EngineNotifier, Notification, TrackHandle,
};
use crate::error::{EngineError, Result, SessionError};
use crate::model::{Bitrate, CallbackRegistry, MetadataExtractor, PlaylistDirectory};

pub use scheduler::EventScheduler;

const CACHE_DIR: &str = ".cache/spop";
const DEVICE_NAME: &str = "spop";

/// Runs on the control thread when the current track ends. May load the
/// next track.
pub type NextTrackHook = Box<dyn FnMut(&mut Session) -> anyhow::Result<()> + Send>;

/// Runs once on the control thread when a search or browse completes.
pub type BrowseCallback = Box<dyn FnOnce(BrowseHandle) + Send>;

/// The single track slot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    Empty,
    Loaded(TrackHandle),
    Playing(TrackHandle),
    Paused(TrackHandle),
}

impl PlayerState {
    pub fn track(self) -> Option<TrackHandle> {
        match self {
            PlayerState::Empty => None,
            PlayerState::Loaded(track) | PlayerState::Playing(track) | PlayerState::Paused(track) => {
                Some(track)
            }
        }
    }
}

pub struct Session {
    pub(crate) ctx: SessionContext,
    pub(crate) scheduler: EventScheduler,
    pub(crate) callbacks: CallbackRegistry,
    pub(crate) playlists: PlaylistDirectory,
    pub(crate) metadata: MetadataExtractor,
    pub(crate) player: PlayerState,
    notifier: EngineNotifier,
    inbox: mpsc::UnboundedReceiver<Notification>,
    next_track: Option<NextTrackHook>,
    pending_browses: HashMap<BrowseHandle, BrowseCallback>,
}

impl Session {
    /// Creates the engine session through `connect` and applies the bitrate
    /// preferences from `config`.
    ///
    /// `connect` receives the engine settings and the callbacks the engine
    /// must report through; its failure is fatal.
    pub fn create<F>(config: Config, sink: Arc<dyn AudioSink>, connect: F) -> Result<Self>
    where
        F: FnOnce(EngineConfig, EngineCallbacks) -> std::result::Result<Arc<dyn Engine>, EngineError>,
    {
        tracing::debug!("Creating session...");

        let clock = crate::model::SharedClock::new();
        let (notifier, inbox) = EngineNotifier::channel();
        let callbacks = EngineCallbacks {
            notifier: notifier.clone(),
            music: MusicDelivery::new(Arc::clone(&sink), clock.clone()),
        };
        let engine = connect(Self::engine_config(), callbacks).map_err(SessionError::SessionCreate)?;

        let ctx = SessionContext {
            engine,
            sink,
            clock,
            config: Arc::new(config),
        };

        let high = ctx.config.get_bool(config::HIGH_BITRATE, true);
        tracing::debug!(high, "Setting preferred bitrate");
        ctx.engine.set_preferred_bitrate(Bitrate::preferred(high));

        let offline_high = ctx.config.get_bool(config::OFFLINE_HIGH_BITRATE, true);
        tracing::debug!(high = offline_high, "Setting preferred offline bitrate");
        ctx.engine
            .set_preferred_offline_bitrate(Bitrate::preferred(offline_high), false);

        tracing::debug!("Session created.");
        Ok(Self {
            scheduler: EventScheduler::new(&ctx),
            callbacks: CallbackRegistry::new(),
            playlists: PlaylistDirectory::new(&ctx),
            metadata: MetadataExtractor::new(&ctx),
            player: PlayerState::Empty,
            notifier,
            inbox,
            next_track: None,
            pending_browses: HashMap::new(),
            ctx,
        })
    }

    fn engine_config() -> EngineConfig {
        let cache = PathBuf::from(CACHE_DIR);
        EngineConfig {
            settings_location: cache.clone(),
            cache_location: cache,
            user_agent: format!("{} {}", DEVICE_NAME, env!("CARGO_PKG_VERSION")),
            device_id: Self::device_id(),
            compress_playlists: false,
            dont_save_metadata_for_playlists: false,
            initially_unload_playlists: false,
        }
    }

    fn device_id() -> String {
        let hostname = hostname::get()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|_| "unknown".to_string());
        format!("{}-{}", DEVICE_NAME, hostname)
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    /// Sender for engine-side code that needs to wake the control thread.
    pub fn notifier(&self) -> EngineNotifier {
        self.notifier.clone()
    }

    pub fn scheduler(&self) -> &EventScheduler {
        &self.scheduler
    }

    /// Services the engine now and re-arms the wakeup timer.
    pub fn drive_events(&mut self) {
        self.scheduler.drive_events();
    }

    pub fn player_state(&self) -> PlayerState {
        self.player
    }

    pub fn set_next_track_hook(&mut self, hook: NextTrackHook) {
        self.next_track = Some(hook);
    }
}
