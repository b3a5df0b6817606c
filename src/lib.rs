//! Control layer of a music player driving an external streaming session.
//!
//! The engine behind [`engine::Engine`] does login, catalog retrieval, decoding
//! and transport. This crate keeps the engine's event loop serviced, tracks the
//! playback clock, fans out load/unload events and exposes a playlist and
//! track view over the engine's catalog objects.
//!
//! A host wires it up roughly like this:
//!
//! ```ignore
//! spop::logging::init_logging()?;
//! let config = spop::Config::load(".config/spop.json")?;
//! let mut session = spop::Session::create(config, sink, |settings, callbacks| {
//!     native::connect(settings, callbacks)
//! })?;
//! session.login(user, password);
//! session.run_until(tokio::signal::ctrl_c()).await?;
//! ```

pub mod audio;
pub mod config;
pub mod context;
pub mod controller;
pub mod engine;
pub mod error;
pub mod logging;
pub mod model;

pub use audio::{AudioFormat, AudioSink, MusicDelivery};
pub use config::Config;
pub use context::SessionContext;
pub use controller::{BrowseCallback, EventScheduler, NextTrackHook, PlayerState, Session};
pub use error::{EngineError, Result, SessionError};
