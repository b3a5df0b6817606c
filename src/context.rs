use std::sync::Arc;

use crate::audio::AudioSink;
use crate::config::Config;
use crate::engine::Engine;
use crate::model::SharedClock;

/// Process-wide collaborators every session component is built from.
///
/// Created once by [`crate::Session::create`]; cloning only bumps reference
/// counts.
#[derive(Clone)]
pub struct SessionContext {
    pub engine: Arc<dyn Engine>,
    pub sink: Arc<dyn AudioSink>,
    pub clock: SharedClock,
    pub config: Arc<Config>,
}
