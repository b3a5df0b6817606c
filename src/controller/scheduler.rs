//! Timer that keeps the engine's event loop serviced

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::context::SessionContext;
use crate::engine::Engine;

/// Deadlines at or below this mean "more work is ready now".
const IMMEDIATE: Duration = Duration::from_millis(1);

/// Drives `Engine::process_events` and holds at most one pending wakeup.
pub struct EventScheduler {
    engine: Arc<dyn Engine>,
    pending: Option<Instant>,
}

impl EventScheduler {
    pub fn new(ctx: &SessionContext) -> Self {
        Self {
            engine: Arc::clone(&ctx.engine),
            pending: None,
        }
    }

    /// Drains ready engine work, then arms a single wakeup for the deadline
    /// the engine asked for. Any wakeup armed earlier is cancelled first.
    pub fn drive_events(&mut self) -> Duration {
        self.cancel();

        let mut passes = 0u32;
        let next = loop {
            passes += 1;
            let next = self.engine.process_events();
            if next > IMMEDIATE {
                break next;
            }
        };

        tracing::trace!(passes, deadline_ms = next.as_millis() as u64, "Processed engine events");
        self.arm(next);
        next
    }

    fn cancel(&mut self) {
        if self.pending.take().is_some() {
            tracing::trace!("Cancelled pending engine wakeup");
        }
    }

    fn arm(&mut self, after: Duration) {
        self.pending = Some(Instant::now() + after);
    }

    /// When the run loop has to call `drive_events` again.
    pub fn next_wakeup(&self) -> Option<Instant> {
        self.pending
    }

    /// Called by the run loop once the armed deadline has passed.
    pub(crate) fn fire(&mut self) -> Duration {
        self.pending = None;
        self.drive_events()
    }
}
