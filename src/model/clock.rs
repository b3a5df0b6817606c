//! Playback position derived from the frames the sink actually consumed

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Whole seconds played so far, tracked across sample-rate changes.
///
/// `play_time = elapsed_secs + samples / sample_rate`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AudioClock {
    elapsed_secs: u64,
    samples: u64,
    sample_rate: u32,
}

impl Default for AudioClock {
    fn default() -> Self {
        Self {
            elapsed_secs: 0,
            samples: 0,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

impl AudioClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_frames_delivered(&mut self, rate: u32, frames_accepted: u64) {
        if rate == self.sample_rate {
            self.samples += frames_accepted;
        } else if frames_accepted > 0 && rate > 0 {
            self.elapsed_secs += self.samples / u64::from(self.sample_rate);
            self.samples = frames_accepted;
            self.sample_rate = rate;
            tracing::debug!(rate, "Sample rate changed");
        }
    }

    pub fn play_time(&self) -> u64 {
        self.elapsed_secs + self.samples / u64::from(self.sample_rate)
    }

    pub fn seek(&mut self, pos_secs: u32) {
        self.elapsed_secs = u64::from(pos_secs);
        self.samples = 0;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

/// Clock shared between the control thread and the music-delivery callback
#[derive(Clone, Debug, Default)]
pub struct SharedClock(Arc<Mutex<AudioClock>>);

impl SharedClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> MutexGuard<'_, AudioClock> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
