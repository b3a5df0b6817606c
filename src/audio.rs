use std::sync::Arc;

use crate::model::SharedClock;

/// Layout of the frames the engine decodes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AudioFormat {
    pub sample_rate: u32,
    pub channels: u16,
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self {
            sample_rate: crate::model::DEFAULT_SAMPLE_RATE,
            channels: 2,
        }
    }
}

/// Audio output. Samples are interleaved native-endian i16.
pub trait AudioSink: Send + Sync {
    /// Offers `num_frames` frames and returns how many the sink accepted.
    ///
    /// `num_frames == 0` (with no format) means no more frames are coming for
    /// now: the sink should drop what it buffered and pause.
    fn deliver(&self, format: Option<&AudioFormat>, frames: &[i16], num_frames: usize) -> usize;

    fn flush(&self) {
        self.deliver(None, &[], 0);
    }
}

/// The engine's music-delivery callback.
///
/// Forwards decoded frames to the sink and counts what the sink accepted into
/// the playback clock.
#[derive(Clone)]
pub struct MusicDelivery {
    sink: Arc<dyn AudioSink>,
    clock: SharedClock,
}

impl MusicDelivery {
    pub(crate) fn new(sink: Arc<dyn AudioSink>, clock: SharedClock) -> Self {
        Self { sink, clock }
    }

    pub fn deliver(&self, format: &AudioFormat, frames: &[i16], num_frames: usize) -> usize {
        let accepted = self.sink.deliver(Some(format), frames, num_frames);
        self.clock
            .lock()
            .on_frames_delivered(format.sample_rate, accepted as u64);
        accepted
    }
}
