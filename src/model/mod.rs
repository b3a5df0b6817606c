//! Model module - session-side state and the catalog facade
//!
//! - `types`: plain data exchanged with the engine and with callers
//! - `clock`: playback position across sample-rate changes
//! - `callbacks`: load/unload subscribers
//! - `playlists`: playlist index space with the virtual starred entry
//! - `tracks`: load-gated track, album and cover extraction

mod types;
mod clock;
mod callbacks;
mod playlists;
mod tracks;

pub use types::{
    Bitrate, CoverImage, LoadState, OfflineStatus, OfflineSyncCounters, OfflineSyncStatus,
    PlaylistType, SearchQuery, TrackFields, TrackQuery,
};

pub use clock::{AudioClock, SharedClock, DEFAULT_SAMPLE_RATE};

pub use callbacks::{CallbackRegistry, SessionCallback, SessionEvent, Subscription, UserData};

pub use playlists::{PlaylistDirectory, FOLDER_NAME_CAPACITY, STARRED_FOLDER_NAME};

pub use tracks::{MetadataExtractor, ALBUM_NOT_LOADED, ARTIST_NOT_LOADED, LINK_CAPACITY};
