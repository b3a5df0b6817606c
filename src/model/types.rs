//! Core type definitions shared between the engine surface and the facade

/// Kind of entry in the playlist container
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaylistType {
    Playlist,
    StartFolder,
    EndFolder,
    Placeholder,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bitrate {
    Kbps160,
    Kbps320,
}

impl Bitrate {
    pub fn preferred(high: bool) -> Self {
        if high { Bitrate::Kbps320 } else { Bitrate::Kbps160 }
    }
}

/// Offline availability of a single playlist
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OfflineStatus {
    No,
    Yes,
    Downloading,
    Waiting,
}

/// Track counters of an offline synchronisation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OfflineSyncCounters {
    pub queued_tracks: u32,
    pub done_tracks: u32,
    pub copied_tracks: u32,
    pub willnotcopy_tracks: u32,
    pub error_tracks: u32,
    pub syncing: bool,
}

/// Snapshot of the session's offline synchronisation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OfflineSyncStatus {
    pub counters: OfflineSyncCounters,
    pub sync_in_progress: bool,
    pub tracks_to_sync: u32,
    pub num_playlists: u32,
    pub time_left_secs: u32,
}

/// Result ranges requested from a search
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    pub track_offset: u32,
    pub track_count: u32,
    pub album_offset: u32,
    pub album_count: u32,
    pub artist_offset: u32,
    pub artist_count: u32,
}

impl SearchQuery {
    /// Same limit for every result kind, starting at the first result.
    pub fn with_limit(query: impl Into<String>, limit: u32) -> Self {
        Self {
            query: query.into(),
            track_offset: 0,
            track_count: limit,
            album_offset: 0,
            album_count: limit,
            artist_offset: 0,
            artist_count: limit,
        }
    }
}

/// Outcome of a query against an object the engine may still be fetching.
///
/// `NotLoaded` is not an error: retry once a metadata-updated notification
/// arrives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState<T> {
    Loaded(T),
    NotLoaded,
}

impl<T> LoadState<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded(_))
    }

    pub fn loaded(self) -> Option<T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            LoadState::NotLoaded => None,
        }
    }
}

/// Which fields to pull out of a track
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrackQuery {
    pub name: bool,
    pub artists: bool,
    pub album: bool,
    pub link: bool,
    pub duration: bool,
}

impl TrackQuery {
    pub fn all() -> Self {
        Self {
            name: true,
            artists: true,
            album: true,
            link: true,
            duration: true,
        }
    }
}

/// Human-readable track fields; `None` for every field not requested
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrackFields {
    pub name: Option<String>,
    /// Artist names joined with ", "
    pub artists: Option<String>,
    pub album: Option<String>,
    pub link: Option<String>,
    pub duration_secs: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoverImage {
    Bytes(Vec<u8>),
    /// The album is loaded and has no cover
    NoCover,
    /// The image exists but is still downloading
    NotLoaded,
}
