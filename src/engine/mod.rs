//! Capability surface of the external streaming engine
//!
//! The engine owns login, catalog retrieval, decoding and transport. This
//! crate reaches it only through [`Engine`], which a host binding implements
//! over the native library:
//!
//! - `handle`: opaque catalog handles and the [`Retained`] reference guard
//! - `notify`: notifications flowing from engine threads to the session

mod handle;
mod notify;

use std::path::PathBuf;
use std::time::Duration;

use crate::audio::MusicDelivery;
use crate::error::EngineError;
use crate::model::{Bitrate, OfflineStatus, OfflineSyncStatus, PlaylistType, SearchQuery};

pub use handle::{
    AlbumHandle, ArtistHandle, BrowseHandle, CatalogHandle, CatalogObject, ContainerHandle,
    ImageHandle, ImageId, LinkHandle, PlaylistHandle, Retained, TrackHandle,
};
pub use notify::{EngineNotifier, Notification};

/// Settings handed to the engine when the session is created
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub cache_location: PathBuf,
    pub settings_location: PathBuf,
    pub user_agent: String,
    pub device_id: String,
    pub compress_playlists: bool,
    pub dont_save_metadata_for_playlists: bool,
    pub initially_unload_playlists: bool,
}

/// Everything the engine calls back into
#[derive(Clone)]
pub struct EngineCallbacks {
    pub notifier: EngineNotifier,
    pub music: MusicDelivery,
}

/// Native calls of the streaming engine.
///
/// Handles returned by accessors (`container_playlist`, `track_artist`, ...)
/// are borrowed: take a reference with [`Retained::acquire`] before keeping
/// one. Handles returned by `*_create` calls already carry a reference.
pub trait Engine: Send + Sync {
    /// Runs pending engine work; returns how long until it wants to run again.
    fn process_events(&self) -> Duration;

    fn login(&self, username: &str, password: &str, remember_me: bool);
    fn logout(&self);
    fn set_preferred_bitrate(&self, bitrate: Bitrate);
    fn set_preferred_offline_bitrate(&self, bitrate: Bitrate, allow_resync: bool);

    fn player_load(&self, track: TrackHandle) -> Result<(), EngineError>;
    fn player_play(&self, play: bool);
    fn player_seek(&self, offset_ms: u32);
    fn player_unload(&self);

    fn add_ref(&self, object: CatalogObject);
    fn release(&self, object: CatalogObject);

    fn playlist_container(&self) -> Option<ContainerHandle>;
    /// Asks the engine to send [`Notification::ContainerLoaded`] once the
    /// container has loaded.
    fn watch_container(&self, container: ContainerHandle);
    fn container_num_playlists(&self, container: ContainerHandle) -> usize;
    fn container_playlist(&self, container: ContainerHandle, index: usize) -> PlaylistHandle;
    fn container_playlist_type(&self, container: ContainerHandle, index: usize) -> PlaylistType;
    fn container_playlist_folder_name(
        &self,
        container: ContainerHandle,
        index: usize,
    ) -> Result<String, EngineError>;

    fn starred_create(&self) -> PlaylistHandle;
    fn playlist_create(&self, link: LinkHandle) -> Option<PlaylistHandle>;
    fn playlist_is_loaded(&self, playlist: PlaylistHandle) -> bool;
    fn playlist_num_tracks(&self, playlist: PlaylistHandle) -> usize;
    fn playlist_track(&self, playlist: PlaylistHandle, index: usize) -> TrackHandle;
    fn playlist_offline_status(&self, playlist: PlaylistHandle) -> OfflineStatus;
    fn playlist_set_offline_mode(&self, playlist: PlaylistHandle, offline: bool);
    fn playlist_offline_download_completed(&self, playlist: PlaylistHandle) -> u32;
    fn offline_sync_status(&self) -> OfflineSyncStatus;

    fn track_is_loaded(&self, track: TrackHandle) -> bool;
    fn track_is_available(&self, track: TrackHandle) -> bool;
    fn track_name(&self, track: TrackHandle) -> String;
    fn track_num_artists(&self, track: TrackHandle) -> usize;
    fn track_artist(&self, track: TrackHandle, index: usize) -> ArtistHandle;
    fn track_album(&self, track: TrackHandle) -> Option<AlbumHandle>;
    fn track_duration_ms(&self, track: TrackHandle) -> u32;

    fn artist_is_loaded(&self, artist: ArtistHandle) -> bool;
    fn artist_name(&self, artist: ArtistHandle) -> String;

    fn album_is_loaded(&self, album: AlbumHandle) -> bool;
    fn album_name(&self, album: AlbumHandle) -> String;
    fn album_cover(&self, album: AlbumHandle) -> Option<ImageId>;

    fn image_create(&self, id: &ImageId) -> Option<ImageHandle>;
    fn image_is_loaded(&self, image: ImageHandle) -> bool;
    fn image_data(&self, image: ImageHandle) -> Option<Vec<u8>>;

    fn link_create_from_track(&self, track: TrackHandle, offset_ms: u32) -> Option<LinkHandle>;
    fn link_as_string(&self, link: LinkHandle) -> Result<String, EngineError>;

    /// Completion is reported with [`Notification::BrowseComplete`].
    fn search_create(&self, query: &SearchQuery) -> BrowseHandle;
    fn album_browse_create(&self, album: AlbumHandle) -> BrowseHandle;
    fn artist_browse_create(&self, artist: ArtistHandle) -> BrowseHandle;
}
