//! Playlist, track and browsing queries

use crate::config;
use crate::engine::{
    AlbumHandle, ArtistHandle, BrowseHandle, LinkHandle, PlaylistHandle, Retained, TrackHandle,
};
use crate::error::Result;
use crate::model::{
    CoverImage, LoadState, OfflineStatus, OfflineSyncStatus, PlaylistType, SearchQuery,
    TrackFields, TrackQuery,
};

use super::{BrowseCallback, Session};

pub const DEFAULT_SEARCH_RESULTS: i64 = 100;

impl Session {
    pub fn container_loaded(&self) -> bool {
        self.playlists.container_loaded()
    }

    pub fn playlist_count(&self) -> Result<usize> {
        self.playlists.count()
    }

    pub fn playlist_at(&self, index: usize) -> Result<PlaylistHandle> {
        self.playlists.playlist_at(index)
    }

    pub fn playlist_type(&self, index: usize) -> Result<PlaylistType> {
        self.playlists.playlist_type(index)
    }

    pub fn playlist_folder_name(&self, index: usize) -> Result<String> {
        self.playlists.folder_name(index)
    }

    pub fn playlist_from_link(&self, link: LinkHandle) -> Option<Retained<PlaylistHandle>> {
        self.playlists.playlist_from_link(link)
    }

    pub fn playlist_tracks(&self, playlist: PlaylistHandle) -> LoadState<Vec<Retained<TrackHandle>>> {
        self.metadata.playlist_tracks(playlist)
    }

    pub fn playlist_offline_status(&self, playlist: PlaylistHandle) -> OfflineStatus {
        self.ctx.engine.playlist_offline_status(playlist)
    }

    pub fn set_playlist_offline_mode(&self, playlist: PlaylistHandle, offline: bool) {
        tracing::debug!(playlist = ?playlist, offline, "Setting playlist offline mode");
        self.ctx.engine.playlist_set_offline_mode(playlist, offline);
    }

    /// Download progress in percent.
    pub fn playlist_offline_download_completed(&self, playlist: PlaylistHandle) -> u32 {
        self.ctx.engine.playlist_offline_download_completed(playlist)
    }

    pub fn offline_sync_status(&self) -> OfflineSyncStatus {
        self.ctx.engine.offline_sync_status()
    }

    pub fn track_metadata(&self, track: TrackHandle, query: TrackQuery) -> Result<LoadState<TrackFields>> {
        self.metadata.extract(track, query)
    }

    pub fn track_available(&self, track: TrackHandle) -> bool {
        self.metadata.track_available(track)
    }

    /// Cover art of a loaded track. Returns `CoverImage::NotLoaded` while the
    /// image downloads; call again after the next metadata update.
    pub fn track_cover(&mut self, track: TrackHandle) -> Result<CoverImage> {
        self.metadata.fetch_image(track)
    }

    /// Starts a search for `query`, limited to `search_results` of each kind.
    pub fn search(
        &mut self,
        query: &str,
        on_complete: impl FnOnce(BrowseHandle) + Send + 'static,
    ) -> BrowseHandle {
        let limit = self
            .ctx
            .config
            .get_int(config::SEARCH_RESULTS, DEFAULT_SEARCH_RESULTS)
            .clamp(0, i64::from(u32::MAX)) as u32;
        tracing::debug!(query, limit, "Starting search");

        let handle = self
            .ctx
            .engine
            .search_create(&SearchQuery::with_limit(query, limit));
        self.track_browse(handle, Box::new(on_complete))
    }

    pub fn browse_album(
        &mut self,
        album: AlbumHandle,
        on_complete: impl FnOnce(BrowseHandle) + Send + 'static,
    ) -> BrowseHandle {
        let handle = self.ctx.engine.album_browse_create(album);
        self.track_browse(handle, Box::new(on_complete))
    }

    pub fn browse_artist(
        &mut self,
        artist: ArtistHandle,
        on_complete: impl FnOnce(BrowseHandle) + Send + 'static,
    ) -> BrowseHandle {
        let handle = self.ctx.engine.artist_browse_create(artist);
        self.track_browse(handle, Box::new(on_complete))
    }

    fn track_browse(&mut self, handle: BrowseHandle, on_complete: BrowseCallback) -> BrowseHandle {
        self.pending_browses.insert(handle, on_complete);
        handle
    }
}
