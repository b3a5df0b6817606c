//! Shared test doubles: an in-memory engine that counts references and
//! records player calls, and an audio sink that records deliveries.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde_json::json;
use spop::engine::{
    AlbumHandle, ArtistHandle, BrowseHandle, CatalogObject, ContainerHandle, Engine,
    EngineCallbacks, EngineConfig, ImageHandle, ImageId, LinkHandle, PlaylistHandle, TrackHandle,
};
use spop::model::{Bitrate, OfflineStatus, OfflineSyncStatus, PlaylistType, SearchQuery};
use spop::{AudioFormat, AudioSink, Config, EngineError, Session};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Login(String),
    Logout,
    Bitrate(Bitrate),
    OfflineBitrate(Bitrate),
    Load(TrackHandle),
    Play(bool),
    Seek(u32),
    Unload,
    WatchContainer(ContainerHandle),
    Search(SearchQuery),
    BrowseAlbum(AlbumHandle),
    BrowseArtist(ArtistHandle),
    SetOffline(PlaylistHandle, bool),
}

#[derive(Clone, Debug)]
pub struct MockTrack {
    pub name: String,
    pub loaded: bool,
    pub available: bool,
    pub artists: Vec<ArtistHandle>,
    pub album: Option<AlbumHandle>,
    pub duration_ms: u32,
    pub link: Result<String, EngineError>,
}

#[derive(Clone, Debug)]
pub struct MockAlbum {
    pub name: String,
    pub loaded: bool,
    pub cover: Option<ImageId>,
}

#[derive(Clone, Debug)]
pub struct MockImage {
    pub handle: ImageHandle,
    pub loaded: bool,
    pub data: Vec<u8>,
}

#[derive(Clone, Debug)]
pub struct MockPlaylist {
    pub handle: PlaylistHandle,
    pub kind: PlaylistType,
    pub folder_name: String,
    pub loaded: bool,
    pub tracks: Vec<TrackHandle>,
    pub offline_status: OfflineStatus,
    pub download_completed: u32,
}

#[derive(Default)]
pub struct MockState {
    next_id: u64,
    pub calls: Vec<Call>,
    pub add_refs: Vec<CatalogObject>,
    pub releases: Vec<CatalogObject>,
    pub deadlines: VecDeque<Duration>,
    pub default_deadline: Duration,
    pub process_count: usize,
    pub load_error: Option<EngineError>,
    pub container: Option<ContainerHandle>,
    pub playlists: Vec<MockPlaylist>,
    pub starred: Vec<PlaylistHandle>,
    pub tracks: HashMap<TrackHandle, MockTrack>,
    pub artists: HashMap<ArtistHandle, (String, bool)>,
    pub albums: HashMap<AlbumHandle, MockAlbum>,
    pub images: HashMap<ImageId, MockImage>,
    pub browses: Vec<BrowseHandle>,
    pub playlist_links: HashMap<LinkHandle, PlaylistHandle>,
    pub sync_status: OfflineSyncStatus,
}

impl MockState {
    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Net references held on `object` (added minus released).
    pub fn ref_balance(&self, object: CatalogObject) -> i64 {
        let added = self.add_refs.iter().filter(|o| **o == object).count() as i64;
        let released = self.releases.iter().filter(|o| **o == object).count() as i64;
        added - released
    }
}

pub struct MockEngine {
    state: Mutex<MockState>,
}

impl MockEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(MockState {
                default_deadline: Duration::from_millis(1000),
                ..Default::default()
            }),
        })
    }

    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    pub fn add_artist(&self, name: &str, loaded: bool) -> ArtistHandle {
        let mut state = self.state();
        let handle = ArtistHandle::from_raw(state.next());
        state.artists.insert(handle, (name.to_string(), loaded));
        handle
    }

    pub fn add_album(&self, name: &str, loaded: bool, cover: Option<ImageId>) -> AlbumHandle {
        let mut state = self.state();
        let handle = AlbumHandle::from_raw(state.next());
        state.albums.insert(
            handle,
            MockAlbum {
                name: name.to_string(),
                loaded,
                cover,
            },
        );
        handle
    }

    pub fn add_image(&self, id: ImageId, loaded: bool, data: &[u8]) -> ImageHandle {
        let mut state = self.state();
        let handle = ImageHandle::from_raw(state.next());
        state.images.insert(
            id,
            MockImage {
                handle,
                loaded,
                data: data.to_vec(),
            },
        );
        handle
    }

    pub fn add_track(&self, name: &str, loaded: bool) -> TrackHandle {
        let mut state = self.state();
        let handle = TrackHandle::from_raw(state.next());
        state.tracks.insert(
            handle,
            MockTrack {
                name: name.to_string(),
                loaded,
                available: true,
                artists: Vec::new(),
                album: None,
                duration_ms: 0,
                link: Ok(format!("spotify:track:{}", handle.raw())),
            },
        );
        handle
    }

    pub fn update_track(&self, track: TrackHandle, f: impl FnOnce(&mut MockTrack)) {
        f(self.state().tracks.get_mut(&track).unwrap());
    }

    /// Installs a container with one playlist per folder name.
    pub fn add_container(&self, folder_names: &[&str]) -> Vec<PlaylistHandle> {
        let mut state = self.state();
        let container = ContainerHandle::from_raw(state.next());
        state.container = Some(container);
        folder_names
            .iter()
            .map(|name| {
                let handle = PlaylistHandle::from_raw(state.next());
                state.playlists.push(MockPlaylist {
                    handle,
                    kind: PlaylistType::Playlist,
                    folder_name: name.to_string(),
                    loaded: true,
                    tracks: Vec::new(),
                    offline_status: OfflineStatus::No,
                    download_completed: 0,
                });
                handle
            })
            .collect()
    }

    /// A link that resolves to `playlist` through `playlist_create`.
    pub fn add_playlist_link(&self, playlist: PlaylistHandle) -> LinkHandle {
        let mut state = self.state();
        let link = LinkHandle::from_raw(state.next());
        state.playlist_links.insert(link, playlist);
        link
    }

    fn playlist(&self, playlist: PlaylistHandle) -> MockPlaylist {
        self.state()
            .playlists
            .iter()
            .find(|p| p.handle == playlist)
            .cloned()
            .unwrap()
    }

    fn track(&self, track: TrackHandle) -> MockTrack {
        self.state().tracks[&track].clone()
    }

    fn record(&self, call: Call) {
        self.state().calls.push(call);
    }
}

impl Engine for MockEngine {
    fn process_events(&self) -> Duration {
        let mut state = self.state();
        state.process_count += 1;
        let fallback = state.default_deadline;
        state.deadlines.pop_front().unwrap_or(fallback)
    }

    fn login(&self, username: &str, _password: &str, _remember_me: bool) {
        self.record(Call::Login(username.to_string()));
    }

    fn logout(&self) {
        self.record(Call::Logout);
    }

    fn set_preferred_bitrate(&self, bitrate: Bitrate) {
        self.record(Call::Bitrate(bitrate));
    }

    fn set_preferred_offline_bitrate(&self, bitrate: Bitrate, _allow_resync: bool) {
        self.record(Call::OfflineBitrate(bitrate));
    }

    fn player_load(&self, track: TrackHandle) -> Result<(), EngineError> {
        if let Some(error) = self.state().load_error.clone() {
            return Err(error);
        }
        self.record(Call::Load(track));
        Ok(())
    }

    fn player_play(&self, play: bool) {
        self.record(Call::Play(play));
    }

    fn player_seek(&self, offset_ms: u32) {
        self.record(Call::Seek(offset_ms));
    }

    fn player_unload(&self) {
        self.record(Call::Unload);
    }

    fn add_ref(&self, object: CatalogObject) {
        self.state().add_refs.push(object);
    }

    fn release(&self, object: CatalogObject) {
        self.state().releases.push(object);
    }

    fn playlist_container(&self) -> Option<ContainerHandle> {
        self.state().container
    }

    fn watch_container(&self, container: ContainerHandle) {
        self.record(Call::WatchContainer(container));
    }

    fn container_num_playlists(&self, _container: ContainerHandle) -> usize {
        self.state().playlists.len()
    }

    fn container_playlist(&self, _container: ContainerHandle, index: usize) -> PlaylistHandle {
        self.state().playlists[index].handle
    }

    fn container_playlist_type(&self, _container: ContainerHandle, index: usize) -> PlaylistType {
        self.state().playlists[index].kind
    }

    fn container_playlist_folder_name(
        &self,
        _container: ContainerHandle,
        index: usize,
    ) -> Result<String, EngineError> {
        Ok(self.state().playlists[index].folder_name.clone())
    }

    fn starred_create(&self) -> PlaylistHandle {
        let mut state = self.state();
        let handle = PlaylistHandle::from_raw(state.next());
        state.starred.push(handle);
        state.add_refs.push(CatalogObject::Playlist(handle));
        handle
    }

    fn playlist_create(&self, link: LinkHandle) -> Option<PlaylistHandle> {
        let mut state = self.state();
        let handle = state.playlist_links.get(&link).copied()?;
        state.add_refs.push(CatalogObject::Playlist(handle));
        Some(handle)
    }

    fn playlist_is_loaded(&self, playlist: PlaylistHandle) -> bool {
        self.playlist(playlist).loaded
    }

    fn playlist_num_tracks(&self, playlist: PlaylistHandle) -> usize {
        self.playlist(playlist).tracks.len()
    }

    fn playlist_track(&self, playlist: PlaylistHandle, index: usize) -> TrackHandle {
        self.playlist(playlist).tracks[index]
    }

    fn playlist_offline_status(&self, playlist: PlaylistHandle) -> OfflineStatus {
        self.playlist(playlist).offline_status
    }

    fn playlist_set_offline_mode(&self, playlist: PlaylistHandle, offline: bool) {
        self.record(Call::SetOffline(playlist, offline));
    }

    fn playlist_offline_download_completed(&self, playlist: PlaylistHandle) -> u32 {
        self.playlist(playlist).download_completed
    }

    fn offline_sync_status(&self) -> OfflineSyncStatus {
        self.state().sync_status
    }

    fn track_is_loaded(&self, track: TrackHandle) -> bool {
        self.track(track).loaded
    }

    fn track_is_available(&self, track: TrackHandle) -> bool {
        self.track(track).available
    }

    fn track_name(&self, track: TrackHandle) -> String {
        self.track(track).name
    }

    fn track_num_artists(&self, track: TrackHandle) -> usize {
        self.track(track).artists.len()
    }

    fn track_artist(&self, track: TrackHandle, index: usize) -> ArtistHandle {
        self.track(track).artists[index]
    }

    fn track_album(&self, track: TrackHandle) -> Option<AlbumHandle> {
        self.track(track).album
    }

    fn track_duration_ms(&self, track: TrackHandle) -> u32 {
        self.track(track).duration_ms
    }

    fn artist_is_loaded(&self, artist: ArtistHandle) -> bool {
        self.state().artists[&artist].1
    }

    fn artist_name(&self, artist: ArtistHandle) -> String {
        self.state().artists[&artist].0.clone()
    }

    fn album_is_loaded(&self, album: AlbumHandle) -> bool {
        self.state().albums[&album].loaded
    }

    fn album_name(&self, album: AlbumHandle) -> String {
        self.state().albums[&album].name.clone()
    }

    fn album_cover(&self, album: AlbumHandle) -> Option<ImageId> {
        self.state().albums[&album].cover
    }

    fn image_create(&self, id: &ImageId) -> Option<ImageHandle> {
        let mut state = self.state();
        let handle = state.images.get(id).map(|image| image.handle)?;
        state.add_refs.push(CatalogObject::Image(handle));
        Some(handle)
    }

    fn image_is_loaded(&self, image: ImageHandle) -> bool {
        self.state()
            .images
            .values()
            .any(|i| i.handle == image && i.loaded)
    }

    fn image_data(&self, image: ImageHandle) -> Option<Vec<u8>> {
        self.state()
            .images
            .values()
            .find(|i| i.handle == image)
            .map(|i| i.data.clone())
    }

    fn link_create_from_track(&self, track: TrackHandle, _offset_ms: u32) -> Option<LinkHandle> {
        let _ = self.track(track);
        let link = LinkHandle::from_raw(track.raw() + 10_000);
        self.state().add_refs.push(CatalogObject::Link(link));
        Some(link)
    }

    fn link_as_string(&self, link: LinkHandle) -> Result<String, EngineError> {
        let track = TrackHandle::from_raw(link.raw() - 10_000);
        self.track(track).link
    }

    fn search_create(&self, query: &SearchQuery) -> BrowseHandle {
        self.record(Call::Search(query.clone()));
        self.new_browse()
    }

    fn album_browse_create(&self, album: AlbumHandle) -> BrowseHandle {
        self.record(Call::BrowseAlbum(album));
        self.new_browse()
    }

    fn artist_browse_create(&self, artist: ArtistHandle) -> BrowseHandle {
        self.record(Call::BrowseArtist(artist));
        self.new_browse()
    }
}

impl MockEngine {
    fn new_browse(&self) -> BrowseHandle {
        let mut state = self.state();
        let handle = BrowseHandle::from_raw(state.next());
        state.browses.push(handle);
        handle
    }
}

/// Sink that accepts up to `limit` frames per delivery and records every call.
pub struct RecordingSink {
    pub limit: Option<usize>,
    pub deliveries: Mutex<Vec<(Option<AudioFormat>, usize)>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Self::with_limit(None)
    }

    pub fn with_limit(limit: Option<usize>) -> Arc<Self> {
        Arc::new(Self {
            limit,
            deliveries: Mutex::new(Vec::new()),
        })
    }

    pub fn flushes(&self) -> usize {
        self.deliveries
            .lock()
            .unwrap()
            .iter()
            .filter(|(format, frames)| format.is_none() && *frames == 0)
            .count()
    }
}

impl AudioSink for RecordingSink {
    fn deliver(&self, format: Option<&AudioFormat>, _frames: &[i16], num_frames: usize) -> usize {
        self.deliveries
            .lock()
            .unwrap()
            .push((format.copied(), num_frames));
        match self.limit {
            Some(limit) => num_frames.min(limit),
            None => num_frames,
        }
    }
}

pub struct Harness {
    pub session: Session,
    pub engine: Arc<MockEngine>,
    pub sink: Arc<RecordingSink>,
    pub callbacks: EngineCallbacks,
    /// Settings the session handed to the engine
    pub settings: EngineConfig,
}

pub fn harness() -> Harness {
    harness_with(MockEngine::new(), RecordingSink::new(), json!({}))
}

pub fn harness_with(
    engine: Arc<MockEngine>,
    sink: Arc<RecordingSink>,
    config: serde_json::Value,
) -> Harness {
    let config = Config::from_value(config).unwrap();
    let mut captured = None;
    let dyn_engine: Arc<dyn Engine> = engine.clone();
    let session = Session::create(config, sink.clone(), |settings, callbacks| {
        captured = Some((settings, callbacks));
        Ok(dyn_engine)
    })
    .unwrap();
    let (settings, callbacks) = captured.unwrap();

    Harness {
        session,
        engine,
        sink,
        callbacks,
        settings,
    }
}

/// Harness that has already processed a successful login.
pub fn logged_in(folder_names: &[&str]) -> (Harness, Vec<PlaylistHandle>) {
    let mut h = harness();
    let playlists = h.engine.add_container(folder_names);
    h.session
        .handle_notification(spop::engine::Notification::LoggedIn(Ok(())))
        .unwrap();
    (h, playlists)
}

pub fn stereo(rate: u32) -> AudioFormat {
    AudioFormat {
        sample_rate: rate,
        channels: 2,
    }
}
