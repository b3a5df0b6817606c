//! Playlist index space: a synthesized "Starred" playlist at index 0, followed
//! by the entries of the engine's playlist container.

use std::sync::{Arc, OnceLock};

use crate::context::SessionContext;
use crate::engine::{ContainerHandle, Engine, LinkHandle, PlaylistHandle, Retained};
use crate::error::{Result, SessionError};
use crate::model::PlaylistType;

pub const STARRED_FOLDER_NAME: &str = "Starred";
/// Folder name buffer size, terminator included
pub const FOLDER_NAME_CAPACITY: usize = 512;

pub struct PlaylistDirectory {
    engine: Arc<dyn Engine>,
    container: Option<ContainerHandle>,
    container_loaded: bool,
    starred: OnceLock<PlaylistHandle>,
}

impl PlaylistDirectory {
    pub fn new(ctx: &SessionContext) -> Self {
        Self {
            engine: Arc::clone(&ctx.engine),
            container: None,
            container_loaded: false,
            starred: OnceLock::new(),
        }
    }

    pub(crate) fn attach_container(&mut self, container: ContainerHandle) {
        self.container = Some(container);
    }

    pub(crate) fn mark_container_loaded(&mut self) {
        self.container_loaded = true;
    }

    pub fn container_loaded(&self) -> bool {
        self.container_loaded
    }

    fn container(&self) -> Result<ContainerHandle> {
        self.container.ok_or(SessionError::ContainerUnavailable)
    }

    /// Number of addressable playlists, the starred one included.
    pub fn count(&self) -> Result<usize> {
        let container = self.container()?;
        Ok(self.engine.container_num_playlists(container) + 1)
    }

    /// Maps a virtual index to a container index; `None` for the starred entry.
    fn container_index(&self, index: usize) -> Result<Option<usize>> {
        if index == 0 {
            return Ok(None);
        }
        let count = self.count()?;
        if index >= count {
            return Err(SessionError::PlaylistIndexOutOfRange { index, count });
        }
        Ok(Some(index - 1))
    }

    pub fn playlist_at(&self, index: usize) -> Result<PlaylistHandle> {
        match self.container_index(index)? {
            None => Ok(*self.starred.get_or_init(|| {
                tracing::debug!("Creating starred playlist");
                self.engine.starred_create()
            })),
            Some(entry) => Ok(self.engine.container_playlist(self.container()?, entry)),
        }
    }

    pub fn playlist_type(&self, index: usize) -> Result<PlaylistType> {
        match self.container_index(index)? {
            None => Ok(PlaylistType::Playlist),
            Some(entry) => Ok(self
                .engine
                .container_playlist_type(self.container()?, entry)),
        }
    }

    pub fn folder_name(&self, index: usize) -> Result<String> {
        let Some(entry) = self.container_index(index)? else {
            return Ok(STARRED_FOLDER_NAME.to_string());
        };

        let name = self
            .engine
            .container_playlist_folder_name(self.container()?, entry)
            .map_err(SessionError::FolderName)?;
        if name.len() >= FOLDER_NAME_CAPACITY {
            return Err(SessionError::FolderNameOverflow {
                len: name.len(),
                limit: FOLDER_NAME_CAPACITY - 1,
            });
        }
        Ok(name)
    }

    /// Opens the playlist `link` points at. The creation reference is
    /// released when the returned guard drops.
    pub fn playlist_from_link(&self, link: LinkHandle) -> Option<Retained<PlaylistHandle>> {
        let playlist = self.engine.playlist_create(link)?;
        tracing::debug!(playlist = ?playlist, "Opened playlist from link");
        Some(Retained::adopt(&self.engine, playlist))
    }
}
