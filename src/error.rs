//! Error types for the session layer
//!
//! Every `SessionError` is fatal for the session: the host is expected to log
//! it and shut down. Conditions the caller can recover from by retrying after a
//! metadata notification are reported through [`crate::model::LoadState`] and
//! [`crate::model::CoverImage`] instead.

use thiserror::Error;

/// Error text reported by the streaming engine itself
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EngineError {
    pub message: String,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to create session: {0}")]
    SessionCreate(#[source] EngineError),

    #[error("Failed to load track: {0}")]
    LoadRejected(#[source] EngineError),

    #[error("Could not get the playlist container")]
    ContainerUnavailable,

    #[error("Playlist index {index} out of range ({count} playlists)")]
    PlaylistIndexOutOfRange { index: usize, count: usize },

    #[error("Failed to get playlist folder name: {0}")]
    FolderName(#[source] EngineError),

    #[error("Playlist folder name is {len} bytes, limit is {limit}")]
    FolderNameOverflow { len: usize, limit: usize },

    #[error("Can't get URI from track")]
    LinkCreate,

    #[error("Can't render URI from link: {0}")]
    LinkRender(#[source] EngineError),

    #[error("Rendered link is {len} bytes, limit is {limit}")]
    LinkOverflow { len: usize, limit: usize },

    #[error("Can't get track album")]
    AlbumMissing,

    #[error("Album not loaded")]
    AlbumNotLoaded,

    #[error("Can't create image")]
    ImageCreate,

    #[error("Can't read image data")]
    ImageData,
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
