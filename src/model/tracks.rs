//! Track and album metadata read straight from live catalog objects.
//!
//! Nothing is cached: every call re-reads the engine state, and every
//! reference taken along the way is held in a [`Retained`] guard. The one
//! exception is a cover image still downloading, which stays retained until a
//! later call finds it loaded.

use std::collections::HashMap;
use std::sync::Arc;

use crate::context::SessionContext;
use crate::engine::{
    AlbumHandle, Engine, ImageHandle, ImageId, PlaylistHandle, Retained, TrackHandle,
};
use crate::error::{Result, SessionError};
use crate::model::{CoverImage, LoadState, TrackFields, TrackQuery};

pub const ARTIST_NOT_LOADED: &str = "[artist not loaded]";
pub const ALBUM_NOT_LOADED: &str = "[album not loaded]";
/// Link buffer size, terminator included
pub const LINK_CAPACITY: usize = 1024;

pub struct MetadataExtractor {
    engine: Arc<dyn Engine>,
    pending_images: HashMap<ImageId, Retained<ImageHandle>>,
}

impl MetadataExtractor {
    pub fn new(ctx: &SessionContext) -> Self {
        Self {
            engine: Arc::clone(&ctx.engine),
            pending_images: HashMap::new(),
        }
    }

    pub fn extract(&self, track: TrackHandle, query: TrackQuery) -> Result<LoadState<TrackFields>> {
        let track = Retained::acquire(&self.engine, track);
        if !self.engine.track_is_loaded(track.handle()) {
            return Ok(LoadState::NotLoaded);
        }

        let mut fields = TrackFields::default();
        if query.name {
            fields.name = Some(self.engine.track_name(track.handle()));
        }

        let artists = query.artists.then(|| {
            (0..self.engine.track_num_artists(track.handle()))
                .map(|i| {
                    let artist = self.engine.track_artist(track.handle(), i);
                    Retained::acquire(&self.engine, artist)
                })
                .collect::<Vec<_>>()
        });
        let album = if query.album {
            self.engine
                .track_album(track.handle())
                .map(|album| Retained::acquire(&self.engine, album))
        } else {
            None
        };

        if query.link {
            fields.link = Some(self.render_link(track.handle())?);
        }
        if query.duration {
            fields.duration_secs = Some(self.engine.track_duration_ms(track.handle()) / 1000);
        }

        if let Some(artists) = artists {
            let names: Vec<String> = artists
                .iter()
                .map(|artist| {
                    if self.engine.artist_is_loaded(artist.handle()) {
                        self.engine.artist_name(artist.handle())
                    } else {
                        ARTIST_NOT_LOADED.to_string()
                    }
                })
                .collect();
            fields.artists = Some(names.join(", "));
        }
        if query.album {
            fields.album = Some(match &album {
                Some(album) if self.engine.album_is_loaded(album.handle()) => {
                    self.engine.album_name(album.handle())
                }
                _ => ALBUM_NOT_LOADED.to_string(),
            });
        }

        Ok(LoadState::Loaded(fields))
    }

    fn render_link(&self, track: TrackHandle) -> Result<String> {
        let link = self
            .engine
            .link_create_from_track(track, 0)
            .ok_or(SessionError::LinkCreate)?;
        let link = Retained::adopt(&self.engine, link);

        let rendered = self.engine.link_as_string(link.handle());
        crate::log_engine_result!("link_as_string", rendered);
        let rendered = rendered.map_err(SessionError::LinkRender)?;
        if rendered.len() >= LINK_CAPACITY {
            return Err(SessionError::LinkOverflow {
                len: rendered.len(),
                limit: LINK_CAPACITY - 1,
            });
        }
        Ok(rendered)
    }

    /// Cover art of the track's album. The track must already be loaded.
    ///
    /// An image that is not loaded yet is kept until a later call returns its
    /// bytes, so the engine can finish the download.
    pub fn fetch_image(&mut self, track: TrackHandle) -> Result<CoverImage> {
        let Some(id) = self.cover_id(track)? else {
            return Ok(CoverImage::NoCover);
        };

        let image = match self.pending_images.remove(&id) {
            Some(image) => image,
            None => {
                let image = self.engine.image_create(&id).ok_or(SessionError::ImageCreate)?;
                Retained::adopt(&self.engine, image)
            }
        };
        if !self.engine.image_is_loaded(image.handle()) {
            tracing::trace!(image = ?id, "Cover image still loading");
            self.pending_images.insert(id, image);
            return Ok(CoverImage::NotLoaded);
        }

        let data = self
            .engine
            .image_data(image.handle())
            .ok_or(SessionError::ImageData)?;
        Ok(CoverImage::Bytes(data))
    }

    fn cover_id(&self, track: TrackHandle) -> Result<Option<ImageId>> {
        let album: AlbumHandle = self
            .engine
            .track_album(track)
            .ok_or(SessionError::AlbumMissing)?;
        let album = Retained::acquire(&self.engine, album);
        if !self.engine.album_is_loaded(album.handle()) {
            return Err(SessionError::AlbumNotLoaded);
        }

        // A loaded album without a cover id really has no cover.
        Ok(self.engine.album_cover(album.handle()))
    }

    /// All tracks of a loaded playlist, each with its own reference.
    pub fn playlist_tracks(&self, playlist: PlaylistHandle) -> LoadState<Vec<Retained<TrackHandle>>> {
        if !self.engine.playlist_is_loaded(playlist) {
            return LoadState::NotLoaded;
        }

        let tracks = (0..self.engine.playlist_num_tracks(playlist))
            .map(|i| Retained::acquire(&self.engine, self.engine.playlist_track(playlist, i)))
            .collect();
        LoadState::Loaded(tracks)
    }

    pub fn track_available(&self, track: TrackHandle) -> bool {
        self.engine.track_is_available(track)
    }
}
