//! Opaque catalog handles and scoped reference ownership

use std::fmt;
use std::sync::Arc;

use super::Engine;

macro_rules! catalog_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub struct $name(u64);

        impl $name {
            pub const fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            pub const fn raw(self) -> u64 {
                self.0
            }
        }
    };
}

catalog_handle!(
    /// A track owned by the engine
    TrackHandle
);
catalog_handle!(AlbumHandle);
catalog_handle!(ArtistHandle);
catalog_handle!(PlaylistHandle);
catalog_handle!(LinkHandle);
catalog_handle!(ImageHandle);
catalog_handle!(
    /// The session's playlist container. Not reference counted.
    ContainerHandle
);
catalog_handle!(
    /// A pending search, album browse or artist browse request
    BrowseHandle
);

/// Engine cover image identifier
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub [u8; 20]);

impl fmt::Debug for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageId(")?;
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

/// Any reference-counted catalog object
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CatalogObject {
    Track(TrackHandle),
    Album(AlbumHandle),
    Artist(ArtistHandle),
    Playlist(PlaylistHandle),
    Link(LinkHandle),
    Image(ImageHandle),
}

pub trait CatalogHandle: Copy + fmt::Debug {
    fn object(self) -> CatalogObject;
}

macro_rules! impl_catalog_handle {
    ($($name:ident => $variant:ident),* $(,)?) => {
        $(
            impl CatalogHandle for $name {
                fn object(self) -> CatalogObject {
                    CatalogObject::$variant(self)
                }
            }
        )*
    };
}

impl_catalog_handle!(
    TrackHandle => Track,
    AlbumHandle => Album,
    ArtistHandle => Artist,
    PlaylistHandle => Playlist,
    LinkHandle => Link,
    ImageHandle => Image,
);

/// Holds one engine reference on a catalog object and releases it on drop.
///
/// Every extraction path keeps its references in `Retained` values, so early
/// returns release exactly what was taken.
pub struct Retained<H: CatalogHandle> {
    engine: Arc<dyn Engine>,
    handle: H,
}

impl<H: CatalogHandle> Retained<H> {
    /// Takes a new reference on `handle`.
    pub fn acquire(engine: &Arc<dyn Engine>, handle: H) -> Self {
        engine.add_ref(handle.object());
        Self {
            engine: Arc::clone(engine),
            handle,
        }
    }

    /// Wraps a reference the engine already handed over, e.g. a freshly
    /// created link or image.
    pub fn adopt(engine: &Arc<dyn Engine>, handle: H) -> Self {
        Self {
            engine: Arc::clone(engine),
            handle,
        }
    }

    pub fn handle(&self) -> H {
        self.handle
    }
}

impl<H: CatalogHandle> fmt::Debug for Retained<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Retained").field(&self.handle).finish()
    }
}

impl<H: CatalogHandle> Drop for Retained<H> {
    fn drop(&mut self) {
        self.engine.release(self.handle.object());
    }
}
