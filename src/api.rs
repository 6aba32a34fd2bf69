//! Wire formats for the Spotify Web API responses we consume.
//!
//! These structs mirror the JSON payloads loosely: every field the API might
//! omit is optional with a default, and conversion into the crate's domain
//! types fills in defined defaults rather than failing. Missing optional
//! fields are a data-quality concern, never an error.

use crate::cursor::PageCursor;
use crate::types::{AlbumPage, AlbumSummary, ArtistMeta, ArtistRef, TrackItem, TrackPage, TrackPop};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
}

/// Generic paging envelope used by search results and sub-resources.
#[derive(Debug, Deserialize)]
pub(crate) struct PagingObject<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<Option<T>>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchAlbumsResponse {
    #[serde(default)]
    pub albums: Option<PagingObject<AlbumObject>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ArtistRefObject {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AlbumObject {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub album_type: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default = "Vec::new")]
    pub artists: Vec<ArtistRefObject>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrackObject {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub track_number: Option<u32>,
    #[serde(default)]
    pub disc_number: Option<u32>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub explicit: Option<bool>,
    #[serde(default = "Vec::new")]
    pub artists: Vec<ArtistRefObject>,
    #[serde(default)]
    pub external_urls: Option<ExternalUrls>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Followers {
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArtistObject {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub followers: Option<Followers>,
    #[serde(default = "Vec::new")]
    pub genres: Vec<String>,
    #[serde(default)]
    pub popularity: Option<u32>,
}

/// Batch `/v1/artists` envelope. Unknown ids come back as `null` entries.
#[derive(Debug, Deserialize)]
pub(crate) struct ArtistsResponse {
    #[serde(default = "Vec::new")]
    pub artists: Vec<Option<ArtistObject>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrackPopObject {
    pub id: String,
    #[serde(default)]
    pub popularity: Option<u32>,
}

/// Batch `/v1/tracks` envelope. Unknown ids come back as `null` entries.
#[derive(Debug, Deserialize)]
pub(crate) struct TracksResponse {
    #[serde(default = "Vec::new")]
    pub tracks: Vec<Option<TrackPopObject>>,
}

fn artist_refs(objects: Vec<ArtistRefObject>) -> Vec<ArtistRef> {
    objects
        .into_iter()
        .filter_map(|a| {
            let id = a.id.unwrap_or_default();
            if id.is_empty() {
                return None;
            }
            Some(ArtistRef {
                id,
                name: a.name.unwrap_or_default(),
            })
        })
        .collect()
}

impl AlbumObject {
    /// Convert to the domain type, dropping items with no id.
    pub(crate) fn into_summary(self) -> Option<AlbumSummary> {
        let id = self.id?;
        if id.is_empty() {
            return None;
        }
        Some(AlbumSummary {
            id,
            name: self.name.unwrap_or_default(),
            album_type: self.album_type.unwrap_or_default(),
            release_date: self.release_date.unwrap_or_default(),
            artists: artist_refs(self.artists),
        })
    }
}

impl TrackObject {
    /// Convert to the domain type, dropping items with no id.
    pub(crate) fn into_item(self) -> Option<TrackItem> {
        let id = self.id?;
        if id.is_empty() {
            return None;
        }
        Some(TrackItem {
            id,
            name: self.name.unwrap_or_default(),
            track_number: self.track_number.unwrap_or(0),
            disc_number: self.disc_number.unwrap_or(1),
            duration_ms: self.duration_ms.unwrap_or(0),
            explicit: self.explicit.unwrap_or(false),
            artists: artist_refs(self.artists),
            spotify_url: self
                .external_urls
                .unwrap_or_default()
                .spotify
                .unwrap_or_default(),
        })
    }
}

impl ArtistObject {
    pub(crate) fn into_meta(self) -> ArtistMeta {
        ArtistMeta {
            id: self.id,
            name: self.name.unwrap_or_default(),
            followers: self.followers.unwrap_or_default().total.unwrap_or(0),
            genres: self.genres,
            popularity: self.popularity.unwrap_or(0),
        }
    }
}

impl TrackPopObject {
    pub(crate) fn into_pop(self) -> TrackPop {
        TrackPop {
            id: self.id,
            popularity: self.popularity.unwrap_or(0),
        }
    }
}

impl<T> PagingObject<T> {
    /// The cursor to the next page, if the API supplied one.
    pub(crate) fn next_cursor(&self) -> Option<PageCursor> {
        self.next.as_deref().map(PageCursor::follow)
    }
}

impl SearchAlbumsResponse {
    pub(crate) fn into_page(self) -> AlbumPage {
        match self.albums {
            None => AlbumPage {
                albums: Vec::new(),
                next: None,
            },
            Some(paging) => {
                let next = paging.next_cursor();
                let albums = paging
                    .items
                    .into_iter()
                    .flatten()
                    .filter_map(AlbumObject::into_summary)
                    .collect();
                AlbumPage { albums, next }
            }
        }
    }
}

impl PagingObject<TrackObject> {
    pub(crate) fn into_track_page(self) -> TrackPage {
        let next = self.next_cursor();
        let tracks = self
            .items
            .into_iter()
            .flatten()
            .filter_map(TrackObject::into_item)
            .collect();
        TrackPage { tracks, next }
    }
}
