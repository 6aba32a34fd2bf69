//! Scripted in-memory catalog for integration tests.
//!
//! Pages are registered against synthetic cursor URLs; the searcher, walker
//! and batch resolver run against them exactly as they would against the
//! network, with counters exposed for asserting fetch and batch-size
//! bounds.

use async_trait::async_trait;
use spotify_harvest::{
    AlbumPage, AlbumSummary, ArtistMeta, ArtistRef, CatalogClient, PageCursor, Result, TrackItem,
    TrackPage, TrackPop,
};
use std::cell::Cell;
use std::collections::HashMap;

pub fn search_key(query: &str, market: &str) -> String {
    format!("fake:search:{query}:{market}")
}

pub fn tracks_key(album_id: &str) -> String {
    format!("fake:tracks:{album_id}")
}

pub fn album(id: &str, release_date: &str, artist_id: &str) -> AlbumSummary {
    AlbumSummary {
        id: id.to_string(),
        name: format!("Album {id}"),
        album_type: "album".to_string(),
        release_date: release_date.to_string(),
        artists: vec![ArtistRef {
            id: artist_id.to_string(),
            name: format!("Artist {artist_id}"),
        }],
    }
}

pub fn track(id: &str, artist_id: &str) -> TrackItem {
    TrackItem {
        id: id.to_string(),
        name: format!("Track {id}"),
        track_number: 1,
        disc_number: 1,
        duration_ms: 200_000,
        explicit: false,
        artists: vec![ArtistRef {
            id: artist_id.to_string(),
            name: format!("Artist {artist_id}"),
        }],
        spotify_url: format!("https://open.spotify.com/track/{id}"),
    }
}

#[derive(Default)]
pub struct FakeCatalog {
    album_pages: HashMap<String, AlbumPage>,
    track_pages: HashMap<String, TrackPage>,
    failing_searches: Vec<String>,
    artists: HashMap<String, ArtistMeta>,
    track_pops: HashMap<String, u32>,
    pub album_page_fetches: Cell<u32>,
    pub max_batch_seen: Cell<usize>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the single result page for a search query.
    pub fn add_search(&mut self, query: &str, market: &str, albums: Vec<AlbumSummary>) {
        self.add_page(search_key(query, market), albums, None);
    }

    /// Register one page of a multi-page search walk under an explicit key.
    pub fn add_page(&mut self, key: String, albums: Vec<AlbumSummary>, next: Option<String>) {
        self.album_pages.insert(
            key,
            AlbumPage {
                albums,
                next: next.map(PageCursor::follow),
            },
        );
    }

    /// Make a search query fail with a terminal API error.
    pub fn fail_search(&mut self, query: &str, market: &str) {
        self.failing_searches.push(search_key(query, market));
    }

    /// Register the single tracks page for an album.
    pub fn add_tracks(&mut self, album_id: &str, tracks: Vec<TrackItem>) {
        self.add_tracks_page(tracks_key(album_id), tracks, None);
    }

    /// Register one page of a multi-page tracks walk under an explicit key.
    pub fn add_tracks_page(&mut self, key: String, tracks: Vec<TrackItem>, next: Option<String>) {
        self.track_pages.insert(
            key,
            TrackPage {
                tracks,
                next: next.map(PageCursor::follow),
            },
        );
    }

    pub fn add_artist(&mut self, meta: ArtistMeta) {
        self.artists.insert(meta.id.clone(), meta);
    }

    pub fn add_track_pop(&mut self, id: &str, popularity: u32) {
        self.track_pops.insert(id.to_string(), popularity);
    }
}

#[async_trait(?Send)]
impl CatalogClient for FakeCatalog {
    fn album_search(&self, query: &str, market: &str, _limit: u32) -> PageCursor {
        PageCursor::follow(search_key(query, market))
    }

    fn album_tracks(&self, album_id: &str, _market: &str, _limit: u32) -> PageCursor {
        PageCursor::follow(tracks_key(album_id))
    }

    async fn fetch_album_page(&self, cursor: &PageCursor) -> Result<AlbumPage> {
        self.album_page_fetches
            .set(self.album_page_fetches.get() + 1);
        if self.failing_searches.contains(&cursor.url) {
            return Err(spotify_harvest::HarvestError::Api {
                status: 400,
                body: "scripted failure".to_string(),
            });
        }
        Ok(self.album_pages.get(&cursor.url).cloned().unwrap_or(AlbumPage {
            albums: Vec::new(),
            next: None,
        }))
    }

    async fn fetch_track_page(&self, cursor: &PageCursor) -> Result<TrackPage> {
        Ok(self.track_pages.get(&cursor.url).cloned().unwrap_or(TrackPage {
            tracks: Vec::new(),
            next: None,
        }))
    }

    async fn artists_batch(&self, ids: &[String]) -> Result<Vec<ArtistMeta>> {
        self.max_batch_seen
            .set(self.max_batch_seen.get().max(ids.len()));
        Ok(ids
            .iter()
            .filter_map(|id| self.artists.get(id).cloned())
            .collect())
    }

    async fn tracks_batch(&self, ids: &[String]) -> Result<Vec<TrackPop>> {
        self.max_batch_seen
            .set(self.max_batch_seen.get().max(ids.len()));
        Ok(ids
            .iter()
            .filter_map(|id| {
                self.track_pops.get(id).map(|popularity| TrackPop {
                    id: id.clone(),
                    popularity: *popularity,
                })
            })
            .collect())
    }
}
