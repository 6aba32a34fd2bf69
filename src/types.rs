//! Data types for Spotify catalog collection.
//!
//! This module contains the core data structures used throughout the crate:
//! album and track metadata as returned by the search and sub-resource
//! endpoints, the paginated page wrappers, enrichment metadata, and the flat
//! [`TrackRecord`] rows that snapshots are built from.

use crate::cursor::PageCursor;
use serde::{Deserialize, Serialize, Serializer};

/// A minimal reference to an artist as embedded in album and track payloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtistRef {
    /// Spotify artist id
    pub id: String,
    /// Artist display name
    pub name: String,
}

/// One album as returned by the search endpoint.
///
/// This is the parent entity of the collection: the searcher produces a
/// deduplicated set of these, and the walker expands each one into its
/// tracks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumSummary {
    /// Spotify album id (the dedup key across shards)
    pub id: String,
    /// Album title
    pub name: String,
    /// Album type reported by the API ("album", "single", "compilation")
    pub album_type: String,
    /// Release date string, as precise as the API knows it
    /// ("2024", "2024-03" or "2024-03-15")
    pub release_date: String,
    /// Contributing artists, primary first
    pub artists: Vec<ArtistRef>,
}

/// One track as returned by the album tracks endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackItem {
    /// Spotify track id
    pub id: String,
    /// Track title
    pub name: String,
    /// Position within the disc
    pub track_number: u32,
    /// Disc number (1 for single-disc albums)
    pub disc_number: u32,
    /// Duration in milliseconds
    pub duration_ms: u64,
    /// Explicit-content flag
    pub explicit: bool,
    /// Contributing artists, primary first
    pub artists: Vec<ArtistRef>,
    /// Public Spotify URL for the track
    pub spotify_url: String,
}

/// One page of album search results, with the cursor to the next page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumPage {
    /// The albums on this page
    pub albums: Vec<AlbumSummary>,
    /// Cursor to the next page, `None` when the walk is exhausted
    pub next: Option<PageCursor>,
}

/// One page of an album's tracks, with the cursor to the next page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackPage {
    /// The tracks on this page
    pub tracks: Vec<TrackItem>,
    /// Cursor to the next page, `None` when the walk is exhausted
    pub next: Option<PageCursor>,
}

/// Secondary artist metadata from the batch `/v1/artists` endpoint.
///
/// The [`Default`] value doubles as the enrichment fallback: an artist id
/// the API does not know yields zero followers, no genres and zero
/// popularity rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArtistMeta {
    /// Spotify artist id
    pub id: String,
    /// Artist display name
    pub name: String,
    /// Follower count
    pub followers: u64,
    /// Category tags assigned by the API
    pub genres: Vec<String>,
    /// Artist popularity score (0-100)
    pub popularity: u32,
}

/// Track popularity from the batch `/v1/tracks` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackPop {
    /// Spotify track id
    pub id: String,
    /// Track popularity score (0-100)
    pub popularity: u32,
}

fn join_comma<S: Serializer>(values: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&values.join(", "))
}

/// One flat row of the output snapshot: a track with its album context and
/// enrichment columns.
///
/// Uniqueness invariant: no two records in a finished snapshot share a
/// `track_id`. Enrichment columns default to zero/empty and are filled in
/// place when the corresponding enrichment pass runs.
///
/// # Examples
///
/// ```rust
/// use spotify_harvest::{AlbumSummary, ArtistRef, TrackItem, TrackRecord};
///
/// let album = AlbumSummary {
///     id: "alb1".to_string(),
///     name: "OK Computer".to_string(),
///     album_type: "album".to_string(),
///     release_date: "1997-05-21".to_string(),
///     artists: vec![ArtistRef { id: "art1".to_string(), name: "Radiohead".to_string() }],
/// };
/// let track = TrackItem {
///     id: "trk1".to_string(),
///     name: "Paranoid Android".to_string(),
///     track_number: 2,
///     disc_number: 1,
///     duration_ms: 383_000,
///     explicit: false,
///     artists: album.artists.clone(),
///     spotify_url: "https://open.spotify.com/track/trk1".to_string(),
/// };
/// let record = TrackRecord::from_parts(1997, "GB", &album, track);
/// assert_eq!(record.primary_artist_id(), Some("art1"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackRecord {
    /// Collection period (release year) this record was gathered for
    pub year: u16,
    /// Market the record was first seen in
    pub market: String,
    /// Parent album id
    pub album_id: String,
    /// Parent album title
    pub album_name: String,
    /// Parent album type
    pub album_type: String,
    /// Parent album release date string
    pub release_date: String,
    /// Spotify track id (the primary key of the snapshot)
    pub track_id: String,
    /// Track title
    pub track_name: String,
    /// Position within the disc
    pub track_number: u32,
    /// Disc number
    pub disc_number: u32,
    /// Duration in milliseconds
    pub duration_ms: u64,
    /// Explicit-content flag
    pub explicit: bool,
    /// Contributing artist names, comma-joined in the CSV
    #[serde(serialize_with = "join_comma")]
    pub artists: Vec<String>,
    /// Contributing artist ids, comma-joined in the CSV
    #[serde(serialize_with = "join_comma")]
    pub artist_ids: Vec<String>,
    /// Public Spotify URL
    pub spotify_url: String,
    /// Primary artist id, empty when the track has no artists
    pub primary_artist_id: String,
    /// Follower count of the primary artist (enrichment column)
    pub primary_artist_followers: u64,
    /// Genres of the primary artist (enrichment column)
    #[serde(serialize_with = "join_comma")]
    pub primary_artist_genres: Vec<String>,
    /// Popularity of the primary artist (enrichment column)
    pub primary_artist_popularity: u32,
    /// Track popularity (enrichment column)
    pub track_popularity: u32,
}

impl TrackRecord {
    /// Flatten an album/track pair into one snapshot row.
    ///
    /// Enrichment columns start at their defined defaults and are attached
    /// later by the orchestrator when the corresponding resolution runs.
    pub fn from_parts(year: u16, market: &str, album: &AlbumSummary, track: TrackItem) -> Self {
        let artists: Vec<String> = track.artists.iter().map(|a| a.name.clone()).collect();
        let artist_ids: Vec<String> = track
            .artists
            .iter()
            .map(|a| a.id.clone())
            .filter(|id| !id.is_empty())
            .collect();
        let primary_artist_id = artist_ids.first().cloned().unwrap_or_default();
        Self {
            year,
            market: market.to_string(),
            album_id: album.id.clone(),
            album_name: album.name.clone(),
            album_type: album.album_type.clone(),
            release_date: album.release_date.clone(),
            track_id: track.id,
            track_name: track.name,
            track_number: track.track_number,
            disc_number: track.disc_number,
            duration_ms: track.duration_ms,
            explicit: track.explicit,
            artists,
            artist_ids,
            spotify_url: track.spotify_url,
            primary_artist_id,
            primary_artist_followers: 0,
            primary_artist_genres: Vec::new(),
            primary_artist_popularity: 0,
            track_popularity: 0,
        }
    }

    /// The primary (first listed) artist id, if the track has any artists.
    pub fn primary_artist_id(&self) -> Option<&str> {
        if self.primary_artist_id.is_empty() {
            None
        } else {
            Some(&self.primary_artist_id)
        }
    }
}
