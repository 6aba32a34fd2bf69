use crate::cursor::PageCursor;
use crate::types::{AlbumPage, ArtistMeta, TrackPage, TrackPop};
use crate::Result;
use async_trait::async_trait;

/// Trait for Spotify catalog operations that can be mocked for testing.
///
/// This trait abstracts the endpoints the collection engine depends on:
/// cursor construction for the two paginated walks, the page fetches
/// themselves, and the two batch metadata lookups. The searcher, walker and
/// batch resolver are generic over it, so tests can drive them with scripted
/// pages instead of the network.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides
/// `MockCatalogClient` that implements this trait using the `mockall`
/// library.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait CatalogClient {
    /// Build the first-page cursor for an album search.
    ///
    /// `query` is the full search expression (e.g. `year:2024 artist:a`);
    /// the cursor carries the query parameters, which apply to the first
    /// page only.
    fn album_search(&self, query: &str, market: &str, limit: u32) -> PageCursor;

    /// Build the first-page cursor for an album's track listing.
    fn album_tracks(&self, album_id: &str, market: &str, limit: u32) -> PageCursor;

    /// Fetch one page of album search results.
    async fn fetch_album_page(&self, cursor: &PageCursor) -> Result<AlbumPage>;

    /// Fetch one page of an album's tracks.
    async fn fetch_track_page(&self, cursor: &PageCursor) -> Result<TrackPage>;

    /// Resolve one batch of artist ids to their metadata.
    ///
    /// Ids the API does not know are simply missing from the result, not an
    /// error. Callers must respect the API's batch size cap; the batch
    /// resolver handles chunking.
    async fn artists_batch(&self, ids: &[String]) -> Result<Vec<ArtistMeta>>;

    /// Resolve one batch of track ids to their popularity scores.
    async fn tracks_batch(&self, ids: &[String]) -> Result<Vec<TrackPop>>;
}
