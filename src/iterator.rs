use crate::cursor::PageCursor;
use crate::r#trait::CatalogClient;
use crate::types::{TrackItem, TrackPage};
use crate::Result;
use async_trait::async_trait;

/// Async iterator trait for paginated API data.
///
/// Provides a common interface for walking paginated resources: items are
/// buffered per page and new pages are fetched lazily by following the
/// endpoint's own `next` cursor.
#[async_trait(?Send)]
pub trait AsyncPaginatedIterator<T> {
    /// Fetch the next item, loading a new page when the buffer is empty.
    ///
    /// Returns `Ok(None)` when the walk is exhausted.
    async fn next(&mut self) -> Result<Option<T>>;

    /// Collect all remaining items into a Vec.
    ///
    /// This fetches every remaining page; use [`take`](Self::take) for
    /// bounded collection from large resources.
    async fn collect_all(&mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Take up to n items from the iterator.
    async fn take(&mut self, n: usize) -> Result<Vec<T>> {
        let mut items = Vec::new();
        for _ in 0..n {
            match self.next().await? {
                Some(item) => items.push(item),
                None => break,
            }
        }
        Ok(items)
    }

    /// Number of pages fetched so far.
    fn pages_fetched(&self) -> u32;
}

/// Iterator over all tracks of one album, the child-resource walker.
///
/// Follows the `/v1/albums/{id}/tracks` endpoint's `next` cursor until
/// exhausted. A parent's children are already unique within that parent, so
/// no deduplication happens at this level; the orchestrator dedups across
/// parents.
pub struct AlbumTracksIterator<'a, C: CatalogClient + ?Sized> {
    client: &'a C,
    album_id: String,
    cursor: Option<PageCursor>,
    buffer: Vec<TrackItem>,
    pages_fetched: u32,
}

impl<'a, C: CatalogClient + ?Sized> AlbumTracksIterator<'a, C> {
    /// Create a walker for one album's tracks.
    pub fn new(client: &'a C, album_id: &str, market: &str, limit: u32) -> Self {
        let cursor = client.album_tracks(album_id, market, limit);
        Self {
            client,
            album_id: album_id.to_string(),
            cursor: Some(cursor),
            buffer: Vec::new(),
            pages_fetched: 0,
        }
    }

    /// Fetch the next page, advancing the cursor.
    async fn next_page(&mut self) -> Result<Option<TrackPage>> {
        let cursor = match self.cursor.take() {
            Some(cursor) => cursor,
            None => return Ok(None),
        };
        log::debug!(
            "Fetching tracks page {} for album {}",
            self.pages_fetched + 1,
            self.album_id
        );
        let page = self.client.fetch_track_page(&cursor).await?;
        self.pages_fetched += 1;
        self.cursor = page.next.clone();
        Ok(Some(page))
    }
}

#[async_trait(?Send)]
impl<'a, C: CatalogClient + ?Sized> AsyncPaginatedIterator<TrackItem>
    for AlbumTracksIterator<'a, C>
{
    async fn next(&mut self) -> Result<Option<TrackItem>> {
        while self.buffer.is_empty() {
            match self.next_page().await? {
                Some(page) => {
                    self.buffer = page.tracks;
                    self.buffer.reverse(); // Reverse so we can pop from end efficiently
                }
                None => return Ok(None),
            }
        }
        Ok(self.buffer.pop())
    }

    fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }
}
