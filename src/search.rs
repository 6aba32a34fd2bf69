//! Shard-expanding album search.
//!
//! Expands a logical query ("albums from year Y") across a shard alphabet to
//! defeat the search endpoint's fixed offset ceiling, walks each shard's
//! `next` cursor to exhaustion (or an optional page cap), post-filters by
//! the release-year prefix, and deduplicates by album id with first
//! occurrence winning across shards.

use crate::r#trait::CatalogClient;
use crate::types::AlbumSummary;
use crate::Result;
use std::collections::HashSet;

/// Tunables for the paginated search walk.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Results per page (the endpoint caps this at 50).
    pub limit: u32,
    /// Optional cap on pages fetched per shard. With a cap of C and N
    /// shards, the sweep performs at most N x C page fetches.
    pub max_pages_per_shard: Option<u32>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: 50,
            max_pages_per_shard: None,
        }
    }
}

/// Walk every page of one search query, folding matches into `albums`.
///
/// Applies the release-year post-filter (the endpoint's relevance ranking
/// returns near-matches outside the requested year) and dedups against
/// `seen`. The first page is fetched with the query parameters; subsequent
/// pages follow the endpoint's own `next` cursor, which already embeds them.
pub async fn search_album_query<C: CatalogClient + ?Sized>(
    client: &C,
    query: &str,
    market: &str,
    year: u16,
    config: &SearchConfig,
    seen: &mut HashSet<String>,
    albums: &mut Vec<AlbumSummary>,
) -> Result<()> {
    let year_prefix = year.to_string();
    let mut cursor = Some(client.album_search(query, market, config.limit));
    let mut pages = 0u32;

    while let Some(current) = cursor.take() {
        let page = client.fetch_album_page(&current).await?;
        for album in page.albums {
            if !album.release_date.starts_with(&year_prefix) {
                continue;
            }
            if seen.insert(album.id.clone()) {
                albums.push(album);
            }
        }
        pages += 1;
        if let Some(cap) = config.max_pages_per_shard {
            if pages >= cap {
                break;
            }
        }
        cursor = page.next;
    }
    Ok(())
}

/// Sweep the full shard alphabet for one year and market.
///
/// Returns the deduplicated album set, first occurrence winning in shard
/// order. A terminal error on a shard abandons that shard with a warning
/// and continues with the rest; partial recall is preferred over losing the
/// whole period.
pub async fn search_albums_by_year<C: CatalogClient + ?Sized>(
    client: &C,
    year: u16,
    market: &str,
    shards: &[String],
    config: &SearchConfig,
) -> Result<Vec<AlbumSummary>> {
    let mut seen = HashSet::new();
    let mut albums = Vec::new();

    for (index, shard) in shards.iter().enumerate() {
        let query = format!("year:{year} artist:{shard}");
        if let Err(error) =
            search_album_query(client, &query, market, year, config, &mut seen, &mut albums).await
        {
            log::warn!("Shard '{shard}' failed for {year} in {market}, skipping: {error}");
            continue;
        }
        log::info!(
            "Searched shard {}/{} ('{shard}') for {year} in {market}: {} unique albums",
            index + 1,
            shards.len(),
            albums.len()
        );
    }

    Ok(albums)
}
