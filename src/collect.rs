//! The orchestrator: search, walk, dedup, enrich, snapshot.
//!
//! Composes the sharded searcher, the child-resource walker and the batch
//! resolver into one per-year/per-market extraction. Two interchangeable
//! strategies decide how the parent album set is gathered; everything after
//! that (walking tracks, deduplication, enrichment, serialization) is
//! shared.
//!
//! Error policy, per call site: a failed shard or album is skipped with a
//! warning (partial recall beats losing the period), failed enrichment
//! batches propagate and abort the period (a half-enriched snapshot would
//! be silently misleading), and the binary decides per period whether to
//! continue with the next one.

use crate::batch::{resolve_artists, resolve_track_popularity};
use crate::iterator::{AlbumTracksIterator, AsyncPaginatedIterator};
use crate::r#trait::CatalogClient;
use crate::search::{search_album_query, search_albums_by_year};
use crate::snapshot::Snapshot;
use crate::types::{AlbumSummary, ArtistMeta, TrackRecord};
use crate::Result;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

/// Options controlling one collection run.
#[derive(Debug, Clone)]
pub struct CollectOptions {
    /// Shard alphabet for the sweep (and the curated strategy's top-up).
    pub shards: Vec<String>,
    /// Search pagination tunables.
    pub search: crate::search::SearchConfig,
    /// Page size for the album tracks walker.
    pub tracks_limit: u32,
    /// Whether to resolve artist metadata (followers, genres, popularity).
    pub enrich_artists: bool,
    /// Whether to resolve per-track popularity.
    pub enrich_track_popularity: bool,
    /// Batch size for the resolvers, capped at the API maximum.
    pub batch_size: usize,
    /// Drop records below this track popularity. Applied after popularity
    /// enrichment; ignored when that enrichment is disabled.
    pub min_popularity: u32,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            shards: crate::shard::ShardStrategy::Letters.build(),
            search: crate::search::SearchConfig::default(),
            tracks_limit: 50,
            enrich_artists: true,
            enrich_track_popularity: true,
            batch_size: crate::client::MAX_BATCH_SIZE,
            min_popularity: 0,
        }
    }
}

/// How the orchestrator gathers the parent album set for one period and
/// market.
///
/// The two strategies trade recall against precision and speed; they are
/// interchangeable behind this trait and share everything downstream of the
/// album set.
#[async_trait(?Send)]
pub trait CollectStrategy<C: CatalogClient + ?Sized> {
    /// Gather the deduplicated album set for the period.
    async fn gather_albums(
        &self,
        client: &C,
        year: u16,
        market: &str,
        options: &CollectOptions,
    ) -> Result<Vec<AlbumSummary>>;
}

/// Exhaustive recall: sweep the full shard alphabet.
#[derive(Debug, Clone, Default)]
pub struct ShardSweep;

#[async_trait(?Send)]
impl<C: CatalogClient + ?Sized> CollectStrategy<C> for ShardSweep {
    async fn gather_albums(
        &self,
        client: &C,
        year: u16,
        market: &str,
        options: &CollectOptions,
    ) -> Result<Vec<AlbumSummary>> {
        search_albums_by_year(client, year, market, &options.shards, &options.search).await
    }
}

/// Precision over recall: seed from curated editorial queries, then top up
/// with the shard sweep until a target album count is reached.
#[derive(Debug, Clone)]
pub struct CuratedFirst {
    /// Editorial query strings tried first, combined with the year filter.
    pub seed_queries: Vec<String>,
    /// Stop gathering once this many albums are found.
    pub target_count: usize,
}

impl Default for CuratedFirst {
    fn default() -> Self {
        Self {
            seed_queries: vec![
                "top hits".to_string(),
                "greatest hits".to_string(),
                "viral hits".to_string(),
                "best of".to_string(),
            ],
            target_count: 500,
        }
    }
}

#[async_trait(?Send)]
impl<C: CatalogClient + ?Sized> CollectStrategy<C> for CuratedFirst {
    async fn gather_albums(
        &self,
        client: &C,
        year: u16,
        market: &str,
        options: &CollectOptions,
    ) -> Result<Vec<AlbumSummary>> {
        let mut seen = HashSet::new();
        let mut albums = Vec::new();

        for seed in &self.seed_queries {
            if albums.len() >= self.target_count {
                break;
            }
            let query = format!("year:{year} {seed}");
            if let Err(error) = search_album_query(
                client,
                &query,
                market,
                year,
                &options.search,
                &mut seen,
                &mut albums,
            )
            .await
            {
                log::warn!("Curated query '{seed}' failed for {year} in {market}, skipping: {error}");
            }
        }

        // Top up with the shard sweep until the target is met.
        for shard in &options.shards {
            if albums.len() >= self.target_count {
                break;
            }
            let query = format!("year:{year} artist:{shard}");
            if let Err(error) = search_album_query(
                client,
                &query,
                market,
                year,
                &options.search,
                &mut seen,
                &mut albums,
            )
            .await
            {
                log::warn!("Shard '{shard}' failed for {year} in {market}, skipping: {error}");
            }
        }

        albums.truncate(self.target_count);
        Ok(albums)
    }
}

/// Deduplicate records by track id, first occurrence winning.
pub fn dedup_records(records: Vec<TrackRecord>) -> Vec<TrackRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.track_id.clone()))
        .collect()
}

fn apply_artist_meta(records: &mut [TrackRecord], meta: &HashMap<String, ArtistMeta>) {
    for record in records {
        let resolved = record
            .primary_artist_id()
            .and_then(|id| meta.get(id))
            .cloned()
            .unwrap_or_default();
        record.primary_artist_followers = resolved.followers;
        record.primary_artist_genres = resolved.genres;
        record.primary_artist_popularity = resolved.popularity;
    }
}

fn apply_track_popularity(records: &mut [TrackRecord], popularity: &HashMap<String, u32>) {
    for record in records {
        record.track_popularity = popularity.get(&record.track_id).copied().unwrap_or(0);
    }
}

/// Collect all unique track records for one year and market.
pub async fn collect_market<C, S>(
    client: &C,
    strategy: &S,
    year: u16,
    market: &str,
    options: &CollectOptions,
) -> Result<Vec<TrackRecord>>
where
    C: CatalogClient + ?Sized,
    S: CollectStrategy<C>,
{
    let albums = strategy.gather_albums(client, year, market, options).await?;
    log::info!("[{year} | {market}] Found {} unique albums", albums.len());

    let mut records = Vec::new();
    for album in &albums {
        let mut walker = AlbumTracksIterator::new(client, &album.id, market, options.tracks_limit);
        match walker.collect_all().await {
            Ok(tracks) => {
                for track in tracks {
                    records.push(TrackRecord::from_parts(year, market, album, track));
                }
            }
            Err(error) => {
                log::warn!(
                    "Skipping album '{}' ({}) after fetch failure: {error}",
                    album.name,
                    album.id
                );
            }
        }
    }

    // Defensive: a track should only appear under one album, but reruns and
    // merges must stay idempotent.
    let mut records = dedup_records(records);
    log::info!("[{year} | {market}] Collected {} unique tracks", records.len());

    if options.enrich_artists && !records.is_empty() {
        let artist_ids = records
            .iter()
            .flat_map(|record| record.artist_ids.iter().cloned())
            .collect::<Vec<_>>();
        let meta = resolve_artists(client, artist_ids, options.batch_size).await?;
        apply_artist_meta(&mut records, &meta);
    }

    if options.enrich_track_popularity && !records.is_empty() {
        let track_ids = records
            .iter()
            .map(|record| record.track_id.clone())
            .collect::<Vec<_>>();
        let popularity = resolve_track_popularity(client, track_ids, options.batch_size).await?;
        apply_track_popularity(&mut records, &popularity);

        if options.min_popularity > 0 {
            records.retain(|record| record.track_popularity >= options.min_popularity);
        }
    }

    Ok(records)
}

/// Collect one period across all requested markets and merge into a
/// snapshot.
///
/// The same catalog item can surface identically in several markets, so the
/// concatenated record lists are re-deduplicated by track id, first market
/// winning.
pub async fn collect_period<C, S>(
    client: &C,
    strategy: &S,
    year: u16,
    markets: &[String],
    options: &CollectOptions,
) -> Result<Snapshot>
where
    C: CatalogClient + ?Sized,
    S: CollectStrategy<C>,
{
    let mut merged = Vec::new();
    for market in markets {
        let records = collect_market(client, strategy, year, market, options).await?;
        merged.extend(records);
    }
    Ok(Snapshot::new(year, markets.to_vec(), dedup_records(merged)))
}
