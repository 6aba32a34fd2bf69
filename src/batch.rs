//! Batch metadata resolution.
//!
//! Turns many individual "fetch metadata for id X" needs into few grouped
//! requests: input ids are deduplicated, split into batches no larger than
//! the API's documented cap, resolved one batch at a time, and merged into
//! a single map. Ids the API does not know are absent from the result, not
//! an error; enrichment falls back to defined defaults for them.

use crate::client::MAX_BATCH_SIZE;
use crate::r#trait::CatalogClient;
use crate::types::ArtistMeta;
use crate::Result;
use std::collections::{HashMap, HashSet};

/// Deduplicate ids, dropping empties, preserving first-seen order.
pub fn dedupe_ids<I>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| !id.is_empty())
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// Resolve artist ids to their metadata in batches of at most `batch_size`.
pub async fn resolve_artists<C, I>(
    client: &C,
    ids: I,
    batch_size: usize,
) -> Result<HashMap<String, ArtistMeta>>
where
    C: CatalogClient + ?Sized,
    I: IntoIterator<Item = String>,
{
    let unique = dedupe_ids(ids);
    let batch_size = batch_size.clamp(1, MAX_BATCH_SIZE);
    let mut resolved = HashMap::new();
    for batch in unique.chunks(batch_size) {
        for meta in client.artists_batch(batch).await? {
            resolved.insert(meta.id.clone(), meta);
        }
    }
    Ok(resolved)
}

/// Resolve track ids to popularity scores in batches of at most
/// `batch_size`.
pub async fn resolve_track_popularity<C, I>(
    client: &C,
    ids: I,
    batch_size: usize,
) -> Result<HashMap<String, u32>>
where
    C: CatalogClient + ?Sized,
    I: IntoIterator<Item = String>,
{
    let unique = dedupe_ids(ids);
    let batch_size = batch_size.clamp(1, MAX_BATCH_SIZE);
    let mut resolved = HashMap::new();
    for batch in unique.chunks(batch_size) {
        for pop in client.tracks_batch(batch).await? {
            resolved.insert(pop.id, pop.popularity);
        }
    }
    Ok(resolved)
}
