pub mod api;
pub mod auth;
pub mod batch;
pub mod client;
pub mod collect;
pub mod cursor;
pub mod error;
pub mod iterator;
pub mod retry;
pub mod search;
pub mod shard;
pub mod snapshot;
pub mod r#trait;
pub mod types;

pub use auth::{request_access_token, request_access_token_at, AccessToken, Credentials};
pub use batch::{dedupe_ids, resolve_artists, resolve_track_popularity};
pub use client::{SpotifyClient, DEFAULT_API_BASE, MAX_BATCH_SIZE};
pub use collect::{
    collect_market, collect_period, dedup_records, CollectOptions, CollectStrategy, CuratedFirst,
    ShardSweep,
};
pub use cursor::PageCursor;
pub use error::HarvestError;
pub use iterator::{AlbumTracksIterator, AsyncPaginatedIterator};
pub use r#trait::CatalogClient;
pub use retry::RetryConfig;
pub use search::{search_album_query, search_albums_by_year, SearchConfig};
pub use shard::ShardStrategy;
pub use snapshot::Snapshot;
pub use types::{
    AlbumPage, AlbumSummary, ArtistMeta, ArtistRef, TrackItem, TrackPage, TrackPop, TrackRecord,
};

#[cfg(feature = "mock")]
pub use r#trait::MockCatalogClient;

pub type Result<T> = std::result::Result<T, HarvestError>;
