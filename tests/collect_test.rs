//! End-to-end collection tests against a scripted catalog.

mod common;

use common::{album, search_key, track, tracks_key, FakeCatalog};
use spotify_harvest::{
    collect_market, collect_period, resolve_artists, AlbumTracksIterator, ArtistMeta,
    AsyncPaginatedIterator, CollectOptions, CollectStrategy, CuratedFirst, SearchConfig,
    ShardSweep,
};

fn two_shard_options() -> CollectOptions {
    CollectOptions {
        shards: vec!["a".to_string(), "b".to_string()],
        enrich_artists: false,
        enrich_track_popularity: false,
        ..CollectOptions::default()
    }
}

#[tokio::test]
async fn overlapping_shards_yield_unique_records_in_discovery_order() {
    let mut catalog = FakeCatalog::new();
    // Album X surfaces in both shards; first occurrence wins.
    catalog.add_search(
        "year:2024 artist:a",
        "BR",
        vec![album("X", "2024-01-01", "art1"), album("Y", "2024-05-01", "art1")],
    );
    catalog.add_search(
        "year:2024 artist:b",
        "BR",
        vec![album("X", "2024-01-01", "art1"), album("Z", "2024-09-01", "art2")],
    );
    catalog.add_tracks("X", vec![track("tX", "art1")]);
    catalog.add_tracks("Y", vec![track("tY", "art1")]);
    catalog.add_tracks("Z", vec![track("tZ", "art2")]);

    let records = collect_market(&catalog, &ShardSweep, 2024, "BR", &two_shard_options())
        .await
        .unwrap();

    let ids: Vec<_> = records.iter().map(|r| r.track_id.as_str()).collect();
    assert_eq!(ids, vec!["tX", "tY", "tZ"]);
}

#[tokio::test]
async fn albums_outside_the_requested_year_are_filtered_out() {
    let mut catalog = FakeCatalog::new();
    catalog.add_search(
        "year:2024 artist:a",
        "BR",
        vec![
            album("in", "2024-07-01", "art1"),
            album("out", "2023-12-31", "art1"),
            album("year_only", "2024", "art1"),
        ],
    );
    catalog.add_tracks("in", vec![track("t_in", "art1")]);
    catalog.add_tracks("out", vec![track("t_out", "art1")]);
    catalog.add_tracks("year_only", vec![track("t_yo", "art1")]);

    let options = CollectOptions {
        shards: vec!["a".to_string()],
        ..two_shard_options()
    };
    let records = collect_market(&catalog, &ShardSweep, 2024, "BR", &options)
        .await
        .unwrap();

    let ids: Vec<_> = records.iter().map(|r| r.track_id.as_str()).collect();
    assert_eq!(ids, vec!["t_in", "t_yo"]);
}

#[tokio::test]
async fn page_cap_bounds_fetches_per_shard() {
    let mut catalog = FakeCatalog::new();
    // A five-page chain per shard; a cap of two must stop the walk early.
    for shard in ["a", "b"] {
        let first = search_key(&format!("year:2024 artist:{shard}"), "BR");
        let mut key = first;
        for page in 0..5 {
            let next = (page < 4).then(|| format!("{key}:p{}", page + 1));
            catalog.add_page(
                key.clone(),
                vec![album(&format!("{shard}{page}"), "2024-01-01", "art1")],
                next.clone(),
            );
            if let Some(next) = next {
                key = next;
            }
        }
    }

    let options = CollectOptions {
        search: SearchConfig {
            limit: 50,
            max_pages_per_shard: Some(2),
        },
        ..two_shard_options()
    };
    let albums = ShardSweep
        .gather_albums(&catalog, 2024, "BR", &options)
        .await
        .unwrap();

    assert_eq!(catalog.album_page_fetches.get(), 4);
    assert_eq!(albums.len(), 4);
}

#[tokio::test]
async fn track_walker_follows_next_cursors() {
    let mut catalog = FakeCatalog::new();
    let second_page = format!("{}:p2", tracks_key("alb"));
    catalog.add_tracks_page(
        tracks_key("alb"),
        vec![track("t1", "art1")],
        Some(second_page.clone()),
    );
    catalog.add_tracks_page(second_page, vec![track("t2", "art1")], None);

    let mut walker = AlbumTracksIterator::new(&catalog, "alb", "BR", 50);
    let tracks = walker.collect_all().await.unwrap();

    let ids: Vec<_> = tracks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["t1", "t2"]);
    assert_eq!(walker.pages_fetched(), 2);
}

#[tokio::test]
async fn partially_resolved_artists_fall_back_to_defaults() {
    let mut catalog = FakeCatalog::new();
    catalog.add_search(
        "year:2024 artist:a",
        "BR",
        vec![
            album("A1", "2024-01-01", "known1"),
            album("A2", "2024-02-01", "unknown"),
            album("A3", "2024-03-01", "known2"),
        ],
    );
    catalog.add_tracks("A1", vec![track("t1", "known1")]);
    catalog.add_tracks("A2", vec![track("t2", "unknown")]);
    catalog.add_tracks("A3", vec![track("t3", "known2")]);
    catalog.add_artist(ArtistMeta {
        id: "known1".to_string(),
        name: "Known One".to_string(),
        followers: 1000,
        genres: vec!["mpb".to_string()],
        popularity: 70,
    });
    catalog.add_artist(ArtistMeta {
        id: "known2".to_string(),
        name: "Known Two".to_string(),
        followers: 2000,
        genres: vec!["samba".to_string()],
        popularity: 55,
    });

    let options = CollectOptions {
        shards: vec!["a".to_string()],
        enrich_artists: true,
        enrich_track_popularity: false,
        ..CollectOptions::default()
    };
    let records = collect_market(&catalog, &ShardSweep, 2024, "BR", &options)
        .await
        .unwrap();

    assert_eq!(records[0].primary_artist_followers, 1000);
    assert_eq!(records[1].primary_artist_followers, 0);
    assert!(records[1].primary_artist_genres.is_empty());
    assert_eq!(records[1].primary_artist_popularity, 0);
    assert_eq!(records[2].primary_artist_followers, 2000);
}

#[tokio::test]
async fn min_popularity_drops_records_after_enrichment() {
    let mut catalog = FakeCatalog::new();
    catalog.add_search(
        "year:2024 artist:a",
        "BR",
        vec![album("A1", "2024-01-01", "art1")],
    );
    catalog.add_tracks(
        "A1",
        vec![track("hit", "art1"), track("obscure", "art1"), track("unknown", "art1")],
    );
    catalog.add_track_pop("hit", 80);
    catalog.add_track_pop("obscure", 10);
    // "unknown" resolves to nothing and defaults to popularity 0.

    let options = CollectOptions {
        shards: vec!["a".to_string()],
        enrich_artists: false,
        enrich_track_popularity: true,
        min_popularity: 50,
        ..CollectOptions::default()
    };
    let records = collect_market(&catalog, &ShardSweep, 2024, "BR", &options)
        .await
        .unwrap();

    let ids: Vec<_> = records.iter().map(|r| r.track_id.as_str()).collect();
    assert_eq!(ids, vec!["hit"]);
    assert_eq!(records[0].track_popularity, 80);
}

#[tokio::test]
async fn cross_market_merge_keeps_first_market() {
    let mut catalog = FakeCatalog::new();
    for market in ["BR", "US"] {
        catalog.add_search(
            "year:2024 artist:a",
            market,
            vec![album("shared", "2024-01-01", "art1")],
        );
    }
    catalog.add_tracks("shared", vec![track("t1", "art1")]);

    let options = CollectOptions {
        shards: vec!["a".to_string()],
        ..two_shard_options()
    };
    let snapshot = collect_period(
        &catalog,
        &ShardSweep,
        2024,
        &["BR".to_string(), "US".to_string()],
        &options,
    )
    .await
    .unwrap();

    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.records[0].market, "BR");
    assert_eq!(snapshot.markets, vec!["BR", "US"]);
}

#[tokio::test]
async fn failed_shard_is_skipped_not_fatal() {
    let mut catalog = FakeCatalog::new();
    catalog.fail_search("year:2024 artist:a", "BR");
    catalog.add_search(
        "year:2024 artist:b",
        "BR",
        vec![album("B1", "2024-01-01", "art1")],
    );
    catalog.add_tracks("B1", vec![track("t1", "art1")]);

    let records = collect_market(&catalog, &ShardSweep, 2024, "BR", &two_shard_options())
        .await
        .unwrap();

    let ids: Vec<_> = records.iter().map(|r| r.track_id.as_str()).collect();
    assert_eq!(ids, vec!["t1"]);
}

#[tokio::test]
async fn empty_search_results_produce_empty_snapshot() {
    let catalog = FakeCatalog::new();
    let snapshot = collect_period(
        &catalog,
        &ShardSweep,
        2024,
        &["BR".to_string()],
        &two_shard_options(),
    )
    .await
    .unwrap();
    assert!(snapshot.is_empty());
}

#[tokio::test]
async fn curated_first_prefers_seeds_and_honors_target() {
    let mut catalog = FakeCatalog::new();
    catalog.add_search(
        "year:2024 top hits",
        "BR",
        vec![album("seeded", "2024-01-01", "art1")],
    );
    catalog.add_search(
        "year:2024 artist:a",
        "BR",
        vec![
            album("swept1", "2024-02-01", "art1"),
            album("swept2", "2024-03-01", "art1"),
            album("swept3", "2024-04-01", "art1"),
        ],
    );

    let strategy = CuratedFirst {
        seed_queries: vec!["top hits".to_string()],
        target_count: 2,
    };
    let options = two_shard_options();
    let albums = strategy
        .gather_albums(&catalog, 2024, "BR", &options)
        .await
        .unwrap();

    let ids: Vec<_> = albums.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["seeded", "swept1"]);
}

#[tokio::test]
async fn batch_resolver_never_exceeds_the_cap() {
    let mut catalog = FakeCatalog::new();
    for i in 0..30 {
        catalog.add_artist(ArtistMeta {
            id: format!("art{i}"),
            name: format!("Artist {i}"),
            followers: i,
            genres: Vec::new(),
            popularity: 50,
        });
    }
    // 120 ids with duplicates; resolution happens over the unique set.
    let ids: Vec<String> = (0..120).map(|i| format!("art{}", i % 60)).collect();

    let resolved = resolve_artists(&catalog, ids, 200).await.unwrap();

    assert!(catalog.max_batch_seen.get() <= spotify_harvest::MAX_BATCH_SIZE);
    assert_eq!(resolved.len(), 30);
    assert!(resolved.keys().all(|id| id.starts_with("art")));
}

#[tokio::test]
async fn small_batch_size_is_respected() {
    let mut catalog = FakeCatalog::new();
    let ids: Vec<String> = (0..25).map(|i| format!("art{i}")).collect();
    resolve_artists(&catalog, ids, 7).await.unwrap();
    assert!(catalog.max_batch_seen.get() <= 7);
}
