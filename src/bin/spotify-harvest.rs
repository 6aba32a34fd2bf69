use clap::Parser;
use spotify_harvest::{
    collect_period, request_access_token, CollectOptions, Credentials, CuratedFirst, SearchConfig,
    ShardStrategy, ShardSweep, SpotifyClient,
};
use std::path::PathBuf;

/// Which orchestration strategy gathers the parent album set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Strategy {
    /// Exhaustive shard-alphabet sweep (maximum recall).
    ShardSweep,
    /// Curated editorial queries first, shard top-up to a target count
    /// (precision and speed over recall).
    CuratedFirst,
}

/// Spotify catalog collector: albums by year, tracks, batch enrichment, CSV
#[derive(Parser)]
#[command(
    name = "spotify-harvest",
    about = "Collect Spotify catalog/track data by release year into CSV snapshots",
    long_about = None
)]
struct Cli {
    /// Target release years (e.g. 2023 2024)
    #[arg(long, num_args = 1.., required = true)]
    years: Vec<u16>,

    /// Target markets (e.g. BR US GB)
    #[arg(long, num_args = 1.., default_values_t = vec!["BR".to_string()])]
    markets: Vec<String>,

    /// Shard alphabet: letters (0-9 + a-z) or bigrams (0-9 + aa..zz)
    #[arg(long, value_enum, default_value = "letters")]
    shards: ShardStrategy,

    /// Results per search page (the API caps this at 50)
    #[arg(long, default_value_t = 50)]
    limit: u32,

    /// Cap on pages fetched per shard (mainly for debugging)
    #[arg(long)]
    max_pages_per_shard: Option<u32>,

    /// Orchestration strategy
    #[arg(long, value_enum, default_value = "shard-sweep")]
    strategy: Strategy,

    /// Drop tracks below this popularity (needs track enrichment)
    #[arg(long, default_value_t = 0)]
    min_popularity: u32,

    /// Album target for the curated-first strategy
    #[arg(long, default_value_t = 500)]
    target_count: usize,

    /// Skip artist enrichment (/v1/artists)
    #[arg(long)]
    no_enrich_artists: bool,

    /// Skip track popularity enrichment (/v1/tracks)
    #[arg(long)]
    no_enrich_track_pop: bool,

    /// Output directory for CSV snapshots
    #[arg(long, default_value = "raw_data")]
    outdir: PathBuf,

    /// Prefix for generated CSV filenames
    #[arg(long, default_value = "tracks_catalog")]
    outfile_prefix: String,

    /// Show detailed debug information
    #[arg(long, global = true)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default()
            .default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .init();

    // Credentials are fatal before any network activity.
    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            eprintln!("❌ Error: {e}");
            eprintln!();
            eprintln!("Please set the following environment variables (or a local .env):");
            eprintln!("  SPOTIFY_CLIENT_ID=your_client_id");
            eprintln!("  SPOTIFY_CLIENT_SECRET=your_client_secret");
            std::process::exit(1);
        }
    };

    let token = {
        let http = http_client::native::NativeClient::new();
        match request_access_token(&http, &credentials).await {
            Ok(token) => token,
            Err(e) => {
                eprintln!("❌ Failed to obtain access token: {e}");
                std::process::exit(1);
            }
        }
    };

    let client = SpotifyClient::new(Box::new(http_client::native::NativeClient::new()), token);

    let options = CollectOptions {
        shards: args.shards.build(),
        search: SearchConfig {
            limit: args.limit,
            max_pages_per_shard: args.max_pages_per_shard,
        },
        tracks_limit: 50,
        enrich_artists: !args.no_enrich_artists,
        enrich_track_popularity: !args.no_enrich_track_pop,
        batch_size: spotify_harvest::MAX_BATCH_SIZE,
        min_popularity: args.min_popularity,
    };

    let mut failures = 0usize;
    for year in &args.years {
        let result = match args.strategy {
            Strategy::ShardSweep => {
                collect_period(&client, &ShardSweep, *year, &args.markets, &options).await
            }
            Strategy::CuratedFirst => {
                let strategy = CuratedFirst {
                    target_count: args.target_count,
                    ..CuratedFirst::default()
                };
                collect_period(&client, &strategy, *year, &args.markets, &options).await
            }
        };

        match result {
            Ok(snapshot) if snapshot.is_empty() => {
                println!("⚠️  {year}: no records collected, no snapshot written");
            }
            Ok(snapshot) => {
                let path = snapshot.write_to_dir(&args.outdir, &args.outfile_prefix)?;
                println!(
                    "✅ {year}: {} unique tracks written to {}",
                    snapshot.len(),
                    path.display()
                );
            }
            Err(e) => {
                failures += 1;
                eprintln!("❌ {year}: collection failed: {e}");
            }
        }
    }

    if failures > 0 {
        eprintln!("❌ {failures} of {} periods failed", args.years.len());
        std::process::exit(1);
    }

    Ok(())
}
