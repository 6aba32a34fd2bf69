//! Search shard alphabets.
//!
//! The search endpoint caps the retrievable offset at 1000, which truncates
//! recall for high-cardinality queries like "all albums from year Y". The
//! workaround is to intersect the query with a partition predicate
//! (`artist:<shard>`) over every shard in a fixed alphabet and take the
//! disjoint union of per-shard results. This is a heuristic coverage
//! strategy with a known recall ceiling, not a completeness guarantee:
//! items that still tie past the cap within a single shard are silently
//! missed.

use clap::ValueEnum;

/// Which shard alphabet to sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShardStrategy {
    /// Digits 0-9 plus single letters a-z (36 shards).
    Letters,
    /// Digits 0-9 plus letter bigrams aa-zz (686 shards), for larger
    /// corpora where single letters still overflow the offset cap.
    Bigrams,
}

impl ShardStrategy {
    /// Materialize the shard alphabet for this strategy.
    pub fn build(self) -> Vec<String> {
        let digits = (0..10).map(|d| d.to_string());
        match self {
            ShardStrategy::Letters => digits
                .chain(('a'..='z').map(|c| c.to_string()))
                .collect(),
            ShardStrategy::Bigrams => digits
                .chain(('a'..='z').flat_map(|a| ('a'..='z').map(move |b| format!("{a}{b}"))))
                .collect(),
        }
    }
}
