//! Persisted CSV snapshots.
//!
//! One flat file per collection period, merging every requested market,
//! named `<prefix>_<year>.csv` under the output directory. There is no
//! schema versioning: downstream consumers rediscover columns by name and
//! tolerate absence.

use crate::types::TrackRecord;
use crate::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// The final, deduplicated output of one collection period.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Collection period (release year).
    pub year: u16,
    /// Markets the records were gathered from.
    pub markets: Vec<String>,
    /// Deduplicated records, in first-occurrence order.
    pub records: Vec<TrackRecord>,
}

impl Snapshot {
    pub fn new(year: u16, markets: Vec<String>, records: Vec<TrackRecord>) -> Self {
        Self {
            year,
            markets,
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize all records as CSV with a header row.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for record in &self.records {
            csv_writer.serialize(record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Write the snapshot to `<outdir>/<prefix>_<year>.csv`, creating the
    /// directory as needed. Returns the path written.
    ///
    /// Callers should skip empty snapshots; files are only meaningful for
    /// periods that produced records.
    pub fn write_to_dir(&self, outdir: &Path, prefix: &str) -> Result<PathBuf> {
        fs::create_dir_all(outdir)?;
        let path = outdir.join(format!("{prefix}_{}.csv", self.year));
        let file = fs::File::create(&path)?;
        self.write_csv(file)?;
        Ok(path)
    }
}
