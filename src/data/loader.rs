use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use thiserror::Error;

use super::model::{Dataset, PlayerRecord, COLUMNS};

#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("cannot open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV missing '{0}' column")]
    MissingColumn(&'static str),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },
}

// ---------------------------------------------------------------------------
// DatasetStore – load once, share read-only
// ---------------------------------------------------------------------------

/// Owns the canonical dataset for one data file.
///
/// The first successful [`DatasetStore::load`] reads the file; every later
/// call hands out the same `Arc` without touching the filesystem. A failed
/// load leaves the store empty so the caller may retry.
#[derive(Debug)]
pub struct DatasetStore {
    path: PathBuf,
    cache: OnceLock<Arc<Dataset>>,
}

impl DatasetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.get().is_some()
    }

    pub fn load(&self) -> Result<Arc<Dataset>, DataLoadError> {
        if let Some(dataset) = self.cache.get() {
            log::debug!("dataset cache hit for {}", self.path.display());
            return Ok(Arc::clone(dataset));
        }

        let loaded = Arc::new(load_path(&self.path)?);
        log::info!(
            "Loaded {} players across {} positions from {}",
            loaded.len(),
            loaded.positions().len(),
            self.path.display()
        );
        Ok(Arc::clone(self.cache.get_or_init(|| loaded)))
    }
}

// ---------------------------------------------------------------------------
// CSV reading
// ---------------------------------------------------------------------------

/// Open `path` and parse it with [`read_dataset`].
pub fn load_path(path: &Path) -> Result<Dataset, DataLoadError> {
    let file = File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_dataset(file)
}

/// Parse the seven-column player table from any reader.
///
/// Columns may appear in any order; extra columns are ignored. Rows keep
/// their file order.
pub fn read_dataset<R: Read>(input: R) -> Result<Dataset, DataLoadError> {
    let mut reader = csv::Reader::from_reader(input);

    let headers = reader.headers()?.clone();
    if let Some(missing) = COLUMNS
        .iter()
        .find(|col| !headers.iter().any(|h| h == **col))
    {
        return Err(DataLoadError::MissingColumn(*missing));
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let record: PlayerRecord = row.deserialize(Some(&headers))?;
        let line = row.position().map_or(0, |p| p.line());
        validate_record(&record).map_err(|reason| DataLoadError::InvalidRecord { line, reason })?;
        records.push(record);
    }

    Ok(Dataset::from_records(records))
}

fn validate_record(record: &PlayerRecord) -> Result<(), String> {
    if record.player_name.is_empty() {
        return Err("empty player_name".to_string());
    }
    if !(0.0..=100.0).contains(&record.injury_risk) {
        return Err(format!(
            "injury_risk {} outside 0–100 for '{}'",
            record.injury_risk, record.player_name
        ));
    }
    for (col, value) in [
        ("recovery_score", record.recovery_score),
        ("training_load", record.training_load),
    ] {
        if !value.is_finite() {
            return Err(format!("{col} is not a finite number for '{}'", record.player_name));
        }
    }
    Ok(())
}
