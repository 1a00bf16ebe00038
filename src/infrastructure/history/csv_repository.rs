//! CSV-file implementation of the prediction history

use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::{DomainError, HistoryRecord, HistoryRepository};

/// History stored as a CSV file with one header row.
///
/// Every append reopens the file in append mode. Appends from several
/// processes at once are not coordinated.
#[derive(Debug, Clone)]
pub struct CsvHistoryRepository {
    path: PathBuf,
}

impl CsvHistoryRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn run_blocking<T, F>(&self, operation: F) -> Result<T, DomainError>
    where
        T: Send + 'static,
        F: FnOnce(PathBuf) -> Result<T, DomainError> + Send + 'static,
    {
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || operation(path))
            .await
            .map_err(|e| DomainError::internal(format!("History task failed: {}", e)))?
    }
}

#[async_trait]
impl HistoryRepository for CsvHistoryRepository {
    async fn append(&self, record: HistoryRecord) -> Result<(), DomainError> {
        self.run_blocking(move |path| append_record(&path, &record))
            .await
    }

    async fn load(&self) -> Result<Vec<HistoryRecord>, DomainError> {
        self.run_blocking(|path| load_records(&path)).await
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.run_blocking(|path| remove_log(&path)).await
    }
}

fn append_record(path: &Path, record: &HistoryRecord) -> Result<(), DomainError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| storage_error(path, e))?;
    }

    // header only for a new (or empty) log
    let write_header = match fs::metadata(path) {
        Ok(metadata) => metadata.len() == 0,
        Err(e) if e.kind() == ErrorKind::NotFound => true,
        Err(e) => return Err(storage_error(path, e)),
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| storage_error(path, e))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(write_header)
        .from_writer(file);

    writer
        .serialize(record)
        .map_err(|e| storage_error(path, e))?;
    writer.flush().map_err(|e| storage_error(path, e))?;

    debug!(path = %path.display(), header = write_header, "Appended prediction to history");
    Ok(())
}

fn load_records(path: &Path) -> Result<Vec<HistoryRecord>, DomainError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(storage_error(path, e)),
    };

    csv::Reader::from_reader(file)
        .deserialize()
        .collect::<Result<Vec<HistoryRecord>, _>>()
        .map_err(|e| storage_error(path, e))
}

fn remove_log(path: &Path) -> Result<(), DomainError> {
    match fs::remove_file(path) {
        Ok(()) => {
            info!(path = %path.display(), "Cleared prediction history");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(storage_error(path, e)),
    }
}

fn storage_error(path: &Path, err: impl std::fmt::Display) -> DomainError {
    DomainError::storage(format!("{}: {}", path.display(), err))
}
