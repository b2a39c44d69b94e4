use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::{Datelike, NaiveDate};
use thiserror::Error;
use tracing::debug;

use crate::traq::entry::TimeEntry;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no log at {}", path.display())]
    Missing { path: PathBuf },
    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    fn from_io(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            StorageError::Missing { path }
        } else {
            StorageError::Io { path, source }
        }
    }
}

/// Where day logs are read from and appended to.
pub trait DayLogStore {
    /// All entries of one project on one date, in file order.
    fn read_day(&self, project: &str, date: NaiveDate) -> Result<Vec<TimeEntry>, StorageError>;

    /// Appends an entry to the log of the entry's own date.
    fn append(&self, project: &str, entry: &TimeEntry) -> Result<(), StorageError>;
}

/// Plain text logs laid out as `<root>/<project>/<year>/<year>-<month>-<day>`.
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, project: &str, date: NaiveDate) -> PathBuf {
        self.root
            .join(project)
            .join(date.year().to_string())
            .join(date.format("%Y-%m-%d").to_string())
    }
}

impl DayLogStore for FileStorage {
    fn read_day(&self, project: &str, date: NaiveDate) -> Result<Vec<TimeEntry>, StorageError> {
        let path = self.path(project, date);
        let raw = fs::read(&path).map_err(|e| StorageError::from_io(path.clone(), e))?;
        debug!(path = %path.display(), "read day log");
        // invalid bytes only spoil the line they are on
        let content = String::from_utf8_lossy(&raw);
        // `lines` drops the empty piece after the final newline
        Ok(content.lines().map(TimeEntry::decode).collect())
    }

    fn append(&self, project: &str, entry: &TimeEntry) -> Result<(), StorageError> {
        let path = self.path(project, entry.timestamp.date_naive());
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| StorageError::from_io(dir.to_path_buf(), e))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| StorageError::from_io(path.clone(), e))?;
        writeln!(file, "{}", entry.encode()).map_err(|e| StorageError::from_io(path.clone(), e))?;
        debug!(path = %path.display(), tag = %entry.tag, "appended entry");
        Ok(())
    }
}
