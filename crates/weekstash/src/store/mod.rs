//! Record store for weekstash.
//!
//! The whole collection of upload records persists as one JSON-serialized
//! array in a single store file. Every mutation is a read-modify-write of
//! the full array: append and delete rewrite the entire blob. Last writer
//! wins; concurrent processes are not coordinated.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::record::UploadRecord;
use crate::week::group_by_week;

/// Store for upload records.
///
/// Holds the full collection in memory and mirrors every mutation to the
/// store file. Opening a store with a missing file yields an empty
/// collection; a corrupt file also yields an empty collection, with a
/// logged warning (the data loss is accepted, not recovered).
#[derive(Debug)]
pub struct Store {
    /// Path to the store file; `None` for a memory-only store.
    path: Option<PathBuf>,
    /// Pretty-print the persisted JSON.
    pretty: bool,
    /// The full record collection.
    records: Vec<UploadRecord>,
}

impl Store {
    /// Open or create a store at the given path.
    ///
    /// Creates nothing on disk until the first mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if the store file exists but cannot be read.
    /// A file that reads fine but does not parse is treated as corrupt
    /// and replaced by an empty collection, not an error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, false)
    }

    /// Open a store with an explicit pretty-printing choice.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Store::open`].
    pub fn open_with(path: impl AsRef<Path>, pretty: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let records = Self::load(&path)?;

        debug!("Opened store at {} ({} records)", path.display(), records.len());
        Ok(Self {
            path: Some(path),
            pretty,
            records,
        })
    }

    /// Create a memory-only store for testing.
    ///
    /// Mutations behave normally but nothing is written to disk.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            pretty: false,
            records: Vec::new(),
        }
    }

    /// Get the path to the store file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read and parse the persisted collection.
    fn load(path: &Path) -> Result<Vec<UploadRecord>> {
        let raw = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(Error::StoreRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        match serde_json::from_slice(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                // Corrupt blob: substitute an empty collection (spilled data
                // is gone the next time the store is written)
                warn!(
                    "Store at {} is corrupt ({}), starting with an empty collection",
                    path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    /// Serialize the full collection and overwrite the store file.
    ///
    /// Writes to a sibling temp file and renames it into place so a crash
    /// mid-write never leaves a half-written blob behind.
    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let blob = if self.pretty {
            serde_json::to_vec_pretty(&self.records)?
        } else {
            serde_json::to_vec(&self.records)?
        };

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &blob).map_err(|source| Error::StoreWrite {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, path).map_err(|source| Error::StoreWrite {
            path: path.clone(),
            source,
        })?;

        debug!("Persisted {} records to {}", self.records.len(), path.display());
        Ok(())
    }

    /// The full record collection, in insertion order.
    #[must_use]
    pub fn records(&self) -> &[UploadRecord] {
        &self.records
    }

    /// Number of records in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get a record by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&UploadRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Append a record and persist the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if a record with the same id already exists or if
    /// the collection cannot be persisted.
    pub fn append(&mut self, record: UploadRecord) -> Result<()> {
        if self.get(&record.id).is_some() {
            return Err(Error::DuplicateId { id: record.id });
        }

        debug!("Appending record {} ({})", record.id, record.name);
        self.records.push(record);
        self.persist()
    }

    /// Delete the record with the given id and persist the remainder.
    ///
    /// Returns `true` if a record was removed, `false` if no record
    /// matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);

        if self.records.len() == before {
            return Ok(false);
        }

        info!("Deleted record {}", id);
        self.persist()?;
        Ok(true)
    }

    /// Get store statistics.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        let total_content_bytes = self.records.iter().map(|r| r.size).sum();
        let oldest_upload = self.records.iter().map(|r| r.uploaded_at).min();
        let newest_upload = self.records.iter().map(|r| r.uploaded_at).max();
        let week_count = group_by_week(&self.records).len();

        let store_size_bytes = self
            .path
            .as_ref()
            .and_then(|p| std::fs::metadata(p).ok())
            .map_or(0, |m| m.len());

        StoreStats {
            total_records: self.records.len(),
            total_content_bytes,
            oldest_upload,
            newest_upload,
            week_count,
            store_size_bytes,
        }
    }
}

/// Statistics about the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    /// Total number of records stored.
    pub total_records: usize,
    /// Sum of original file sizes across all records, in bytes.
    pub total_content_bytes: u64,
    /// Timestamp of the oldest upload.
    pub oldest_upload: Option<DateTime<Utc>>,
    /// Timestamp of the newest upload.
    pub newest_upload: Option<DateTime<Utc>>,
    /// Number of distinct week groups.
    pub week_count: usize,
    /// Size of the store file in bytes (0 for memory-only stores).
    pub store_size_bytes: u64,
}
