//! Upload pipeline: files on disk become stashed records.
//!
//! Files are read sequentially, each one awaited before the next, so the
//! order of appended records always matches the order the paths were given
//! in. A failure rejects the whole in-flight operation; records appended
//! before the failing file stay in the store (no partial-state cleanup).

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info};

use crate::config::Config;
use crate::datauri;
use crate::error::{Error, Result};
use crate::record::UploadRecord;
use crate::store::Store;

/// Stash files into the store.
///
/// For each path in order: read the bytes, infer the media type from the
/// extension, encode the content as a data URI, stamp the current time and
/// the configured week key, and append the record. Returns the appended
/// records in order.
///
/// # Errors
///
/// Returns an error if a file cannot be read, exceeds the configured size
/// bound, or the store cannot be persisted. Records appended before the
/// failure remain stored.
pub async fn stash_files(
    store: &mut Store,
    config: &Config,
    paths: &[PathBuf],
) -> Result<Vec<UploadRecord>> {
    let mut appended = Vec::with_capacity(paths.len());

    for path in paths {
        let record = read_into_record(config, path).await?;
        debug!("Stashing {} as {}", path.display(), record.id);
        appended.push(record.clone());
        store.append(record)?;
    }

    info!("Stashed {} file(s)", appended.len());
    Ok(appended)
}

/// Read one file and build its record.
async fn read_into_record(config: &Config, path: &Path) -> Result<UploadRecord> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

    let limit = config.upload.max_file_bytes;
    if metadata.len() > limit {
        return Err(Error::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit,
        });
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    let media_type = datauri::media_type_for_path(path);
    let content = datauri::encode(media_type, &bytes);
    let week_key = config.weeks.key_for(Utc::now().date_naive());

    let size = u64::try_from(bytes.len()).unwrap_or(u64::MAX);

    Ok(UploadRecord::new(name, size, media_type, content, week_key))
}
