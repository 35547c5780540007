//! Core record type for weekstash.
//!
//! This module defines the fundamental data structure for representing a
//! stashed file: its metadata plus the embedded data URI content.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::week::WeekKey;

/// Process-local sequence number mixed into id derivation so two stashes of
/// the same file in the same instant still get distinct ids.
static ID_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// One stashed file: metadata plus embedded content.
///
/// Records are immutable after creation. The `content` field holds the full
/// `data:<media-type>;base64,...` embedding of the original bytes, so a
/// record is self-contained and the original file can be reconstructed from
/// the store alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRecord {
    /// Opaque unique identifier, assigned at creation.
    pub id: String,

    /// Original file name (no path component).
    pub name: String,

    /// Size of the original content in bytes.
    pub size: u64,

    /// MIME type inferred from the file extension.
    pub media_type: String,

    /// Data URI embedding of the file content.
    pub content: String,

    /// When this record was stashed.
    pub uploaded_at: DateTime<Utc>,

    /// Grouping key derived from the upload date.
    pub week_key: WeekKey,
}

impl UploadRecord {
    /// Create a new record, stamping the current time and a fresh id.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        size: u64,
        media_type: impl Into<String>,
        content: impl Into<String>,
        week_key: WeekKey,
    ) -> Self {
        let name = name.into();
        let uploaded_at = Utc::now();
        Self {
            id: Self::derive_id(&name, uploaded_at),
            name,
            size,
            media_type: media_type.into(),
            content: content.into(),
            uploaded_at,
            week_key,
        }
    }

    /// Derive a unique record id.
    ///
    /// Base-36 upload millis followed by a short blake3 digest over the
    /// name, the nanosecond timestamp, and a process-local sequence number.
    #[must_use]
    pub fn derive_id(name: &str, at: DateTime<Utc>) -> String {
        let sequence = ID_SEQUENCE.fetch_add(1, Ordering::Relaxed);

        let mut hasher = blake3::Hasher::new();
        hasher.update(name.as_bytes());
        hasher.update(&at.timestamp_nanos_opt().unwrap_or_default().to_le_bytes());
        hasher.update(&sequence.to_le_bytes());
        let digest = hasher.finalize().to_hex();

        let millis = u64::try_from(at.timestamp_millis()).unwrap_or(0);
        format!("{}{}", to_base36(millis), &digest.as_str()[..6])
    }

    /// Size of the original content in whole KiB, rounded to nearest.
    #[must_use]
    pub fn size_kib(&self) -> u64 {
        (self.size + 512) / 1024
    }

    /// Check whether this record embeds an image.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

/// Render a number in lowercase base 36.
fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
