//! Data URI encoding and media type inference.
//!
//! Stashed files embed their content as `data:<media-type>;base64,<payload>`
//! strings, so a record is self-contained and exporting a file is just
//! decoding the URI back to bytes.

use std::fmt;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{Error, Result};

/// URI scheme prefix.
const DATA_PREFIX: &str = "data:";

/// Encoding marker between the media type and the payload.
const BASE64_MARKER: &str = ";base64,";

/// Fallback media type when the extension is unknown.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Encode bytes as a base64 data URI.
#[must_use]
pub fn encode(media_type: &str, bytes: &[u8]) -> String {
    format!(
        "{DATA_PREFIX}{media_type}{BASE64_MARKER}{}",
        STANDARD.encode(bytes)
    )
}

/// Decode a base64 data URI back into its media type and bytes.
///
/// Only the base64 form is supported; percent-encoded data URIs are
/// rejected because the encoder never produces them.
///
/// # Errors
///
/// Returns an error if the URI lacks the `data:` scheme, the base64
/// marker, or a valid payload.
pub fn decode(uri: &str) -> Result<(String, Vec<u8>)> {
    let rest = uri
        .strip_prefix(DATA_PREFIX)
        .ok_or_else(|| Error::data_uri("missing data: scheme"))?;

    let (media_type, payload) = rest
        .split_once(BASE64_MARKER)
        .ok_or_else(|| Error::data_uri("missing ;base64, marker"))?;

    if media_type.is_empty() {
        return Err(Error::data_uri("empty media type"));
    }

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| Error::data_uri(format!("invalid base64 payload: {e}")))?;

    Ok((media_type.to_string(), bytes))
}

/// Infer a media type from a file extension.
///
/// Covers the document, image, audio, video, and archive types the listing
/// distinguishes; everything else is `application/octet-stream`.
#[must_use]
pub fn media_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("html" | "htm") => "text/html",
        Some("csv") => "text/csv",
        Some("json") => "application/json",
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("ppt") => "application/vnd.ms-powerpoint",
        Some("pptx") => {
            "application/vnd.openxmlformats-officedocument.presentationml.presentation"
        }
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("zip") => "application/zip",
        Some("gz") => "application/gzip",
        Some("tar") => "application/x-tar",
        Some("rar") => "application/vnd.rar",
        Some("7z") => "application/x-7z-compressed",
        _ => OCTET_STREAM,
    }
}

/// Broad media category used for listing glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaCategory {
    /// Raster or vector images.
    Image,
    /// PDF documents.
    Pdf,
    /// Word-processing documents.
    Document,
    /// Spreadsheets.
    Spreadsheet,
    /// Slide decks.
    Presentation,
    /// Video files.
    Video,
    /// Audio files.
    Audio,
    /// Compressed archives.
    Archive,
    /// Everything else.
    Other,
}

impl MediaCategory {
    /// Classify a media type into a broad category.
    ///
    /// The checks mirror the listing's distinctions: exact match for PDF,
    /// prefix match for the media families, substring match for the office
    /// and archive vendor types.
    #[must_use]
    pub fn from_media_type(media_type: &str) -> Self {
        let lower = media_type.to_ascii_lowercase();

        if lower.starts_with("image/") {
            return Self::Image;
        }
        if lower == "application/pdf" {
            return Self::Pdf;
        }
        if lower.contains("word") || lower.contains("wordprocessingml") {
            return Self::Document;
        }
        if lower.contains("sheet") || lower.contains("excel") {
            return Self::Spreadsheet;
        }
        if lower.contains("presentation") || lower.contains("powerpoint") {
            return Self::Presentation;
        }
        if lower.starts_with("video/") {
            return Self::Video;
        }
        if lower.starts_with("audio/") {
            return Self::Audio;
        }
        if lower.contains("zip")
            || lower.contains("rar")
            || lower.contains("compress")
            || lower.contains("gzip")
            || lower.contains("tar")
        {
            return Self::Archive;
        }
        Self::Other
    }

    /// Listing glyph for this category.
    #[must_use]
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Image => "🖼",
            Self::Pdf => "📄",
            Self::Document => "📝",
            Self::Spreadsheet => "📊",
            Self::Presentation => "📽",
            Self::Video => "🎬",
            Self::Audio => "🎵",
            Self::Archive => "📦",
            Self::Other => "📎",
        }
    }
}

impl fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Image => "image",
            Self::Pdf => "pdf",
            Self::Document => "document",
            Self::Spreadsheet => "spreadsheet",
            Self::Presentation => "presentation",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Archive => "archive",
            Self::Other => "other",
        };
        write!(f, "{name}")
    }
}
