//! Text rendering of the store contents.
//!
//! Stateless over the record collection: grouping happens per render, weeks
//! print newest-first, records keep their stash order within each week.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::datauri::MediaCategory;
use crate::error::Result;
use crate::record::UploadRecord;
use crate::week::{group_by_week, WeekKey};

/// Shown when the store holds nothing at all.
pub const EMPTY_STORE_MESSAGE: &str = "No files stashed yet. Stash your first file!";

/// Shown when a week filter matches no group.
pub const EMPTY_WEEK_MESSAGE: &str = "No files for that week.";

/// Metadata view of a record for JSON output, without the embedded content.
#[derive(Debug, Serialize)]
struct RecordSummary<'a> {
    id: &'a str,
    name: &'a str,
    size: u64,
    media_type: &'a str,
    uploaded_at: DateTime<Utc>,
    week_key: &'a WeekKey,
}

impl<'a> From<&'a UploadRecord> for RecordSummary<'a> {
    fn from(record: &'a UploadRecord) -> Self {
        Self {
            id: &record.id,
            name: &record.name,
            size: record.size,
            media_type: &record.media_type,
            uploaded_at: record.uploaded_at,
            week_key: &record.week_key,
        }
    }
}

/// One week group for JSON output.
#[derive(Debug, Serialize)]
struct WeekGroup<'a> {
    week: &'a WeekKey,
    files: Vec<RecordSummary<'a>>,
}

/// Render the grouped listing.
///
/// With a filter, only the matching week section renders; an unknown week
/// or an empty store renders the corresponding empty-state message.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_listing(
    records: &[UploadRecord],
    filter: Option<&WeekKey>,
    format: OutputFormat,
) -> Result<String> {
    let mut groups = group_by_week(records);
    // Newest week first
    groups.sort_by(|(a, _), (b, _)| b.cmp(a));

    if let Some(week) = filter {
        groups.retain(|(key, _)| key == week);
        if groups.is_empty() {
            return Ok(EMPTY_WEEK_MESSAGE.to_string());
        }
    } else if groups.is_empty() {
        return Ok(EMPTY_STORE_MESSAGE.to_string());
    }

    match format {
        OutputFormat::Plain => Ok(render_plain(&groups)),
        OutputFormat::Table => Ok(render_table(&groups)),
        OutputFormat::Json => {
            let view: Vec<WeekGroup> = groups
                .iter()
                .map(|(week, members)| WeekGroup {
                    week,
                    files: members.iter().map(|r| RecordSummary::from(*r)).collect(),
                })
                .collect();
            Ok(serde_json::to_string_pretty(&view)?)
        }
    }
}

fn render_plain(groups: &[(WeekKey, Vec<&UploadRecord>)]) -> String {
    let mut out = String::new();
    for (week, members) in groups {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("{} ({} file(s))\n", week_heading(week), members.len()));
        for record in members {
            let glyph = MediaCategory::from_media_type(&record.media_type).glyph();
            out.push_str(&format!(
                "  {} {}  {}  {}  [{}]\n",
                glyph,
                record.name,
                human_size(record.size),
                local_time(record.uploaded_at),
                record.id,
            ));
        }
    }
    out
}

fn render_table(groups: &[(WeekKey, Vec<&UploadRecord>)]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<10} {:<18} {:<28} {:>9} {:<18}\n",
        "WEEK", "ID", "NAME", "SIZE", "UPLOADED"
    ));
    for (week, members) in groups {
        let week_label = week.to_string();
        for record in members {
            out.push_str(&format!(
                "{:<10} {:<18} {:<28} {:>9} {:<18}\n",
                week_label,
                record.id,
                truncate(&record.name, 28),
                human_size(record.size),
                local_time(record.uploaded_at),
            ));
        }
    }
    out
}

/// Render one record's metadata for the `show` command.
#[must_use]
pub fn render_record(record: &UploadRecord, include_content: bool) -> String {
    let category = MediaCategory::from_media_type(&record.media_type);
    let mut out = String::new();
    out.push_str(&format!("Id:        {}\n", record.id));
    out.push_str(&format!("Name:      {}\n", record.name));
    out.push_str(&format!("Size:      {}\n", human_size(record.size)));
    out.push_str(&format!(
        "Type:      {} ({})\n",
        record.media_type, category
    ));
    out.push_str(&format!("Uploaded:  {}\n", local_time(record.uploaded_at)));
    out.push_str(&format!("Week:      {}\n", week_heading(&record.week_key)));
    if include_content {
        out.push_str(&format!("Content:   {}\n", record.content));
    }
    out
}

/// Heading for a week group: calendar keys print as-is, fixed keys as
/// `Week N`.
fn week_heading(week: &WeekKey) -> String {
    match week {
        WeekKey::Fixed(n) => format!("Week {n}"),
        WeekKey::Calendar(label) => label.clone(),
    }
}

/// Human-readable size: bytes below 1 KiB, whole KB below 1 MiB, one
/// decimal of MB beyond.
#[must_use]
pub fn human_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{} KB", (bytes + 512) / 1024)
    } else {
        #[allow(clippy::cast_precision_loss)]
        let mb = bytes as f64 / (1024.0 * 1024.0);
        format!("{mb:.1} MB")
    }
}

fn local_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
