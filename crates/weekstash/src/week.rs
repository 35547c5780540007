//! Week keys and week grouping.
//!
//! Every stashed file carries a week key used purely for display grouping.
//! Two schemes exist: calendar keys derived from the ISO 8601 week of the
//! upload date, and fixed keys indexing into a configured term (week 1
//! through week N).

use std::cmp::Ordering;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::record::UploadRecord;

/// How week keys are derived from upload dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekScheme {
    /// ISO 8601 calendar weeks (`YYYY-Www`).
    #[default]
    Calendar,
    /// Fixed 1-based week index within a configured term.
    Fixed,
}

impl fmt::Display for WeekScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Calendar => write!(f, "calendar"),
            Self::Fixed => write!(f, "fixed"),
        }
    }
}

/// Grouping identifier for a stashed file.
///
/// Serialized untagged so calendar keys persist as strings (`"2026-W35"`)
/// and fixed keys as plain integers, matching the stored record shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeekKey {
    /// 1-based index into a fixed term.
    Fixed(u8),
    /// ISO week label, `YYYY-Www`.
    Calendar(String),
}

impl WeekKey {
    /// Derive the ISO calendar week key for a date.
    ///
    /// Uses the ISO week-numbering year, so dates near January 1st may key
    /// into the previous or following year's weeks.
    #[must_use]
    pub fn calendar_for(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self::Calendar(format!("{}-W{:02}", iso.year(), iso.week()))
    }

    /// Derive the fixed term-week key for a date.
    ///
    /// Week 1 starts on `term_start`; the result is clamped to
    /// `1..=term_weeks` so dates outside the term land in the first or
    /// last week rather than producing an out-of-range key.
    #[must_use]
    pub fn fixed_for(date: NaiveDate, term_start: NaiveDate, term_weeks: u8) -> Self {
        let days = (date - term_start).num_days();
        let index = days.div_euclid(7) + 1;
        let clamped = index.clamp(1, i64::from(term_weeks.max(1)));
        // clamped is within 1..=u8::MAX after the clamp above
        Self::Fixed(u8::try_from(clamped).unwrap_or(1))
    }

    /// Parse a week key from user input.
    ///
    /// Plain integers become fixed keys; anything shaped like `YYYY-Www`
    /// becomes a calendar key. Returns `None` for everything else.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(n) = trimmed.parse::<u8>() {
            return (n >= 1).then_some(Self::Fixed(n));
        }
        let (year, week) = trimmed.split_once("-W")?;
        if year.len() == 4
            && year.chars().all(|c| c.is_ascii_digit())
            && week.len() == 2
            && week.chars().all(|c| c.is_ascii_digit())
        {
            return Some(Self::Calendar(trimmed.to_string()));
        }
        None
    }

    /// Check whether this is a calendar key.
    #[must_use]
    pub fn is_calendar(&self) -> bool {
        matches!(self, Self::Calendar(_))
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(n) => write!(f, "{n}"),
            Self::Calendar(label) => write!(f, "{label}"),
        }
    }
}

impl Ord for WeekKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Fixed(a), Self::Fixed(b)) => a.cmp(b),
            // Zero-padded ISO labels sort chronologically as strings
            (Self::Calendar(a), Self::Calendar(b)) => a.cmp(b),
            (Self::Fixed(_), Self::Calendar(_)) => Ordering::Less,
            (Self::Calendar(_), Self::Fixed(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for WeekKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Partition records by week key.
///
/// Groups appear in first-seen order and records keep their insertion order
/// within each group. The partition is pure: every record lands in exactly
/// one group, keyed by its own week key.
#[must_use]
pub fn group_by_week(records: &[UploadRecord]) -> Vec<(WeekKey, Vec<&UploadRecord>)> {
    let mut groups: Vec<(WeekKey, Vec<&UploadRecord>)> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|(key, _)| *key == record.week_key) {
            Some((_, members)) => members.push(record),
            None => groups.push((record.week_key.clone(), vec![record])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::UploadRecord;
    use chrono::Utc;

    fn record_with_week(name: &str, week_key: WeekKey) -> UploadRecord {
        UploadRecord {
            id: UploadRecord::derive_id(name, Utc::now()),
            name: name.to_string(),
            size: 3,
            media_type: "text/plain".to_string(),
            content: "data:text/plain;base64,YWJj".to_string(),
            uploaded_at: Utc::now(),
            week_key,
        }
    }

    #[test]
    fn test_calendar_key_format() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
        assert_eq!(
            WeekKey::calendar_for(date),
            WeekKey::Calendar("2026-W35".to_string())
        );
    }

    #[test]
    fn test_calendar_key_zero_pads_week() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 7).unwrap();
        assert_eq!(
            WeekKey::calendar_for(date),
            WeekKey::Calendar("2026-W02".to_string())
        );
    }

    #[test]
    fn test_calendar_key_year_boundary() {
        // 2027-01-01 is a Friday and belongs to ISO week 53 of 2026
        let date = NaiveDate::from_ymd_opt(2027, 1, 1).unwrap();
        assert_eq!(
            WeekKey::calendar_for(date),
            WeekKey::Calendar("2026-W53".to_string())
        );

        // 2024-12-30 is a Monday and belongs to ISO week 1 of 2025
        let date = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        assert_eq!(
            WeekKey::calendar_for(date),
            WeekKey::Calendar("2025-W01".to_string())
        );
    }

    #[test]
    fn test_fixed_key_first_week() {
        let start = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        assert_eq!(WeekKey::fixed_for(start, start, 16), WeekKey::Fixed(1));

        let sixth_day = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        assert_eq!(WeekKey::fixed_for(sixth_day, start, 16), WeekKey::Fixed(1));
    }

    #[test]
    fn test_fixed_key_advances_weekly() {
        let start = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        let second_week = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();
        assert_eq!(
            WeekKey::fixed_for(second_week, start, 16),
            WeekKey::Fixed(2)
        );

        let third_week = NaiveDate::from_ymd_opt(2026, 9, 7).unwrap();
        assert_eq!(WeekKey::fixed_for(third_week, start, 16), WeekKey::Fixed(3));
    }

    #[test]
    fn test_fixed_key_clamps_to_term() {
        let start = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();

        // Before the term starts
        let early = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        assert_eq!(WeekKey::fixed_for(early, start, 16), WeekKey::Fixed(1));

        // Long after the term ends
        let late = NaiveDate::from_ymd_opt(2027, 6, 1).unwrap();
        assert_eq!(WeekKey::fixed_for(late, start, 16), WeekKey::Fixed(16));
    }

    #[test]
    fn test_parse_fixed() {
        assert_eq!(WeekKey::parse("3"), Some(WeekKey::Fixed(3)));
        assert_eq!(WeekKey::parse(" 16 "), Some(WeekKey::Fixed(16)));
        assert_eq!(WeekKey::parse("0"), None);
    }

    #[test]
    fn test_parse_calendar() {
        assert_eq!(
            WeekKey::parse("2026-W35"),
            Some(WeekKey::Calendar("2026-W35".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(WeekKey::parse(""), None);
        assert_eq!(WeekKey::parse("week 3"), None);
        assert_eq!(WeekKey::parse("2026-35"), None);
        assert_eq!(WeekKey::parse("26-W35"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(WeekKey::Fixed(4).to_string(), "4");
        assert_eq!(
            WeekKey::Calendar("2026-W35".to_string()).to_string(),
            "2026-W35"
        );
    }

    #[test]
    fn test_ordering_calendar() {
        let earlier = WeekKey::Calendar("2025-W52".to_string());
        let later = WeekKey::Calendar("2026-W01".to_string());
        assert!(earlier < later);
    }

    #[test]
    fn test_ordering_fixed() {
        assert!(WeekKey::Fixed(2) < WeekKey::Fixed(10));
    }

    #[test]
    fn test_serde_untagged() {
        let calendar = WeekKey::Calendar("2026-W35".to_string());
        assert_eq!(serde_json::to_string(&calendar).unwrap(), "\"2026-W35\"");

        let fixed = WeekKey::Fixed(7);
        assert_eq!(serde_json::to_string(&fixed).unwrap(), "7");

        let parsed: WeekKey = serde_json::from_str("\"2026-W35\"").unwrap();
        assert_eq!(parsed, calendar);
        let parsed: WeekKey = serde_json::from_str("7").unwrap();
        assert_eq!(parsed, fixed);
    }

    #[test]
    fn test_week_scheme_display() {
        assert_eq!(WeekScheme::Calendar.to_string(), "calendar");
        assert_eq!(WeekScheme::Fixed.to_string(), "fixed");
    }

    #[test]
    fn test_week_scheme_default() {
        assert_eq!(WeekScheme::default(), WeekScheme::Calendar);
    }

    #[test]
    fn test_group_by_week_partitions_all_records() {
        let week_a = WeekKey::Calendar("2026-W34".to_string());
        let week_b = WeekKey::Calendar("2026-W35".to_string());
        let records = vec![
            record_with_week("a.txt", week_a.clone()),
            record_with_week("b.txt", week_b.clone()),
            record_with_week("c.txt", week_a.clone()),
        ];

        let groups = group_by_week(&records);
        assert_eq!(groups.len(), 2);

        let total: usize = groups.iter().map(|(_, members)| members.len()).sum();
        assert_eq!(total, records.len());
    }

    #[test]
    fn test_group_by_week_first_seen_order() {
        let week_a = WeekKey::Calendar("2026-W35".to_string());
        let week_b = WeekKey::Calendar("2026-W34".to_string());
        let records = vec![
            record_with_week("a.txt", week_a.clone()),
            record_with_week("b.txt", week_b.clone()),
            record_with_week("c.txt", week_a.clone()),
        ];

        let groups = group_by_week(&records);
        assert_eq!(groups[0].0, week_a);
        assert_eq!(groups[1].0, week_b);
    }

    #[test]
    fn test_group_by_week_preserves_insertion_order() {
        let week = WeekKey::Fixed(1);
        let records = vec![
            record_with_week("first.txt", week.clone()),
            record_with_week("second.txt", week.clone()),
            record_with_week("third.txt", week.clone()),
        ];

        let groups = group_by_week(&records);
        assert_eq!(groups.len(), 1);
        let names: Vec<&str> = groups[0].1.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["first.txt", "second.txt", "third.txt"]);
    }

    #[test]
    fn test_group_by_week_empty() {
        assert!(group_by_week(&[]).is_empty());
    }
}
