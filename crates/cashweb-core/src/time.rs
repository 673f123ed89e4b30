//! Date handling for spreadsheet cells and form submissions

use chrono::{DateTime, FixedOffset, Local, NaiveDate};

use crate::error::{CoreError, CoreResult};

/// Parse a date cell.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (the calendar date in the
/// timestamp's own offset) and `dd/mm/yyyy`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.date_naive());
    }
    NaiveDate::parse_from_str(text, "%d/%m/%Y").ok()
}

/// Time zone in which timestamp cells are turned into calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateZone {
    /// Time zone of the server
    Local,
    /// Offset written in the timestamp itself
    Source,
    Fixed(FixedOffset),
}

impl DateZone {
    /// Read the `dates.timezone` setting
    pub fn from_setting(setting: &str) -> CoreResult<Self> {
        match setting.trim() {
            "local" => Ok(DateZone::Local),
            "source" => Ok(DateZone::Source),
            other => parse_offset(other).map(DateZone::Fixed).ok_or_else(|| CoreError::ConfigError {
                message: format!("dates.timezone : fuseau « {} » non reconnu", other),
            }),
        }
    }

    /// Parse a date cell, reading timestamps in this zone
    pub fn parse(self, text: &str) -> Option<NaiveDate> {
        let text = text.trim();
        match DateTime::parse_from_rfc3339(text) {
            Ok(timestamp) => Some(match self {
                DateZone::Local => timestamp.with_timezone(&Local).date_naive(),
                DateZone::Source => timestamp.date_naive(),
                DateZone::Fixed(offset) => timestamp.with_timezone(&offset).date_naive(),
            }),
            Err(_) => parse_date(text),
        }
    }
}

/// `+HH:MM`, `-HH:MM` or `UTC`
fn parse_offset(text: &str) -> Option<FixedOffset> {
    if text.eq_ignore_ascii_case("utc") || text == "Z" {
        return FixedOffset::east_opt(0);
    }
    let sign = match text.chars().next()? {
        '+' => 1,
        '-' => -1,
        _ => return None,
    };
    let (hours, minutes) = text[1..].split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Format a date the way the history table shows it
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Normalize a submitted date to `YYYY-MM-DD`
pub fn normalize_submission_date(text: &str) -> Option<String> {
    parse_date(text).map(|date| date.format("%Y-%m-%d").to_string())
}

/// Today's date on the server, used to prefill forms
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_date("2024-01-03"), Some(ymd(2024, 1, 3)));
        assert_eq!(parse_date(" 2024-12-31 "), Some(ymd(2024, 12, 31)));
    }

    #[test]
    fn test_parse_timestamp_keeps_its_offset() {
        assert_eq!(parse_date("2024-01-02T23:00:00.000Z"), Some(ymd(2024, 1, 2)));
        assert_eq!(parse_date("2024-01-03T00:30:00+01:00"), Some(ymd(2024, 1, 3)));
    }

    #[test]
    fn test_zone_moves_late_utc_timestamps() {
        let paris = DateZone::from_setting("+01:00").unwrap();
        assert_eq!(paris.parse("2024-01-02T23:00:00.000Z"), Some(ymd(2024, 1, 3)));
        assert_eq!(DateZone::Source.parse("2024-01-02T23:00:00.000Z"), Some(ymd(2024, 1, 2)));

        let new_york = DateZone::from_setting("-05:00").unwrap();
        assert_eq!(new_york.parse("2024-01-03T02:00:00Z"), Some(ymd(2024, 1, 2)));
    }

    #[test]
    fn test_zone_leaves_plain_dates_alone() {
        let paris = DateZone::from_setting("+01:00").unwrap();
        assert_eq!(paris.parse("2024-01-03"), Some(ymd(2024, 1, 3)));
        assert_eq!(paris.parse("03/01/2024"), Some(ymd(2024, 1, 3)));
        assert_eq!(paris.parse("hier"), None);
    }

    #[test]
    fn test_zone_settings() {
        assert_eq!(DateZone::from_setting("local").unwrap(), DateZone::Local);
        assert_eq!(DateZone::from_setting(" source ").unwrap(), DateZone::Source);
        assert_eq!(
            DateZone::from_setting("UTC").unwrap(),
            DateZone::Fixed(FixedOffset::east_opt(0).unwrap())
        );
        assert!(matches!(DateZone::from_setting("Europe/Paris"), Err(CoreError::ConfigError { .. })));
        assert!(DateZone::from_setting("+25:00").is_err());
        assert!(DateZone::from_setting("").is_err());
    }

    #[test]
    fn test_parse_french_date() {
        assert_eq!(parse_date("03/01/2024"), Some(ymd(2024, 1, 3)));
    }

    #[test]
    fn test_parse_invalid_dates() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("hier"), None);
        assert_eq!(parse_date("2024-02-30"), None);
    }

    #[test]
    fn test_display_and_submission_formats() {
        assert_eq!(format_display_date(ymd(2024, 1, 3)), "03/01/2024");
        assert_eq!(normalize_submission_date("03/01/2024"), Some("2024-01-03".to_string()));
        assert_eq!(normalize_submission_date("2024-01-03"), Some("2024-01-03".to_string()));
        assert_eq!(normalize_submission_date("bientôt"), None);
    }
}
