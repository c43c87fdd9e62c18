//! Date helper functions

use chrono::{NaiveDate, NaiveDateTime};

/// Parse a date string in the formats posts commonly use
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y"];
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 / ISO 8601 with offset
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    None
}

/// Format a raw front-matter date for display; unparseable strings pass
/// through untouched
pub fn display_date(raw: &str, format: &str) -> String {
    match parse_date_string(raw) {
        Some(dt) => dt.format(format).to_string(),
        None => raw.to_string(),
    }
}
