use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Date-only input format used by every form.
pub const FORM_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` form value.
pub fn parse_form_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), FORM_DATE_FORMAT).ok()
}

/// Midnight UTC of the given day, the timestamp a date input submits as.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Date part of a server timestamp (`2026-10-20T00:00:00Z` → `2026-10-20`).
pub fn date_part(timestamp: &str) -> &str {
    timestamp.split('T').next().unwrap_or_default()
}

/// Formats a server date as `dd/mm/yyyy`.
pub fn display_date(value: &str) -> Option<String> {
    let date = parse_form_date(date_part(value))
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))?;
    Some(date.format("%d/%m/%Y").to_string())
}

/// Serde adapter writing `2026-10-20T00:00:00.000Z`.
pub mod millis {
    use super::*;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
