//! Timestamp rendering.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

/// Get the system locale for date/time formatting.
/// Reads from LC_TIME or LANG environment variables and maps to chrono::Locale.
fn system_locale() -> chrono::Locale {
    use chrono::Locale;

    let lang = std::env::var("LC_TIME")
        .or_else(|_| std::env::var("LANG"))
        .unwrap_or_else(|_| "en_US".to_string());

    // "ko_KR.UTF-8" -> "ko_KR"
    let lang_code = lang.split('.').next().unwrap_or("en_US");

    match lang_code {
        s if s.starts_with("ko") => Locale::ko_KR,
        s if s.starts_with("ja") => Locale::ja_JP,
        s if s.starts_with("zh") => Locale::zh_CN,
        s if s.starts_with("de") => Locale::de_DE,
        s if s.starts_with("fr") => Locale::fr_FR,
        s if s.starts_with("es") => Locale::es_ES,
        s if s.starts_with("it") => Locale::it_IT,
        s if s.starts_with("en_GB") => Locale::en_GB,
        _ => Locale::en_US,
    }
}

/// Parse a backend timestamp into local time.
///
/// Accepts RFC 3339 (with offset) or a naive ISO-8601 datetime, which is
/// taken to be local time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()?;
    Local.from_local_datetime(&naive).earliest()
}

/// Render a backend timestamp in the user's locale, or verbatim if it
/// cannot be parsed.
pub fn format_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format_localized("%x %X", system_locale()).to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse_timestamp("2024-05-01T10:00:00.123456+09:00").unwrap();
        assert_eq!(
            dt.with_timezone(&Utc).to_rfc3339(),
            "2024-05-01T01:00:00.123456+00:00"
        );
    }

    #[test]
    fn parses_naive_iso_as_local() {
        let dt = parse_timestamp("2024-05-01T10:00:00").unwrap();
        assert_eq!(dt.naive_local().to_string(), "2024-05-01 10:00:00");
    }

    #[test]
    fn unparseable_timestamp_is_shown_verbatim() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
        assert_eq!(format_timestamp(""), "");
    }
}
