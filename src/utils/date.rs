use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::AppError;
use crate::utils::Timezone;

const WALL_CLOCK_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

fn parse_day(s: &str) -> Option<NaiveDate> {
    // Try YYYYMMDD
    if s.len() == 8
        && let Ok(d) = NaiveDate::parse_from_str(s, "%Y%m%d")
    {
        return Some(d);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse when a game was played.
///
/// Accepts an RFC 3339 instant, a datetime-local style wall-clock time
/// (`YYYY-MM-DDTHH:MM`, `YYYY-MM-DD HH:MM`, optional seconds) or a bare day
/// (`YYYY-MM-DD` / `YYYYMMDD`, taken as midnight). Anything without an offset
/// is read in `timezone`.
pub(crate) fn parse_played_at(s: &str, timezone: Timezone) -> Result<DateTime<Utc>, AppError> {
    let trimmed = s.trim();
    let invalid = || AppError::InvalidDate {
        input: trimmed.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = WALL_CLOCK_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .or_else(|| parse_day(trimmed).and_then(|d| d.and_hms_opt(0, 0, 0)))
        .ok_or_else(invalid)?;

    timezone.from_wall_clock(naive).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> Timezone {
        Timezone::default()
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse_played_at("2024-03-09T18:30:00+01:00", utc()).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-09T17:30:00+00:00");
    }

    #[test]
    fn parses_datetime_local_input() {
        let dt = parse_played_at("2024-03-09T18:30", utc()).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-09T18:30:00+00:00");
    }

    #[test]
    fn parses_space_separated_with_seconds() {
        let dt = parse_played_at("2024-03-09 18:30:15", utc()).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-09T18:30:15+00:00");
    }

    #[test]
    fn parses_bare_days() {
        let a = parse_played_at("2024-03-09", utc()).unwrap();
        let b = parse_played_at("20240309", utc()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_rfc3339(), "2024-03-09T00:00:00+00:00");
    }

    #[test]
    fn wall_clock_read_in_given_zone() {
        let tz = Timezone::parse(Some("Asia/Shanghai")).unwrap();
        let dt = parse_played_at("2024-03-09T08:00", tz).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-09T00:00:00+00:00");
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_played_at("last tuesday", utc()).unwrap_err();
        assert!(err.to_string().contains("last tuesday"));
        assert!(parse_played_at("2024-13-40", utc()).is_err());
    }
}
