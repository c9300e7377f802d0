use chrono::offset::Offset;
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::consts::{DATETIME_FORMAT, DAY_KEY_FORMAT};
use crate::error::AppError;

/// Timezone used for every calendar-date decision (grouping keys, parsing
/// dates without an offset). Defaults to UTC so results do not depend on the
/// host; the host zone is only used when asked for with "local".
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Timezone {
    Local,
    Named(Tz),
}

impl Default for Timezone {
    fn default() -> Self {
        Timezone::Named(chrono_tz::UTC)
    }
}

impl Timezone {
    pub(crate) fn parse(value: Option<&str>) -> Result<Self, AppError> {
        let Some(raw) = value else {
            return Ok(Timezone::default());
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Timezone::default());
        }
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(Timezone::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Ok(Timezone::Named(chrono_tz::UTC));
        }
        Tz::from_str(trimmed)
            .map(Timezone::Named)
            .map_err(|_| AppError::InvalidTimezone {
                input: trimmed.to_string(),
            })
    }

    pub(crate) fn to_fixed_offset(self, utc: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Timezone::Local => {
                let local = utc.with_timezone(&Local);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
            Timezone::Named(tz) => {
                let local = utc.with_timezone(&tz);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
        }
    }

    /// Interpret a wall-clock time in this zone. Ambiguous times (DST fall-back)
    /// resolve to the earlier instant; times inside a DST gap yield `None`.
    pub(crate) fn from_wall_clock(self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Timezone::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            Timezone::Named(tz) => tz
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }

    /// Calendar day of `utc` in this zone, formatted as the grouping key
    pub(crate) fn day_key(self, utc: DateTime<Utc>) -> String {
        self.to_fixed_offset(utc).format(DAY_KEY_FORMAT).to_string()
    }

    pub(crate) fn format_datetime(self, utc: DateTime<Utc>) -> String {
        self.to_fixed_offset(utc).format(DATETIME_FORMAT).to_string()
    }

    pub(crate) fn label(self) -> String {
        match self {
            Timezone::Local => "local".to_string(),
            Timezone::Named(tz) => tz.name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_none_returns_utc() {
        assert_eq!(
            Timezone::parse(None).unwrap(),
            Timezone::Named(chrono_tz::UTC)
        );
    }

    #[test]
    fn parse_empty_returns_utc() {
        assert_eq!(
            Timezone::parse(Some("  ")).unwrap(),
            Timezone::Named(chrono_tz::UTC)
        );
    }

    #[test]
    fn parse_local_string_returns_local() {
        assert!(matches!(
            Timezone::parse(Some("local")).unwrap(),
            Timezone::Local
        ));
        assert!(matches!(
            Timezone::parse(Some("LOCAL")).unwrap(),
            Timezone::Local
        ));
    }

    #[test]
    fn parse_utc_variants() {
        for raw in ["utc", "UTC", "z", "Z", "  UTC  "] {
            let tz = Timezone::parse(Some(raw)).unwrap();
            assert!(matches!(tz, Timezone::Named(chrono_tz::UTC)), "{raw}");
        }
    }

    #[test]
    fn parse_named_timezone() {
        let tz = Timezone::parse(Some("Europe/London")).unwrap();
        assert!(matches!(tz, Timezone::Named(chrono_tz::Europe::London)));
    }

    #[test]
    fn parse_invalid_timezone_returns_error() {
        let err = Timezone::parse(Some("Mars/Olympus")).unwrap_err();
        assert!(err.to_string().contains("Mars/Olympus"));
    }

    #[test]
    fn day_key_uses_day_month_year() {
        let utc = "2024-03-09T18:30:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(Timezone::default().day_key(utc), "09/03/2024");
    }

    #[test]
    fn day_key_shifts_across_midnight_with_zone() {
        // 23:30 UTC is already the next day in Sydney and still the same day in New York
        let utc = "2024-03-09T23:30:00Z".parse::<DateTime<Utc>>().unwrap();
        let sydney = Timezone::parse(Some("Australia/Sydney")).unwrap();
        let new_york = Timezone::parse(Some("America/New_York")).unwrap();
        assert_eq!(sydney.day_key(utc), "10/03/2024");
        assert_eq!(new_york.day_key(utc), "09/03/2024");
    }

    #[test]
    fn from_wall_clock_round_trips_named_zone() {
        let tz = Timezone::parse(Some("America/New_York")).unwrap();
        let naive = chrono::NaiveDate::from_ymd_opt(2026, 6, 15)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let utc = tz.from_wall_clock(naive).unwrap();
        assert_eq!(utc.to_rfc3339(), "2026-06-15T12:00:00+00:00");
        assert_eq!(tz.format_datetime(utc), "15/06/2026 08:00");
    }

    #[test]
    fn from_wall_clock_gap_is_none() {
        // 02:30 does not exist in New York on the spring-forward day
        let tz = Timezone::parse(Some("America/New_York")).unwrap();
        let naive = chrono::NaiveDate::from_ymd_opt(2026, 3, 8)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        assert!(tz.from_wall_clock(naive).is_none());
    }

    #[test]
    fn label_names_zone() {
        assert_eq!(Timezone::default().label(), "UTC");
        assert_eq!(Timezone::Local.label(), "local");
    }
}
