//! Tests for calendar-date helpers

use chrono::{NaiveDate, TimeZone, Utc};
use core_kernel::{days_between, days_between_at, parse_calendar_date, TemporalError, Timezone};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod parsing {
    use super::*;

    #[test]
    fn test_leap_day_is_accepted() {
        assert_eq!(parse_calendar_date("2024-02-29"), Ok(date(2024, 2, 29)));
    }

    #[test]
    fn test_impossible_date_is_rejected() {
        assert!(matches!(
            parse_calendar_date("2023-02-29"),
            Err(TemporalError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_space_separated_datetime_keeps_date() {
        assert_eq!(parse_calendar_date("2024-07-15 08:30:00"), Ok(date(2024, 7, 15)));
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(parse_calendar_date("  2024-07-15\n"), Ok(date(2024, 7, 15)));
    }
}

mod differences {
    use super::*;

    #[test]
    fn test_crosses_year_boundary() {
        assert_eq!(days_between(date(2023, 12, 31), date(2024, 1, 1)), 1);
    }

    #[test]
    fn test_same_day_is_zero() {
        let morning = date(2024, 5, 5).and_hms_opt(0, 0, 1).unwrap();
        let night = date(2024, 5, 5).and_hms_opt(23, 59, 59).unwrap();
        assert_eq!(days_between_at(morning, night), 0);
    }
}

mod timezone {
    use super::*;

    #[test]
    fn test_default_is_utc() {
        let tz = Timezone::default();
        let instant = Utc.with_ymd_and_hms(2024, 5, 31, 23, 0, 0).unwrap();
        assert_eq!(tz.date_of(instant), date(2024, 5, 31));
    }

    #[test]
    fn test_deserializes_from_iana_name() {
        let tz: Timezone = serde_json::from_str("\"Asia/Jakarta\"").unwrap();
        assert_eq!(tz, Timezone::new(chrono_tz::Asia::Jakarta));
        assert!(serde_json::from_str::<Timezone>("\"Mars/Olympus\"").is_err());
    }
}
