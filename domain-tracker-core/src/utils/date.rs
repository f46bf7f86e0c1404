//! Calendar date helpers for the ISO date strings stored on records.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};

use crate::error::{CoreError, CoreResult};

/// Storage format of date fields
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Parses a stored date.
///
/// Accepts `YYYY-MM-DD`; a full RFC3339 timestamp is tolerated and truncated to its date.
pub fn parse_iso_date(value: &str) -> CoreResult<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| CoreError::ValidationError(format!("'{value}' is not a YYYY-MM-DD date")))
}

#[must_use]
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Same month and day, one year later.
///
/// Feb 29 has no counterpart in a common year and rolls over to Mar 1.
#[must_use]
pub fn add_one_year(date: NaiveDate) -> Option<NaiveDate> {
    let year = date.year().checked_add(1)?;
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

/// Renewed expiry string for a stored expiry string
pub fn renew_expiry(current_expiry: &str) -> CoreResult<String> {
    let date = parse_iso_date(current_expiry)?;
    add_one_year(date)
        .map(format_iso_date)
        .ok_or_else(|| CoreError::ValidationError(format!("cannot renew '{current_expiry}'")))
}

/// Whole days from `now` until `date` at 00:00 UTC, rounded toward negative infinity.
#[must_use]
pub fn days_until(date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let target = date.and_time(NaiveTime::MIN).and_utc();
    (target - now).num_milliseconds().div_euclid(MILLIS_PER_DAY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_plain_and_rfc3339_dates() {
        assert_eq!(parse_iso_date("2024-03-15").unwrap(), ymd(2024, 3, 15));
        assert_eq!(parse_iso_date(" 2024-03-15 ").unwrap(), ymd(2024, 3, 15));
        assert_eq!(
            parse_iso_date("2024-03-15T10:00:00Z").unwrap(),
            ymd(2024, 3, 15)
        );
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "15/03/2024", "2024-13-01", "soon"] {
            assert!(
                matches!(parse_iso_date(bad), Err(CoreError::ValidationError(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn renew_keeps_month_and_day() {
        assert_eq!(renew_expiry("2024-03-15").unwrap(), "2025-03-15");
        assert_eq!(renew_expiry("2023-12-31").unwrap(), "2024-12-31");
    }

    #[test]
    fn renew_leap_day_rolls_to_march_first() {
        assert_eq!(renew_expiry("2024-02-29").unwrap(), "2025-03-01");
        assert_eq!(add_one_year(ymd(2027, 2, 28)), Some(ymd(2028, 2, 28)));
    }

    #[test]
    fn renew_rejects_unparseable_expiry() {
        assert!(renew_expiry("").is_err());
    }

    #[test]
    fn days_until_floors() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(days_until(ymd(2024, 1, 11), now), 10);
        assert_eq!(days_until(ymd(2024, 1, 1), now), 0);
        assert_eq!(days_until(ymd(2023, 12, 27), now), -5);

        // Midday: the expiry date itself is already partially past.
        let noon = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(days_until(ymd(2024, 1, 1), noon), -1);
        assert_eq!(days_until(ymd(2024, 1, 2), noon), 0);
    }
}
