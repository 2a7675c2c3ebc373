use chrono::{Datelike, NaiveDate};

/// Days until the next occurrence of a birthday.
///
/// The DOB is stored as "YYYY-MM-DD"; only the "MM-DD" tail matters here. If
/// today's month/day is on or after the birthday's, the next occurrence is
/// next year, otherwise it is later this year. A birthday falling today
/// therefore counts to next year's occurrence (365/366), matching the stored
/// data's historical semantics.
///
/// Feb 29 in a non-leap target year resolves to Mar 1. Returns None for a
/// malformed DOB, including impossible month/day combinations.
pub fn days_to_next_birthday(dob: &str, today: NaiveDate) -> Option<i64> {
    let mmdd = dob.get(5..10)?;
    let (month_str, day_str) = mmdd.split_once('-')?;
    let month: u32 = month_str.parse().ok()?;
    let day: u32 = day_str.parse().ok()?;

    let today_mmdd = today.format("%m-%d").to_string();
    let year = if today_mmdd.as_str() >= mmdd {
        today.year() + 1
    } else {
        today.year()
    };

    // Only the leap day gets a fallback; any other impossible month/day is
    // bad data and takes the malformed path.
    let target = match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None if month == 2 && day == 29 => NaiveDate::from_ymd_opt(year, 3, 1)?,
        None => return None,
    };

    Some((target - today).num_days())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_birthday_later_this_year() {
        // Today 2026-03-10, birthday Mar 15 -> 5 days
        let days = days_to_next_birthday("1990-03-15", date(2026, 3, 10));
        assert_eq!(days, Some(5));
    }

    #[test]
    fn test_birthday_wraps_to_next_year() {
        // Today 2026-03-10, birthday Jan 5 -> 2027-01-05 is 301 days away
        let days = days_to_next_birthday("2001-01-05", date(2026, 3, 10));
        assert_eq!(days, Some(301));
    }

    #[test]
    fn test_birthday_today_counts_to_next_year() {
        // 2026 -> 2027 spans no leap day
        let days = days_to_next_birthday("1990-03-10", date(2026, 3, 10));
        assert_eq!(days, Some(365));
    }

    #[test]
    fn test_birthday_yesterday_wraps() {
        let days = days_to_next_birthday("1990-03-09", date(2026, 3, 10));
        assert_eq!(days, Some(364));
    }

    #[test]
    fn test_new_years_eve_to_new_years_day() {
        let days = days_to_next_birthday("1985-01-01", date(2026, 12, 31));
        assert_eq!(days, Some(1));
    }

    #[test]
    fn test_feb_29_in_non_leap_year_resolves_to_mar_1() {
        // Next occurrence falls in 2026 (non-leap): treated as Mar 1
        let days = days_to_next_birthday("2000-02-29", date(2026, 2, 1));
        assert_eq!(days, Some(28));
    }

    #[test]
    fn test_feb_29_in_leap_year() {
        let days = days_to_next_birthday("2000-02-29", date(2028, 2, 1));
        assert_eq!(days, Some(28));
    }

    #[test]
    fn test_malformed_dob() {
        let today = date(2026, 3, 10);
        assert_eq!(days_to_next_birthday("", today), None);
        assert_eq!(days_to_next_birthday("1990", today), None);
        assert_eq!(days_to_next_birthday("1990-13-40", today), None);
        assert_eq!(days_to_next_birthday("1990-ab-cd", today), None);
    }

    #[test]
    fn test_multibyte_dob_does_not_panic() {
        // Byte 10 lands inside the two-byte 'é'; slicing must not panic and
        // the row must be treated as malformed.
        let days = days_to_next_birthday("1990-03-1é", date(2026, 3, 10));
        assert_eq!(days, None);
    }

    #[test]
    fn test_impossible_feb_date_is_malformed() {
        // Feb 30 never exists; the leap-day fallback must not claim it.
        let days = days_to_next_birthday("1990-02-30", date(2026, 2, 1));
        assert_eq!(days, None);
    }

    #[test]
    fn test_impossible_apr_date_is_malformed() {
        // Apr 31 never exists. With today in March, a Mar 1 fallback would
        // land in the past; the date must be rejected, not remapped.
        let days = days_to_next_birthday("1990-04-31", date(2026, 3, 10));
        assert_eq!(days, None);
    }
}
