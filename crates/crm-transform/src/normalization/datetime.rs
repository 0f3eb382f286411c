//! Registration date canonicalization.
//!
//! Parsing is permissive: ISO dates and date-times, slash/dash/dot numeric
//! dates in either day/month order with four- or two-digit years, English
//! month names, compact `YYYYMMDD` and partial `YYYY-MM` / `YYYY` values
//! (first day of the period). Years outside 1000..=9999 are refused. Anything
//! else becomes [`RegistrationDate::Invalid`].

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crm_model::{DateOrder, RegistrationDate};

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const UNAMBIGUOUS_DATE_FORMATS: [&str; 11] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%d-%b-%Y",  // 15-Jan-2024
    "%d-%B-%Y",  // 15-January-2024
    "%b %d, %Y", // Jan 15, 2024
    "%B %d, %Y", // January 15, 2024
    "%b %d %Y",  // Jan 15 2024
    "%B %d %Y",  // January 15 2024
    "%d %b %Y",  // 15 Jan 2024
    "%d %B %Y",  // 15 January 2024
];

// Four-digit years first; `%y` maps 00-68 to 20xx and 69-99 to 19xx.
const MONTH_FIRST_FORMATS: [&str; 6] = [
    "%m/%d/%Y", "%m-%d-%Y", "%m.%d.%Y", "%m/%d/%y", "%m-%d-%y", "%m.%d.%y",
];
const DAY_FIRST_FORMATS: [&str; 6] = [
    "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%d/%m/%y", "%d-%m-%y", "%d.%m.%y",
];

/// Years a registration date can plausibly carry.
///
/// chrono's `%Y` takes any digit count, so `15/01/23` would otherwise parse
/// as year 15 under `%Y/%m/%d`.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1000..=9999;

fn plausible(date: NaiveDate) -> Option<NaiveDate> {
    YEAR_RANGE.contains(&date.year()).then_some(date)
}

fn try_formats(value: &str, formats: &[&str]) -> Option<NaiveDate> {
    formats.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(value, fmt)
            .ok()
            .and_then(plausible)
    })
}

fn try_datetime(value: &str) -> Option<NaiveDate> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| {
            NaiveDateTime::parse_from_str(value, fmt)
                .ok()
                .and_then(|dt| plausible(dt.date()))
        })
}

fn try_ordered(value: &str, order: DateOrder) -> Option<NaiveDate> {
    let (first, second) = match order {
        DateOrder::MonthFirst => (&MONTH_FIRST_FORMATS, &DAY_FIRST_FORMATS),
        DateOrder::DayFirst => (&DAY_FIRST_FORMATS, &MONTH_FIRST_FORMATS),
    };
    try_formats(value, first).or_else(|| try_formats(value, second))
}

/// `YYYYMMDD` with exactly eight digits.
fn try_compact(value: &str) -> Option<NaiveDate> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = value[0..4].parse().ok()?;
    let month = value[4..6].parse().ok()?;
    let day = value[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// `YYYY-MM` or a plausible bare `YYYY`.
fn try_partial(value: &str) -> Option<NaiveDate> {
    if value.len() == 7 && value.as_bytes()[4] == b'-' {
        let year = value[0..4].parse().ok()?;
        let month = value[5..7].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, 1);
    }
    if value.len() == 4 {
        let year: i32 = value.parse().ok()?;
        if (1900..=2100).contains(&year) {
            return NaiveDate::from_ymd_opt(year, 1, 1);
        }
    }
    None
}

/// Parses a free-text date. `None` on failure.
pub fn parse_registration_date(value: &str, order: DateOrder) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.is_ascii() {
        return None;
    }
    if let Some(date) = try_datetime(trimmed)
        .or_else(|| try_formats(trimmed, &UNAMBIGUOUS_DATE_FORMATS))
        .or_else(|| try_ordered(trimmed, order))
        .or_else(|| try_compact(trimmed))
        .or_else(|| try_partial(trimmed))
    {
        return Some(date);
    }
    // "15/01/2023 10:30" and similar: retry on the date part alone.
    let (date_part, time_part) = trimmed.split_once([' ', 'T'])?;
    if !time_part.contains(':') {
        return None;
    }
    try_formats(date_part, &UNAMBIGUOUS_DATE_FORMATS[..3])
        .or_else(|| try_ordered(date_part, order))
}

/// Canonicalizes a registration date; failures keep the raw text.
pub fn canonicalize_date(raw: &str, order: DateOrder) -> RegistrationDate {
    match parse_registration_date(raw, order) {
        Some(date) => RegistrationDate::Valid(date),
        None => RegistrationDate::Invalid {
            raw: raw.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, day)
    }

    #[test]
    fn parses_iso_dates_and_datetimes() {
        assert_eq!(
            parse_registration_date("2023-05-17", DateOrder::MonthFirst),
            ymd(2023, 5, 17)
        );
        assert_eq!(
            parse_registration_date("2023-05-17 00:00:00", DateOrder::MonthFirst),
            ymd(2023, 5, 17)
        );
        assert_eq!(
            parse_registration_date("2023-05-17T08:30", DateOrder::MonthFirst),
            ymd(2023, 5, 17)
        );
    }

    #[test]
    fn compact_and_partial_dates() {
        assert_eq!(
            parse_registration_date("20240115", DateOrder::MonthFirst),
            ymd(2024, 1, 15)
        );
        assert_eq!(
            parse_registration_date("2023-12", DateOrder::MonthFirst),
            ymd(2023, 12, 1)
        );
        assert_eq!(
            parse_registration_date("2021", DateOrder::MonthFirst),
            ymd(2021, 1, 1)
        );
        assert_eq!(parse_registration_date("1234", DateOrder::MonthFirst), None);
    }

    #[test]
    fn date_part_is_retried_when_a_time_follows() {
        assert_eq!(
            parse_registration_date("15/01/2023 10:30", DateOrder::MonthFirst),
            ymd(2023, 1, 15)
        );
        assert_eq!(
            parse_registration_date("15/01/2023 depois", DateOrder::MonthFirst),
            None
        );
    }

    #[test]
    fn two_digit_years_land_in_the_current_century() {
        for order in [DateOrder::MonthFirst, DateOrder::DayFirst] {
            assert_eq!(parse_registration_date("15/01/23", order), ymd(2023, 1, 15));
            assert_eq!(parse_registration_date("01-15-23", order), ymd(2023, 1, 15));
        }
        assert_eq!(
            parse_registration_date("1/2/23", DateOrder::MonthFirst),
            ymd(2023, 1, 2)
        );
        assert_eq!(
            parse_registration_date("1/2/23", DateOrder::DayFirst),
            ymd(2023, 2, 1)
        );
        assert_eq!(
            parse_registration_date("31.12.99", DateOrder::DayFirst),
            ymd(1999, 12, 31)
        );
    }

    #[test]
    fn short_year_fields_never_yield_ancient_dates() {
        for raw in ["15/01/23", "1/2/23", "01-15-23", "23-01-15", "5/6/7"] {
            for order in [DateOrder::MonthFirst, DateOrder::DayFirst] {
                if let Some(date) = parse_registration_date(raw, order) {
                    assert!(date.year() >= 1000, "{raw} parsed as {date}");
                }
            }
        }
    }

    #[test]
    fn dotted_iso_and_comma_free_month_names() {
        assert_eq!(
            parse_registration_date("2023.01.15", DateOrder::MonthFirst),
            ymd(2023, 1, 15)
        );
        assert_eq!(
            parse_registration_date("Jan 15 2024", DateOrder::MonthFirst),
            ymd(2024, 1, 15)
        );
        assert_eq!(
            parse_registration_date("January 15 2024", DateOrder::DayFirst),
            ymd(2024, 1, 15)
        );
    }

    #[test]
    fn sentinel_is_rendered_for_failures() {
        let date = canonicalize_date("31/02/2023", DateOrder::DayFirst);
        assert!(!date.is_valid());
        assert_eq!(date.render(), "invalido");
    }
}
