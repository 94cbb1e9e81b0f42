use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const DATE_SEPARATOR: char = '-';
const TIME_SEPARATOR: char = ':';

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d"];
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"];

/// Best-effort parse of a date, time or date-time string.
///
/// The shape is picked from the separators present: `-` and `:` is a date-time, `-` alone a
/// date (at midnight), `:` alone a time of day (on 1970-01-01). Anything else, or a string
/// that does not fit the chosen shape, yields `None`.
pub fn to_date(input: &str) -> Option<NaiveDateTime> {
    let s = input.trim();
    let has_date = s.contains(DATE_SEPARATOR);
    let has_time = s.contains(TIME_SEPARATOR);

    match (has_date, has_time) {
        (true, true) => DATE_TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok()),
        (true, false) => DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
            .and_then(|d| d.and_hms_opt(0, 0, 0)),
        (false, true) => {
            let time = TIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())?;
            time_anchor().map(|d| d.and_time(time))
        }
        (false, false) => None,
    }
}

/// Date used for time-only strings.
fn time_anchor() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1970, 1, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn picks_shape_from_separators() {
        assert_eq!(to_date("2024-05-17 13:45:10"), Some(dt(2024, 5, 17, 13, 45, 10)));
        assert_eq!(to_date("2024-05-17"), Some(dt(2024, 5, 17, 0, 0, 0)));
        assert_eq!(to_date("13:45:10"), Some(dt(1970, 1, 1, 13, 45, 10)));
        assert_eq!(to_date("2024-05-17T01:02:03"), Some(dt(2024, 5, 17, 1, 2, 3)));
    }

    #[test]
    fn unparsable_input_is_none() {
        assert_eq!(to_date("hello"), None);
        assert_eq!(to_date("2024/05/17"), None);
        assert_eq!(to_date("2024-13-40"), None);
        assert_eq!(to_date("25:99"), None);
        assert_eq!(to_date(""), None);
    }
}
