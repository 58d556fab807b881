//! Date Utilities
//!
//! Pure helpers over the API's date strings. Anything that depends on the
//! current instant takes `now` as a parameter; [`now`] reads the clock.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Current instant from the browser clock
#[cfg(target_arch = "wasm32")]
pub fn now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Parse RFC 3339, `YYYY-MM-DDTHH:MM[:SS]` or `YYYY-MM-DD` (midnight UTC)
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `now` is strictly after `deadline`; an unreadable deadline never passes
fn deadline_passed(deadline: &str, now: DateTime<Utc>) -> bool {
    parse_timestamp(deadline).is_some_and(|deadline| now > deadline)
}

pub fn is_registration_deadline_passed(deadline: &str, now: DateTime<Utc>) -> bool {
    deadline_passed(deadline, now)
}

pub fn is_withdrawal_deadline_passed(deadline: &str, now: DateTime<Utc>) -> bool {
    deadline_passed(deadline, now)
}

/// `dd/mm/yyyy`, or the input unchanged if it cannot be read
pub fn format_date(value: &str) -> String {
    match parse_timestamp(value) {
        Some(dt) => dt.format("%d/%m/%Y").to_string(),
        None => value.to_string(),
    }
}

/// `dd/mm/yyyy HH:MM`
pub fn format_date_time(value: &str) -> String {
    match parse_timestamp(value) {
        Some(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
        None => value.to_string(),
    }
}

/// Time left until `expiry`, e.g. `"2d 3h 5min 10s"`.
///
/// Leading zero units are dropped. `None` once `expiry` is reached or when
/// it cannot be read.
pub fn remaining_time(expiry: &str, now: DateTime<Utc>) -> Option<String> {
    let expiry = parse_timestamp(expiry)?;
    let total = (expiry - now).num_seconds();
    if total <= 0 {
        return None;
    }

    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    let units = [(days, "d"), (hours, "h"), (minutes, "min"), (seconds, "s")];
    let first = units.iter().position(|(n, _)| *n > 0).unwrap_or(units.len() - 1);
    Some(
        units[first..]
            .iter()
            .map(|(n, unit)| format!("{}{}", n, unit))
            .collect::<Vec<_>>()
            .join(" "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, h, m, s).unwrap()
    }

    #[test]
    fn test_parse_formats() {
        assert_eq!(parse_timestamp("2025-03-10T12:00:00Z"), Some(at(12, 0, 0)));
        assert_eq!(parse_timestamp("2025-03-10T15:00:00+03:00"), Some(at(12, 0, 0)));
        assert_eq!(parse_timestamp("2025-03-10T12:00:00.000"), Some(at(12, 0, 0)));
        assert_eq!(parse_timestamp("2025-03-10T12:00"), Some(at(12, 0, 0)));
        assert_eq!(parse_timestamp("2025-03-10"), Some(at(0, 0, 0)));
        assert_eq!(parse_timestamp("mañana"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_deadline_is_strict() {
        let deadline = "2025-03-10T12:00:00Z";
        assert!(!is_registration_deadline_passed(deadline, at(11, 59, 59)));
        assert!(!is_registration_deadline_passed(deadline, at(12, 0, 0)));
        assert!(is_registration_deadline_passed(deadline, at(12, 0, 1)));
        assert!(is_withdrawal_deadline_passed(deadline, at(12, 0, 1)));
    }

    #[test]
    fn test_deadline_is_pure() {
        let now = at(9, 0, 0);
        let first = is_withdrawal_deadline_passed("2025-03-09", now);
        let second = is_withdrawal_deadline_passed("2025-03-09", now);
        assert_eq!(first, second);
        assert!(first);
    }

    #[test]
    fn test_unreadable_deadline_never_passes() {
        assert!(!is_registration_deadline_passed("sin fecha", at(12, 0, 0)));
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2025-03-10T12:30:00Z"), "10/03/2025");
        assert_eq!(format_date_time("2025-03-10T12:30:00Z"), "10/03/2025 12:30");
        assert_eq!(format_date("a definir"), "a definir");
    }

    #[test]
    fn test_remaining_time_ninety_seconds() {
        let now = at(12, 0, 0);
        let expiry = (now + Duration::seconds(90)).to_rfc3339();
        let text = remaining_time(&expiry, now).unwrap();
        assert!(text.contains("1min"));
        assert_eq!(text, "1min 30s");

        // one tick after expiry
        assert_eq!(remaining_time(&expiry, now + Duration::seconds(91)), None);
        assert_eq!(remaining_time(&expiry, now + Duration::seconds(90)), None);
    }

    #[test]
    fn test_remaining_time_keeps_inner_zero_units() {
        let now = at(0, 0, 0);
        let expiry = (now + Duration::days(2) + Duration::seconds(5)).to_rfc3339();
        assert_eq!(remaining_time(&expiry, now).unwrap(), "2d 0h 0min 5s");
    }
}
