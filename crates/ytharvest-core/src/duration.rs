//! ISO-8601 duration parsing for the `contentDetails.duration` field.
//!
//! YouTube encodes video length as an ISO-8601 duration (`PT4M13S`,
//! `PT1H2M`, `P1DT2H` for premieres/streams over a day). Only the
//! designators the API actually emits are supported: weeks and days in the
//! date part, hours/minutes/seconds in the time part.

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 3_600;
const SECS_PER_DAY: u64 = 86_400;
const SECS_PER_WEEK: u64 = 604_800;

/// Parses an ISO-8601 duration string into whole seconds.
///
/// Returns `None` for anything that is not a well-formed duration: missing
/// `P` prefix, unknown designators, digits without a trailing designator, or
/// an empty body (`P`, `PT`).
#[must_use]
pub fn parse_iso8601_duration(s: &str) -> Option<u64> {
    let body = s.strip_prefix('P')?;
    if body.is_empty() {
        return None;
    }

    let (date_part, time_part) = match body.split_once('T') {
        Some((d, t)) => (d, t),
        None => (body, ""),
    };
    if date_part.is_empty() && time_part.is_empty() {
        return None;
    }

    let date_secs = parse_part(date_part, &[('W', SECS_PER_WEEK), ('D', SECS_PER_DAY)])?;
    let time_secs = parse_part(
        time_part,
        &[('H', SECS_PER_HOUR), ('M', SECS_PER_MINUTE), ('S', 1)],
    )?;

    date_secs.checked_add(time_secs)
}

/// Parses one designator sequence (`"1H2M3S"`) against an allowed unit set.
///
/// Designators must appear in the order given by `units` and at most once
/// each, matching the ISO-8601 grammar.
fn parse_part(part: &str, units: &[(char, u64)]) -> Option<u64> {
    let mut total = 0u64;
    let mut number = String::new();
    let mut next_unit = 0usize;

    for c in part.chars() {
        if c.is_ascii_digit() {
            number.push(c);
            continue;
        }
        // A designator with no digits in front of it is malformed.
        if number.is_empty() {
            return None;
        }
        let position = units[next_unit..].iter().position(|(u, _)| *u == c)?;
        let (_, multiplier) = units[next_unit + position];
        next_unit += position + 1;

        let value: u64 = number.parse().ok()?;
        total = total.checked_add(value.checked_mul(multiplier)?)?;
        number.clear();
    }

    // Trailing digits without a designator are malformed.
    if !number.is_empty() {
        return None;
    }

    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minutes_and_seconds() {
        assert_eq!(parse_iso8601_duration("PT4M13S"), Some(253));
    }

    #[test]
    fn parses_hours_minutes_seconds() {
        assert_eq!(parse_iso8601_duration("PT1H2M3S"), Some(3_723));
    }

    #[test]
    fn parses_seconds_only() {
        assert_eq!(parse_iso8601_duration("PT19S"), Some(19));
    }

    #[test]
    fn parses_hours_only() {
        assert_eq!(parse_iso8601_duration("PT2H"), Some(7_200));
    }

    #[test]
    fn parses_days_with_time_part() {
        assert_eq!(parse_iso8601_duration("P1DT2H"), Some(93_600));
    }

    #[test]
    fn parses_weeks() {
        assert_eq!(parse_iso8601_duration("P1W"), Some(604_800));
    }

    #[test]
    fn zero_duration_is_zero_seconds() {
        assert_eq!(parse_iso8601_duration("PT0S"), Some(0));
    }

    #[test]
    fn rejects_missing_prefix() {
        assert_eq!(parse_iso8601_duration("4M13S"), None);
    }

    #[test]
    fn rejects_empty_body() {
        assert_eq!(parse_iso8601_duration("P"), None);
        assert_eq!(parse_iso8601_duration("PT"), None);
    }

    #[test]
    fn rejects_unknown_designator() {
        assert_eq!(parse_iso8601_duration("PT4X"), None);
    }

    #[test]
    fn rejects_out_of_order_designators() {
        assert_eq!(parse_iso8601_duration("PT13S4M"), None);
    }

    #[test]
    fn rejects_trailing_digits() {
        assert_eq!(parse_iso8601_duration("PT4M13"), None);
    }

    #[test]
    fn rejects_designator_without_digits() {
        assert_eq!(parse_iso8601_duration("PTM"), None);
    }
}
