use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

/// Parses a publication timestamp in any YAML timestamp shape: RFC 3339
/// (`2020-01-01T00:00:00Z`), a date and time separated by `T` or spaces with
/// optional fractional seconds and an optional offset (`2001-12-14
/// 21:59:43.10 -5`), or a bare date (midnight UTC). Times without an offset
/// are taken as UTC.
pub fn parse(string: &str) -> Option<DateTime<Utc>> {
    let string = string.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(string) {
        return Some(datetime.with_timezone(&Utc));
    }

    let split = string.find(|c: char| c == 'T' || c == 't' || c.is_whitespace()).unwrap_or(string.len());
    let (date, rest) = string.split_at(split);
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let rest = rest.trim_start_matches(|c: char| c == 'T' || c == 't' || c.is_whitespace());
    if rest.is_empty() {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }

    let (time, offset) = split_offset(rest)?;
    let time = NaiveTime::parse_from_str(time.trim_end(), "%H:%M:%S%.f").ok()?;
    let datetime = offset.from_local_datetime(&date.and_time(time)).single()?;
    Some(datetime.with_timezone(&Utc))
}

/// Splits a time such as `21:59:43.10 -5` into the time and its offset:
/// `Z`, `±HH`, `±HH:MM` or `±HHMM`, defaulting to UTC.
fn split_offset(time: &str) -> Option<(&str, FixedOffset)> {
    if let Some(time) = time.strip_suffix(['Z', 'z']) {
        return Some((time, FixedOffset::east_opt(0)?));
    }

    let Some(pos) = time.rfind(['+', '-']) else {
        return Some((time, FixedOffset::east_opt(0)?));
    };

    let sign = if time[pos..].starts_with('-') { -1 } else { 1 };
    let offset = &time[pos + 1..];
    let (hours, minutes) = match offset.split_once(':') {
        Some(parts) => parts,
        None if offset.len() == 4 => offset.split_at(2),
        None => (offset, "0"),
    };

    let seconds = hours.parse::<i32>().ok()? * 3600 + minutes.parse::<i32>().ok()? * 60;
    Some((&time[..pos], FixedOffset::east_opt(sign * seconds)?))
}

/// `deserialize_with` adapter for optional timestamp fields.
pub fn deserialize_opt<'de, D>(de: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where D: Deserializer<'de>
{
    match Option::<String>::deserialize(de)? {
        Some(string) => parse(&string).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid timestamp `{string}`"))
        }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod timestamp_tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::parse;

    #[test]
    fn accepts_common_shapes() {
        let midnight = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(parse("2020-01-01T00:00:00Z"), Some(midnight));
        assert_eq!(parse("2020-01-01T01:00:00+01:00"), Some(midnight));
        assert_eq!(parse("2020-01-01 00:00:00"), Some(midnight));
        assert_eq!(parse("2020-01-01"), Some(midnight));
        assert_eq!(parse("2020-01-01t00:00:00z"), Some(midnight));
        assert_eq!(parse("2020-01-01   00:00:00"), Some(midnight));
    }

    #[test]
    fn accepts_fractions_and_offsets() {
        let half_past = Utc.with_ymd_and_hms(2020, 1, 1, 10, 0, 0).unwrap() + Duration::milliseconds(500);
        assert_eq!(parse("2020-01-01 10:00:00.5"), Some(half_past));
        assert_eq!(parse("2020-01-01T10:00:00.500"), Some(half_past));

        let canonical = Utc.with_ymd_and_hms(2001, 12, 15, 2, 59, 43).unwrap() + Duration::milliseconds(100);
        assert_eq!(parse("2001-12-14 21:59:43.10 -5"), Some(canonical));
        assert_eq!(parse("2001-12-14t21:59:43.10-05:00"), Some(canonical));
        assert_eq!(parse("2001-12-14 21:59:43.10 -0500"), Some(canonical));
        assert_eq!(parse("2001-12-15 2:59:43.10"), Some(canonical));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse("last tuesday"), None);
        assert_eq!(parse(""), None);
        assert_eq!(parse("2020-01-01 noon"), None);
        assert_eq!(parse("2020-01-01 10:00:00 +xx"), None);
    }
}
