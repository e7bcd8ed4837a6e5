//! Conversion between epoch seconds and the ISO-8601 strings used on the wire.
//!
//! Detection messages carry every instant as `YYYY-MM-DDTHH:MM:SS.sssZ`
//! (UTC, millisecond resolution). In memory an instant is a `f64` holding
//! seconds since 1970-01-01T00:00:00Z.

use anyhow::{anyhow, Context};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

type TimeResult<T> = anyhow::Result<T>;

/// `chrono` format of a wire timestamp.
pub const ISO8601_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Length of a well-formed wire timestamp, `2017-07-14T02:40:00.000Z`.
const ISO8601_LEN: usize = 24;

/// Encode epoch seconds as a wire timestamp, rounded to the millisecond.
pub fn epoch_to_iso8601(epoch: f64) -> TimeResult<String> {
    if !epoch.is_finite() {
        return Err(anyhow!("Epoch time {} is not a finite number", epoch));
    }
    let millis = (epoch * 1000.0).round();
    if millis.abs() >= i64::MAX as f64 {
        return Err(anyhow!("Epoch time {} is out of range", epoch));
    }
    let datetime = DateTime::<Utc>::from_timestamp_millis(millis as i64)
        .ok_or_else(|| anyhow!("Epoch time {} is out of range", epoch))?;
    Ok(datetime.format(ISO8601_FORMAT).to_string())
}

/// Decode a timestamp into epoch seconds.
///
/// Any number of fractional digits is accepted, and a full RFC 3339 offset
/// (`+01:00`) is tolerated in place of the trailing `Z`.
pub fn iso8601_to_epoch(text: &str) -> TimeResult<f64> {
    let millis = match NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.fZ") {
        Ok(naive) => Utc.from_utc_datetime(&naive).timestamp_millis(),
        Err(_) => DateTime::parse_from_rfc3339(text)
            .with_context(|| format!("Cannot parse \"{}\" as an ISO-8601 time", text))?
            .timestamp_millis(),
    };
    Ok(millis as f64 / 1000.0)
}

/// Whether `text` is exactly in the wire layout and names a real instant.
pub fn is_iso8601(text: &str) -> bool {
    let bytes = text.as_bytes();
    if bytes.len() != ISO8601_LEN {
        return false;
    }
    let layout_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        10 => *b == b'T',
        13 | 16 => *b == b':',
        19 => *b == b'.',
        23 => *b == b'Z',
        _ => b.is_ascii_digit(),
    });
    layout_ok && NaiveDateTime::parse_from_str(text, ISO8601_FORMAT).is_ok()
}

/// Whether `epoch` survives the encode/decode cycle of the wire format
/// unchanged. Anything finer than a millisecond does not.
pub(crate) fn round_trips(epoch: f64) -> TimeResult<bool> {
    let text = epoch_to_iso8601(epoch)?;
    Ok(is_iso8601(&text) && iso8601_to_epoch(&text)? == epoch)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn encode() {
        assert_eq!(
            epoch_to_iso8601(1500000000.0).unwrap(),
            "2017-07-14T02:40:00.000Z"
        );
        assert_eq!(epoch_to_iso8601(0.0).unwrap(), "1970-01-01T00:00:00.000Z");
        assert_eq!(
            epoch_to_iso8601(1500000000.1234).unwrap(),
            "2017-07-14T02:40:00.123Z"
        );
    }

    #[test]
    fn decode() {
        assert_eq!(
            iso8601_to_epoch("2017-07-14T02:40:00.000Z").unwrap(),
            1500000000.0
        );
        assert_eq!(
            iso8601_to_epoch("2017-07-14T02:40:00.25Z").unwrap(),
            1500000000.25
        );
        assert_eq!(
            iso8601_to_epoch("2017-07-14T03:40:00.000+01:00").unwrap(),
            1500000000.0
        );
        assert!(iso8601_to_epoch("yesterday").is_err());
    }

    #[test]
    fn bad_epoch() {
        assert!(epoch_to_iso8601(f64::NAN).is_err());
        assert!(epoch_to_iso8601(f64::INFINITY).is_err());
        assert!(epoch_to_iso8601(1e300).is_err());
    }

    #[test]
    fn well_formed() {
        assert!(is_iso8601("2017-07-14T02:40:00.000Z"));
        assert!(!is_iso8601("2017-07-14T02:40:00Z"));
        assert!(!is_iso8601("2017-13-14T02:40:00.000Z"));
        assert!(!is_iso8601("2017/07/14T02:40:00.000Z"));
    }

    #[test]
    fn millisecond_round_trip() {
        let epoch = 1500000000.123;
        let text = epoch_to_iso8601(epoch).unwrap();
        assert_eq!(iso8601_to_epoch(&text).unwrap(), epoch);
    }

    #[test]
    fn sub_millisecond_does_not_round_trip() {
        assert!(round_trips(1500000000.123).unwrap());
        assert!(round_trips(1451338344.017).unwrap());
        assert!(!round_trips(1500000000.0004).unwrap());
        assert!(!round_trips(1500000000.1234).unwrap());
        assert!(round_trips(f64::NAN).is_err());
    }
}
