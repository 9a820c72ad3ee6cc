//! GeneralizedTime parsing for directory expiration attributes.
//!
//! Directory servers such as FreeIPA/IdM publish `krbPasswordExpiration`
//! as a fixed-width GeneralizedTime value. Two encodings are accepted:
//!
//! - `YYYYMMDDhhmmssZ`: UTC.
//! - `YYYYMMDDhhmmss±hh[[:]mm]`: local time with an explicit offset.
//!
//! Anything else, including syntactically valid strings that denote an
//! impossible calendar date, yields `None`. Stale or foreign-format data is
//! an expected input here, not a fault.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Number of leading digits in both encodings (`YYYYMMDDhhmmss`).
const DATE_TIME_DIGITS: usize = 14;

/// Largest accepted zone offset, in hours.
const MAX_OFFSET_HOURS: i64 = 18;

/// An absolute point in time as whole seconds since the Unix epoch (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Instant(i64);

impl Instant {
    /// Build an instant from seconds since 1970-01-01T00:00:00Z.
    pub const fn from_epoch_seconds(seconds: i64) -> Self {
        Self(seconds)
    }

    /// Seconds since 1970-01-01T00:00:00Z.
    pub const fn epoch_seconds(self) -> i64 {
        self.0
    }

    /// Truncate a chrono timestamp to whole seconds.
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime.timestamp())
    }

    /// Convert back to a chrono timestamp, if it fits chrono's range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.0, 0)
    }

    /// Signed number of seconds from `earlier` to `self`.
    pub fn seconds_since(self, earlier: Instant) -> i64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
            None => write!(f, "@{}", self.0),
        }
    }
}

/// Parse a GeneralizedTime value into an [`Instant`].
///
/// The UTC form is tried first, then the offset form. Callers are expected
/// to trim the value; surrounding whitespace is not accepted.
pub fn parse_generalized_time(raw: &str) -> Option<Instant> {
    parse_utc(raw).or_else(|| parse_with_offset(raw))
}

/// `YYYYMMDDhhmmssZ`
fn parse_utc(raw: &str) -> Option<Instant> {
    let (digits, suffix) = split_date_time(raw)?;
    if suffix != "Z" {
        return None;
    }
    let local = civil_date_time(digits)?;
    Some(Instant::from_datetime(local.and_utc()))
}

/// `YYYYMMDDhhmmss±hh`, `YYYYMMDDhhmmss±hhmm` or `YYYYMMDDhhmmss±hh:mm`
fn parse_with_offset(raw: &str) -> Option<Instant> {
    let (digits, suffix) = split_date_time(raw)?;
    let offset_seconds = parse_offset(suffix)?;
    let local = civil_date_time(digits)?;
    let seconds = local.and_utc().timestamp().checked_sub(offset_seconds)?;
    Some(Instant::from_epoch_seconds(seconds))
}

/// Split off the fixed-width digit prefix, returning `(digits, suffix)`.
fn split_date_time(raw: &str) -> Option<(&str, &str)> {
    let bytes = raw.as_bytes();
    if bytes.len() < DATE_TIME_DIGITS || !bytes[..DATE_TIME_DIGITS].iter().all(u8::is_ascii_digit) {
        return None;
    }
    // The prefix is ASCII, so this index is a char boundary.
    Some(raw.split_at(DATE_TIME_DIGITS))
}

/// Decode `YYYYMMDDhhmmss` into calendar fields, rejecting impossible dates.
fn civil_date_time(digits: &str) -> Option<NaiveDateTime> {
    let year = i32::try_from(number(&digits[0..4])).ok()?;
    let month = number(&digits[4..6]);
    let day = number(&digits[6..8]);
    let hour = number(&digits[8..10]);
    let minute = number(&digits[10..12]);
    let second = number(&digits[12..14]);

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
}

/// Parse a signed zone offset into seconds east of UTC.
fn parse_offset(suffix: &str) -> Option<i64> {
    if !suffix.is_ascii() {
        return None;
    }
    let (sign, rest) = match suffix.as_bytes().first()? {
        b'+' => (1, &suffix[1..]),
        b'-' => (-1, &suffix[1..]),
        _ => return None,
    };

    let (hours, minutes) = match rest.len() {
        2 => (rest, None),
        4 => (&rest[..2], Some(&rest[2..])),
        5 if rest.as_bytes()[2] == b':' => (&rest[..2], Some(&rest[3..])),
        _ => return None,
    };
    if !is_digits(hours) || !minutes.is_none_or(is_digits) {
        return None;
    }

    let hours = i64::from(number(hours));
    let minutes = minutes.map(|m| i64::from(number(m))).unwrap_or(0);
    if minutes >= 60 {
        return None;
    }
    let total = hours * 3600 + minutes * 60;
    if total > MAX_OFFSET_HOURS * 3600 {
        return None;
    }
    Some(sign * total)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Decimal value of a short, already validated ASCII digit run.
fn number(digits: &str) -> u32 {
    digits
        .bytes()
        .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}
