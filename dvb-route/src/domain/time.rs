//! Wire timestamps for the VVO WebAPI.
//!
//! The API exchanges instants in a Microsoft-JSON style format:
//! `/Date(<unix millis><sign><HH><MM>)/`, for example
//! `/Date(1609459200000+0100)/`. The offset is the local UTC offset at
//! the time of the event and may be omitted, in which case UTC is assumed.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, FixedOffset, Local, SubsecRound, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

const PREFIX: &str = "/Date(";
const SUFFIX: &str = ")/";

/// Error returned when parsing an invalid timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// An instant with the UTC offset it was reported in.
///
/// Held at millisecond precision, the resolution of the wire format.
///
/// # Examples
///
/// ```
/// use dvb_route::domain::DvbTime;
///
/// let t = DvbTime::parse("/Date(1609459200000+0100)/").unwrap();
/// assert_eq!(t.to_rfc3339(), "2021-01-01T01:00:00+01:00");
/// assert_eq!(t.to_string(), "/Date(1609459200000+0100)/");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DvbTime(DateTime<FixedOffset>);

impl DvbTime {
    fn new(dt: DateTime<FixedOffset>) -> Self {
        Self(dt.trunc_subsecs(3))
    }

    /// The current local time.
    pub fn now() -> Self {
        Self::from(Local::now())
    }

    /// The local time `mins` minutes from now.
    pub fn in_n_minutes(mins: i64) -> Self {
        Self::from(Local::now() + Duration::minutes(mins))
    }

    /// Whole minutes from `other` until this instant, negative if already past.
    pub fn minutes_after(&self, other: DvbTime) -> i64 {
        (self.0 - other.0).num_minutes()
    }

    /// Time left until this instant, e.g. `"5min"`.
    ///
    /// ```
    /// use dvb_route::domain::DvbTime;
    ///
    /// assert!(DvbTime::in_n_minutes(10).wait().ends_with("min"));
    /// ```
    pub fn wait(&self) -> String {
        format!("{}min", self.minutes_after(Self::now()))
    }

    /// Parse a timestamp in wire format or RFC 3339.
    ///
    /// # Examples
    ///
    /// ```
    /// use dvb_route::domain::DvbTime;
    ///
    /// assert!(DvbTime::parse("/Date(1609459200000)/").is_ok());
    /// assert!(DvbTime::parse("/Date(1609459200000-0530)/").is_ok());
    /// assert!(DvbTime::parse("2021-01-01T01:00:00+01:00").is_ok());
    ///
    /// assert!(DvbTime::parse("/Date()/").is_err());
    /// assert!(DvbTime::parse("/Date(16094592+01)/").is_err());
    /// assert!(DvbTime::parse("yesterday").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        if s.starts_with(PREFIX) {
            Self::parse_wire(s)
        } else {
            DateTime::parse_from_rfc3339(s)
                .map(Self::new)
                .map_err(|_| TimeError::new("expected /Date(...)/ or RFC 3339"))
        }
    }

    fn parse_wire(s: &str) -> Result<Self, TimeError> {
        let inner = s
            .strip_prefix(PREFIX)
            .and_then(|rest| rest.strip_suffix(SUFFIX))
            .ok_or_else(|| TimeError::new("expected /Date(...)/ wrapper"))?;

        // A leading '-' belongs to the millis (pre-1970), so the offset sign
        // is searched for after the first byte.
        let split = inner
            .get(1..)
            .and_then(|rest| rest.find(['+', '-']))
            .map(|i| i + 1);

        let (millis, offset) = match split {
            Some(i) => (&inner[..i], Some(&inner[i..])),
            None => (inner, None),
        };

        if millis.is_empty() {
            return Err(TimeError::new("missing milliseconds"));
        }
        let millis: i64 = millis
            .parse()
            .map_err(|_| TimeError::new("milliseconds must be an integer"))?;

        let offset = match offset {
            Some(offset) => parse_offset(offset)?,
            None => FixedOffset::east_opt(0).ok_or_else(|| TimeError::new("invalid offset"))?,
        };

        let utc = DateTime::<Utc>::from_timestamp_millis(millis)
            .ok_or_else(|| TimeError::new("timestamp out of range"))?;

        Ok(Self::new(utc.with_timezone(&offset)))
    }

    /// Returns the underlying date-time.
    pub fn as_datetime(&self) -> DateTime<FixedOffset> {
        self.0
    }

    /// Milliseconds since the Unix epoch.
    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Formats as RFC 3339 in the stored offset.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }
}

/// Parse a `+HHMM` / `-HHMM` offset.
fn parse_offset(s: &str) -> Result<FixedOffset, TimeError> {
    let bytes = s.as_bytes();
    if bytes.len() != 5 {
        return Err(TimeError::new("offset must be +HHMM or -HHMM"));
    }

    let sign = match bytes[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return Err(TimeError::new("offset must start with + or -")),
    };

    let hours =
        parse_two_digits(&bytes[1..3]).ok_or_else(|| TimeError::new("invalid offset hours"))?;
    let minutes =
        parse_two_digits(&bytes[3..5]).ok_or_else(|| TimeError::new("invalid offset minutes"))?;
    if minutes > 59 {
        return Err(TimeError::new("offset minutes must be 0-59"));
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| TimeError::new("offset out of range"))
}

/// Parse two ASCII digit bytes.
fn parse_two_digits(bytes: &[u8]) -> Option<i32> {
    match bytes {
        [a, b] if a.is_ascii_digit() && b.is_ascii_digit() => {
            Some(i32::from(a - b'0') * 10 + i32::from(b - b'0'))
        }
        _ => None,
    }
}

impl From<DateTime<FixedOffset>> for DvbTime {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self::new(dt)
    }
}

impl From<DateTime<Local>> for DvbTime {
    fn from(dt: DateTime<Local>) -> Self {
        Self::new(dt.fixed_offset())
    }
}

impl From<DateTime<Utc>> for DvbTime {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::new(dt.fixed_offset())
    }
}

impl FromStr for DvbTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for DvbTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DvbTime({})", self.to_rfc3339())
    }
}

impl fmt::Display for DvbTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let offset = self.0.offset().local_minus_utc();
        let sign = if offset < 0 { '-' } else { '+' };
        let minutes = offset.abs() / 60;

        write!(
            f,
            "{PREFIX}{}{sign}{:02}{:02}{SUFFIX}",
            self.timestamp_millis(),
            minutes / 60,
            minutes % 60
        )
    }
}

impl Serialize for DvbTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DvbTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(DvbTimeVisitor)
    }
}

struct DvbTimeVisitor;

impl Visitor<'_> for DvbTimeVisitor {
    type Value = DvbTime;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a \"/Date(...)/\" or RFC 3339 timestamp")
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Self::Value, E> {
        DvbTime::parse(s).map_err(|_| E::invalid_value(de::Unexpected::Str(s), &self))
    }
}
