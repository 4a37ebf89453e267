use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::InvalidTime;

/// Displayed in place of a time or holder for tracks without a record.
pub const UNSET: &str = "—";

static TIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:([0-9]+):)?([0-5]?[0-9])\.([0-9]{1,3})$").expect("invalid time regex")
});

/// Whether `text` is a race time like `58.5`, `7.12` or `1:05.250`.
///
/// Surrounding whitespace is not tolerated.
pub fn validate(text: &str) -> bool {
    TIME_REGEX.is_match(text)
}

/// Rewrites a race time into its canonical `M:SS.FFF` form.
///
/// Minutes default to `0`, seconds are padded to two digits and the
/// sub-second digits are kept exactly as supplied.
pub fn normalize(text: &str) -> Result<CanonicalTime, InvalidTime> {
    TIME_REGEX
        .captures(text)
        .map(CanonicalTime::from_captures)
        .ok_or_else(|| InvalidTime(text.to_owned()))
}

/// Value used to order times, lower is faster. `None` stands for a track
/// without a record.
pub fn comparable_value(time: Option<&CanonicalTime>) -> Option<u64> {
    time.map(CanonicalTime::comparable_value)
}

/// Whether `new` beats `current`. Any time beats an unset record.
pub fn is_faster(new: &CanonicalTime, current: Option<&CanonicalTime>) -> bool {
    match comparable_value(current) {
        Some(current) => new.comparable_value() < current,
        None => true,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalTime {
    minutes: String,
    seconds: u8,
    fraction: String,
}

impl CanonicalTime {
    fn from_captures(caps: Captures<'_>) -> Self {
        let minutes = caps.get(1).map_or("0", |m| m.as_str()).to_owned();

        // the regex limits seconds to at most 59
        let seconds = caps[2].bytes().fold(0, |secs, b| secs * 10 + (b - b'0'));
        let fraction = caps[3].to_owned();

        Self {
            minutes,
            seconds,
            fraction,
        }
    }

    pub fn minute_digits(&self) -> usize {
        self.minutes.len()
    }

    /// `minutes * 60_000 + seconds * 1000 + fraction`
    ///
    /// The fraction digits are read as a plain integer, so `.5` counts as 5
    /// and `.45` as 45. This does not match real milliseconds.
    pub fn comparable_value(&self) -> u64 {
        let minutes = self.minutes.bytes().fold(0_u64, |minutes, b| {
            minutes.saturating_mul(10).saturating_add((b - b'0') as u64)
        });

        let fraction = self
            .fraction
            .bytes()
            .fold(0, |fraction, b| fraction * 10 + (b - b'0') as u64);

        minutes
            .saturating_mul(60_000)
            .saturating_add(self.seconds as u64 * 1000)
            .saturating_add(fraction)
    }
}

impl Display for CanonicalTime {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}:{:02}.{}", self.minutes, self.seconds, self.fraction)
    }
}

impl FromStr for CanonicalTime {
    type Err = InvalidTime;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(s)
    }
}

impl Serialize for CanonicalTime {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CanonicalTime {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;

        normalize(&s).map_err(D::Error::custom)
    }
}
