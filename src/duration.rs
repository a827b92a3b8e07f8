use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// a span of time with second granularity. Used for settings such as
/// how long access logs are retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    seconds: u64,
}

impl Duration {
    pub const fn seconds(n: u64) -> Self {
        Self { seconds: n }
    }

    // u32 inputs keep the u64 products from overflowing
    pub const fn minutes(n: u32) -> Self {
        Self { seconds: n as u64 * MINUTE }
    }

    pub const fn hours(n: u32) -> Self {
        Self { seconds: n as u64 * HOUR }
    }

    pub const fn days(n: u32) -> Self {
        Self { seconds: n as u64 * DAY }
    }

    /// lifecycle rules only accept a whole number of days.
    pub fn to_days(&self) -> Result<u32> {
        if self.seconds % DAY != 0 {
            return Err(Error::FractionalDays(self.to_string()));
        }
        u32::try_from(self.seconds / DAY).map_err(|_| Error::InvalidDuration(self.to_string()))
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.seconds;
        if s != 0 && s % DAY == 0 {
            write!(f, "{}d", s / DAY)
        } else if s != 0 && s % HOUR == 0 {
            write!(f, "{}h", s / HOUR)
        } else if s != 0 && s % MINUTE == 0 {
            write!(f, "{}m", s / MINUTE)
        } else {
            write!(f, "{s}s")
        }
    }
}

impl FromStr for Duration {
    type Err = Error;

    /// accepts `14d`, `336h`, `20160m`, `60s`, or a bare number
    /// which is interpreted as days.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let invalid = || Error::InvalidDuration(s.to_string());
        let split_at = trimmed.find(|c: char| !c.is_ascii_digit()).unwrap_or(trimmed.len());
        let (num, unit) = trimmed.split_at(split_at);
        if num.is_empty() {
            return Err(invalid());
        }
        let n: u64 = num.parse().map_err(|_| invalid())?;
        let multiplier = match unit.trim() {
            "" | "d" => DAY,
            "h" => HOUR,
            "m" => MINUTE,
            "s" => 1,
            _ => return Err(invalid()),
        };
        let seconds = n.checked_mul(multiplier).ok_or_else(invalid)?;
        Ok(Duration { seconds })
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Days(u64),
            Text(String),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Days(n) => n.checked_mul(DAY)
                .map(Duration::seconds)
                .ok_or_else(|| serde::de::Error::custom(format!("{n} days is too large"))),
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}
