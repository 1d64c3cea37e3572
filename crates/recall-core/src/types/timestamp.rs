// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::TimeDelta;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;

/// A UTC instant. Serialized as an RFC 3339 string.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn new(ts: DateTime<Utc>) -> Self {
        Self(ts)
    }

    /// The wall clock. Only the front end reads it; scheduling code takes
    /// `now` as a parameter.
    #[cfg(feature = "clock")]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn parse(s: &str) -> Fallible<Self> {
        let ts = DateTime::parse_from_rfc3339(s.trim())?;
        Ok(Self(ts.with_timezone(&Utc)))
    }

    pub fn into_inner(self) -> DateTime<Utc> {
        self.0
    }

    /// The same text serde writes: UTC with a `Z` suffix.
    pub fn to_rfc3339(self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    /// Adds a whole number of days. Returns `None` if the result is not
    /// representable.
    pub fn checked_add_days(self, days: u32) -> Option<Self> {
        let delta = TimeDelta::try_days(i64::from(days))?;
        self.0.checked_add_signed(delta).map(Self)
    }

    /// Subtracts a whole number of days. Returns `None` if the result is not
    /// representable.
    pub fn checked_sub_days(self, days: u32) -> Option<Self> {
        let delta = TimeDelta::try_days(i64::from(days))?;
        self.0.checked_sub_signed(delta).map(Self)
    }

    /// Whole days elapsed from `earlier` to `self`, floored. Zero if
    /// `earlier` is in the future.
    pub fn days_since(self, earlier: Timestamp) -> u32 {
        let days = (self.0 - earlier.0).num_days().max(0);
        u32::try_from(days).unwrap_or(u32::MAX)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_to_utc() -> Fallible<()> {
        let a = Timestamp::parse("2025-03-01T12:00:00+02:00")?;
        let b = Timestamp::parse("2025-03-01T10:00:00Z")?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn test_parse_garbage() {
        assert!(Timestamp::parse("yesterday").is_err());
    }

    #[test]
    fn test_days_since() -> Fallible<()> {
        let a = Timestamp::parse("2025-01-01T08:00:00Z")?;
        let b = Timestamp::parse("2025-01-04T07:59:59Z")?;
        assert_eq!(b.days_since(a), 2);
        assert_eq!(a.days_since(b), 0);
        assert_eq!(a.days_since(a), 0);
        Ok(())
    }

    #[test]
    fn test_checked_add_days() -> Fallible<()> {
        let a = Timestamp::parse("2025-01-01T00:00:00Z")?;
        let b = Timestamp::parse("2025-01-11T00:00:00Z")?;
        assert_eq!(a.checked_add_days(10), Some(b));
        assert_eq!(a.checked_add_days(0), Some(a));
        let max = Timestamp::new(DateTime::<Utc>::MAX_UTC);
        assert_eq!(max.checked_add_days(1), None);
        Ok(())
    }

    #[test]
    fn test_checked_sub_days() -> Fallible<()> {
        let a = Timestamp::parse("2025-01-11T00:00:00Z")?;
        let b = Timestamp::parse("2025-01-01T00:00:00Z")?;
        assert_eq!(a.checked_sub_days(10), Some(b));
        let min = Timestamp::new(DateTime::<Utc>::MIN_UTC);
        assert_eq!(min.checked_sub_days(1), None);
        Ok(())
    }

    #[test]
    fn test_display_matches_serde() -> Fallible<()> {
        let ts = Timestamp::parse("2025-01-01T09:30:00+02:00")?;
        assert_eq!(ts.to_string(), "2025-01-01T07:30:00Z");
        assert_eq!(serde_json::to_string(&ts)?, format!("\"{ts}\""));
        Ok(())
    }

    #[test]
    fn test_serde() -> Fallible<()> {
        let ts = Timestamp::parse("2025-01-01T00:00:00Z")?;
        let json = serde_json::to_string(&ts)?;
        assert_eq!(json, "\"2025-01-01T00:00:00Z\"");
        let back: Timestamp = serde_json::from_str(&json)?;
        assert_eq!(back, ts);
        Ok(())
    }
}
