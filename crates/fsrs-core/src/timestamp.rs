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

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::error::Error;

/// A monotonic wall-clock instant, always UTC.
///
/// The core never reads the process clock itself except via
/// [`Timestamp::now`], which is gated behind the `clock` feature so that
/// embedders who inject time (tests, deterministic replay) can disable it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn new(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    #[cfg(feature = "clock")]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn into_inner(self) -> DateTime<Utc> {
        self.0
    }

    /// Milliseconds since the Unix epoch; the default `card_id` source.
    pub fn timestamp_millis(self) -> i64 {
        self.0.timestamp_millis()
    }

    pub fn add_minutes(self, minutes: f64) -> Self {
        let nanos = (minutes * 60.0 * 1_000_000_000.0).round() as i64;
        Self(self.0 + Duration::nanoseconds(nanos))
    }

    /// Whole calendar days between `self` and an earlier timestamp, floored.
    /// Negative if `self` precedes `earlier`.
    pub fn days_since(self, earlier: Timestamp) -> i64 {
        (self.0 - earlier.0).num_seconds().div_euclid(86_400)
    }

    /// Canonical ISO-8601 (RFC 3339) UTC encoding, millisecond precision.
    pub fn to_canonical_string(self) -> String {
        self.0.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
    }

    /// Tolerant ISO-8601 parsing: accepts RFC 3339 with or without
    /// fractional seconds, and with any UTC-equivalent offset.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| Error::invalid_format(format!("invalid timestamp '{s}': {e}")))?;
        Ok(Self(dt.with_timezone(&Utc)))
    }
}
