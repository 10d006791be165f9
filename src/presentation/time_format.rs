//! Coarse relative-age labels ("12s ago", "3h ago").
//!
//! [`RelativeAge`] is a plain value with a `Display` impl, so the per-second
//! label refresh can write straight into an existing buffer.

use crate::core::domain::value_object::NodeTimestamp;
use chrono::{DateTime, Utc};
use std::fmt;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Elapsed time bucketed into the largest whole unit, up to days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeAge {
    /// The timestamp lies in the future.
    JustNow,
    Seconds(i64),
    Minutes(i64),
    Hours(i64),
    Days(i64),
}

impl RelativeAge {
    /// Buckets a number of whole elapsed seconds.
    #[must_use]
    pub fn from_seconds(seconds: i64) -> Self {
        match seconds {
            s if s < 0 => RelativeAge::JustNow,
            s if s < MINUTE => RelativeAge::Seconds(s),
            s if s < HOUR => RelativeAge::Minutes(s / MINUTE),
            s if s < DAY => RelativeAge::Hours(s / HOUR),
            s => RelativeAge::Days(s / DAY),
        }
    }

    /// Age of `then` as seen at `now`, floored to whole seconds.
    #[must_use]
    pub fn between(then: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let millis = (now - then).num_milliseconds();
        Self::from_seconds(millis.div_euclid(1000))
    }

    /// Age of a backend timestamp; `None` when the timestamp cannot be parsed.
    #[must_use]
    pub fn of(timestamp: &NodeTimestamp, now: DateTime<Utc>) -> Option<Self> {
        timestamp.instant().map(|then| Self::between(then, now))
    }
}

impl fmt::Display for RelativeAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelativeAge::JustNow => f.write_str("just now"),
            RelativeAge::Seconds(n) => write!(f, "{n}s ago"),
            RelativeAge::Minutes(n) => write!(f, "{n}m ago"),
            RelativeAge::Hours(n) => write!(f, "{n}h ago"),
            RelativeAge::Days(n) => write!(f, "{n}d ago"),
        }
    }
}

/// Label shown for timestamps that cannot be parsed.
pub const UNKNOWN_AGE: &str = "—";

/// Relative label for an optional timestamp.
///
/// An absent timestamp is aged from the epoch; an unparseable one yields
/// [`UNKNOWN_AGE`].
#[must_use]
pub fn time_ago(timestamp: Option<&NodeTimestamp>, now: DateTime<Utc>) -> String {
    let age = match timestamp {
        Some(ts) => RelativeAge::of(ts, now),
        None => Some(RelativeAge::between(DateTime::<Utc>::default(), now)),
    };
    match age {
        Some(age) => age.to_string(),
        None => UNKNOWN_AGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn ago(seconds: i64) -> String {
        RelativeAge::between(now() - Duration::seconds(seconds), now()).to_string()
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(ago(0), "0s ago");
        assert_eq!(ago(59), "59s ago");
        assert_eq!(ago(60), "1m ago");
        assert_eq!(ago(3599), "59m ago");
        assert_eq!(ago(3600), "1h ago");
        assert_eq!(ago(86_399), "23h ago");
        assert_eq!(ago(86_400), "1d ago");
        assert_eq!(ago(86_400 * 400), "400d ago");
    }

    #[test]
    fn test_future_is_just_now() {
        assert_eq!(ago(-1), "just now");
        assert_eq!(
            RelativeAge::between(now() + Duration::milliseconds(1), now()),
            RelativeAge::JustNow
        );
    }

    #[test]
    fn test_partial_seconds_floor() {
        let then = now() - Duration::milliseconds(59_999);
        assert_eq!(RelativeAge::between(then, now()), RelativeAge::Seconds(59));
    }

    #[test]
    fn test_naive_string_input() {
        let ts = NodeTimestamp::text("2024-06-01 11:58:00");
        assert_eq!(time_ago(Some(&ts), now()), "2m ago");
    }

    #[test]
    fn test_epoch_seconds_input() {
        let ts = NodeTimestamp::EpochSeconds(now().timestamp() - 7200);
        assert_eq!(time_ago(Some(&ts), now()), "2h ago");
    }

    #[test]
    fn test_unparseable_input() {
        let ts = NodeTimestamp::text("garbage");
        assert_eq!(time_ago(Some(&ts), now()), UNKNOWN_AGE);
    }

    #[test]
    fn test_absent_input_ages_from_epoch() {
        let days = now().timestamp() / 86_400;
        assert_eq!(time_ago(None, now()), format!("{days}d ago"));
    }
}
