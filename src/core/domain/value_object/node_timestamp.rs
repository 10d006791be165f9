//! Timestamps as reported by the node backend.
//!
//! The backend emits naive `YYYY-MM-DD HH:MM:SS` strings that are implicitly
//! UTC. Some callers hand in raw epoch seconds instead, so both shapes are kept.
//! Any other JSON value deserializes to a timestamp that never parses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;

/// A timestamp in either of the two shapes the dashboard accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeTimestamp {
    /// A zone-less date-time string, interpreted as UTC.
    Text(String),
    /// Seconds since the UNIX epoch.
    EpochSeconds(i64),
}

impl NodeTimestamp {
    /// Wraps a backend date-time string.
    pub fn text(value: impl Into<String>) -> Self {
        NodeTimestamp::Text(value.into())
    }

    /// Resolves the timestamp to an instant.
    ///
    /// Strings are read by swapping the first space for the ISO `T` separator and
    /// appending `Z` before RFC 3339 parsing. Returns `None` when that fails.
    #[must_use]
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            NodeTimestamp::Text(raw) => {
                let iso = format!("{}Z", raw.replacen(' ', "T", 1));
                DateTime::parse_from_rfc3339(&iso)
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc))
            }
            NodeTimestamp::EpochSeconds(secs) => DateTime::from_timestamp(*secs, 0),
        }
    }

    /// Milliseconds since the epoch, or `None` when the value cannot be parsed.
    #[must_use]
    pub fn epoch_millis(&self) -> Option<i64> {
        self.instant().map(|dt| dt.timestamp_millis())
    }
}

impl fmt::Display for NodeTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeTimestamp::Text(raw) => f.write_str(raw),
            NodeTimestamp::EpochSeconds(secs) => write!(f, "{secs}"),
        }
    }
}

impl Serialize for NodeTimestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            NodeTimestamp::Text(raw) => serializer.serialize_str(raw),
            NodeTimestamp::EpochSeconds(secs) => serializer.serialize_i64(*secs),
        }
    }
}

impl<'de> Deserialize<'de> for NodeTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TimestampVisitor;

        impl<'de> de::Visitor<'de> for TimestampVisitor {
            type Value = NodeTimestamp;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a date-time string or epoch seconds")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<NodeTimestamp, E> {
                Ok(NodeTimestamp::Text(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<NodeTimestamp, E> {
                Ok(NodeTimestamp::Text(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<NodeTimestamp, E> {
                Ok(NodeTimestamp::EpochSeconds(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<NodeTimestamp, E> {
                Ok(i64::try_from(v)
                    .map(NodeTimestamp::EpochSeconds)
                    .unwrap_or_else(|_| NodeTimestamp::Text(v.to_string())))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<NodeTimestamp, E> {
                Ok(NodeTimestamp::EpochSeconds(v.trunc() as i64))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<NodeTimestamp, E> {
                Ok(NodeTimestamp::Text(v.to_string()))
            }

            fn visit_unit<E: de::Error>(self) -> Result<NodeTimestamp, E> {
                Ok(NodeTimestamp::Text(String::new()))
            }

            fn visit_seq<A: de::SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> Result<NodeTimestamp, A::Error> {
                while seq.next_element::<de::IgnoredAny>()?.is_some() {}
                Ok(NodeTimestamp::Text(String::new()))
            }

            fn visit_map<A: de::MapAccess<'de>>(
                self,
                mut map: A,
            ) -> Result<NodeTimestamp, A::Error> {
                while map.next_entry::<de::IgnoredAny, de::IgnoredAny>()?.is_some() {}
                Ok(NodeTimestamp::Text(String::new()))
            }
        }

        deserializer.deserialize_any(TimestampVisitor)
    }
}

/// Which of a record's two check timestamps describes its latest activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveActivity<'a> {
    /// The later of the two timestamps; `None` when the record has neither.
    pub timestamp: Option<&'a NodeTimestamp>,
    /// `failed_check` is strictly later than `last_checked`.
    pub failed: bool,
}

impl<'a> EffectiveActivity<'a> {
    /// Picks between `last_checked` and `failed_check`.
    ///
    /// Absent timestamps count as the epoch. Unparseable ones never win a
    /// comparison, so a garbled `failed_check` cannot flag a record as failed.
    #[must_use]
    pub fn resolve(
        last_checked: Option<&'a NodeTimestamp>,
        failed_check: Option<&'a NodeTimestamp>,
    ) -> Self {
        let millis = |ts: Option<&NodeTimestamp>| match ts {
            Some(ts) => ts.epoch_millis(),
            None => Some(0),
        };

        let failed = match (millis(failed_check), millis(last_checked)) {
            (Some(failed), Some(last)) => failed > last,
            _ => false,
        };

        let timestamp = if failed { failed_check } else { last_checked };
        Self { timestamp, failed }
    }
}
