//! Serde helpers for the backend's loosely typed payloads.

use serde::{Deserializer, de};
use std::fmt;

/// Deserializes a non-negative counter, reading `null`, absent, negative or
/// non-numeric values as 0. Numeric strings are accepted.
pub mod lenient_count {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CountVisitor;

        impl<'de> de::Visitor<'de> for CountVisitor {
            type Value = u64;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a non-negative count")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
                Ok(v)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
                Ok(u64::try_from(v).unwrap_or(0))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<u64, E> {
                Ok(if v.is_finite() && v > 0.0 { v.trunc() as u64 } else { 0 })
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
                Ok(v.trim().parse::<u64>().unwrap_or(0))
            }

            fn visit_bool<E: de::Error>(self, _: bool) -> Result<u64, E> {
                Ok(0)
            }

            fn visit_none<E: de::Error>(self) -> Result<u64, E> {
                Ok(0)
            }

            fn visit_unit<E: de::Error>(self) -> Result<u64, E> {
                Ok(0)
            }

            fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<u64, D::Error> {
                d.deserialize_any(self)
            }
        }

        deserializer.deserialize_any(CountVisitor)
    }
}

/// Deserializes an optional display string. Numbers and booleans are
/// rendered as text; `null`, absent, arrays and objects read as `None`.
pub mod lenient_string {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TextVisitor;

        impl<'de> de::Visitor<'de> for TextVisitor {
            type Value = Option<String>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string or scalar")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Option<String>, E> {
                Ok(Some(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Option<String>, E> {
                Ok(Some(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Option<String>, E> {
                Ok(Some(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Option<String>, E> {
                Ok(Some(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Option<String>, E> {
                Ok(Some(v.to_string()))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Option<String>, E> {
                Ok(Some(v.to_string()))
            }

            fn visit_none<E: de::Error>(self) -> Result<Option<String>, E> {
                Ok(None)
            }

            fn visit_unit<E: de::Error>(self) -> Result<Option<String>, E> {
                Ok(None)
            }

            fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Option<String>, D::Error> {
                d.deserialize_any(self)
            }

            fn visit_seq<A: de::SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> Result<Option<String>, A::Error> {
                while seq.next_element::<de::IgnoredAny>()?.is_some() {}
                Ok(None)
            }

            fn visit_map<A: de::MapAccess<'de>>(
                self,
                mut map: A,
            ) -> Result<Option<String>, A::Error> {
                while map.next_entry::<de::IgnoredAny, de::IgnoredAny>()?.is_some() {}
                Ok(None)
            }
        }

        deserializer.deserialize_any(TextVisitor)
    }
}
