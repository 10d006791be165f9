use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;

/// Measured uplink throughput of a node, as loosely typed as the backend sends it.
///
/// The raw form is kept for display; [`Uplink::value`] gives the integer used
/// for tiering.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Uplink {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl Uplink {
    /// Integer reading of the uplink. Anything unparseable reads as 0.
    ///
    /// Strings are read like a leading-integer parse: optional whitespace and sign,
    /// then as many digits as are present (`"123abc"` reads as 123).
    #[must_use]
    pub fn value(&self) -> i64 {
        match self {
            Uplink::Number(n) if n.is_finite() => n.trunc() as i64,
            Uplink::Number(_) | Uplink::Missing => 0,
            Uplink::Text(raw) => parse_leading_int(raw).unwrap_or(0),
        }
    }
}

fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end]
        .parse::<i64>()
        .unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Renders the raw value, falling back to `0` for missing or empty values.
impl fmt::Display for Uplink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Uplink::Number(n) if *n == 0.0 || n.is_nan() => f.write_str("0"),
            Uplink::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Uplink::Number(n) => write!(f, "{n}"),
            Uplink::Text(raw) if !raw.is_empty() => f.write_str(raw),
            Uplink::Text(_) | Uplink::Missing => f.write_str("0"),
        }
    }
}

impl Serialize for Uplink {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Uplink::Number(n) => serializer.serialize_f64(*n),
            Uplink::Text(raw) => serializer.serialize_str(raw),
            Uplink::Missing => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Uplink {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct UplinkVisitor;

        impl<'de> de::Visitor<'de> for UplinkVisitor {
            type Value = Uplink;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a number, a numeric string, or null")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Uplink, E> {
                Ok(Uplink::Number(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Uplink, E> {
                Ok(Uplink::Number(v as f64))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Uplink, E> {
                Ok(Uplink::Number(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Uplink, E> {
                Ok(Uplink::Text(v.to_string()))
            }

            fn visit_bool<E: de::Error>(self, _: bool) -> Result<Uplink, E> {
                Ok(Uplink::Missing)
            }

            fn visit_none<E: de::Error>(self) -> Result<Uplink, E> {
                Ok(Uplink::Missing)
            }

            fn visit_unit<E: de::Error>(self) -> Result<Uplink, E> {
                Ok(Uplink::Missing)
            }

            fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Uplink, D::Error> {
                d.deserialize_any(self)
            }
        }

        deserializer.deserialize_any(UplinkVisitor)
    }
}
