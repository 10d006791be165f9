use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;

/// A flag reported by the backend as `1`, `0` or absent/`null`.
///
/// Booleans map directly; any other JSON value reads as unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TriState {
    True,
    False,
    #[default]
    Unknown,
}

impl TriState {
    /// Returns true only for a definite `1`.
    #[must_use]
    pub fn is_true(self) -> bool {
        self == TriState::True
    }

    /// Returns true only for a definite `0`.
    #[must_use]
    pub fn is_false(self) -> bool {
        self == TriState::False
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => TriState::True,
            Some(false) => TriState::False,
            None => TriState::Unknown,
        }
    }
}

impl Serialize for TriState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            TriState::True => serializer.serialize_u8(1),
            TriState::False => serializer.serialize_u8(0),
            TriState::Unknown => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for TriState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TriStateVisitor;

        impl<'de> de::Visitor<'de> for TriStateVisitor {
            type Value = TriState;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("1, 0, a boolean, or null")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<TriState, E> {
                Ok(match v {
                    1 => TriState::True,
                    0 => TriState::False,
                    _ => TriState::Unknown,
                })
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<TriState, E> {
                Ok(match v {
                    1 => TriState::True,
                    0 => TriState::False,
                    _ => TriState::Unknown,
                })
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<TriState, E> {
                Ok(if v == 1.0 {
                    TriState::True
                } else if v == 0.0 {
                    TriState::False
                } else {
                    TriState::Unknown
                })
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<TriState, E> {
                Ok(Some(v).into())
            }

            fn visit_str<E: de::Error>(self, _: &str) -> Result<TriState, E> {
                Ok(TriState::Unknown)
            }

            fn visit_none<E: de::Error>(self) -> Result<TriState, E> {
                Ok(TriState::Unknown)
            }

            fn visit_unit<E: de::Error>(self) -> Result<TriState, E> {
                Ok(TriState::Unknown)
            }

            fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<TriState, D::Error> {
                d.deserialize_any(self)
            }

            fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<TriState, A::Error> {
                while seq.next_element::<de::IgnoredAny>()?.is_some() {}
                Ok(TriState::Unknown)
            }

            fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<TriState, A::Error> {
                while map.next_entry::<de::IgnoredAny, de::IgnoredAny>()?.is_some() {}
                Ok(TriState::Unknown)
            }
        }

        deserializer.deserialize_any(TriStateVisitor)
    }
}
