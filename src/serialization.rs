//! Serialization for the `serde` feature.
//!
//! Codes serialize as their fixed wire value so the encoding stays stable
//! across languages. Failures serialize as a flat record; the cause is
//! flattened to its `Display` text, so failures serialize one way only.
//! Metadata keeps insertion order and repeated keys, so it is written as a
//! sequence of `[key, value]` pairs rather than a map.

use crate::{FailureCode, NativeHookFailure};
use serde::de::Error as _;
use serde::ser::{SerializeSeq, SerializeStruct};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

impl Serialize for FailureCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.as_u16())
    }
}

impl<'de> Deserialize<'de> for FailureCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u16::deserialize(deserializer)?;
        FailureCode::try_from(raw).map_err(D::Error::custom)
    }
}

struct Metadata<'a>(&'a NativeHookFailure);

impl Serialize for Metadata<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let pairs = self.0.metadata();
        let mut seq = serializer.serialize_seq(Some(pairs.len()))?;
        for (key, value) in pairs {
            seq.serialize_element(&(*key, value.as_str()))?;
        }
        seq.end()
    }
}

impl Serialize for NativeHookFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("NativeHookFailure", 6)?;
        state.serialize_field("code", &self.code())?;
        state.serialize_field("name", self.code().name())?;
        state.serialize_field("message", &self.message())?;
        state.serialize_field("cause", &self.cause().map(|cause| cause.to_string()))?;
        state.serialize_field("native", &self.unrecognized_code())?;
        state.serialize_field("metadata", &Metadata(self))?;
        state.end()
    }
}
