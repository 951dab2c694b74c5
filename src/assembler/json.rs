//! JSON decoding of assembler arguments
//!
//! JSON objects are decoded with a map visitor so that entry order survives
//! decoding; it is the order tokens come out in. Shapes outside the documented
//! ones are rejected here rather than silently ignored.

use super::input::{ClassEntry, ClassInput, MapValue, ModifierMap};
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Unexpected, Visitor};
use std::fmt;
use thiserror::Error;

/// Errors decoding assembler arguments
#[derive(Debug, Error)]
pub enum InputError {
    #[error("invalid assembler arguments: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode a JSON array of arguments, e.g. `["a", false, {"hover": "b"}]`.
pub fn from_json(text: &str) -> Result<Vec<ClassInput>, InputError> {
    Ok(serde_json::from_str(text)?)
}

impl<'de> Deserialize<'de> for ClassInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ClassInputVisitor)
    }
}

struct ClassInputVisitor;

impl<'de> Visitor<'de> for ClassInputVisitor {
    type Value = ClassInput;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a class name, false, null or a modifier map")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(ClassInput::Class(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(ClassInput::Class(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        if v {
            Err(E::invalid_value(Unexpected::Bool(true), &self))
        } else {
            Ok(ClassInput::Falsy)
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ClassInput::Falsy)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ClassInput::Falsy)
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        ModifierMapVisitor.visit_map(map).map(ClassInput::Map)
    }
}

impl<'de> Deserialize<'de> for ModifierMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ModifierMapVisitor)
    }
}

struct ModifierMapVisitor;

impl<'de> Visitor<'de> for ModifierMapVisitor {
    type Value = ModifierMap;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a modifier map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut out = ModifierMap::new();
        while let Some((key, value)) = map.next_entry::<String, MapValue>()? {
            out.push(key, value);
        }
        Ok(out)
    }
}

impl<'de> Deserialize<'de> for MapValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MapValueVisitor)
    }
}

struct MapValueVisitor;

impl<'de> Visitor<'de> for MapValueVisitor {
    type Value = MapValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a boolean, a class name or a list of class names")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(MapValue::Toggle(v))
    }

    // An absent value excludes the key, same as `false`.
    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(MapValue::Toggle(false))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(MapValue::Toggle(false))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(MapValue::Class(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(MapValue::Class(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(entry) = seq.next_element::<ClassEntry>()? {
            entries.push(entry);
        }
        Ok(MapValue::Classes(entries))
    }
}

impl<'de> Deserialize<'de> for ClassEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ClassEntryVisitor)
    }
}

struct ClassEntryVisitor;

impl<'de> Visitor<'de> for ClassEntryVisitor {
    type Value = ClassEntry;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a class name, false or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(ClassEntry::Class(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(ClassEntry::Class(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        if v {
            Err(E::invalid_value(Unexpected::Bool(true), &self))
        } else {
            Ok(ClassEntry::Falsy)
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ClassEntry::Falsy)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ClassEntry::Falsy)
    }
}
