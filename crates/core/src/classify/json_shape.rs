//! JSON data-shape inference: relational (SQL-like), document (NoSQL-like)
//! or corrupted.
//!
//! Content is validated and walked through [`RawValue`] and [`IgnoredAny`]
//! rather than materialized as a `serde_json::Value`. Only the key sets of
//! the top-level object (or the first record of a top-level array) are
//! decoded. The skipping path does not convert numbers, does not check
//! `\u` escapes for surrogate pairing and does not recurse, so out-of-range
//! numbers, lone surrogates and deep nesting are accepted like any other
//! grammatically valid JSON.

use std::fmt;

use serde::de::{Deserialize, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde_json::value::RawValue;
use tracing::{debug, warn};

use crate::model::JsonShape;

type Markers = &'static [(&'static [&'static str], JsonShape)];

/// Keys looked up on the first record of an array of objects, in order.
const RECORD_MARKERS: Markers =
    &[(&["collection", "document"], JsonShape::NoSql), (&["table", "rows"], JsonShape::Sql)];

/// Keys looked up on a top-level object.
const OBJECT_MARKERS: Markers = &[(&["tables", "schema"], JsonShape::Sql)];

/// Parse `content` and infer its shape. Never fails: unparseable input is
/// [`JsonShape::Corrupted`].
pub fn classify_json_shape(content: &str) -> JsonShape {
    let shape = serde_json::from_str::<&RawValue>(content).and_then(infer_shape);
    match shape {
        Ok(shape) => shape,
        Err(err) => {
            warn!(error = %err, "content is not valid JSON");
            JsonShape::Corrupted
        }
    }
}

/// Decide the shape of an already-validated value.
///
/// Only the first element of an array of objects is inspected. An array of
/// objects without recognized keys does not fall back to the object markers;
/// it lands on the [`JsonShape::NoSql`] default.
fn infer_shape(raw: &RawValue) -> serde_json::Result<JsonShape> {
    let text = raw.get();

    if text.starts_with('[') {
        let items: Vec<&RawValue> = serde_json::from_str(text)?;
        if items.iter().all(|item| item.get().starts_with('{')) {
            let keys = match items.first() {
                Some(first) => ObjectKeys::parse(first)?,
                None => ObjectKeys::default(),
            };
            if let Some(shape) = keys.match_markers(RECORD_MARKERS) {
                debug!(%shape, "matched record markers");
                return Ok(shape);
            }
        }
    } else if text.starts_with('{') {
        if let Some(shape) = ObjectKeys::parse(raw)?.match_markers(OBJECT_MARKERS) {
            debug!(%shape, "matched object markers");
            return Ok(shape);
        }
    }

    debug!("no shape markers found, defaulting to document");
    Ok(JsonShape::NoSql)
}

/// Decoded key set of one JSON object. Keys are kept as bytes so that keys
/// holding lone surrogates (encoded as WTF-8) still compare correctly.
#[derive(Debug, Default)]
struct ObjectKeys(Vec<Vec<u8>>);

impl ObjectKeys {
    fn parse(raw: &RawValue) -> serde_json::Result<Self> {
        serde_json::from_str(raw.get())
    }

    fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|k| k.as_slice() == key.as_bytes())
    }

    fn match_markers(&self, markers: Markers) -> Option<JsonShape> {
        markers
            .iter()
            .find(|(keys, _)| keys.iter().any(|k| self.contains(k)))
            .map(|(_, shape)| *shape)
    }
}

impl<'de> Deserialize<'de> for ObjectKeys {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeysVisitor;

        impl<'de> Visitor<'de> for KeysVisitor {
            type Value = ObjectKeys;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ObjectKeys, A::Error> {
                let mut keys = Vec::new();
                while let Some(KeyBytes(key)) = map.next_key()? {
                    map.next_value::<IgnoredAny>()?;
                    keys.push(key);
                }
                Ok(ObjectKeys(keys))
            }
        }

        deserializer.deserialize_map(KeysVisitor)
    }
}

/// An object key read through `deserialize_bytes`, which skips UTF-8 validation.
struct KeyBytes(Vec<u8>);

impl<'de> Deserialize<'de> for KeyBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl<'de> Visitor<'de> for KeyVisitor {
            type Value = KeyBytes;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object key")
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<KeyBytes, E> {
                Ok(KeyBytes(v.to_vec()))
            }

            fn visit_str<E>(self, v: &str) -> Result<KeyBytes, E> {
                Ok(KeyBytes(v.as_bytes().to_vec()))
            }
        }

        deserializer.deserialize_bytes(KeyVisitor)
    }
}
