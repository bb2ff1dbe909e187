//! Serialized envelope and external (JSON) representation.
//!
//! Two different shapes leave a collection:
//!
//! - The envelope, `{"items": [[key, value], ...]}`, keeps every key with its
//!   kind and round-trips through `serialize` / `unserialize`.
//! - The external representation is what a JSON consumer expects: an array
//!   when the keys are `0..n` in order, an object keyed by key strings
//!   otherwise.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use tracing::trace;

use super::entries::{self, Entries};
use super::key::Key;
use super::value::Value;
use crate::error::Result;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    items: Vec<(&'a Key, &'a Value)>,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    items: Vec<(Key, Value)>,
}

pub(crate) fn encode(entries: &Entries) -> Result<String> {
    let envelope = EnvelopeRef {
        items: entries.iter().collect(),
    };
    let text = serde_json::to_string(&envelope)?;
    trace!(count = entries.len(), bytes = text.len(), "encoded collection");
    Ok(text)
}

pub(crate) fn decode(text: &str) -> Result<Entries> {
    let envelope: Envelope = serde_json::from_str(text)?;
    trace!(count = envelope.items.len(), "decoded collection");
    Ok(envelope.items.into_iter().collect())
}

pub(crate) fn serialize_external<S>(
    entries: &Entries,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if entries::is_list(entries) {
        let mut seq = serializer.serialize_seq(Some(entries.len()))?;
        for value in entries.values() {
            seq.serialize_element(value)?;
        }
        seq.end()
    } else {
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            map.serialize_entry(&key.to_string(), value)?;
        }
        map.end()
    }
}

pub(crate) fn to_json(entries: &Entries) -> serde_json::Value {
    struct External<'a>(&'a Entries);

    impl Serialize for External<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
            serialize_external(self.0, serializer)
        }
    }

    // Keys are stringified and values are plain JSON shapes, so this cannot fail.
    serde_json::to_value(External(entries)).unwrap_or(serde_json::Value::Null)
}
