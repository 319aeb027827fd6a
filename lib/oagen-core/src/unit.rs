//! The contract shared by every node of an OpenAPI document.
//!
//! A [`Unit`] serializes itself into an insertion-ordered JSON map. Units that
//! can be registered in [`Components`](crate::Components) are
//! [`Referenceable`]: once registered they serialize as `{"$ref": "..."}`
//! wherever they are embedded.

use std::hash::{DefaultHasher, Hash, Hasher};

use serde_json::{Map, Value};

use crate::OpenApiError;

/// Serialized form of a unit: an insertion-ordered JSON object.
pub type UnitMap = Map<String, Value>;

/// A node of an OpenAPI document.
pub trait Unit {
    /// Serializes the node.
    ///
    /// The output omits every field left at its default value.
    fn to_map(&self) -> UnitMap;

    /// Serializes the node as a JSON value.
    fn to_value(&self) -> Value {
        Value::Object(self.to_map())
    }

    /// Fingerprint of the serialized node.
    ///
    /// Two nodes with the same serialized form share the same hash. This is
    /// used for structural deduplication only.
    fn content_hash(&self) -> String {
        let mut hasher = DefaultHasher::new();
        self.to_value().to_string().hash(&mut hasher);
        format!("{:016x}", hasher.finish())
    }
}

/// A node that can be registered in [`Components`](crate::Components).
///
/// The reference is only ever written by the registry: it is set when the
/// node is registered and cleared when it is removed or displaced.
pub trait Referenceable: Unit {
    /// The `#/components/...` path bound by the registry, if any.
    fn reference(&self) -> Option<&str>;

    /// The full body, ignoring the reference.
    fn body(&self) -> UnitMap;

    /// Serializes the node, short-circuiting to `{"$ref": ...}` when the node
    /// is registered and `auto_ref` is set.
    fn to_map_with(&self, auto_ref: bool) -> UnitMap {
        match self.reference() {
            Some(reference) if auto_ref => reference_map(reference),
            _ => self.body(),
        }
    }
}

/// Write access to the reference slot, only granted to the registry.
pub(crate) trait BindReference {
    fn bind_reference(&mut self, reference: Option<String>);
}

pub(crate) fn reference_map(reference: &str) -> UnitMap {
    let mut map = UnitMap::new();
    map.insert("$ref".to_string(), Value::from(reference));
    map
}

/// Trims the text, returns `None` when nothing is left.
pub(crate) fn optional_text(text: Option<&str>) -> Option<String> {
    let text = text?.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Trims the text, fails with `error` when nothing is left.
pub(crate) fn required_text(text: &str, error: OpenApiError) -> Result<String, OpenApiError> {
    optional_text(Some(text)).ok_or(error)
}

pub(crate) fn insert_text(map: &mut UnitMap, key: &str, text: Option<&String>) {
    if let Some(text) = text {
        map.insert(key.to_string(), Value::from(text.as_str()));
    }
}

pub(crate) fn insert_flag(map: &mut UnitMap, key: &str, flag: bool) {
    if flag {
        map.insert(key.to_string(), Value::Bool(true));
    }
}

pub(crate) fn insert_units<'a, U>(map: &mut UnitMap, key: &str, units: impl IntoIterator<Item = &'a U>)
where
    U: Unit + 'a,
{
    let values = units.into_iter().map(Unit::to_value).collect::<Vec<_>>();
    if !values.is_empty() {
        map.insert(key.to_string(), Value::Array(values));
    }
}

/// Implements [`serde::Serialize`] by delegating to [`Unit::to_map`].
macro_rules! serialize_unit {
    ($($unit:ty),+ $(,)?) => {
        $(
            impl serde::Serialize for $unit {
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: serde::Serializer,
                {
                    serde::Serialize::serialize(&crate::unit::Unit::to_map(self), serializer)
                }
            }
        )+
    };
}

pub(crate) use serialize_unit;
