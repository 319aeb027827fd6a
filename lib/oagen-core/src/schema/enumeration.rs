use indexmap::IndexSet;
use serde_json::Value;

use super::{SchemaAttributes, simple_schema};
use crate::unit::{Unit, UnitMap};

/// A `type: string` schema restricted to a list of values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnumSchema {
    attributes: SchemaAttributes,
    values: IndexSet<String>,
}

simple_schema!(EnumSchema, &[]);

impl EnumSchema {
    /// Creates an enumeration, ignoring duplicated values.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attributes: SchemaAttributes::default(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// The values, in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    /// Adds a value, ignored when already present.
    pub fn add_value(&mut self, value: impl Into<String>) -> &mut Self {
        self.values.insert(value.into());
        self
    }

    /// Removes a value.
    pub fn remove_value(&mut self, value: &str) -> &mut Self {
        self.values.shift_remove(value);
        self
    }
}

impl Unit for EnumSchema {
    fn to_map(&self) -> UnitMap {
        let mut map = UnitMap::new();
        self.attributes.write(&mut map, "string", None);
        if !self.values.is_empty() {
            let values = self.values.iter().map(|value| Value::from(value.as_str()));
            map.insert("enum".to_string(), Value::Array(values.collect()));
        }
        map
    }
}
